//! The editor widget: a rich-text/markdown mode switch over two surfaces.
//!
//! - [`EditorState`]: the `{content, mode}` value and its pure transitions
//! - [`EditorWidget`]: owns the state, both editing surfaces and the
//!   parent-facing callbacks
//! - [`RichSurface`]: the formatted editing surface (blocks and marks)
//! - [`PlainBuffer`]: the raw markdown text surface
//! - [`RootState`]: the root container's read-only view of the widget

mod buffer;
mod rich;
mod root;
mod state;
mod widget;

pub use buffer::{Cursor, PlainBuffer};
pub use rich::{FormatCommand, HeaderLevel, RichCursor, RichSurface};
pub use root::RootState;
pub use state::{EditorEvent, EditorState, Mode, Transition};
pub use widget::{EditorCallbacks, EditorWidget};

/// Direction for cursor movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

/// A text editing command, applied to whichever surface is active.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditCommand {
    InsertChar(char),
    InsertStr(String),
    DeleteBack,
    DeleteForward,
    SplitLine,
    Move(Direction),
    Home,
    End,
}
