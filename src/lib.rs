// Only allow lints that are either transitive-dependency noise or
// genuinely opinionated style choices that don't indicate real issues.
#![allow(
    // Transitive dependency version mismatches we can't control
    clippy::multiple_crate_versions,
    // module_name_repetitions is pure style preference (e.g. editor::EditorWidget)
    clippy::module_name_repetitions
)]

//! # Twinmark
//!
//! A terminal editor that toggles between rich text and raw markdown.
//!
//! Twinmark keeps one piece of content in one of two representations:
//! - Rich text (HTML) edited through a formatting toolbar
//! - Markdown source edited as plain text, with a live preview below it
//!
//! Toggling converts the content in place and notifies the parent.
//!
//! ## Architecture
//!
//! The editor widget is a pure state machine ([`editor::EditorState`])
//! wrapped by [`editor::EditorWidget`], which owns the two editing surfaces
//! and reports [`editor::EditorEvent`]s. The terminal front end is built
//! with The Elm Architecture (TEA):
//! - **Model**: Application state
//! - **Message**: Events and actions
//! - **Update**: Pure state transitions
//! - **View**: Render to terminal
//!
//! ## Modules
//!
//! - [`app`]: Root container, main loop and input mapping
//! - [`config`]: Saved default flags
//! - [`convert`]: HTML and markdown conversions
//! - [`document`]: Rich-text content model and its HTML form
//! - [`editor`]: Editor state machine and editing surfaces
//! - [`ui`]: Terminal UI components

pub mod app;
pub mod config;
pub mod convert;
pub mod document;
pub mod editor;
pub mod ui;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::app::{App, Message, Model, Seed};
    pub use crate::convert::{ComrakConverter, ConvertError, Converter};
    pub use crate::document::RichDocument;
    pub use crate::editor::{EditorEvent, EditorState, EditorWidget, Mode, RootState};
}
