//! Terminal UI components.
//!
//! - [`render`]: frame layout and top-level drawing
//! - [`preview_lines`]: markdown preview as styled terminal lines
//! - [`style`]: Theming and colors

pub mod style;

mod help;
mod panes;
mod preview;
mod render;
mod status;
mod toolbar;

pub use panes::{PaneLines, line_number_width, plain_lines, rich_lines};
pub use preview::preview_lines;
pub use render::{PREVIEW_TITLE, ScreenLayout, render, screen_layout};
pub use toolbar::{ToolbarButton, toolbar_buttons, toolbar_hit};

#[cfg(test)]
mod tests;
