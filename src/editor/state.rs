//! The mode-toggle state machine.
//!
//! Transitions are pure: they take the current state by reference and
//! return the next state together with the events the parent must see.
//! A failed conversion returns the error and the caller keeps the state it
//! already has, so content is never left half converted.

use std::fmt;

use tracing::debug;

use crate::convert::{ConvertError, Converter};

/// Which representation `content` currently holds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Mode {
    /// Content is HTML edited through the rich-text surface.
    #[default]
    RichText,
    /// Content is markdown edited as raw text.
    PlainText,
}

impl Mode {
    pub const fn is_markdown(self) -> bool {
        matches!(self, Self::PlainText)
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RichText => f.write_str("rich text"),
            Self::PlainText => f.write_str("markdown"),
        }
    }
}

/// Notification sent from the editor to its parent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorEvent {
    ModeChanged(Mode),
    ContentChanged(String),
}

/// Editor content and the mode it is valid for.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditorState {
    content: String,
    mode: Mode,
}

/// Result of applying a transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    pub state: EditorState,
    pub events: Vec<EditorEvent>,
}

impl Transition {
    fn unchanged(state: &EditorState) -> Self {
        Self {
            state: state.clone(),
            events: Vec::new(),
        }
    }

    pub fn is_noop(&self) -> bool {
        self.events.is_empty()
    }
}

impl EditorState {
    /// Empty rich-text state, as at mount.
    pub fn new() -> Self {
        Self::default()
    }

    /// State holding `content` in `mode`. The caller vouches that the content
    /// is a valid representation for that mode.
    pub const fn with_content(mode: Mode, content: String) -> Self {
        Self { content, mode }
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub const fn mode(&self) -> Mode {
        self.mode
    }

    /// Rich text to markdown. No-op when already in markdown mode.
    ///
    /// # Errors
    ///
    /// Returns the converter's error; the state is not consumed.
    pub fn toggle_to_markdown(&self, converter: &dyn Converter) -> Result<Transition, ConvertError> {
        if self.mode == Mode::PlainText {
            return Ok(Transition::unchanged(self));
        }
        let markdown = converter.html_to_markdown(&self.content)?;
        debug!(
            html_len = self.content.len(),
            markdown_len = markdown.len(),
            "toggle to markdown"
        );
        Ok(Transition {
            state: Self::with_content(Mode::PlainText, markdown.clone()),
            events: vec![
                EditorEvent::ModeChanged(Mode::PlainText),
                EditorEvent::ContentChanged(markdown),
            ],
        })
    }

    /// Markdown to rich text. No-op when already in rich-text mode.
    ///
    /// Both directions report the converted content to the parent.
    ///
    /// # Errors
    ///
    /// Returns the converter's error; the state is not consumed.
    pub fn toggle_to_rich_text(&self, converter: &dyn Converter) -> Result<Transition, ConvertError> {
        if self.mode == Mode::RichText {
            return Ok(Transition::unchanged(self));
        }
        let html = converter.markdown_to_html(&self.content)?;
        debug!(
            markdown_len = self.content.len(),
            html_len = html.len(),
            "toggle to rich text"
        );
        Ok(Transition {
            state: Self::with_content(Mode::RichText, html.clone()),
            events: vec![
                EditorEvent::ModeChanged(Mode::RichText),
                EditorEvent::ContentChanged(html),
            ],
        })
    }

    /// Replace the content with new raw input for the current mode.
    ///
    /// Only markdown-mode edits notify the parent.
    pub fn edit(&self, content: String) -> Transition {
        let events = if self.mode == Mode::PlainText {
            vec![EditorEvent::ContentChanged(content.clone())]
        } else {
            Vec::new()
        };
        Transition {
            state: Self::with_content(self.mode, content),
            events,
        }
    }
}
