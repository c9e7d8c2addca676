use crate::convert::render_markdown_to_html;

use super::{EditorEvent, Mode};

/// The root container's view of the editor, maintained from events only.
///
/// `value` is whatever the editor last reported; `is_markdown` follows the
/// last mode change. The preview renders `value` when markdown mode is on.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RootState {
    pub value: String,
    pub is_markdown: bool,
}

impl RootState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn apply(&mut self, event: &EditorEvent) {
        match event {
            EditorEvent::ModeChanged(mode) => self.is_markdown = *mode == Mode::PlainText,
            EditorEvent::ContentChanged(value) => value.clone_into(&mut self.value),
        }
    }

    pub fn apply_all<'a>(&mut self, events: impl IntoIterator<Item = &'a EditorEvent>) {
        for event in events {
            self.apply(event);
        }
    }

    /// HTML for the preview pane, or `None` while in rich-text mode.
    pub fn preview_html(&self) -> Option<String> {
        self.is_markdown
            .then(|| render_markdown_to_html(&self.value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_empty_without_preview() {
        let root = RootState::new();
        assert_eq!(root.value, "");
        assert!(!root.is_markdown);
        assert_eq!(root.preview_html(), None);
    }

    #[test]
    fn test_mode_and_content_events() {
        let mut root = RootState::new();
        root.apply_all(&[
            EditorEvent::ModeChanged(Mode::PlainText),
            EditorEvent::ContentChanged("**hi**".to_string()),
        ]);
        assert!(root.is_markdown);
        assert_eq!(root.value, "**hi**");
        let preview = root.preview_html().unwrap_or_default();
        assert!(preview.contains("<strong>hi</strong>"));
    }

    #[test]
    fn test_leaving_markdown_hides_preview() {
        let mut root = RootState {
            value: "# x".to_string(),
            is_markdown: true,
        };
        root.apply(&EditorEvent::ModeChanged(Mode::RichText));
        assert!(!root.is_markdown);
        assert_eq!(root.preview_html(), None);
    }

    #[test]
    fn test_empty_markdown_previews_empty() {
        let mut root = RootState::new();
        root.apply(&EditorEvent::ModeChanged(Mode::PlainText));
        assert_eq!(root.preview_html(), Some(String::new()));
    }
}
