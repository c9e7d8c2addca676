use super::*;
use crate::app::{Message, Model, ToastLevel, update};
use crate::editor::EditorWidget;
use ratatui::Terminal;
use ratatui::backend::TestBackend;

fn create_test_terminal() -> Terminal<TestBackend> {
    let backend = TestBackend::new(80, 40);
    Terminal::new(backend).unwrap()
}

fn model_with(html: &str) -> Model {
    let mut editor = EditorWidget::new();
    editor.load_html(html);
    Model::new(editor, (80, 40))
}

fn draw(model: &mut Model) -> String {
    let mut terminal = create_test_terminal();
    terminal.draw(|frame| render(model, frame)).unwrap();
    terminal
        .backend()
        .buffer()
        .content()
        .iter()
        .map(|c| c.symbol())
        .collect()
}

fn row_text(model: &mut Model, row: u16) -> String {
    let mut terminal = create_test_terminal();
    terminal.draw(|frame| render(model, frame)).unwrap();
    let buffer = terminal.backend().buffer();
    (0..buffer.area.width)
        .map(|x| buffer[(x, row)].symbol().to_string())
        .collect()
}

#[test]
fn test_rich_mode_shows_format_toolbar() {
    let mut model = model_with("<p>Hello</p>");
    let toolbar = row_text(&mut model, 0);
    for label in ["Normal", "H1", "H2", "H3", "Clean", "Markdown"] {
        assert!(toolbar.contains(label), "missing {label}: {toolbar:?}");
    }
    assert!(!toolbar.contains("Rich Text"));
}

#[test]
fn test_markdown_mode_shows_rich_text_button_only() {
    let mut model = update(model_with("<p>Hello</p>"), Message::ToggleMode);
    let toolbar = row_text(&mut model, 0);
    assert!(toolbar.contains("Rich Text"));
    assert!(!toolbar.contains("Clean"));
}

#[test]
fn test_rich_mode_renders_blocks_without_preview() {
    let mut model = model_with("<h1>Title</h1><ul><li>one</li></ul>");
    let content = draw(&mut model);
    assert!(content.contains("Rich text"));
    assert!(content.contains("Title"));
    assert!(content.contains("• one"));
    assert!(!content.contains(PREVIEW_TITLE));
}

#[test]
fn test_markdown_mode_renders_source_and_preview() {
    let mut model = update(
        model_with("<p><strong>bold</strong> move</p>"),
        Message::ToggleMode,
    );
    let content = draw(&mut model);
    assert!(content.contains("**bold** move"), "source missing");
    assert!(content.contains(PREVIEW_TITLE));
    assert!(content.contains("bold move"), "preview missing");
}

#[test]
fn test_preview_hidden_when_disabled() {
    let mut model = model_with("<p>Hi</p>");
    model.preview_enabled = false;
    let mut model = update(model, Message::ToggleMode);
    let content = draw(&mut model);
    assert!(content.contains("Markdown"));
    assert!(!content.contains(PREVIEW_TITLE));
    assert!(content.contains("[no preview]"));
}

#[test]
fn test_layout_splits_body_in_markdown_mode() {
    let model = update(model_with("<p>Hi</p>"), Message::ToggleMode);
    let layout = screen_layout(&model, ratatui::layout::Rect::new(0, 0, 80, 40));
    let preview = layout.preview.expect("preview pane");
    assert_eq!(layout.toolbar.height, 1);
    assert_eq!(layout.editor.y, 1);
    assert_eq!(preview.y, layout.editor.y + layout.editor.height);
    assert_eq!(layout.status.y, 39);
    assert!(layout.toast.is_none());
}

#[test]
fn test_status_bar_shows_mode() {
    let mut model = model_with("<p>Hi</p>");
    assert!(row_text(&mut model, 39).contains("RICH TEXT"));
    let mut model = update(model, Message::ToggleMode);
    assert!(row_text(&mut model, 39).contains("MARKDOWN"));
}

#[test]
fn test_toast_renders_above_status() {
    let mut model = model_with("<p>Hi</p>");
    model.show_toast(ToastLevel::Error, "Could not convert content: boom");
    let row = row_text(&mut model, 38);
    assert!(row.contains("[error] Could not convert content: boom"));
}

#[test]
fn test_help_overlay_renders() {
    let mut model = update(model_with("<p>Hi</p>"), Message::ToggleHelp);
    let content = draw(&mut model);
    assert!(content.contains("Help"));
    assert!(content.contains("Toggle rich text / markdown"));
    assert!(content.contains("any key closes"));
}

#[test]
fn test_toolbar_marks_active_heading() {
    let model = model_with("<h2>Sub</h2>");
    let buttons = toolbar_buttons(&model);
    let active: Vec<&str> = buttons
        .iter()
        .filter(|b| b.active)
        .map(|b| b.label.trim())
        .collect();
    assert_eq!(active, vec!["H2"]);
}

#[test]
fn test_render_with_tiny_terminal_does_not_panic() {
    let mut model = update(model_with("<p>Hi</p>"), Message::ToggleMode);
    let backend = TestBackend::new(10, 3);
    let mut terminal = Terminal::new(backend).unwrap();
    terminal.draw(|frame| render(&mut model, frame)).unwrap();
}
