use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::app::Model;
use crate::editor::Mode;

use super::{help, panes, preview, status, toolbar};

/// Title of the preview pane.
pub const PREVIEW_TITLE: &str = "Preview:";

/// Screen regions for one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenLayout {
    pub toolbar: Rect,
    pub editor: Rect,
    pub preview: Option<Rect>,
    pub toast: Option<Rect>,
    pub status: Rect,
}

/// Split the screen: toolbar on top, editor with the optional preview
/// below it, then toast and status rows at the bottom.
pub fn screen_layout(model: &Model, area: Rect) -> ScreenLayout {
    let toast_active = model.active_toast().is_some();
    let footer_rows = 1 + u16::from(toast_active);

    let toolbar = Rect {
        height: area.height.min(1),
        ..area
    };
    let body = Rect {
        y: area.y + toolbar.height,
        height: area.height.saturating_sub(toolbar.height + footer_rows),
        ..area
    };
    let (editor, preview) = if model.preview_visible() {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(body);
        (chunks[0], Some(chunks[1]))
    } else {
        (body, None)
    };
    let toast = toast_active.then(|| Rect {
        y: area.y + area.height.saturating_sub(2),
        height: 1,
        ..area
    });
    let status = Rect {
        y: area.y + area.height.saturating_sub(1),
        height: area.height.min(1),
        ..area
    };

    ScreenLayout {
        toolbar,
        editor,
        preview,
        toast,
        status,
    }
}

/// Render the complete UI.
pub fn render(model: &mut Model, frame: &mut Frame) {
    let area = frame.area();
    let layout = screen_layout(model, area);

    toolbar::render_toolbar(model, frame, layout.toolbar);
    render_editor(model, frame, layout.editor);
    if let Some(preview_area) = layout.preview {
        render_preview(model, frame, preview_area);
    }
    if let Some(toast_area) = layout.toast {
        status::render_toast_bar(model, frame, toast_area);
    }
    status::render_status_bar(model, frame, layout.status);

    if model.help_visible {
        help::render_help_overlay(model, frame, area);
    }
}

fn render_editor(model: &mut Model, frame: &mut Frame, area: Rect) {
    let title = match model.mode() {
        Mode::RichText => " Rich text ",
        Mode::PlainText => " Markdown ",
    };
    let block = Block::default().title(title).borders(Borders::ALL);
    let inner = block.inner(area);
    let visible_height = usize::from(inner.height);

    let content = match model.mode() {
        Mode::RichText => {
            let pane = panes::rich_lines(model.editor.rich());
            model.scroll_editor_to(pane.cursor_row, visible_height);
            pane.lines
                .into_iter()
                .skip(model.editor_scroll_offset)
                .take(visible_height)
                .collect()
        }
        Mode::PlainText => {
            model.scroll_editor_to(model.editor.plain().cursor().line, visible_height);
            panes::plain_lines(
                model.editor.plain(),
                model.editor_scroll_offset,
                visible_height,
            )
            .lines
        }
    };

    frame.render_widget(Clear, area);
    frame.render_widget(Paragraph::new(content).block(block), area);
}

fn render_preview(model: &mut Model, frame: &mut Frame, area: Rect) {
    let block = Block::default().title(PREVIEW_TITLE).borders(Borders::ALL);
    let inner = block.inner(area);
    let root = model.root_state();
    let lines = preview::preview_lines(&root.value, inner.width);

    let max_scroll = lines.len().saturating_sub(usize::from(inner.height));
    model.preview_scroll_offset = model.preview_scroll_offset.min(max_scroll);
    let visible: Vec<Line> = lines
        .into_iter()
        .skip(model.preview_scroll_offset)
        .take(usize::from(inner.height))
        .collect();

    frame.render_widget(Paragraph::new(visible).block(block), area);
}
