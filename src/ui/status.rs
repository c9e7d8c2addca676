use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

use crate::app::{Model, ToastLevel};
use crate::editor::Mode;

pub fn render_status_bar(model: &Model, frame: &mut Frame, area: Rect) {
    let (label, hint, bg) = match model.mode() {
        Mode::RichText => (" RICH TEXT", "Ctrl+D:markdown", Color::DarkGray),
        Mode::PlainText => (" MARKDOWN", "Ctrl+D:rich text", Color::Magenta),
    };

    let cursor_info = match model.mode() {
        Mode::RichText => {
            let c = model.editor.rich().cursor();
            format!("Block {}, Col {}", c.block + 1, c.offset + 1)
        }
        Mode::PlainText => {
            let c = model.editor.plain().cursor();
            format!("Ln {}, Col {}", c.line + 1, c.col + 1)
        }
    };

    let preview_indicator = if model.mode() == Mode::PlainText && !model.preview_enabled {
        " [no preview]"
    } else {
        ""
    };

    let status = format!("{label}  {cursor_info}{preview_indicator}  {hint}  F1:help  Ctrl+Q:quit");
    let status_bar = Paragraph::new(status).style(Style::default().bg(bg).fg(Color::White));
    frame.render_widget(status_bar, area);
}

pub fn render_toast_bar(model: &Model, frame: &mut Frame, area: Rect) {
    let Some((message, level)) = model.active_toast() else {
        return;
    };
    let (prefix, style) = match level {
        ToastLevel::Info => (
            "[info]",
            Style::default().bg(Color::DarkGray).fg(Color::White),
        ),
        ToastLevel::Warning => (
            "[warn]",
            Style::default().bg(Color::Yellow).fg(Color::Black),
        ),
        ToastLevel::Error => ("[error]", Style::default().bg(Color::Red).fg(Color::White)),
    };
    let toast = Paragraph::new(format!("{prefix} {message}")).style(style);
    frame.render_widget(toast, area);
}
