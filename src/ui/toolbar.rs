//! The toolbar row: format buttons in rich-text mode, a single "Rich Text"
//! button in markdown mode.

use ratatui::prelude::*;
use ratatui::widgets::Paragraph;
use unicode_width::UnicodeWidthStr;

use crate::app::{Message, Model};
use crate::document::BlockKind;
use crate::editor::{FormatCommand, HeaderLevel, Mode};

use super::style::{button_style, toolbar_style};

/// Gap between buttons, in columns.
const BUTTON_GAP: u16 = 1;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolbarButton {
    pub label: &'static str,
    pub message: Message,
    pub active: bool,
}

impl ToolbarButton {
    const fn new(label: &'static str, message: Message, active: bool) -> Self {
        Self {
            label,
            message,
            active,
        }
    }
}

/// Buttons for the current mode, left to right.
pub fn toolbar_buttons(model: &Model) -> Vec<ToolbarButton> {
    if model.mode() == Mode::PlainText {
        return vec![ToolbarButton::new(
            " Rich Text ",
            Message::ToggleToRichText,
            false,
        )];
    }

    let rich = model.editor.rich();
    let kind = rich.current_kind();
    let marks = rich.pending_marks();
    let header = |label, level, active| {
        ToolbarButton::new(
            label,
            Message::Format(FormatCommand::Header(level)),
            active,
        )
    };
    let format = |label, command, active| ToolbarButton::new(label, Message::Format(command), active);

    vec![
        header(" Normal ", HeaderLevel::Normal, !matches!(kind, BlockKind::Heading(_))),
        header(" H1 ", HeaderLevel::H1, kind == BlockKind::Heading(1)),
        header(" H2 ", HeaderLevel::H2, kind == BlockKind::Heading(2)),
        header(" H3 ", HeaderLevel::H3, kind == BlockKind::Heading(3)),
        format(" B ", FormatCommand::Bold, marks.bold),
        format(" I ", FormatCommand::Italic, marks.italic),
        format(" U ", FormatCommand::Underline, marks.underline),
        format(" 1. ", FormatCommand::OrderedList, kind == BlockKind::OrderedItem),
        format(" • ", FormatCommand::BulletList, kind == BlockKind::BulletItem),
        format(" Clean ", FormatCommand::Clean, false),
        ToolbarButton::new(" Markdown ", Message::ToggleToMarkdown, false),
    ]
}

/// Screen rectangles of the buttons inside the toolbar area.
fn button_rects(buttons: &[ToolbarButton], area: Rect) -> Vec<Rect> {
    let mut x = area.x;
    let right = area.x + area.width;
    let mut rects = Vec::with_capacity(buttons.len());
    for button in buttons {
        let width = u16::try_from(button.label.width()).unwrap_or(u16::MAX);
        let visible = width.min(right.saturating_sub(x));
        rects.push(Rect::new(x, area.y, visible, area.height.min(1)));
        x = x.saturating_add(width).saturating_add(BUTTON_GAP).min(right);
    }
    rects
}

/// Message for a click at (`column`, `row`), if it lands on a button.
pub fn toolbar_hit(model: &Model, area: Rect, column: u16, row: u16) -> Option<Message> {
    let buttons = toolbar_buttons(model);
    button_rects(&buttons, area)
        .into_iter()
        .zip(buttons)
        .find(|(rect, _)| {
            rect.width > 0
                && column >= rect.x
                && column < rect.x + rect.width
                && row >= rect.y
                && row < rect.y + rect.height
        })
        .map(|(_, button)| button.message)
}

pub fn render_toolbar(model: &Model, frame: &mut Frame, area: Rect) {
    frame.render_widget(Paragraph::new("").style(toolbar_style()), area);
    let buttons = toolbar_buttons(model);
    for (rect, button) in button_rects(&buttons, area).into_iter().zip(&buttons) {
        if rect.width == 0 {
            continue;
        }
        frame.render_widget(
            Paragraph::new(button.label).style(button_style(button.active)),
            rect,
        );
    }
}
