use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::layout::Rect;
use tracing::trace;

use crate::app::{App, Message, Model};
use crate::editor::{Direction, EditCommand, FormatCommand, HeaderLevel};

use super::event_loop::ResizeDebouncer;

impl App {
    pub(super) fn handle_event(
        event: &Event,
        model: &Model,
        now_ms: u64,
        resize_debouncer: &mut ResizeDebouncer,
    ) -> Option<Message> {
        match event {
            Event::Key(key) if key.kind != KeyEventKind::Release => Self::handle_key(*key, model),
            Event::Mouse(mouse) => Self::handle_mouse(*mouse, model),
            Event::Paste(text) => {
                (!model.help_visible).then(|| Message::Edit(EditCommand::InsertStr(text.clone())))
            }
            Event::Resize(w, h) => {
                trace!(width = w, height = h, "resize queued");
                resize_debouncer.queue(*w, *h, now_ms);
                None
            }
            _ => None,
        }
    }

    pub(super) fn handle_mouse(mouse: MouseEvent, model: &Model) -> Option<Message> {
        if model.help_visible {
            return matches!(mouse.kind, MouseEventKind::Up(MouseButton::Left))
                .then_some(Message::HideHelp);
        }

        let layout = crate::ui::screen_layout(model, model_area(model));
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                crate::ui::toolbar_hit(model, layout.toolbar, mouse.column, mouse.row)
            }
            MouseEventKind::ScrollDown
                if layout
                    .preview
                    .is_some_and(|area| point_in_rect(mouse.column, mouse.row, area)) =>
            {
                Some(Message::PreviewScrollDown(3))
            }
            MouseEventKind::ScrollUp
                if layout
                    .preview
                    .is_some_and(|area| point_in_rect(mouse.column, mouse.row, area)) =>
            {
                Some(Message::PreviewScrollUp(3))
            }
            _ => None,
        }
    }

    pub(super) fn handle_key(key: KeyEvent, model: &Model) -> Option<Message> {
        if model.help_visible {
            return Some(Message::HideHelp);
        }

        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        let alt = key.modifiers.contains(KeyModifiers::ALT);

        if ctrl {
            return match key.code {
                KeyCode::Char('d') => Some(Message::ToggleMode),
                KeyCode::Char('b') => Some(Message::Format(FormatCommand::Bold)),
                KeyCode::Char('t') => Some(Message::Format(FormatCommand::Italic)),
                KeyCode::Char('u') => Some(Message::Format(FormatCommand::Underline)),
                KeyCode::Char('o') => Some(Message::Format(FormatCommand::OrderedList)),
                KeyCode::Char('l') => Some(Message::Format(FormatCommand::BulletList)),
                KeyCode::Char('k') => Some(Message::Format(FormatCommand::Clean)),
                KeyCode::Char('q' | 'c') => Some(Message::Quit),
                _ => None,
            };
        }

        if alt {
            let level = match key.code {
                KeyCode::Char('0') => HeaderLevel::Normal,
                KeyCode::Char('1') => HeaderLevel::H1,
                KeyCode::Char('2') => HeaderLevel::H2,
                KeyCode::Char('3') => HeaderLevel::H3,
                _ => return None,
            };
            return Some(Message::Format(FormatCommand::Header(level)));
        }

        let command = match key.code {
            KeyCode::F(1) => return Some(Message::ToggleHelp),
            KeyCode::Char(c) => EditCommand::InsertChar(c),
            KeyCode::Tab => EditCommand::InsertStr("    ".to_string()),
            KeyCode::Enter => EditCommand::SplitLine,
            KeyCode::Backspace => EditCommand::DeleteBack,
            KeyCode::Delete => EditCommand::DeleteForward,
            KeyCode::Left => EditCommand::Move(Direction::Left),
            KeyCode::Right => EditCommand::Move(Direction::Right),
            KeyCode::Up => EditCommand::Move(Direction::Up),
            KeyCode::Down => EditCommand::Move(Direction::Down),
            KeyCode::Home => EditCommand::Home,
            KeyCode::End => EditCommand::End,
            _ => return None,
        };
        Some(Message::Edit(command))
    }
}

const fn model_area(model: &Model) -> Rect {
    Rect::new(0, 0, model.width, model.height)
}

fn point_in_rect(col: u16, row: u16, rect: Rect) -> bool {
    col >= rect.x
        && col < rect.x + rect.width
        && row >= rect.y
        && row < rect.y + rect.height
}
