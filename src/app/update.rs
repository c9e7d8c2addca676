use tracing::{debug, trace, warn};

use crate::app::{Model, ToastLevel};
use crate::convert::ConvertError;
use crate::editor::{EditCommand, EditorEvent, FormatCommand, Mode};

/// All possible events and actions in the application.
///
/// These represent user input, system events, and internal actions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    // Mode
    /// Switch to whichever mode is not active
    ToggleMode,
    /// Switch to markdown mode (no-op when already there)
    ToggleToMarkdown,
    /// Switch to rich-text mode (no-op when already there)
    ToggleToRichText,

    // Editing
    /// Apply a text editing command to the active surface
    Edit(EditCommand),
    /// Apply a rich-text toolbar command
    Format(FormatCommand),

    // Preview
    /// Scroll preview up by n rows
    PreviewScrollUp(usize),
    /// Scroll preview down by n rows
    PreviewScrollDown(usize),

    // Help
    /// Toggle help overlay
    ToggleHelp,
    /// Hide help overlay
    HideHelp,

    // Window
    /// Terminal resized
    Resize(u16, u16),

    // Application
    /// Quit the application
    Quit,
}

/// Pure function that updates the model based on a message.
///
/// This is the core of TEA - all state transitions happen here.
pub fn update(mut model: Model, msg: Message) -> Model {
    match msg {
        Message::ToggleMode => {
            let lossy = drops_underline(&model);
            let result = model.editor.toggle();
            after_toggle(&mut model, result, lossy);
        }
        Message::ToggleToMarkdown => {
            let lossy = drops_underline(&model);
            let result = model.editor.toggle_to_markdown();
            after_toggle(&mut model, result, lossy);
        }
        Message::ToggleToRichText => {
            let result = model.editor.toggle_to_rich_text();
            after_toggle(&mut model, result, false);
        }

        Message::Edit(command) => {
            let events = model.editor.edit(command);
            trace!(events = events.len(), "edit applied");
        }
        Message::Format(command) => {
            if !model.editor.format(command) {
                model.show_toast(
                    ToastLevel::Info,
                    "Formatting is only available in rich-text mode",
                );
            }
        }

        Message::PreviewScrollUp(n) => {
            model.preview_scroll_offset = model.preview_scroll_offset.saturating_sub(n);
        }
        Message::PreviewScrollDown(n) => {
            model.preview_scroll_offset = model.preview_scroll_offset.saturating_add(n);
        }

        Message::ToggleHelp => {
            model.help_visible = !model.help_visible;
        }
        Message::HideHelp => {
            model.help_visible = false;
        }

        Message::Resize(width, height) => {
            model.width = width;
            model.height = height;
        }

        Message::Quit => {
            model.should_quit = true;
        }
    }

    model
}

/// Conversion failures leave the editor untouched and surface as a toast.
fn drops_underline(model: &Model) -> bool {
    model.mode() == Mode::RichText && model.editor.rich().document().has_underline()
}

fn after_toggle(
    model: &mut Model,
    result: Result<Vec<EditorEvent>, ConvertError>,
    drops_underline: bool,
) {
    match result {
        Ok(events) if events.is_empty() => {}
        Ok(events) => {
            debug!(mode = %model.mode(), events = events.len(), "mode toggled");
            model.editor_scroll_offset = 0;
            model.preview_scroll_offset = 0;
            if drops_underline {
                model.show_toast(
                    ToastLevel::Warning,
                    "Underline has no markdown form and was removed",
                );
            }
        }
        Err(err) => {
            warn!(error = %err, "conversion failed");
            model.show_toast(
                ToastLevel::Error,
                format!("Could not convert content: {err}"),
            );
        }
    }
}
