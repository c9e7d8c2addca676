use std::path::PathBuf;
use std::time::{Duration, Instant};

use crate::editor::{EditorWidget, Mode, RootState};

/// How long a toast stays on screen.
const TOAST_DURATION: Duration = Duration::from_secs(4);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLevel {
    Info,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
struct Toast {
    level: ToastLevel,
    message: String,
    expires_at: Instant,
}

/// The complete application state.
///
/// The editor widget is the single owner of content and mode; everything
/// the root container shows is derived from [`Model::root_state`].
pub struct Model {
    /// The editor widget (content, mode, both surfaces)
    pub editor: EditorWidget,
    /// Whether the preview pane may be shown in markdown mode
    pub preview_enabled: bool,
    /// Whether help overlay is visible
    pub help_visible: bool,
    /// Whether the app should quit
    pub should_quit: bool,
    /// Terminal width in columns
    pub width: u16,
    /// Terminal height in rows
    pub height: u16,
    /// First visible row of the editor pane
    pub editor_scroll_offset: usize,
    /// First visible row of the preview pane
    pub preview_scroll_offset: usize,
    /// Global config path shown in help
    pub config_global_path: Option<PathBuf>,
    /// Local override path shown in help
    pub config_local_path: Option<PathBuf>,
    toast: Option<Toast>,
}

impl std::fmt::Debug for Model {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Model")
            .field("mode", &self.editor.mode())
            .field("preview_enabled", &self.preview_enabled)
            .field("help_visible", &self.help_visible)
            .field("size", &(self.width, self.height))
            .finish_non_exhaustive()
    }
}

impl Model {
    pub fn new(editor: EditorWidget, terminal_size: (u16, u16)) -> Self {
        Self {
            editor,
            width: terminal_size.0,
            height: terminal_size.1,
            ..Self::default()
        }
    }

    pub const fn mode(&self) -> Mode {
        self.editor.mode()
    }

    /// The root container's view of the editor.
    pub fn root_state(&self) -> RootState {
        self.editor.snapshot()
    }

    /// Preview pane is shown only in markdown mode, and only when enabled.
    pub fn preview_visible(&self) -> bool {
        self.preview_enabled && self.root_state().is_markdown
    }

    pub fn show_toast(&mut self, level: ToastLevel, message: impl Into<String>) {
        self.toast = Some(Toast {
            level,
            message: message.into(),
            expires_at: Instant::now() + TOAST_DURATION,
        });
    }

    pub fn expire_toast(&mut self, now: Instant) -> bool {
        if self
            .toast
            .as_ref()
            .is_some_and(|toast| toast.expires_at <= now)
        {
            self.toast = None;
            return true;
        }
        false
    }

    pub fn active_toast(&self) -> Option<(&str, ToastLevel)> {
        self.toast
            .as_ref()
            .map(|toast| (toast.message.as_str(), toast.level))
    }

    /// Scroll the editor so `cursor_row` is inside a pane of `visible_rows`.
    pub fn scroll_editor_to(&mut self, cursor_row: usize, visible_rows: usize) {
        if visible_rows == 0 {
            return;
        }
        if cursor_row < self.editor_scroll_offset {
            self.editor_scroll_offset = cursor_row;
        } else if cursor_row >= self.editor_scroll_offset + visible_rows {
            self.editor_scroll_offset = cursor_row + 1 - visible_rows;
        }
    }
}

// Implement Default for Model to allow std::mem::take
impl Default for Model {
    fn default() -> Self {
        Self {
            editor: EditorWidget::new(),
            preview_enabled: true,
            help_visible: false,
            should_quit: false,
            width: 80,
            height: 24,
            editor_scroll_offset: 0,
            preview_scroll_offset: 0,
            config_global_path: None,
            config_local_path: None,
            toast: None,
        }
    }
}
