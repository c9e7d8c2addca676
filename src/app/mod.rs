//! Root container and main event loop.
//!
//! This module implements The Elm Architecture (TEA):
//! - [`Model`]: The complete application state
//! - [`Message`]: All possible events and actions
//! - [`update`]: Pure function for state transitions
//! - [`App::run`]: Main event loop with rendering

mod event_loop;
mod input;
mod model;
mod update;

pub use model::{Model, ToastLevel};
pub use update::{Message, update};

use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing::debug;

use crate::editor::EditorWidget;

/// Initial editor content supplied at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Seed {
    Html(String),
    Markdown(String),
}

/// Main application struct that owns the terminal and runs the event loop.
pub struct App {
    seed: Option<Seed>,
    start_in_markdown: bool,
    preview_enabled: bool,
    config_global_path: Option<PathBuf>,
    config_local_path: Option<PathBuf>,
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

impl App {
    /// Create an application with an empty rich-text editor.
    pub const fn new() -> Self {
        Self {
            seed: None,
            start_in_markdown: false,
            preview_enabled: true,
            config_global_path: None,
            config_local_path: None,
        }
    }

    /// Seed the editor with initial content.
    pub fn with_seed(mut self, seed: Option<Seed>) -> Self {
        self.seed = seed;
        self
    }

    /// Switch to markdown mode right after mount.
    pub const fn with_markdown_mode(mut self, enabled: bool) -> Self {
        self.start_in_markdown = enabled;
        self
    }

    /// Enable or disable the preview pane.
    pub const fn with_preview(mut self, enabled: bool) -> Self {
        self.preview_enabled = enabled;
        self
    }

    /// Set config paths to show in help.
    pub fn with_config_paths(
        mut self,
        global_path: Option<PathBuf>,
        local_path: Option<PathBuf>,
    ) -> Self {
        self.config_global_path = global_path;
        self.config_local_path = local_path;
        self
    }

    /// Build the initial model for a terminal of the given size.
    ///
    /// # Errors
    ///
    /// Returns an error if the seed content or the initial mode switch
    /// cannot be converted.
    pub fn build_model(&self, terminal_size: (u16, u16)) -> Result<Model> {
        let mut editor = EditorWidget::new();
        editor.on_mode_change(|mode| debug!(%mode, "root: mode changed"));
        editor.on_content_change(|content| debug!(len = content.len(), "root: content changed"));

        match &self.seed {
            Some(Seed::Html(html)) => editor.load_html(html),
            Some(Seed::Markdown(markdown)) => editor
                .load_markdown(markdown)
                .context("Failed to load markdown seed")?,
            None => {}
        }
        if self.start_in_markdown {
            editor
                .toggle_to_markdown()
                .context("Failed to switch to markdown mode")?;
        }

        let mut model = Model::new(editor, terminal_size);
        model.preview_enabled = self.preview_enabled;
        model
            .config_global_path
            .clone_from(&self.config_global_path);
        model.config_local_path.clone_from(&self.config_local_path);
        Ok(model)
    }
}
