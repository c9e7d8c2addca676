use std::fmt;

use tracing::debug;

use crate::convert::{ComrakConverter, ConvertError, Converter};

use super::{
    EditCommand, EditorEvent, EditorState, FormatCommand, Mode, PlainBuffer, RichSurface,
    RootState, Transition,
};

type ModeHook = Box<dyn FnMut(Mode)>;
type ContentHook = Box<dyn FnMut(&str)>;

/// Parent-facing hooks, invoked after the widget's state is updated.
#[derive(Default)]
pub struct EditorCallbacks {
    on_mode_change: Option<ModeHook>,
    on_content_change: Option<ContentHook>,
}

impl EditorCallbacks {
    fn dispatch(&mut self, event: &EditorEvent) {
        match event {
            EditorEvent::ModeChanged(mode) => {
                if let Some(hook) = self.on_mode_change.as_mut() {
                    hook(*mode);
                }
            }
            EditorEvent::ContentChanged(content) => {
                if let Some(hook) = self.on_content_change.as_mut() {
                    hook(content);
                }
            }
        }
    }
}

impl fmt::Debug for EditorCallbacks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EditorCallbacks")
            .field("on_mode_change", &self.on_mode_change.is_some())
            .field("on_content_change", &self.on_content_change.is_some())
            .finish()
    }
}

/// The editor widget.
///
/// Owns the `{content, mode}` state, both editing surfaces and the parent
/// hooks. Every mutating operation returns the events it emitted; the
/// parent's view ([`RootState`]) is maintained from exactly those events.
pub struct EditorWidget {
    state: EditorState,
    rich: RichSurface,
    plain: PlainBuffer,
    converter: Box<dyn Converter>,
    callbacks: EditorCallbacks,
    reported: RootState,
}

impl Default for EditorWidget {
    fn default() -> Self {
        Self::new()
    }
}

impl EditorWidget {
    /// Empty rich-text editor using the comrak converter.
    pub fn new() -> Self {
        Self::with_converter(Box::new(ComrakConverter))
    }

    pub fn with_converter(converter: Box<dyn Converter>) -> Self {
        Self {
            state: EditorState::new(),
            rich: RichSurface::default(),
            plain: PlainBuffer::empty(),
            converter,
            callbacks: EditorCallbacks::default(),
            reported: RootState::default(),
        }
    }

    pub fn on_mode_change(&mut self, hook: impl FnMut(Mode) + 'static) {
        self.callbacks.on_mode_change = Some(Box::new(hook));
    }

    pub fn on_content_change(&mut self, hook: impl FnMut(&str) + 'static) {
        self.callbacks.on_content_change = Some(Box::new(hook));
    }

    pub const fn state(&self) -> &EditorState {
        &self.state
    }

    pub const fn mode(&self) -> Mode {
        self.state.mode()
    }

    pub fn content(&self) -> &str {
        self.state.content()
    }

    /// The parent's view: last reported value and mode.
    pub fn snapshot(&self) -> RootState {
        self.reported.clone()
    }

    pub const fn rich(&self) -> &RichSurface {
        &self.rich
    }

    pub const fn plain(&self) -> &PlainBuffer {
        &self.plain
    }

    /// Seed the rich-text surface with HTML. Mount-time only; emits nothing.
    pub fn load_html(&mut self, html: &str) {
        self.rich = RichSurface::from_html(html);
        self.state = EditorState::with_content(Mode::RichText, self.rich.html());
    }

    /// Seed the rich-text surface from markdown source.
    ///
    /// # Errors
    ///
    /// Returns the converter's error; the editor is left as it was.
    pub fn load_markdown(&mut self, markdown: &str) -> Result<(), ConvertError> {
        let html = self.converter.markdown_to_html(markdown)?;
        self.load_html(&html);
        Ok(())
    }

    /// Switch to markdown mode.
    ///
    /// # Errors
    ///
    /// Returns the conversion error with the editor unchanged.
    pub fn toggle_to_markdown(&mut self) -> Result<Vec<EditorEvent>, ConvertError> {
        let transition = self.state.toggle_to_markdown(self.converter.as_ref())?;
        Ok(self.commit(transition, true))
    }

    /// Switch to rich-text mode.
    ///
    /// # Errors
    ///
    /// Returns the conversion error with the editor unchanged.
    pub fn toggle_to_rich_text(&mut self) -> Result<Vec<EditorEvent>, ConvertError> {
        let transition = self.state.toggle_to_rich_text(self.converter.as_ref())?;
        Ok(self.commit(transition, true))
    }

    /// Switch to whichever mode is not active.
    ///
    /// # Errors
    ///
    /// Returns the conversion error with the editor unchanged.
    pub fn toggle(&mut self) -> Result<Vec<EditorEvent>, ConvertError> {
        match self.mode() {
            Mode::RichText => self.toggle_to_markdown(),
            Mode::PlainText => self.toggle_to_rich_text(),
        }
    }

    /// Replace the raw content of the active mode, as a text input would.
    pub fn set_content(&mut self, content: &str) -> Vec<EditorEvent> {
        let transition = match self.mode() {
            Mode::RichText => {
                self.rich = RichSurface::from_html(content);
                self.state.edit(self.rich.html())
            }
            Mode::PlainText => {
                self.plain = PlainBuffer::from_text(content);
                self.plain.move_to(usize::MAX, usize::MAX);
                self.state.edit(self.plain.text())
            }
        };
        self.commit(transition, false)
    }

    /// Apply a text editing command to the active surface.
    pub fn edit(&mut self, command: EditCommand) -> Vec<EditorEvent> {
        let changed = match self.mode() {
            Mode::RichText => apply_rich(&mut self.rich, command),
            Mode::PlainText => apply_plain(&mut self.plain, command),
        };
        if !changed {
            return Vec::new();
        }
        let content = match self.mode() {
            Mode::RichText => self.rich.html(),
            Mode::PlainText => self.plain.text(),
        };
        let transition = self.state.edit(content);
        self.commit(transition, false)
    }

    /// Apply a toolbar formatting command. Only meaningful in rich-text mode;
    /// returns whether it was applied.
    pub fn format(&mut self, command: FormatCommand) -> bool {
        if self.mode() != Mode::RichText {
            return false;
        }
        self.rich.apply(command);
        let transition = self.state.edit(self.rich.html());
        self.commit(transition, false);
        true
    }

    /// Install the new state, then notify. `reseed` reloads the newly active
    /// surface from the converted content.
    fn commit(&mut self, transition: Transition, reseed: bool) -> Vec<EditorEvent> {
        let Transition { state, events } = transition;
        self.state = state;
        if reseed && !events.is_empty() {
            self.reseed();
        }
        for event in &events {
            debug!(?event, "editor event");
            self.reported.apply(event);
            self.callbacks.dispatch(event);
        }
        events
    }

    fn reseed(&mut self) {
        match self.state.mode() {
            Mode::RichText => self.rich = RichSurface::from_html(self.state.content()),
            Mode::PlainText => {
                self.plain = PlainBuffer::from_text(self.state.content());
                self.plain.move_to(usize::MAX, usize::MAX);
            }
        }
    }
}

/// Returns whether the command changed the content.
fn apply_rich(surface: &mut RichSurface, command: EditCommand) -> bool {
    match command {
        EditCommand::InsertChar(ch) => surface.insert_char(ch),
        EditCommand::InsertStr(text) => {
            if text.is_empty() {
                return false;
            }
            surface.insert_str(&text);
        }
        EditCommand::SplitLine => surface.split_block(),
        EditCommand::DeleteBack => return surface.delete_back(),
        EditCommand::DeleteForward => return surface.delete_forward(),
        EditCommand::Move(direction) => {
            surface.move_cursor(direction);
            return false;
        }
        EditCommand::Home => {
            surface.move_home();
            return false;
        }
        EditCommand::End => {
            surface.move_end();
            return false;
        }
    }
    true
}

fn apply_plain(buffer: &mut PlainBuffer, command: EditCommand) -> bool {
    match command {
        EditCommand::InsertChar(ch) => buffer.insert_char(ch),
        EditCommand::InsertStr(text) => {
            if text.is_empty() {
                return false;
            }
            buffer.insert_str(&text);
        }
        EditCommand::SplitLine => buffer.split_line(),
        EditCommand::DeleteBack => return buffer.delete_back(),
        EditCommand::DeleteForward => return buffer.delete_forward(),
        EditCommand::Move(direction) => {
            buffer.move_cursor(direction);
            return false;
        }
        EditCommand::Home => {
            buffer.move_home();
            return false;
        }
        EditCommand::End => {
            buffer.move_end();
            return false;
        }
    }
    true
}

impl fmt::Debug for EditorWidget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EditorWidget")
            .field("state", &self.state)
            .field("rich_cursor", &self.rich.cursor())
            .field("plain_cursor", &self.plain.cursor())
            .field("callbacks", &self.callbacks)
            .finish_non_exhaustive()
    }
}
