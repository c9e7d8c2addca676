//! The rich-text editing surface.
//!
//! Holds a [`RichDocument`] with a cursor and the marks that the next typed
//! character will carry. Inline format commands toggle those pending marks;
//! block format commands act on the block under the cursor.

use crate::document::{Block, BlockKind, Marks, RichDocument};

use super::Direction;

/// Cursor position: block index and character offset inside the block.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RichCursor {
    pub block: usize,
    pub offset: usize,
}

impl RichCursor {
    pub const fn at(block: usize, offset: usize) -> Self {
        Self { block, offset }
    }
}

/// Header choice from the toolbar's header select.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderLevel {
    Normal,
    H1,
    H2,
    H3,
}

impl HeaderLevel {
    const fn block_kind(self) -> BlockKind {
        match self {
            Self::Normal => BlockKind::Paragraph,
            Self::H1 => BlockKind::Heading(1),
            Self::H2 => BlockKind::Heading(2),
            Self::H3 => BlockKind::Heading(3),
        }
    }
}

/// Formatting commands offered by the rich-text toolbar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatCommand {
    Header(HeaderLevel),
    Bold,
    Italic,
    Underline,
    OrderedList,
    BulletList,
    /// Clear inline formatting of the current block.
    Clean,
}

#[derive(Debug, Clone)]
pub struct RichSurface {
    doc: RichDocument,
    cursor: RichCursor,
    pending: Marks,
}

impl Default for RichSurface {
    fn default() -> Self {
        Self::from_document(RichDocument::default())
    }
}

impl RichSurface {
    /// Load HTML, placing the cursor at the end of the document.
    pub fn from_html(html: &str) -> Self {
        let mut surface = Self::from_document(RichDocument::from_html(html));
        let last = surface.doc.blocks().len() - 1;
        surface.cursor = RichCursor::at(last, surface.block(last).len_chars());
        surface.sync_pending();
        surface
    }

    pub fn from_document(mut doc: RichDocument) -> Self {
        if doc.blocks().is_empty() {
            doc.blocks_mut().push(Block::new(BlockKind::Paragraph));
        }
        Self {
            doc,
            cursor: RichCursor::default(),
            pending: Marks::NONE,
        }
    }

    /// Current content as HTML.
    pub fn html(&self) -> String {
        self.doc.to_html()
    }

    pub const fn document(&self) -> &RichDocument {
        &self.doc
    }

    pub const fn cursor(&self) -> RichCursor {
        self.cursor
    }

    /// Marks the next typed character will carry.
    pub const fn pending_marks(&self) -> Marks {
        self.pending
    }

    /// Block format under the cursor.
    pub fn current_kind(&self) -> BlockKind {
        self.block(self.cursor.block).kind
    }

    fn block(&self, idx: usize) -> &Block {
        &self.doc.blocks()[idx]
    }

    fn block_mut(&mut self, idx: usize) -> &mut Block {
        &mut self.doc.blocks_mut()[idx]
    }

    pub fn apply(&mut self, command: FormatCommand) {
        let idx = self.cursor.block;
        match command {
            FormatCommand::Header(level) => self.block_mut(idx).kind = level.block_kind(),
            FormatCommand::Bold => self.pending.bold = !self.pending.bold,
            FormatCommand::Italic => self.pending.italic = !self.pending.italic,
            FormatCommand::Underline => self.pending.underline = !self.pending.underline,
            FormatCommand::OrderedList => self.toggle_kind(BlockKind::OrderedItem),
            FormatCommand::BulletList => self.toggle_kind(BlockKind::BulletItem),
            FormatCommand::Clean => {
                self.block_mut(idx).clear_marks();
                self.pending = Marks::NONE;
            }
        }
    }

    fn toggle_kind(&mut self, kind: BlockKind) {
        let block = self.block_mut(self.cursor.block);
        block.kind = if block.kind == kind {
            BlockKind::Paragraph
        } else {
            kind
        };
    }

    pub fn insert_char(&mut self, ch: char) {
        if ch == '\n' {
            self.split_block();
            return;
        }
        let RichCursor { block, offset } = self.cursor;
        let marks = self.pending;
        self.block_mut(block).insert_char(offset, ch, marks);
        self.cursor.offset += 1;
    }

    /// Insert pasted text; each newline starts a new block.
    pub fn insert_str(&mut self, text: &str) {
        let normalized = text.replace("\r\n", "\n");
        for ch in normalized.chars().filter(|c| *c != '\r') {
            self.insert_char(ch);
        }
    }

    /// Split the block at the cursor (Enter).
    ///
    /// Enter on an empty list item leaves the list instead. A heading split
    /// at its end continues with a paragraph.
    pub fn split_block(&mut self) {
        let RichCursor { block, offset } = self.cursor;
        let current = self.block_mut(block);
        if current.kind.is_list_item() && current.is_empty() {
            current.kind = BlockKind::Paragraph;
            return;
        }
        let mut tail = current.split_off(offset);
        if matches!(tail.kind, BlockKind::Heading(_)) && tail.is_empty() {
            tail.kind = BlockKind::Paragraph;
        }
        self.doc.blocks_mut().insert(block + 1, tail);
        self.cursor = RichCursor::at(block + 1, 0);
    }

    /// Delete before the cursor (Backspace).
    ///
    /// At the start of a heading or list item the block format is removed
    /// first; at the start of a paragraph the block joins the previous one.
    pub fn delete_back(&mut self) -> bool {
        let RichCursor { block, offset } = self.cursor;
        if offset > 0 {
            self.block_mut(block).remove_char(offset - 1);
            self.cursor.offset -= 1;
            return true;
        }
        if self.current_kind() != BlockKind::Paragraph {
            self.block_mut(block).kind = BlockKind::Paragraph;
            return true;
        }
        if block == 0 {
            return false;
        }
        let removed = self.doc.blocks_mut().remove(block);
        let prev = self.block_mut(block - 1);
        let prev_len = prev.len_chars();
        prev.append(removed);
        self.cursor = RichCursor::at(block - 1, prev_len);
        true
    }

    /// Delete at the cursor (Delete), joining the next block at the end.
    pub fn delete_forward(&mut self) -> bool {
        let RichCursor { block, offset } = self.cursor;
        if offset < self.block(block).len_chars() {
            self.block_mut(block).remove_char(offset);
            return true;
        }
        if block + 1 >= self.doc.blocks().len() {
            return false;
        }
        let next = self.doc.blocks_mut().remove(block + 1);
        self.block_mut(block).append(next);
        true
    }

    pub fn move_cursor(&mut self, direction: Direction) {
        let RichCursor { block, offset } = self.cursor;
        let last = self.doc.blocks().len() - 1;
        match direction {
            Direction::Left => {
                if offset > 0 {
                    self.cursor.offset -= 1;
                } else if block > 0 {
                    self.cursor = RichCursor::at(block - 1, self.block(block - 1).len_chars());
                }
            }
            Direction::Right => {
                if offset < self.block(block).len_chars() {
                    self.cursor.offset += 1;
                } else if block < last {
                    self.cursor = RichCursor::at(block + 1, 0);
                }
            }
            Direction::Up => {
                if block > 0 {
                    let len = self.block(block - 1).len_chars();
                    self.cursor = RichCursor::at(block - 1, offset.min(len));
                }
            }
            Direction::Down => {
                if block < last {
                    let len = self.block(block + 1).len_chars();
                    self.cursor = RichCursor::at(block + 1, offset.min(len));
                }
            }
        }
        self.sync_pending();
    }

    /// Move to the start of the current line within the block.
    pub fn move_home(&mut self) {
        let text = self.block(self.cursor.block).text();
        let before: Vec<char> = text.chars().take(self.cursor.offset).collect();
        self.cursor.offset = before
            .iter()
            .rposition(|c| *c == '\n')
            .map_or(0, |pos| pos + 1);
        self.sync_pending();
    }

    /// Move to the end of the current line within the block.
    pub fn move_end(&mut self) {
        let block = self.block(self.cursor.block);
        let next_break = block
            .text()
            .chars()
            .skip(self.cursor.offset)
            .position(|c| c == '\n');
        self.cursor.offset = next_break.map_or(block.len_chars(), |pos| self.cursor.offset + pos);
        self.sync_pending();
    }

    /// Take the marks of the character before the cursor, like a word
    /// processor continuing the formatting of the text being extended.
    fn sync_pending(&mut self) {
        let RichCursor { block, offset } = self.cursor;
        self.pending = match offset.checked_sub(1) {
            Some(prev) => self.block(block).marks()[prev],
            None => self
                .block(block)
                .marks()
                .first()
                .copied()
                .unwrap_or(Marks::NONE),
        };
    }
}
