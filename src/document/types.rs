//! Core types for the rich-text content model.

/// Inline formatting applied to a single character.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Marks {
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
}

impl Marks {
    pub const NONE: Self = Self {
        bold: false,
        italic: false,
        underline: false,
    };
}

/// Block-level format of a [`Block`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum BlockKind {
    #[default]
    Paragraph,
    /// Heading level, always in `1..=3`.
    Heading(u8),
    OrderedItem,
    BulletItem,
}

impl BlockKind {
    /// Build a heading kind, clamping the level into the supported range.
    pub fn heading(level: u8) -> Self {
        Self::Heading(level.clamp(1, 3))
    }

    pub const fn is_list_item(self) -> bool {
        matches!(self, Self::OrderedItem | Self::BulletItem)
    }
}

/// A run of characters sharing the same marks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Run {
    pub text: String,
    pub marks: Marks,
}

/// One block of rich text: a paragraph, heading or list item.
///
/// Text is stored as a `String` with one [`Marks`] entry per character, so
/// `marks.len() == text.chars().count()` always holds. Hard line breaks are
/// stored as `'\n'` characters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Block {
    pub kind: BlockKind,
    text: String,
    marks: Vec<Marks>,
}

impl Block {
    pub fn new(kind: BlockKind) -> Self {
        Self {
            kind,
            text: String::new(),
            marks: Vec::new(),
        }
    }

    /// Create a block holding unformatted text.
    pub fn plain(kind: BlockKind, text: &str) -> Self {
        let mut block = Self::new(kind);
        block.push_str(text, Marks::NONE);
        block
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn marks(&self) -> &[Marks] {
        &self.marks
    }

    /// Number of characters in the block.
    pub fn len_chars(&self) -> usize {
        self.marks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.marks.is_empty()
    }

    pub fn push_str(&mut self, text: &str, marks: Marks) {
        for ch in text.chars() {
            self.push_char(ch, marks);
        }
    }

    pub fn push_char(&mut self, ch: char, marks: Marks) {
        self.text.push(ch);
        self.marks.push(marks);
    }

    /// Insert a character at a character index (clamped to the end).
    pub fn insert_char(&mut self, char_idx: usize, ch: char, marks: Marks) {
        let idx = char_idx.min(self.len_chars());
        let byte = self.byte_offset(idx);
        self.text.insert(byte, ch);
        self.marks.insert(idx, marks);
    }

    /// Remove the character at a character index, returning it.
    pub fn remove_char(&mut self, char_idx: usize) -> Option<char> {
        if char_idx >= self.len_chars() {
            return None;
        }
        let byte = self.byte_offset(char_idx);
        self.marks.remove(char_idx);
        Some(self.text.remove(byte))
    }

    /// Split the block at a character index; the tail keeps the same kind.
    pub fn split_off(&mut self, char_idx: usize) -> Self {
        let idx = char_idx.min(self.len_chars());
        let byte = self.byte_offset(idx);
        Self {
            kind: self.kind,
            text: self.text.split_off(byte),
            marks: self.marks.split_off(idx),
        }
    }

    /// Append another block's content to this one.
    pub fn append(&mut self, other: Self) {
        self.text.push_str(&other.text);
        self.marks.extend(other.marks);
    }

    /// Drop every inline mark.
    pub fn clear_marks(&mut self) {
        self.marks.fill(Marks::NONE);
    }

    /// Remove trailing spaces and line breaks.
    pub fn trim_end(&mut self) {
        while self.text.ends_with([' ', '\n']) {
            self.text.pop();
            self.marks.pop();
        }
    }

    pub fn ends_with_space_or_break(&self) -> bool {
        self.text.is_empty() || self.text.ends_with([' ', '\n'])
    }

    /// Group the text into runs of identical marks.
    pub fn runs(&self) -> Vec<Run> {
        let mut runs: Vec<Run> = Vec::new();
        for (ch, marks) in self.text.chars().zip(self.marks.iter().copied()) {
            match runs.last_mut() {
                Some(run) if run.marks == marks => run.text.push(ch),
                _ => runs.push(Run {
                    text: ch.to_string(),
                    marks,
                }),
            }
        }
        runs
    }

    /// Byte offset of a character index.
    pub fn byte_offset(&self, char_idx: usize) -> usize {
        self.text
            .char_indices()
            .nth(char_idx)
            .map_or(self.text.len(), |(byte, _)| byte)
    }
}

/// An ordered sequence of blocks: the rich-text surface's content.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RichDocument {
    blocks: Vec<Block>,
}

impl RichDocument {
    pub const fn new(blocks: Vec<Block>) -> Self {
        Self { blocks }
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub fn blocks_mut(&mut self) -> &mut Vec<Block> {
        &mut self.blocks
    }

    /// True when the document holds nothing but empty paragraphs.
    pub fn is_blank(&self) -> bool {
        self.blocks
            .iter()
            .all(|b| b.is_empty() && b.kind == BlockKind::Paragraph)
    }

    /// Whether any character is underlined. Markdown has no underline.
    pub fn has_underline(&self) -> bool {
        self.blocks
            .iter()
            .any(|block| block.marks().iter().any(|marks| marks.underline))
    }
}
