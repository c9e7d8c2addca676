//! Rich-text document model.
//!
//! This module handles:
//! - The block/mark content model edited by the rich-text surface
//! - Reading arbitrary HTML into that model
//! - Writing the model back out as the surface's HTML subset

mod html;
mod types;

pub use html::{decode_entities, escape_html, read_html, write_html};
pub use types::{Block, BlockKind, Marks, RichDocument, Run};

impl RichDocument {
    /// Parse HTML into a document. Malformed input degrades to text.
    pub fn from_html(html: &str) -> Self {
        read_html(html)
    }

    /// Serialize the document as HTML.
    pub fn to_html(&self) -> String {
        write_html(self)
    }
}
