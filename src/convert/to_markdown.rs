//! HTML to markdown via a comrak AST.
//!
//! HTML is read into a [`RichDocument`], the blocks are rebuilt as comrak
//! nodes and the tree is serialized with comrak's `CommonMark` formatter,
//! which writes ATX headings.

use std::cell::RefCell;

use comrak::arena_tree::Node;
use comrak::nodes::{Ast, AstNode, LineColumn, ListType, NodeHeading, NodeList, NodeValue};
use comrak::{Arena, Options, format_commonmark};

use super::ConvertError;
use crate::document::{Block, BlockKind, RichDocument};

/// Convert HTML to markdown.
pub fn html_to_markdown(html: &str) -> Result<String, ConvertError> {
    document_to_markdown(&RichDocument::from_html(html))
}

/// Serialize a rich document as markdown.
///
/// Empty paragraphs have no markdown form and are dropped, as is underline.
pub fn document_to_markdown(doc: &RichDocument) -> Result<String, ConvertError> {
    let arena = Arena::new();
    let root = alloc(&arena, NodeValue::Document);

    let mut list: Option<(BlockKind, &AstNode<'_>)> = None;
    for block in doc.blocks() {
        match block.kind {
            BlockKind::Paragraph => {
                list = None;
                if block.text().trim().is_empty() {
                    continue;
                }
                let para = alloc(&arena, NodeValue::Paragraph);
                append_inlines(&arena, para, block, true);
                root.append(para);
            }
            BlockKind::Heading(level) => {
                list = None;
                let heading = alloc(
                    &arena,
                    NodeValue::Heading(NodeHeading {
                        level,
                        setext: false,
                        ..NodeHeading::default()
                    }),
                );
                // An ATX heading is a single line.
                append_inlines(&arena, heading, block, false);
                root.append(heading);
            }
            kind @ (BlockKind::OrderedItem | BlockKind::BulletItem) => {
                let node_list = list_attrs(kind);
                let parent = match list {
                    Some((open_kind, node)) if open_kind == kind => node,
                    _ => {
                        let node = alloc(&arena, NodeValue::List(node_list));
                        root.append(node);
                        list = Some((kind, node));
                        node
                    }
                };
                let item = alloc(&arena, NodeValue::Item(node_list));
                if !block.text().trim().is_empty() {
                    let para = alloc(&arena, NodeValue::Paragraph);
                    append_inlines(&arena, para, block, true);
                    item.append(para);
                }
                parent.append(item);
            }
        }
    }

    let mut out = Vec::new();
    format_commonmark(root, &Options::default(), &mut out)?;
    let markdown = String::from_utf8(out)?;
    Ok(markdown.trim_end().to_string())
}

fn alloc<'a>(arena: &'a Arena<AstNode<'a>>, value: NodeValue) -> &'a AstNode<'a> {
    arena.alloc(Node::new(RefCell::new(Ast::new(
        value,
        LineColumn { line: 1, column: 1 },
    ))))
}

fn list_attrs(kind: BlockKind) -> NodeList {
    let list_type = if kind == BlockKind::OrderedItem {
        ListType::Ordered
    } else {
        ListType::Bullet
    };
    NodeList {
        list_type,
        start: 1,
        bullet_char: b'-',
        tight: true,
        ..NodeList::default()
    }
}

fn append_inlines<'a>(
    arena: &'a Arena<AstNode<'a>>,
    parent: &'a AstNode<'a>,
    block: &Block,
    hard_breaks: bool,
) {
    for (line_idx, line) in split_lines(block).into_iter().enumerate() {
        if line_idx > 0 {
            let separator = if hard_breaks {
                NodeValue::LineBreak
            } else {
                NodeValue::Text(" ".to_string())
            };
            parent.append(alloc(arena, separator));
        }
        for (idx, (text, bold, italic)) in line.iter().enumerate() {
            let prev = idx
                .checked_sub(1)
                .and_then(|i| line.get(i))
                .and_then(|run| run.0.chars().last());
            let next = line.get(idx + 1).and_then(|run| run.0.chars().next());
            append_run(arena, parent, text, *bold, *italic, prev, next);
        }
    }
}

/// Split a block's runs at hard line breaks.
///
/// Each line is a list of `(text, bold, italic)` runs; underline has no
/// markdown form and is ignored here.
fn split_lines(block: &Block) -> Vec<Vec<(String, bool, bool)>> {
    let mut lines: Vec<Vec<(String, bool, bool)>> = vec![Vec::new()];
    for run in block.runs() {
        let mut pieces = run.text.split('\n').peekable();
        while let Some(piece) = pieces.next() {
            if !piece.is_empty()
                && let Some(line) = lines.last_mut()
            {
                match line.last_mut() {
                    Some(last) if last.1 == run.marks.bold && last.2 == run.marks.italic => {
                        last.0.push_str(piece);
                    }
                    _ => line.push((piece.to_string(), run.marks.bold, run.marks.italic)),
                }
            }
            if pieces.peek().is_some() {
                lines.push(Vec::new());
            }
        }
    }
    lines
}

fn append_run<'a>(
    arena: &'a Arena<AstNode<'a>>,
    parent: &'a AstNode<'a>,
    text: &str,
    bold: bool,
    italic: bool,
    prev: Option<char>,
    next: Option<char>,
) {
    let (start, end) = delimited_range(text, prev, next);
    if (!bold && !italic) || start == end {
        parent.append(alloc(arena, NodeValue::Text(text.to_string())));
        return;
    }

    if start > 0 {
        parent.append(alloc(arena, NodeValue::Text(text[..start].to_string())));
    }

    let mut target = parent;
    if bold {
        let strong = alloc(arena, NodeValue::Strong);
        target.append(strong);
        target = strong;
    }
    if italic {
        let emph = alloc(arena, NodeValue::Emph);
        target.append(emph);
        target = emph;
    }
    target.append(alloc(arena, NodeValue::Text(text[start..end].to_string())));

    if end < text.len() {
        parent.append(alloc(arena, NodeValue::Text(text[end..].to_string())));
    }
}

/// Byte range of `text` that can sit between emphasis delimiters.
///
/// Delimiters next to whitespace do not flank, so edge spaces stay outside.
/// A delimiter between punctuation and a word character does not flank
/// either, so edge punctuation moves outside when the neighbouring run
/// starts or ends with a word character.
fn delimited_range(text: &str, prev: Option<char>, next: Option<char>) -> (usize, usize) {
    let is_punct = |c: char| c.is_ascii_punctuation();
    let mut start = text.len() - text.trim_start().len();
    let mut end = text.trim_end().len().max(start);

    if start == 0 && prev.is_some_and(char::is_alphanumeric) {
        let kept = text[..end].trim_start_matches(is_punct).trim_start();
        start = end - kept.len();
    }
    if end == text.len() && next.is_some_and(char::is_alphanumeric) {
        let kept = text[start..end].trim_end_matches(is_punct).trim_end();
        end = start + kept.len();
    }
    (start, end)
}
