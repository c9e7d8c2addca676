//! HTML reading and writing for the rich-text document model.
//!
//! The writer emits the small HTML subset the rich-text surface produces
//! (`<p>`, `<h1>`-`<h3>`, `<ol>`/`<ul>`, `<strong>`, `<em>`, `<u>`, `<br>`).
//! The reader accepts arbitrary HTML and keeps whatever maps onto that
//! subset; unknown elements contribute their text only.

use std::sync::LazyLock;

use regex::{Captures, Regex};

use super::types::{Block, BlockKind, Marks, RichDocument};

static TOKEN_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?s)<!--.*?-->|<![^>]*>|<\?[^>]*>|<(/?)([a-zA-Z][a-zA-Z0-9-]*)((?:[^>'\x22]|'[^']*'|\x22[^\x22]*\x22)*?)(/?)>",
    )
    .expect("valid token regex")
});

static ATTR_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"([a-zA-Z_:][-a-zA-Z0-9_:.]*)\s*=\s*(?:"([^"]*)"|'([^']*)'|([^\s>]+))"#)
        .expect("valid attribute regex")
});

static ENTITY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"&(#[0-9]{1,7}|#[xX][0-9a-fA-F]{1,6}|[a-zA-Z]+);").expect("valid entity regex")
});

#[derive(Debug, PartialEq, Eq)]
enum Token<'a> {
    Open { name: String, attrs: &'a str },
    Close { name: String },
    Text(&'a str),
}

fn tokenize(html: &str) -> Vec<Token<'_>> {
    let mut tokens = Vec::new();
    let mut last = 0;
    for caps in TOKEN_RE.captures_iter(html) {
        let Some(whole) = caps.get(0) else {
            continue;
        };
        if whole.start() > last {
            tokens.push(Token::Text(&html[last..whole.start()]));
        }
        last = whole.end();
        // Comments, doctypes and processing instructions carry no content.
        let Some(name) = caps.get(2) else {
            continue;
        };
        let name = name.as_str().to_ascii_lowercase();
        if caps.get(1).is_some_and(|m| !m.as_str().is_empty()) {
            tokens.push(Token::Close { name });
        } else {
            let attrs = caps.get(3).map_or("", |m| m.as_str());
            let self_closing = caps.get(4).is_some_and(|m| !m.as_str().is_empty());
            tokens.push(Token::Open {
                name: name.clone(),
                attrs,
            });
            if self_closing && !is_void(&name) {
                tokens.push(Token::Close { name });
            }
        }
    }
    if last < html.len() {
        tokens.push(Token::Text(&html[last..]));
    }
    tokens
}

fn is_void(name: &str) -> bool {
    matches!(
        name,
        "br" | "hr" | "img" | "input" | "meta" | "link" | "area" | "base" | "col" | "wbr"
    )
}

fn attribute<'a>(attrs: &'a str, wanted: &str) -> Option<&'a str> {
    ATTR_RE.captures_iter(attrs).find_map(|caps| {
        let name = caps.get(1)?.as_str();
        if !name.eq_ignore_ascii_case(wanted) {
            return None;
        }
        caps.get(2)
            .or_else(|| caps.get(3))
            .or_else(|| caps.get(4))
            .map(|m| m.as_str())
    })
}

/// Decode character references (`&amp;`, `&#39;`, `&#x2014;`, ...).
///
/// Unknown named references are left untouched.
pub fn decode_entities(text: &str) -> String {
    if !text.contains('&') {
        return text.to_string();
    }
    ENTITY_RE
        .replace_all(text, |caps: &Captures<'_>| {
            let body = &caps[1];
            let decoded = if let Some(hex) = body
                .strip_prefix("#x")
                .or_else(|| body.strip_prefix("#X"))
            {
                u32::from_str_radix(hex, 16).ok().and_then(char::from_u32)
            } else if let Some(dec) = body.strip_prefix('#') {
                dec.parse::<u32>().ok().and_then(char::from_u32)
            } else {
                named_entity(body)
            };
            decoded.map_or_else(|| caps[0].to_string(), |c| c.to_string())
        })
        .into_owned()
}

fn named_entity(name: &str) -> Option<char> {
    Some(match name {
        "amp" => '&',
        "lt" => '<',
        "gt" => '>',
        "quot" => '"',
        "apos" => '\'',
        "nbsp" => ' ',
        "ndash" => '\u{2013}',
        "mdash" => '\u{2014}',
        "hellip" => '\u{2026}',
        "lsquo" => '\u{2018}',
        "rsquo" => '\u{2019}',
        "ldquo" => '\u{201c}',
        "rdquo" => '\u{201d}',
        "copy" => '\u{a9}',
        _ => return None,
    })
}

/// Escape text for inclusion in HTML element content.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(ch),
        }
    }
    out
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ListKind {
    Ordered,
    Bullet,
}

#[derive(Default)]
struct Reader {
    blocks: Vec<Block>,
    current: Option<Block>,
    lists: Vec<ListKind>,
    item_depth: usize,
    bold: usize,
    italic: usize,
    underline: usize,
    skip: Option<String>,
}

impl Reader {
    fn marks(&self) -> Marks {
        Marks {
            bold: self.bold > 0,
            italic: self.italic > 0,
            underline: self.underline > 0,
        }
    }

    fn flush(&mut self) {
        if let Some(mut block) = self.current.take() {
            block.trim_end();
            self.blocks.push(block);
        }
    }

    fn start_block(&mut self, kind: BlockKind) {
        self.flush();
        self.current = Some(Block::new(kind));
    }

    fn current_or_paragraph(&mut self) -> &mut Block {
        self.current.get_or_insert_with(|| Block::new(BlockKind::Paragraph))
    }

    fn open(&mut self, name: &str, attrs: &str) {
        match name {
            "script" | "style" | "head" | "title" | "template" => {
                self.skip = Some(name.to_string());
            }
            "p" | "div" | "blockquote" | "pre" | "section" | "article" | "address" => {
                if self.item_depth > 0 {
                    // Paragraphs inside a list item belong to the item.
                    if let Some(block) = self.current.as_mut()
                        && !block.ends_with_space_or_break()
                    {
                        block.push_char('\n', Marks::NONE);
                    }
                } else {
                    self.start_block(BlockKind::Paragraph);
                }
            }
            "h1" | "h2" | "h3" | "h4" | "h5" | "h6" => {
                let level = name[1..].parse::<u8>().unwrap_or(1);
                self.start_block(BlockKind::heading(level));
            }
            "ol" | "ul" => {
                self.flush();
                self.lists.push(if name == "ol" {
                    ListKind::Ordered
                } else {
                    ListKind::Bullet
                });
            }
            "li" => {
                let list = match attribute(attrs, "data-list") {
                    Some("bullet" | "unchecked" | "checked") => ListKind::Bullet,
                    Some("ordered") => ListKind::Ordered,
                    _ => self.lists.last().copied().unwrap_or(ListKind::Bullet),
                };
                self.item_depth += 1;
                self.start_block(match list {
                    ListKind::Ordered => BlockKind::OrderedItem,
                    ListKind::Bullet => BlockKind::BulletItem,
                });
            }
            "br" => {
                let block = self.current_or_paragraph();
                block.push_char('\n', Marks::NONE);
            }
            "strong" | "b" => self.bold += 1,
            "em" | "i" => self.italic += 1,
            "u" | "ins" => self.underline += 1,
            _ => {}
        }
    }

    fn close(&mut self, name: &str) {
        match name {
            "p" | "div" | "blockquote" | "pre" | "section" | "article" | "address"
                if self.item_depth == 0 =>
            {
                self.flush();
            }
            "h1" | "h2" | "h3" | "h4" | "h5" | "h6" => self.flush(),
            "li" => {
                self.item_depth = self.item_depth.saturating_sub(1);
                self.flush();
            }
            "ol" | "ul" => {
                self.flush();
                self.lists.pop();
            }
            "strong" | "b" => self.bold = self.bold.saturating_sub(1),
            "em" | "i" => self.italic = self.italic.saturating_sub(1),
            "u" | "ins" => self.underline = self.underline.saturating_sub(1),
            _ => {}
        }
    }

    fn text(&mut self, raw: &str) {
        let decoded = decode_entities(raw);
        let collapsed = collapse_whitespace(&decoded);
        if collapsed.trim().is_empty() && self.current.is_none() {
            return;
        }
        let marks = self.marks();
        let block = self.current_or_paragraph();
        let text = if block.ends_with_space_or_break() {
            collapsed.trim_start()
        } else {
            collapsed.as_str()
        };
        block.push_str(text, marks);
    }

    fn finish(mut self) -> RichDocument {
        self.flush();
        RichDocument::new(self.blocks)
    }
}

fn collapse_whitespace(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_space = false;
    for ch in text.chars() {
        if ch.is_ascii_whitespace() {
            if !in_space {
                out.push(' ');
            }
            in_space = true;
        } else {
            out.push(ch);
            in_space = false;
        }
    }
    out
}

/// Parse HTML into a rich document.
///
/// Never fails: malformed markup degrades to its text content.
pub fn read_html(html: &str) -> RichDocument {
    let mut reader = Reader::default();
    for token in tokenize(html) {
        if let Some(skipped) = reader.skip.as_deref() {
            if matches!(&token, Token::Close { name } if name == skipped) {
                reader.skip = None;
            }
            continue;
        }
        match token {
            Token::Open { name, attrs } => reader.open(&name, attrs),
            Token::Close { name } => reader.close(&name),
            Token::Text(text) => reader.text(text),
        }
    }
    reader.finish()
}

/// Serialize a rich document to HTML.
///
/// A blank document serializes to the empty string.
pub fn write_html(doc: &RichDocument) -> String {
    if doc.is_blank() {
        return String::new();
    }
    let mut out = String::new();
    let mut open_list: Option<BlockKind> = None;
    for block in doc.blocks() {
        if open_list.is_some_and(|kind| kind != block.kind) {
            close_list(&mut out, open_list.take());
        }
        match block.kind {
            BlockKind::Paragraph => write_block(&mut out, "p", block),
            BlockKind::Heading(level) => write_block(&mut out, &format!("h{level}"), block),
            kind @ (BlockKind::OrderedItem | BlockKind::BulletItem) => {
                if open_list.is_none() {
                    out.push_str(if kind == BlockKind::OrderedItem {
                        "<ol>"
                    } else {
                        "<ul>"
                    });
                    open_list = Some(kind);
                }
                write_block(&mut out, "li", block);
            }
        }
    }
    close_list(&mut out, open_list);
    out
}

fn close_list(out: &mut String, kind: Option<BlockKind>) {
    match kind {
        Some(BlockKind::OrderedItem) => out.push_str("</ol>"),
        Some(BlockKind::BulletItem) => out.push_str("</ul>"),
        _ => {}
    }
}

fn write_block(out: &mut String, tag: &str, block: &Block) {
    out.push('<');
    out.push_str(tag);
    out.push('>');
    if block.is_empty() {
        out.push_str("<br>");
    }
    for run in block.runs() {
        let mut open = Vec::new();
        if run.marks.bold {
            open.push("strong");
        }
        if run.marks.italic {
            open.push("em");
        }
        if run.marks.underline {
            open.push("u");
        }
        for tag in &open {
            out.push_str(&format!("<{tag}>"));
        }
        let mut lines = run.text.split('\n').peekable();
        while let Some(line) = lines.next() {
            out.push_str(&escape_html(line));
            if lines.peek().is_some() {
                out.push_str("<br>");
            }
        }
        for tag in open.iter().rev() {
            out.push_str(&format!("</{tag}>"));
        }
    }
    out.push_str("</");
    out.push_str(tag);
    out.push('>');
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(doc: &RichDocument) -> Vec<BlockKind> {
        doc.blocks().iter().map(|b| b.kind).collect()
    }

    fn texts(doc: &RichDocument) -> Vec<&str> {
        doc.blocks().iter().map(Block::text).collect()
    }

    #[test]
    fn test_read_heading_and_paragraph() {
        let doc = read_html("<h1>Title</h1><p>Hi</p>");
        assert_eq!(kinds(&doc), vec![BlockKind::Heading(1), BlockKind::Paragraph]);
        assert_eq!(texts(&doc), vec!["Title", "Hi"]);
    }

    #[test]
    fn test_read_ignores_whitespace_between_blocks() {
        let doc = read_html("<h2>A</h2>\n<p>B</p>\n");
        assert_eq!(texts(&doc), vec!["A", "B"]);
    }

    #[test]
    fn test_read_collapses_whitespace_inside_blocks() {
        let doc = read_html("<p>  hello \n   world  </p>");
        assert_eq!(texts(&doc), vec!["hello world"]);
    }

    #[test]
    fn test_read_marks() {
        let doc = read_html("<p>a <strong>b <em>c</em></strong> <u>d</u></p>");
        let block = &doc.blocks()[0];
        assert_eq!(block.text(), "a b c d");
        let marks = block.marks();
        assert!(!marks[0].bold);
        assert!(marks[2].bold && !marks[2].italic);
        assert!(marks[4].bold && marks[4].italic);
        assert!(marks[6].underline && !marks[6].bold);
    }

    #[test]
    fn test_read_lists() {
        let doc = read_html("<ol><li>one</li><li>two</li></ol><ul><li>dot</li></ul>");
        assert_eq!(
            kinds(&doc),
            vec![
                BlockKind::OrderedItem,
                BlockKind::OrderedItem,
                BlockKind::BulletItem
            ]
        );
        assert_eq!(texts(&doc), vec!["one", "two", "dot"]);
    }

    #[test]
    fn test_read_loose_list_paragraphs_stay_in_item() {
        let doc = read_html("<ul>\n<li>\n<p>first</p>\n</li>\n<li>\n<p>second</p>\n</li>\n</ul>");
        assert_eq!(texts(&doc), vec!["first", "second"]);
        assert_eq!(kinds(&doc), vec![BlockKind::BulletItem, BlockKind::BulletItem]);
    }

    #[test]
    fn test_read_data_list_attribute_selects_kind() {
        let doc = read_html(r#"<ol><li data-list="bullet">a</li><li data-list="ordered">b</li></ol>"#);
        assert_eq!(kinds(&doc), vec![BlockKind::BulletItem, BlockKind::OrderedItem]);
    }

    #[test]
    fn test_read_empty_br_paragraph() {
        let doc = read_html("<p>a</p><p><br></p><p>b</p>");
        assert_eq!(texts(&doc), vec!["a", "", "b"]);
    }

    #[test]
    fn test_read_line_break_inside_paragraph() {
        let doc = read_html("<p>a<br>b</p>");
        assert_eq!(texts(&doc), vec!["a\nb"]);
    }

    #[test]
    fn test_read_deep_headings_clamp_to_three() {
        let doc = read_html("<h5>deep</h5>");
        assert_eq!(kinds(&doc), vec![BlockKind::Heading(3)]);
    }

    #[test]
    fn test_read_skips_script_and_comments() {
        let doc = read_html("<!-- note --><p>x<script>alert('<p>')</script>y</p>");
        assert_eq!(texts(&doc), vec!["xy"]);
    }

    #[test]
    fn test_read_bare_text_becomes_paragraph() {
        let doc = read_html("just text");
        assert_eq!(kinds(&doc), vec![BlockKind::Paragraph]);
        assert_eq!(texts(&doc), vec!["just text"]);
    }

    #[test]
    fn test_read_unknown_tags_keep_text() {
        let doc = read_html(r#"<p><a href="https://x.test">link</a> and <code>code</code></p>"#);
        assert_eq!(texts(&doc), vec!["link and code"]);
    }

    #[test]
    fn test_read_attribute_with_angle_bracket() {
        let doc = read_html(r#"<p title="a > b">ok</p>"#);
        assert_eq!(texts(&doc), vec!["ok"]);
    }

    #[test]
    fn test_decode_entities() {
        assert_eq!(decode_entities("a &amp; b &lt;c&gt;"), "a & b <c>");
        assert_eq!(decode_entities("&#39;&#x41;"), "'A");
        assert_eq!(decode_entities("&bogus;"), "&bogus;");
    }

    #[test]
    fn test_empty_input_reads_as_empty_document() {
        assert!(read_html("").blocks().is_empty());
        assert!(read_html("  \n ").blocks().is_empty());
    }

    #[test]
    fn test_write_blank_document_is_empty_string() {
        assert_eq!(write_html(&RichDocument::default()), "");
        let doc = RichDocument::new(vec![Block::new(BlockKind::Paragraph)]);
        assert_eq!(write_html(&doc), "");
    }

    #[test]
    fn test_write_groups_list_items() {
        let doc = RichDocument::new(vec![
            Block::plain(BlockKind::OrderedItem, "a"),
            Block::plain(BlockKind::OrderedItem, "b"),
            Block::plain(BlockKind::BulletItem, "c"),
            Block::plain(BlockKind::Paragraph, "d"),
        ]);
        assert_eq!(
            write_html(&doc),
            "<ol><li>a</li><li>b</li></ol><ul><li>c</li></ul><p>d</p>"
        );
    }

    #[test]
    fn test_write_marks_and_escaping() {
        let mut block = Block::new(BlockKind::Heading(2));
        block.push_str("x<", Marks::NONE);
        block.push_str(
            "y",
            Marks {
                bold: true,
                italic: true,
                underline: true,
            },
        );
        let doc = RichDocument::new(vec![block, Block::new(BlockKind::Paragraph)]);
        assert_eq!(
            write_html(&doc),
            "<h2>x&lt;<strong><em><u>y</u></em></strong></h2><p><br></p>"
        );
    }

    #[test]
    fn test_write_then_read_preserves_structure() {
        let html = "<h1>T</h1><p>a<br>b</p><ul><li><strong>x</strong></li></ul>";
        let doc = read_html(html);
        assert_eq!(write_html(&doc), html);
    }
}
