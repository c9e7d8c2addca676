use super::*;
use crate::document::{Block, BlockKind, Marks, RichDocument};

#[test]
fn test_heading_and_paragraph_use_atx_style() {
    let md = html_to_markdown("<h1>Title</h1><p>Hi</p>").unwrap();
    assert_eq!(md, "# Title\n\nHi");
}

#[test]
fn test_heading_levels() {
    let md = html_to_markdown("<h2>Two</h2><h3>Three</h3>").unwrap();
    assert_eq!(md, "## Two\n\n### Three");
}

#[test]
fn test_empty_html_converts_to_empty_markdown() {
    assert_eq!(html_to_markdown("").unwrap(), "");
    assert_eq!(html_to_markdown("<p><br></p>").unwrap(), "");
}

#[test]
fn test_bold_and_italic() {
    let md = html_to_markdown("<p><strong>bold</strong> and <em>italic</em></p>").unwrap();
    assert_eq!(md, "**bold** and *italic*");
}

#[test]
fn test_whitespace_moves_outside_emphasis() {
    let md = html_to_markdown("<p>a<strong> b </strong>c</p>").unwrap();
    assert_eq!(md, "a **b** c");
}

#[test]
fn test_underline_is_dropped() {
    let md = html_to_markdown("<p><u>under</u></p>").unwrap();
    assert_eq!(md, "under");
}

#[test]
fn test_bullet_list() {
    let md = html_to_markdown("<ul><li>one</li><li>two</li></ul>").unwrap();
    let lines: Vec<&str> = md.lines().collect();
    assert_eq!(lines.len(), 2, "tight list expected, got {md:?}");
    assert!(lines[0].starts_with('-') && lines[0].ends_with("one"));
    assert!(lines[1].starts_with('-') && lines[1].ends_with("two"));
}

#[test]
fn test_ordered_list() {
    let md = html_to_markdown("<ol><li>one</li><li>two</li></ol>").unwrap();
    assert!(md.starts_with("1."), "got {md:?}");
    assert!(md.contains("one"));
    assert!(md.contains("two"));
    let html = markdown_to_html(&md);
    assert!(html.contains("<ol>"));
    assert!(html.contains("<li>two</li>"));
}

#[test]
fn test_special_characters_are_escaped() {
    let md = html_to_markdown("<p>*not emphasis*</p>").unwrap();
    let html = markdown_to_html(&md);
    assert!(!html.contains("<em>"), "got {html:?}");
    assert!(html.contains("*not emphasis*"));
}

#[test]
fn test_line_break_survives_round_trip() {
    let md = html_to_markdown("<p>a<br>b</p>").unwrap();
    let html = markdown_to_html(&md);
    assert!(html.contains("<br"), "got {html:?}");
}

#[test]
fn test_heading_line_break_becomes_space() {
    let md = html_to_markdown("<h1>a<br>b</h1>").unwrap();
    assert_eq!(md, "# a b");
    assert_eq!(markdown_to_html(&md), "<h1>a b</h1>");
}

#[test]
fn test_heading_break_keeps_following_blocks() {
    let md = html_to_markdown("<h2><strong>x</strong><br>y</h2><p>z</p>").unwrap();
    assert_eq!(md, "## **x** y\n\nz");
}

#[test]
fn test_trailing_punctuation_moves_outside_strong() {
    let md = html_to_markdown("<p><strong>foo.</strong>bar</p>").unwrap();
    assert_eq!(md, "**foo**.bar");
    assert_eq!(
        markdown_to_html(&md),
        "<p><strong>foo</strong>.bar</p>"
    );
}

#[test]
fn test_leading_punctuation_moves_outside_emphasis() {
    let md = html_to_markdown("<p>foo<em>,bar</em></p>").unwrap();
    assert_eq!(md, "foo,*bar*");
    assert_eq!(markdown_to_html(&md), "<p>foo,<em>bar</em></p>");
}

#[test]
fn test_punctuation_stays_inside_before_space() {
    let md = html_to_markdown("<p><strong>foo.</strong> bar</p>").unwrap();
    assert_eq!(md, "**foo.** bar");
}

#[test]
fn test_markdown_heading_to_html() {
    assert_eq!(markdown_to_html("# Title"), "<h1>Title</h1>");
}

#[test]
fn test_markdown_empty_to_html() {
    assert_eq!(markdown_to_html(""), "");
}

#[test]
fn test_editing_conversion_keeps_raw_html() {
    let html = markdown_to_html("<u>x</u>");
    assert!(html.contains("<u>x</u>"));
}

#[test]
fn test_preview_renders_strong() {
    let html = render_markdown_to_html("**bold**");
    assert!(html.contains("<strong>bold</strong>"));
}

#[test]
fn test_preview_omits_raw_html() {
    let html = render_markdown_to_html("<script>alert(1)</script>");
    assert!(!html.contains("<script>"));
}

#[test]
fn test_preview_renders_strikethrough() {
    let html = render_markdown_to_html("~~gone~~");
    assert!(html.contains("<del>gone</del>"));
}

#[test]
fn test_comrak_converter_delegates() {
    let converter = ComrakConverter;
    assert_eq!(
        converter.html_to_markdown("<h1>T</h1>").unwrap(),
        "# T"
    );
    assert_eq!(converter.markdown_to_html("# T").unwrap(), "<h1>T</h1>");
}

#[test]
fn test_round_trip_keeps_marks() {
    let mut block = Block::new(BlockKind::Paragraph);
    block.push_str("plain ", Marks::NONE);
    block.push_str(
        "strong",
        Marks {
            bold: true,
            ..Marks::NONE
        },
    );
    block.push_str(" ", Marks::NONE);
    block.push_str(
        "slanted",
        Marks {
            italic: true,
            ..Marks::NONE
        },
    );
    let doc = RichDocument::new(vec![block]);
    let md = document_to_markdown(&doc).unwrap();
    let back = RichDocument::from_html(&markdown_to_html(&md));
    let block = &back.blocks()[0];
    assert_eq!(block.text(), "plain strong slanted");
    assert!(block.marks()[6].bold);
    assert!(block.marks()[13].italic);
    assert!(!block.marks()[0].bold);
}

#[test]
fn test_error_messages_name_direction() {
    let err = ConvertError::failed(Conversion::MarkdownToHtml, "boom");
    assert_eq!(err.to_string(), "markdown to HTML conversion failed: boom");
}

mod property_tests {
    use super::*;
    use proptest::prelude::*;

    fn block_kind() -> impl Strategy<Value = BlockKind> {
        prop_oneof![
            Just(BlockKind::Paragraph),
            (1u8..=3).prop_map(BlockKind::Heading),
            Just(BlockKind::OrderedItem),
            Just(BlockKind::BulletItem),
        ]
    }

    fn marks() -> impl Strategy<Value = Marks> {
        (any::<bool>(), any::<bool>()).prop_map(|(bold, italic)| Marks {
            bold,
            italic,
            ..Marks::NONE
        })
    }

    /// A word with optional trailing punctuation.
    fn word() -> impl Strategy<Value = (String, Marks)> {
        ("[a-z\u{e9}\u{6f22}]{1,6}[.,;:!?]?", marks())
    }

    /// Marked words joined by unmarked spaces or hard breaks.
    fn block_runs() -> impl Strategy<Value = Vec<(String, Marks)>> {
        let separator = prop_oneof![3 => Just(" "), 1 => Just("\n")];
        (word(), prop::collection::vec((separator, word()), 0..5))
            .prop_map(|(first, rest)| {
                let mut runs = vec![first];
                for (sep, word) in rest {
                    runs.push((sep.to_string(), Marks::NONE));
                    runs.push(word);
                }
                runs
            })
    }

    fn build_block(kind: BlockKind, runs: &[(String, Marks)]) -> Block {
        let mut block = Block::new(kind);
        for (text, marks) in runs {
            block.push_str(text, *marks);
        }
        block
    }

    /// Characters with their bold and italic flags. Headings have no hard
    /// breaks, so a break there reads back as a space.
    fn styled_chars(block: &Block) -> Vec<(char, bool, bool)> {
        let heading = matches!(block.kind, BlockKind::Heading(_));
        block
            .text()
            .chars()
            .zip(block.marks().iter())
            .map(|(ch, marks)| {
                if heading && ch == '\n' {
                    (' ', false, false)
                } else {
                    (ch, marks.bold, marks.italic)
                }
            })
            .collect()
    }

    proptest! {
        #[test]
        fn rich_to_markdown_and_back_keeps_kinds_text_and_marks(
            blocks in prop::collection::vec((block_kind(), block_runs()), 1..8)
        ) {
            let doc = RichDocument::new(
                blocks
                    .iter()
                    .map(|(kind, runs)| build_block(*kind, runs))
                    .collect(),
            );
            let md = document_to_markdown(&doc).unwrap();
            let back = RichDocument::from_html(&markdown_to_html(&md));

            let expected: Vec<(BlockKind, Vec<(char, bool, bool)>)> =
                doc.blocks().iter().map(|b| (b.kind, styled_chars(b))).collect();
            let actual: Vec<(BlockKind, Vec<(char, bool, bool)>)> =
                back.blocks().iter().map(|b| (b.kind, styled_chars(b))).collect();
            prop_assert_eq!(actual, expected, "markdown was {:?}", md);
        }

        #[test]
        fn html_to_markdown_never_fails_on_text(input in "\\PC{0,64}") {
            prop_assert!(html_to_markdown(&input).is_ok());
        }
    }
}
