//! Terminal rendering of the markdown preview.
//!
//! Walks the comrak AST built with the preview options and produces styled,
//! width-wrapped lines. Raw HTML nodes are omitted.

use comrak::nodes::{AstNode, ListDelimType, ListType, NodeValue};
use comrak::{Arena, parse_document};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use unicode_width::UnicodeWidthStr;

use crate::convert::preview_options;

use super::style::{
    InlineStyle, code_block_style, heading_style, quote_style, rule_style, style_for_inline,
};

#[derive(Debug, Clone)]
struct InlineSpan {
    text: String,
    style: InlineStyle,
}

impl InlineSpan {
    fn new(text: impl Into<String>, style: InlineStyle) -> Self {
        Self {
            text: text.into(),
            style,
        }
    }
}

/// Render markdown into preview lines wrapped to `width` columns.
pub fn preview_lines(markdown: &str, width: u16) -> Vec<Line<'static>> {
    let arena = Arena::new();
    let options = preview_options();
    let root = parse_document(&arena, markdown, &options);

    let mut lines = Vec::new();
    process_node(root, &mut lines, usize::from(width.max(1)), 0, None);
    while lines.last().is_some_and(|line: &Line<'_>| line.width() == 0) {
        lines.pop();
    }
    lines
}

fn process_node<'a>(
    node: &'a AstNode<'a>,
    lines: &mut Vec<Line<'static>>,
    width: usize,
    depth: usize,
    list_marker: Option<String>,
) {
    match &node.data.borrow().value {
        NodeValue::Heading(heading) => {
            let spans = collect_inline_spans(node);
            lines.extend(wrap_spans(
                &spans,
                width,
                "",
                "",
                heading_style(heading.level),
            ));
            lines.push(Line::default());
        }

        NodeValue::Paragraph => {
            let spans = collect_inline_spans(node);
            lines.extend(wrap_spans(&spans, width, "", "", Style::default()));
            lines.push(Line::default());
        }

        NodeValue::CodeBlock(code_block) => {
            for raw_line in code_block.literal.lines() {
                lines.push(Line::styled(format!("  {raw_line}"), code_block_style()));
            }
            lines.push(Line::default());
        }

        NodeValue::List(list) => {
            let delimiter = match list.delimiter {
                ListDelimType::Paren => ')',
                ListDelimType::Period => '.',
            };
            let count = node.children().count();
            let number_width = (list.start + count.saturating_sub(1)).to_string().len();
            for (index, child) in node.children().enumerate() {
                let marker = match list.list_type {
                    ListType::Bullet => "• ".to_string(),
                    ListType::Ordered => format!(
                        "{:>number_width$}{delimiter} ",
                        list.start + index
                    ),
                };
                process_node(child, lines, width, depth + 1, Some(marker));
            }
            if depth == 0 {
                lines.push(Line::default());
            }
        }

        NodeValue::Item(_) => render_item(node, lines, width, depth, list_marker),

        NodeValue::TaskItem(symbol) => {
            let marker = if symbol.is_some() { "✓ " } else { "□ " };
            render_item(node, lines, width, depth, Some(marker.to_string()));
        }

        NodeValue::BlockQuote => {
            let mut inner = Vec::new();
            for child in node.children() {
                process_node(child, &mut inner, width.saturating_sub(2).max(1), depth, None);
            }
            while inner.last().is_some_and(|line| line.width() == 0) {
                inner.pop();
            }
            for line in inner {
                let mut spans = vec![Span::styled("│ ", quote_style())];
                spans.extend(
                    line.spans
                        .into_iter()
                        .map(|span| Span::styled(span.content, span.style.patch(quote_style()))),
                );
                lines.push(Line::from(spans));
            }
            lines.push(Line::default());
        }

        NodeValue::ThematicBreak => {
            lines.push(Line::styled("─".repeat(width), rule_style()));
            lines.push(Line::default());
        }

        NodeValue::Table(_) => {
            for (row_idx, row) in node.children().enumerate() {
                let cells: Vec<String> = row.children().map(extract_text).collect();
                let style = if row_idx == 0 {
                    Style::default().add_modifier(Modifier::BOLD)
                } else {
                    Style::default()
                };
                lines.push(Line::styled(cells.join(" │ "), style));
            }
            lines.push(Line::default());
        }

        NodeValue::HtmlBlock(_) => {}

        _ => {
            for child in node.children() {
                process_node(child, lines, width, depth, list_marker.clone());
            }
        }
    }
}

fn render_item<'a>(
    node: &'a AstNode<'a>,
    lines: &mut Vec<Line<'static>>,
    width: usize,
    depth: usize,
    marker: Option<String>,
) {
    let indent = "  ".repeat(depth.saturating_sub(1));
    let marker = marker.unwrap_or_else(|| "- ".to_string());
    let prefix_first = format!("{indent}{marker}");
    let prefix_next = format!("{indent}{}", " ".repeat(marker.width()));
    let mut rendered_any = false;

    for child in node.children() {
        if matches!(child.data.borrow().value, NodeValue::Paragraph) {
            let spans = collect_inline_spans(child);
            let prefix = if rendered_any {
                &prefix_next
            } else {
                &prefix_first
            };
            lines.extend(wrap_spans(&spans, width, prefix, &prefix_next, Style::default()));
            rendered_any = true;
        } else {
            process_node(child, lines, width, depth, None);
        }
    }

    if !rendered_any {
        lines.push(Line::raw(prefix_first));
    }
}

fn extract_text<'a>(node: &'a AstNode<'a>) -> String {
    collect_inline_spans(node)
        .into_iter()
        .map(|span| span.text)
        .collect::<String>()
        .replace('\n', " ")
}

fn collect_inline_spans<'a>(node: &'a AstNode<'a>) -> Vec<InlineSpan> {
    let mut spans = Vec::new();
    for child in node.children() {
        collect_inline_spans_recursive(child, InlineStyle::default(), &mut spans);
    }
    spans
}

fn collect_inline_spans_recursive<'a>(
    node: &'a AstNode<'a>,
    style: InlineStyle,
    spans: &mut Vec<InlineSpan>,
) {
    match &node.data.borrow().value {
        NodeValue::List(_) | NodeValue::Item(_) | NodeValue::HtmlInline(_) => {}
        NodeValue::Text(text) => spans.push(InlineSpan::new(text.clone(), style)),
        NodeValue::Code(code) => {
            let code_style = InlineStyle {
                code: true,
                ..InlineStyle::default()
            };
            spans.push(InlineSpan::new(code.literal.clone(), code_style));
        }
        NodeValue::Emph => {
            let next = InlineStyle {
                emphasis: true,
                ..style
            };
            for child in node.children() {
                collect_inline_spans_recursive(child, next, spans);
            }
        }
        NodeValue::Strong => {
            let next = InlineStyle {
                strong: true,
                ..style
            };
            for child in node.children() {
                collect_inline_spans_recursive(child, next, spans);
            }
        }
        NodeValue::Strikethrough => {
            let next = InlineStyle {
                strikethrough: true,
                ..style
            };
            for child in node.children() {
                collect_inline_spans_recursive(child, next, spans);
            }
        }
        NodeValue::Link(_) => {
            let next = InlineStyle { link: true, ..style };
            for child in node.children() {
                collect_inline_spans_recursive(child, next, spans);
            }
        }
        NodeValue::Image(image) => {
            let alt = extract_text(node);
            let label = if alt.is_empty() { &image.url } else { &alt };
            spans.push(InlineSpan::new(format!("[Image: {label}]"), style));
        }
        NodeValue::SoftBreak => spans.push(InlineSpan::new(" ", style)),
        NodeValue::LineBreak => spans.push(InlineSpan::new("\n", style)),
        _ => {
            for child in node.children() {
                collect_inline_spans_recursive(child, style, spans);
            }
        }
    }
}

/// Word-wrap spans to `width` columns. `"\n"` spans force a break.
fn wrap_spans(
    spans: &[InlineSpan],
    width: usize,
    prefix_first: &str,
    prefix_next: &str,
    base: Style,
) -> Vec<Line<'static>> {
    let tokens: Vec<InlineSpan> = spans.iter().flat_map(split_inline_tokens).collect();
    let prefix_spans = usize::from(!prefix_first.is_empty() || !prefix_next.is_empty());

    let mut lines: Vec<Line<'static>> = Vec::new();
    let mut current: Vec<Span<'static>> = Vec::new();
    let mut current_len = 0usize;
    let mut has_word = false;

    let start_line = |prefix: &str,
                      current: &mut Vec<Span<'static>>,
                      current_len: &mut usize,
                      has_word: &mut bool| {
        current.clear();
        if !prefix.is_empty() {
            current.push(Span::raw(prefix.to_string()));
        }
        *current_len = prefix.width();
        *has_word = false;
    };

    start_line(prefix_first, &mut current, &mut current_len, &mut has_word);

    for token in tokens {
        if token.text == "\n" {
            finish_line(&mut lines, &mut current, prefix_spans);
            start_line(prefix_next, &mut current, &mut current_len, &mut has_word);
            continue;
        }
        let token_len = token.text.width();
        let token_is_ws = token.text.chars().all(char::is_whitespace);

        if current_len + token_len > width && has_word {
            finish_line(&mut lines, &mut current, prefix_spans);
            start_line(prefix_next, &mut current, &mut current_len, &mut has_word);
        }

        if token_is_ws && !has_word {
            // Drop leading whitespace at wrapped line starts.
            continue;
        }

        current_len += token_len;
        current.push(Span::styled(token.text, style_for_inline(base, token.style)));
        has_word = true;
    }

    finish_line(&mut lines, &mut current, prefix_spans);
    lines
}

/// Push the current line without trailing whitespace. The first `keep`
/// spans are the line prefix and always stay.
fn finish_line(lines: &mut Vec<Line<'static>>, current: &mut Vec<Span<'static>>, keep: usize) {
    while current.len() > keep && current.last().is_some_and(|s| s.content.trim().is_empty()) {
        current.pop();
    }
    lines.push(Line::from(std::mem::take(current)));
}

fn split_inline_tokens(span: &InlineSpan) -> Vec<InlineSpan> {
    let mut out = Vec::new();
    let mut buf = String::new();
    let mut ws_state: Option<bool> = None;

    for ch in span.text.chars() {
        if ch == '\n' {
            if !buf.is_empty() {
                out.push(InlineSpan::new(std::mem::take(&mut buf), span.style));
            }
            out.push(InlineSpan::new("\n", span.style));
            ws_state = None;
            continue;
        }
        let is_ws = ch.is_whitespace();
        if ws_state.is_some_and(|state| state != is_ws) {
            out.push(InlineSpan::new(std::mem::take(&mut buf), span.style));
        }
        buf.push(ch);
        ws_state = Some(is_ws);
    }

    if !buf.is_empty() {
        out.push(InlineSpan::new(buf, span.style));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(lines: &[Line<'_>]) -> Vec<String> {
        lines
            .iter()
            .map(|line| line.spans.iter().map(|s| s.content.as_ref()).collect())
            .collect()
    }

    #[test]
    fn test_empty_markdown_has_no_lines() {
        assert!(preview_lines("", 40).is_empty());
    }

    #[test]
    fn test_heading_uses_heading_style() {
        let lines = preview_lines("# Title\n\nHi", 40);
        assert_eq!(texts(&lines), vec!["Title", "", "Hi"]);
        assert!(lines[0].spans[0].style.add_modifier.contains(Modifier::BOLD));
    }

    #[test]
    fn test_strong_is_bold() {
        let lines = preview_lines("**bold** text", 40);
        let bold = lines[0]
            .spans
            .iter()
            .find(|s| s.content == "bold")
            .map(|s| s.style);
        assert!(bold.is_some_and(|s| s.add_modifier.contains(Modifier::BOLD)));
    }

    #[test]
    fn test_lists_get_markers() {
        let lines = texts(&preview_lines("- a\n- b\n\n1. x\n2. y", 40));
        assert!(lines.contains(&"• a".to_string()));
        assert!(lines.contains(&"• b".to_string()));
        assert!(lines.contains(&"1. x".to_string()));
        assert!(lines.contains(&"2. y".to_string()));
    }

    #[test]
    fn test_raw_html_is_omitted() {
        let lines = texts(&preview_lines("<div>secret</div>\n\nshown", 40));
        assert_eq!(lines, vec!["shown"]);
    }

    #[test]
    fn test_paragraph_wraps_to_width() {
        let lines = texts(&preview_lines("one two three four", 9));
        assert_eq!(lines, vec!["one two", "three", "four"]);
    }

    #[test]
    fn test_hard_break_starts_new_line() {
        let lines = texts(&preview_lines("a  \nb", 40));
        assert_eq!(lines, vec!["a", "b"]);
    }

    #[test]
    fn test_task_list_markers() {
        let lines = texts(&preview_lines("- [x] done\n- [ ] todo", 40));
        assert!(lines.contains(&"✓ done".to_string()), "got {lines:?}");
        assert!(lines.contains(&"□ todo".to_string()), "got {lines:?}");
    }

    #[test]
    fn test_code_block_is_indented() {
        let lines = texts(&preview_lines("```\nlet x = 1;\n```", 40));
        assert_eq!(lines, vec!["  let x = 1;"]);
    }

    #[test]
    fn test_blockquote_prefix() {
        let lines = texts(&preview_lines("> quoted", 40));
        assert_eq!(lines, vec!["│ quoted"]);
    }
}
