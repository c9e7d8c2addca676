//! Line building for the two editing surfaces.

use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use unicode_width::UnicodeWidthStr;

use crate::document::BlockKind;
use crate::editor::{PlainBuffer, RichSurface};

use super::style::{block_style, cursor_style, style_for_marks};

/// Rendered lines of a pane plus the row holding the cursor.
#[derive(Debug, Default)]
pub struct PaneLines {
    pub lines: Vec<Line<'static>>,
    pub cursor_row: usize,
}

/// Render the rich-text surface as formatted lines.
///
/// Headings take their heading style, list items get a bullet or their
/// number, and hard line breaks continue under the item's text.
pub fn rich_lines(surface: &RichSurface) -> PaneLines {
    let cursor = surface.cursor();
    let mut out = PaneLines::default();
    let mut ordinal = 0usize;

    for (idx, block) in surface.document().blocks().iter().enumerate() {
        ordinal = if block.kind == BlockKind::OrderedItem {
            ordinal + 1
        } else {
            0
        };
        let marker = match block.kind {
            BlockKind::OrderedItem => format!("{ordinal}. "),
            BlockKind::BulletItem => "• ".to_string(),
            BlockKind::Paragraph | BlockKind::Heading(_) => String::new(),
        };
        let continuation = " ".repeat(marker.width());
        let base = block_style(block.kind);
        let cursor_offset = (idx == cursor.block).then_some(cursor.offset);

        let mut spans = start_spans(&marker);
        for (char_idx, (ch, marks)) in block
            .text()
            .chars()
            .zip(block.marks().iter().copied())
            .enumerate()
        {
            let at_cursor = cursor_offset == Some(char_idx);
            if ch == '\n' {
                if at_cursor {
                    spans.push(Span::styled(" ", cursor_style()));
                    out.cursor_row = out.lines.len();
                }
                out.lines.push(Line::from(std::mem::take(&mut spans)));
                spans = start_spans(&continuation);
                continue;
            }
            let style = if at_cursor {
                out.cursor_row = out.lines.len();
                cursor_style()
            } else {
                style_for_marks(base, marks)
            };
            push_char(&mut spans, ch, style);
        }
        if cursor_offset == Some(block.len_chars()) {
            out.cursor_row = out.lines.len();
            spans.push(Span::styled(" ", cursor_style()));
        }
        out.lines.push(Line::from(spans));
    }
    out
}

fn start_spans(prefix: &str) -> Vec<Span<'static>> {
    if prefix.is_empty() {
        Vec::new()
    } else {
        vec![Span::styled(prefix.to_string(), Style::default().fg(Color::Yellow))]
    }
}

/// Append a character, extending the last span when the style matches.
fn push_char(spans: &mut Vec<Span<'static>>, ch: char, style: Style) {
    if let Some(last) = spans.last_mut()
        && last.style == style
        && style != cursor_style()
    {
        last.content.to_mut().push(ch);
        return;
    }
    spans.push(Span::styled(ch.to_string(), style));
}

/// Render visible rows of the markdown buffer with a line-number gutter.
pub fn plain_lines(buffer: &PlainBuffer, start: usize, height: usize) -> PaneLines {
    let total_lines = buffer.line_count();
    let gutter_width = usize::from(line_number_width(total_lines));
    let end = (start + height).min(total_lines);
    let cursor = buffer.cursor();

    let mut lines = Vec::new();
    for line_idx in start..end {
        let line_text = buffer.line_at(line_idx).unwrap_or_default();
        let line_num = format!("{:>gutter_width$} ", line_idx + 1);
        let mut spans = vec![Span::styled(line_num, Style::default().fg(Color::DarkGray))];

        if line_idx == cursor.line {
            // Split line at cursor position for cursor rendering
            let col = cursor.col.min(line_text.chars().count());
            let before: String = line_text.chars().take(col).collect();
            let cursor_char = line_text.chars().nth(col).map_or(' ', |c| c);
            let after: String = line_text.chars().skip(col + 1).collect();

            if !before.is_empty() {
                spans.push(Span::raw(before));
            }
            spans.push(Span::styled(cursor_char.to_string(), cursor_style()));
            if !after.is_empty() {
                spans.push(Span::raw(after));
            }
        } else {
            spans.push(Span::raw(line_text));
        }

        lines.push(Line::from(spans));
    }
    PaneLines {
        lines,
        cursor_row: cursor.line,
    }
}

/// Calculate the width needed for line numbers.
pub const fn line_number_width(total_lines: usize) -> u16 {
    if total_lines < 10 {
        1
    } else if total_lines < 100 {
        2
    } else if total_lines < 1_000 {
        3
    } else if total_lines < 10_000 {
        4
    } else if total_lines < 100_000 {
        5
    } else {
        6
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editor::Direction;
    use ratatui::style::Modifier;

    fn texts(lines: &[Line<'_>]) -> Vec<String> {
        lines
            .iter()
            .map(|line| line.spans.iter().map(|s| s.content.as_ref()).collect())
            .collect()
    }

    #[test]
    fn test_rich_lines_number_ordered_items() {
        let surface =
            RichSurface::from_html("<h1>T</h1><ol><li>a</li><li>b</li></ol><ul><li>c</li></ul>");
        let pane = rich_lines(&surface);
        let lines = texts(&pane.lines);
        assert_eq!(lines[0], "T");
        assert_eq!(lines[1], "1. a");
        assert_eq!(lines[2], "2. b");
        assert_eq!(lines[3], "• c ");
        assert_eq!(pane.cursor_row, 3);
    }

    #[test]
    fn test_rich_lines_apply_marks() {
        let mut surface = RichSurface::from_html("<p><strong>b</strong>x</p>");
        surface.move_cursor(Direction::Left);
        surface.move_cursor(Direction::Left);
        let pane = rich_lines(&surface);
        let spans = &pane.lines[0].spans;
        assert_eq!(spans[0].style, cursor_style());
        assert_eq!(spans[1].content, "x");
        assert!(!spans[1].style.add_modifier.contains(Modifier::BOLD));
    }

    #[test]
    fn test_rich_line_break_continues_under_marker() {
        let surface = RichSurface::from_html("<ul><li>a<br>b</li></ul><p>z</p>");
        let lines = texts(&rich_lines(&surface).lines);
        assert_eq!(lines[0], "• a");
        assert_eq!(lines[1], "  b");
    }

    #[test]
    fn test_plain_lines_have_gutter_and_cursor() {
        let mut buffer = PlainBuffer::from_text("# é\nbody");
        buffer.move_end();
        let pane = plain_lines(&buffer, 0, 10);
        let lines = texts(&pane.lines);
        assert_eq!(lines, vec!["1 # é ", "2 body"]);
        assert_eq!(pane.cursor_row, 0);
    }

    #[test]
    fn test_plain_lines_respect_window() {
        let buffer = PlainBuffer::from_text("a\nb\nc");
        let lines = texts(&plain_lines(&buffer, 1, 1).lines);
        assert_eq!(lines, vec!["2 b"]);
    }

    #[test]
    fn test_line_number_width() {
        assert_eq!(line_number_width(9), 1);
        assert_eq!(line_number_width(10), 2);
        assert_eq!(line_number_width(12_345), 5);
    }
}
