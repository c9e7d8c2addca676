//! Theming and color definitions.
//!
//! Uses ANSI colors that adapt to the terminal's color palette.

use ratatui::style::{Color, Modifier, Style};

use crate::document::{BlockKind, Marks};

/// Heading style, shared by the rich-text pane and the preview.
pub fn heading_style(level: u8) -> Style {
    match level {
        1 => Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
        2 => Style::default()
            .fg(Color::Green)
            .add_modifier(Modifier::BOLD),
        3 => Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
        4 => Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD),
        5 => Style::default()
            .fg(Color::Magenta)
            .add_modifier(Modifier::BOLD),
        _ => Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
    }
}

/// Base style for a rich-text block.
pub fn block_style(kind: BlockKind) -> Style {
    match kind {
        BlockKind::Heading(level) => heading_style(level),
        BlockKind::Paragraph | BlockKind::OrderedItem | BlockKind::BulletItem => Style::default(),
    }
}

/// Apply inline marks on top of a base style.
pub fn style_for_marks(base: Style, marks: Marks) -> Style {
    let mut style = base;
    if marks.bold {
        style = style.add_modifier(Modifier::BOLD);
    }
    if marks.italic {
        style = style.add_modifier(Modifier::ITALIC);
    }
    if marks.underline {
        style = style.add_modifier(Modifier::UNDERLINED);
    }
    style
}

/// Inline styling collected while walking the preview AST.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InlineStyle {
    pub strong: bool,
    pub emphasis: bool,
    pub strikethrough: bool,
    pub code: bool,
    pub link: bool,
}

/// Get the style for an inline span, merged with a base line style.
pub fn style_for_inline(base: Style, inline: InlineStyle) -> Style {
    let mut style = base;
    if inline.emphasis {
        style = style.add_modifier(Modifier::ITALIC);
    }
    if inline.strong {
        style = style.add_modifier(Modifier::BOLD);
    }
    if inline.strikethrough {
        style = style.add_modifier(Modifier::CROSSED_OUT);
    }
    if inline.code {
        style = style.fg(Color::Indexed(245)).bg(Color::Indexed(236));
    }
    if inline.link {
        style = style.fg(Color::Blue).add_modifier(Modifier::UNDERLINED);
    }
    style
}

pub fn code_block_style() -> Style {
    Style::default()
        .fg(Color::Indexed(245))
        .add_modifier(Modifier::DIM)
}

pub fn quote_style() -> Style {
    Style::default()
        .fg(Color::Blue)
        .add_modifier(Modifier::ITALIC)
}

pub fn rule_style() -> Style {
    Style::default()
        .fg(Color::Indexed(240))
        .add_modifier(Modifier::DIM)
}

pub fn cursor_style() -> Style {
    Style::default().bg(Color::White).fg(Color::Black)
}

pub fn toolbar_style() -> Style {
    Style::default().bg(Color::Indexed(236)).fg(Color::White)
}

pub fn button_style(active: bool) -> Style {
    if active {
        Style::default()
            .bg(Color::Cyan)
            .fg(Color::Black)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().bg(Color::Indexed(239)).fg(Color::White)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_marks_add_modifiers() {
        let style = style_for_marks(
            Style::default(),
            Marks {
                bold: true,
                italic: false,
                underline: true,
            },
        );
        assert!(style.add_modifier.contains(Modifier::BOLD));
        assert!(style.add_modifier.contains(Modifier::UNDERLINED));
        assert!(!style.add_modifier.contains(Modifier::ITALIC));
    }

    #[test]
    fn test_heading_levels_are_bold() {
        for level in 1..=6 {
            assert!(heading_style(level).add_modifier.contains(Modifier::BOLD));
        }
    }

    #[test]
    fn test_paragraph_block_is_unstyled() {
        assert_eq!(block_style(BlockKind::Paragraph), Style::default());
    }
}
