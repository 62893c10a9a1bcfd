//! TextBlock Widget
//!
//! A borderless, wrapped text region. When the text is taller than the
//! area, the newest lines stay in view.

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::widgets::Widget;
use textwrap::wrap;
use unicode_width::UnicodeWidthStr;

/// A borderless text block
pub struct TextBlock<'a> {
    content: &'a str,
    style: Style,
    centered: bool,
}

impl<'a> TextBlock<'a> {
    /// Block showing `content`; `\n` starts a new line
    pub fn new(content: &'a str) -> Self {
        Self {
            content,
            style: Style::default(),
            centered: false,
        }
    }

    /// Style for every line
    pub fn style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    /// Centre each line horizontally
    pub fn centered(mut self) -> Self {
        self.centered = true;
        self
    }

    /// Lines after wrapping to `width`; blank source lines are kept
    pub fn wrapped_lines(&self, width: u16) -> Vec<String> {
        let width = usize::from(width.max(1));
        self.content
            .split('\n')
            .flat_map(|line| {
                if line.is_empty() {
                    vec![String::new()]
                } else {
                    wrap(line, width)
                        .into_iter()
                        .map(|cow| cow.to_string())
                        .collect()
                }
            })
            .collect()
    }
}

impl Widget for TextBlock<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.is_empty() || self.content.is_empty() {
            return;
        }

        let wrapped = self.wrapped_lines(area.width);
        let skip = wrapped.len().saturating_sub(usize::from(area.height));

        for (i, line) in wrapped.iter().skip(skip).enumerate() {
            let y = area.y + i as u16;
            let line_width = (line.width() as u16).min(area.width);
            let x = if self.centered {
                area.x + (area.width - line_width) / 2
            } else {
                area.x
            };
            buf.set_stringn(x, y, line, usize::from(area.width), self.style);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn row(buf: &Buffer, y: u16) -> String {
        (0..buf.area.width)
            .map(|x| buf[(x, y)].symbol().to_string())
            .collect()
    }

    #[test]
    fn test_centered_lines() {
        let area = Rect::new(0, 0, 11, 3);
        let mut buf = Buffer::empty(area);
        TextBlock::new("Hello\nyou").centered().render(area, &mut buf);

        assert_eq!(row(&buf, 0), "   Hello   ");
        assert_eq!(row(&buf, 1), "    you    ");
        assert_eq!(row(&buf, 2), "           ");
    }

    #[test]
    fn test_blank_lines_are_kept() {
        let block = TextBlock::new("a\n\nb");
        assert_eq!(block.wrapped_lines(10), vec!["a", "", "b"]);
    }

    #[test]
    fn test_overflow_keeps_newest_lines() {
        let area = Rect::new(0, 0, 5, 2);
        let mut buf = Buffer::empty(area);
        TextBlock::new("one\ntwo\nthree").render(area, &mut buf);

        assert_eq!(row(&buf, 0), "two  ");
        assert_eq!(row(&buf, 1), "three");
    }

    #[test]
    fn test_long_lines_wrap() {
        let block = TextBlock::new("Let's take a moment");
        assert_eq!(block.wrapped_lines(10), vec!["Let's take", "a moment"]);
    }
}
