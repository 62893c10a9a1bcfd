//! Circle Widget
//!
//! The breathing button: a filled circle scaled around the centre of its
//! area, with an optional label across the middle row.
//!
//! Terminal cells are roughly twice as tall as they are wide, so horizontal
//! distances are halved before testing against the radius.

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::widgets::Widget;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Largest scale the button reaches; at this scale the circle fills its area
pub const MAX_SCALE: f32 = 1.2;

/// Cell height / cell width
const CELL_ASPECT: f32 = 2.0;

/// Symbol used to paint the circle
const FILL: &str = "█";

/// Radius in rows of a circle at [`MAX_SCALE`] that fits `area`
pub fn fitted_radius(area: Rect) -> f32 {
    let by_height = f32::from(area.height) / 2.0;
    let by_width = f32::from(area.width) / (2.0 * CELL_ASPECT);
    by_height.min(by_width)
}

/// A filled, scalable circle
pub struct Circle<'a> {
    scale: f32,
    color: Color,
    label: &'a str,
    label_style: Style,
}

impl<'a> Circle<'a> {
    /// Circle at `scale` in `color`; [`MAX_SCALE`] fills the area
    pub fn new(scale: f32, color: Color) -> Self {
        Self {
            scale,
            color,
            label: "",
            label_style: Style::default(),
        }
    }

    /// Text drawn across the middle row
    pub fn label(mut self, label: &'a str) -> Self {
        self.label = label;
        self
    }

    /// Style for the label text
    pub fn label_style(mut self, style: Style) -> Self {
        self.label_style = style;
        self
    }
}

impl Widget for Circle<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.is_empty() {
            return;
        }

        let radius = fitted_radius(area) * self.scale.max(0.0) / MAX_SCALE;
        let cx = f32::from(area.x) + f32::from(area.width) / 2.0;
        let cy = f32::from(area.y) + f32::from(area.height) / 2.0;
        let inside = |x: u16, y: u16| {
            let dx = (f32::from(x) + 0.5 - cx) / CELL_ASPECT;
            let dy = f32::from(y) + 0.5 - cy;
            dx * dx + dy * dy <= radius * radius
        };

        for y in area.top()..area.bottom() {
            for x in area.left()..area.right() {
                if inside(x, y) {
                    buf[(x, y)].set_symbol(FILL).set_fg(self.color);
                }
            }
        }

        if self.label.is_empty() {
            return;
        }

        let width = (self.label.width() as u16).min(area.width);
        let lx = area.x + (area.width - width) / 2;
        let ly = area.y + area.height / 2;
        buf.set_stringn(
            lx,
            ly,
            self.label,
            usize::from(area.width),
            self.label_style.bg(self.color),
        );

        let mut col = 0u16;
        for ch in self.label.chars() {
            let x = lx.saturating_add(col);
            if x >= area.right() {
                break;
            }
            if !inside(x, ly) {
                // Off the circle the label sits on the background
                buf[(x, ly)].set_fg(self.color).set_bg(Color::Reset);
            } else if ch == ' ' {
                // Spaces would composite as holes in the button
                buf[(x, ly)].set_symbol(FILL).set_fg(self.color);
            }
            col += ch.width().unwrap_or(0) as u16;
        }
    }
}
