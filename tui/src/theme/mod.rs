//! Theme and Colors
//!
//! The breathing palette: soft blues and a lavender for the button, a light
//! grey for the greeting, and a dim grey-blue for chrome.

use ratatui::style::Color;

use breathe_core::ButtonColor;

/// A 24-bit colour that can be blended
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    /// Linear blend towards `to`; `t` is clamped to `0.0..=1.0`
    #[must_use]
    pub fn lerp(self, to: Rgb, t: f32) -> Rgb {
        let t = t.clamp(0.0, 1.0);
        let mix = |a: u8, b: u8| -> u8 {
            let v = f32::from(a) + (f32::from(b) - f32::from(a)) * t;
            v.round().clamp(0.0, 255.0) as u8
        };
        Rgb(mix(self.0, to.0), mix(self.1, to.1), mix(self.2, to.2))
    }

    /// As a ratatui colour
    #[must_use]
    pub fn to_color(self) -> Color {
        Color::Rgb(self.0, self.1, self.2)
    }
}

impl From<ButtonColor> for Rgb {
    fn from(color: ButtonColor) -> Self {
        let (r, g, b) = color.rgb();
        Rgb(r, g, b)
    }
}

// ============================================================================
// Surface
// ============================================================================

/// Assumed terminal background; the button fades in from here
pub const BACKGROUND: Rgb = Rgb(0x12, 0x16, 0x1f);

/// Greeting text
pub const GREETING_TEXT: Color = Color::Rgb(0xdd, 0xdd, 0xdd);

/// Text drawn on top of the button
pub const LABEL_TEXT: Color = Color::Rgb(0x62, 0x87, 0x9e);

/// Status line and hints
pub const DIM_GRAY: Color = Color::Rgb(100, 100, 100);

/// Status line accent while a tap is expected
pub const HINT_BLUE: Color = Color::Rgb(0x8c, 0xc2, 0xe3);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lerp_endpoints() {
        let a = Rgb(0, 100, 200);
        let b = Rgb(200, 100, 0);
        assert_eq!(a.lerp(b, 0.0), a);
        assert_eq!(a.lerp(b, 1.0), b);
        assert_eq!(a.lerp(b, 0.5), Rgb(100, 100, 100));
    }

    #[test]
    fn test_lerp_clamps() {
        let a = Rgb(10, 10, 10);
        let b = Rgb(20, 20, 20);
        assert_eq!(a.lerp(b, 7.0), b);
        assert_eq!(a.lerp(b, -1.0), a);
    }

    #[test]
    fn test_button_palette() {
        assert_eq!(Rgb::from(ButtonColor::Purple), Rgb(0xb6, 0xbd, 0xe1));
        assert_eq!(
            Rgb::from(ButtonColor::LightBlue).to_color(),
            Color::Rgb(0x8c, 0xc2, 0xe3)
        );
    }
}
