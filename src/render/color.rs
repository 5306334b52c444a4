use std::fmt;

/// An RGB color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
#[error("invalid color '{0}'")]
pub struct InvalidColor(String);

impl Color {
    pub const BLACK: Color = Color::new(0, 0, 0);
    pub const WHITE: Color = Color::new(255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse a `#rrggbb` color.
    pub fn from_hex(input: &str) -> Result<Self, InvalidColor> {
        let digits = input.strip_prefix('#').unwrap_or(input);
        match hex::decode(digits).as_deref() {
            Ok(&[r, g, b]) => Ok(Self::new(r, g, b)),
            _ => Err(InvalidColor(input.to_string())),
        }
    }

    /// Blend `other` over this color with the given alpha.
    pub fn mix(self, other: Color, alpha: f32) -> Color {
        let alpha = alpha.clamp(0.0, 1.0);
        let channel = |a: u8, b: u8| (a as f32 + (b as f32 - a as f32) * alpha).round() as u8;
        Color::new(channel(self.r, other.r), channel(self.g, other.g), channel(self.b, other.b))
    }

    /// Scale the brightness of this color.
    pub fn dimmed(self, factor: f32) -> Color {
        Color::BLACK.mix(self, factor)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", hex::encode([self.r, self.g, self.b]))
    }
}

impl From<Color> for crossterm::style::Color {
    fn from(color: Color) -> Self {
        Self::Rgb { r: color.r, g: color.g, b: color.b }
    }
}

/// Convert HSL to RGB color
/// H: hue (0-360), S: saturation (0-100), L: lightness (0-100)
pub fn hsl_to_rgb(h: f32, s: f32, l: f32) -> Color {
    let h = h.rem_euclid(360.0);
    let s = (s / 100.0).clamp(0.0, 1.0);
    let l = (l / 100.0).clamp(0.0, 1.0);

    let c = (1.0 - (2.0 * l - 1.0).abs()) * s;
    let x = c * (1.0 - ((h / 60.0) % 2.0 - 1.0).abs());
    let m = l - c / 2.0;

    let (r, g, b) = match h {
        h if h < 60.0 => (c, x, 0.0),
        h if h < 120.0 => (x, c, 0.0),
        h if h < 180.0 => (0.0, c, x),
        h if h < 240.0 => (0.0, x, c),
        h if h < 300.0 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };

    Color::new(((r + m) * 255.0) as u8, ((g + m) * 255.0) as u8, ((b + m) * 255.0) as u8)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::hash("#3b82f6", Color::new(0x3b, 0x82, 0xf6))]
    #[case::bare("10b981", Color::new(0x10, 0xb9, 0x81))]
    fn parse_hex(#[case] input: &str, #[case] expected: Color) {
        assert_eq!(Color::from_hex(input), Ok(expected));
    }

    #[rstest]
    #[case::short("#fff")]
    #[case::long("#ffffffff")]
    #[case::garbage("#zzzzzz")]
    fn invalid_hex(#[case] input: &str) {
        assert!(Color::from_hex(input).is_err());
    }

    #[test]
    fn display_round_trips() {
        let color = Color::new(0xf5, 0x9e, 0x0b);
        assert_eq!(color.to_string(), "#f59e0b");
    }

    #[test]
    fn mixing() {
        assert_eq!(Color::BLACK.mix(Color::WHITE, 0.5), Color::new(128, 128, 128));
        assert_eq!(Color::BLACK.mix(Color::WHITE, 2.0), Color::WHITE);
        assert_eq!(Color::WHITE.dimmed(0.0), Color::BLACK);
    }

    #[rstest]
    #[case::red(0.0, Color::new(255, 0, 0))]
    #[case::green(120.0, Color::new(0, 255, 0))]
    #[case::blue(240.0, Color::new(0, 0, 255))]
    #[case::wrapped(480.0, Color::new(0, 255, 0))]
    fn hsl(#[case] hue: f32, #[case] expected: Color) {
        assert_eq!(hsl_to_rgb(hue, 100.0, 50.0), expected);
    }
}
