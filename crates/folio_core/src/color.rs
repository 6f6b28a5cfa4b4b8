//! Colors and gradients
//!
//! [`Color`] stores linear `0.0..=1.0` channels. Hex parsing and CSS
//! serialization round-trip through 8-bit channels, which is all the
//! styling channel ever needs.

use smallvec::SmallVec;
use std::fmt;
use thiserror::Error;

/// Errors produced when parsing a color literal
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ColorParseError {
    /// Literal did not start with `#`
    #[error("color literal must start with '#': {0:?}")]
    MissingHash(String),

    /// Literal had a digit count other than 3 or 6
    #[error("color literal must have 3 or 6 hex digits: {0:?}")]
    BadLength(String),

    /// Literal contained a non-hex character
    #[error("invalid hex digit in color literal: {0:?}")]
    InvalidDigit(String),
}

/// RGBA color
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const WHITE: Color = Color::rgb(1.0, 1.0, 1.0);
    pub const BLACK: Color = Color::rgb(0.0, 0.0, 0.0);
    pub const TRANSPARENT: Color = Color::rgba(0.0, 0.0, 0.0, 0.0);

    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub const fn from_hex(hex: u32) -> Self {
        let r = ((hex >> 16) & 0xFF) as f32 / 255.0;
        let g = ((hex >> 8) & 0xFF) as f32 / 255.0;
        let b = (hex & 0xFF) as f32 / 255.0;
        Self::rgb(r, g, b)
    }

    /// Parse a `#rgb` or `#rrggbb` literal (case-insensitive)
    pub fn parse_hex(literal: &str) -> Result<Self, ColorParseError> {
        let digits = literal
            .strip_prefix('#')
            .ok_or_else(|| ColorParseError::MissingHash(literal.to_string()))?;

        let expanded: String = match digits.len() {
            6 => digits.to_string(),
            3 => digits.chars().flat_map(|c| [c, c]).collect(),
            _ => return Err(ColorParseError::BadLength(literal.to_string())),
        };

        // from_str_radix tolerates a leading sign
        if !expanded.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(ColorParseError::InvalidDigit(literal.to_string()));
        }
        let value = u32::from_str_radix(&expanded, 16)
            .map_err(|_| ColorParseError::InvalidDigit(literal.to_string()))?;
        Ok(Self::from_hex(value))
    }

    pub fn with_alpha(mut self, alpha: f32) -> Self {
        self.a = alpha;
        self
    }

    /// Linear interpolation between two colors
    pub fn lerp(from: &Color, to: &Color, t: f32) -> Color {
        let t = t.clamp(0.0, 1.0);
        Color::rgba(
            from.r + (to.r - from.r) * t,
            from.g + (to.g - from.g) * t,
            from.b + (to.b - from.b) * t,
            from.a + (to.a - from.a) * t,
        )
    }

    /// Serialize as a CSS color: `#rrggbb` when opaque, `rgba(...)` otherwise
    pub fn to_css(&self) -> String {
        let [r, g, b] = [self.r, self.g, self.b].map(channel_u8);
        if self.a < 1.0 {
            format!("rgba({r},{g},{b},{})", self.a)
        } else {
            format!("#{r:02x}{g:02x}{b:02x}")
        }
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::BLACK
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_css())
    }
}

fn channel_u8(channel: f32) -> u8 {
    (channel.clamp(0.0, 1.0) * 255.0).round() as u8
}

/// Gradient stop
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GradientStop {
    /// Position along the gradient line (`0.0..=1.0`)
    pub offset: f32,
    pub color: Color,
}

impl GradientStop {
    pub const fn new(offset: f32, color: Color) -> Self {
        Self { offset, color }
    }
}

/// Linear gradient with an angle in CSS convention (0deg points up,
/// increasing clockwise)
#[derive(Clone, Debug, PartialEq)]
pub struct LinearGradient {
    pub angle_deg: f32,
    stops: SmallVec<[GradientStop; 4]>,
}

impl LinearGradient {
    /// Create a gradient; stops are kept ordered by offset
    pub fn new(angle_deg: f32, stops: impl IntoIterator<Item = GradientStop>) -> Self {
        let mut stops: SmallVec<[GradientStop; 4]> = stops.into_iter().collect();
        stops.sort_by(|a, b| a.offset.total_cmp(&b.offset));
        Self { angle_deg, stops }
    }

    pub fn stops(&self) -> &[GradientStop] {
        &self.stops
    }

    /// Serialize as a CSS `linear-gradient(...)` expression
    pub fn to_css(&self) -> String {
        let mut css = format!("linear-gradient({}deg", self.angle_deg);
        for stop in &self.stops {
            css.push_str(&format!(
                ", {} {}%",
                stop.color.to_css(),
                (stop.offset * 100.0).round() as i32
            ));
        }
        css.push(')');
        css
    }
}

impl fmt::Display for LinearGradient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_css())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex_matches_from_hex() {
        assert_eq!(Color::parse_hex("#F24D1B"), Ok(Color::from_hex(0xF24D1B)));
        assert_eq!(Color::parse_hex("#f24d1b"), Ok(Color::from_hex(0xF24D1B)));
        assert_eq!(Color::parse_hex("#fff"), Ok(Color::WHITE));
    }

    #[test]
    fn test_parse_hex_errors() {
        assert!(matches!(
            Color::parse_hex("F24D1B"),
            Err(ColorParseError::MissingHash(_))
        ));
        assert!(matches!(
            Color::parse_hex("#F24D"),
            Err(ColorParseError::BadLength(_))
        ));
        assert!(matches!(
            Color::parse_hex("#GGGGGG"),
            Err(ColorParseError::InvalidDigit(_))
        ));
    }

    #[test]
    fn test_css_serialization() {
        assert_eq!(Color::from_hex(0x06B6D4).to_css(), "#06b6d4");
        assert_eq!(Color::BLACK.with_alpha(0.5).to_css(), "rgba(0,0,0,0.5)");
    }

    #[test]
    fn test_gradient_css_orders_stops() {
        let gradient = LinearGradient::new(
            135.0,
            [
                GradientStop::new(1.0, Color::from_hex(0xE64A19)),
                GradientStop::new(0.0, Color::from_hex(0xF35933)),
                GradientStop::new(0.5, Color::from_hex(0xF24D1B)),
            ],
        );
        assert_eq!(
            gradient.to_css(),
            "linear-gradient(135deg, #f35933 0%, #f24d1b 50%, #e64a19 100%)"
        );
    }

    #[test]
    fn test_lerp_endpoints() {
        let a = Color::from_hex(0x000000);
        let b = Color::from_hex(0xFFFFFF);
        assert_eq!(Color::lerp(&a, &b, 0.0), a);
        assert_eq!(Color::lerp(&a, &b, 1.0), b);
    }
}
