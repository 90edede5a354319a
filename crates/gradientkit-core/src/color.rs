//! Hex color parsing, clamping and rgba formatting.

use peniko::Color;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Errors produced when parsing a `#rrggbb` color.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColorError {
    #[error("Color must start with '#': {0:?}")]
    MissingHash(String),
    #[error("Expected 6 hex digits, found {0}")]
    InvalidLength(usize),
    #[error("Invalid hex digit in {0:?}")]
    InvalidDigit(String),
}

/// Two-sided clamp.
///
/// Unlike `f64::clamp` this never panics on `min > max` and maps NaN to `min`,
/// so the result is always finite for finite bounds. Negative zero comes out
/// as `0.0` so it never renders as `-0`.
pub fn clamp(value: f64, min: f64, max: f64) -> f64 {
    value.max(min).min(max) + 0.0
}

/// A validated 6-digit hex color (`#rrggbb`).
///
/// The text is kept exactly as entered so the UI can echo it back; the channel
/// bytes are decoded once at construction.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct HexColor {
    text: String,
    rgb: [u8; 3],
}

impl HexColor {
    /// Color used for stops added without an explicit color.
    pub fn mid_gray() -> Self {
        Self::from_rgb(0x80, 0x80, 0x80)
    }

    pub fn red() -> Self {
        Self::from_rgb(0xff, 0, 0)
    }

    pub fn blue() -> Self {
        Self::from_rgb(0, 0, 0xff)
    }

    /// Build a color from channel bytes. The text form is lowercase.
    pub fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        Self {
            text: format!("#{:02x}{:02x}{:02x}", r, g, b),
            rgb: [r, g, b],
        }
    }

    /// Parse a `#rrggbb` string.
    pub fn parse(hex: &str) -> Result<Self, ColorError> {
        let digits = hex
            .strip_prefix('#')
            .ok_or_else(|| ColorError::MissingHash(hex.to_string()))?;
        if digits.len() != 6 {
            return Err(ColorError::InvalidLength(digits.chars().count()));
        }
        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(ColorError::InvalidDigit(hex.to_string()));
        }

        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&digits[range], 16)
                .map_err(|_| ColorError::InvalidDigit(hex.to_string()))
        };
        let rgb = [channel(0..2)?, channel(2..4)?, channel(4..6)?];

        Ok(Self {
            text: hex.to_string(),
            rgb,
        })
    }

    /// The color as originally entered, including the leading `#`.
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Red, green and blue channel bytes.
    pub fn rgb(&self) -> (u8, u8, u8) {
        (self.rgb[0], self.rgb[1], self.rgb[2])
    }

    /// Format as a CSS `rgba(r, g, b, alpha)` function.
    pub fn to_rgba(&self, alpha: f64) -> String {
        let (r, g, b) = self.rgb();
        format!("rgba({}, {}, {}, {})", r, g, b, alpha)
    }

    /// Convert to a peniko color with the given opacity applied.
    pub fn to_color(&self, opacity: f64) -> Color {
        let (r, g, b) = self.rgb();
        let alpha = (clamp(opacity, 0.0, 1.0) * 255.0).round() as u8;
        Color::from_rgba8(r, g, b, alpha)
    }
}

impl fmt::Display for HexColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

impl FromStr for HexColor {
    type Err = ColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for HexColor {
    type Error = ColorError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<HexColor> for String {
    fn from(color: HexColor) -> Self {
        color.text
    }
}

impl From<HexColor> for Color {
    fn from(color: HexColor) -> Self {
        color.to_color(1.0)
    }
}

impl From<Color> for HexColor {
    fn from(color: Color) -> Self {
        let rgba = color.to_rgba8();
        Self::from_rgb(rgba.r, rgba.g, rgba.b)
    }
}

/// Convert a `#rrggbb` string and alpha into a CSS `rgba(...)` string.
///
/// Malformed input is reported instead of producing meaningless channels.
pub fn hex_to_rgba(hex: &str, alpha: f64) -> Result<String, ColorError> {
    HexColor::parse(hex).map(|color| color.to_rgba(alpha))
}
