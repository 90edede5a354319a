//! Edit-boundary input handling: text fields and pointer events.
//!
//! Raw UI input is normalized here before it becomes an [`Action`](crate::Action).
//! Nothing in this module touches gradient state.

use crate::color::HexColor;
use crate::stop::StopId;
use kurbo::Point;
use serde::{Deserialize, Serialize};

/// Longest text the hex field accepts, `#` included.
const HEX_INPUT_LEN: usize = 7;

/// Classification of text typed into a hex color field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HexInput {
    /// A full `#rrggbb` color, ready to dispatch.
    Complete(HexColor),
    /// A valid prefix such as `#` or `#ab1`; keep the text, dispatch nothing.
    Partial,
    /// Not a hex color and not on the way to becoming one.
    Invalid,
}

impl HexInput {
    pub fn classify(text: &str) -> Self {
        let Some(digits) = text.strip_prefix('#') else {
            return Self::Invalid;
        };
        if text.len() > HEX_INPUT_LEN || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Self::Invalid;
        }
        match HexColor::parse(text) {
            Ok(color) => Self::Complete(color),
            Err(_) => Self::Partial,
        }
    }

    /// The color, if the input is complete.
    pub fn color(&self) -> Option<&HexColor> {
        match self {
            Self::Complete(color) => Some(color),
            _ => None,
        }
    }

    /// Whether the text field should accept this text.
    pub fn is_acceptable(&self) -> bool {
        !matches!(self, Self::Invalid)
    }
}

/// Parse the text of a number field leniently.
///
/// The longest numeric prefix is used (`"42px"` is 42) and empty or
/// unparsable text reads as 0. Overflowing values and a leading `Infinity`
/// come back infinite so callers clamp them to the far end of their range.
pub fn parse_number_input(text: &str) -> f64 {
    let text = text.trim_start();
    let (sign, unsigned) = match text.strip_prefix('-') {
        Some(rest) => (-1.0, rest),
        None => (1.0, text.strip_prefix('+').unwrap_or(text)),
    };
    if unsigned.starts_with("Infinity") {
        return sign * f64::INFINITY;
    }
    let end = text
        .char_indices()
        .take_while(|&(i, c)| {
            c.is_ascii_digit()
                || c == '.'
                || ((c == '+' || c == '-') && (i == 0 || text[..i].ends_with(['e', 'E'])))
                || ((c == 'e' || c == 'E') && i > 0)
        })
        .map(|(i, c)| i + c.len_utf8())
        .last()
        .unwrap_or(0);

    (1..=end)
        .rev()
        .find_map(|len| text[..len].parse::<f64>().ok())
        .filter(|value| !value.is_nan())
        .unwrap_or(0.0)
}

/// Pointer input relevant to the gradient bar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PointerEvent {
    /// Pointer pressed on the marker of `stop`.
    Down { position: Point, stop: StopId },
    /// Pointer moved anywhere in the viewport.
    Move { position: Point },
    /// Pointer released anywhere in the viewport.
    Up { position: Point },
}

impl PointerEvent {
    pub fn position(&self) -> Point {
        match self {
            Self::Down { position, .. } | Self::Move { position } | Self::Up { position } => {
                *position
            }
        }
    }
}
