//! Color stops and the helpers that place them along the gradient axis.

use crate::color::{clamp, HexColor};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

#[cfg(target_arch = "wasm32")]
use web_time::{SystemTime, UNIX_EPOCH};
#[cfg(not(target_arch = "wasm32"))]
use std::time::{SystemTime, UNIX_EPOCH};

/// Lowest stop position, in percent.
pub const MIN_POSITION: f64 = 0.0;
/// Highest stop position, in percent.
pub const MAX_POSITION: f64 = 100.0;

/// Opaque identifier of a stop, unique within its gradient.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StopId(String);

impl StopId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Generate a fresh id: millisecond timestamp plus a random suffix.
    ///
    /// Unique with overwhelming probability within a process; not suitable
    /// as a global or security-sensitive identifier.
    pub fn generate() -> Self {
        let millis = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis())
            .unwrap_or_default();
        let random = Uuid::new_v4().simple().to_string();
        Self(format!("{}-{}", millis, &random[..9]))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StopId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for StopId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for StopId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// A color anchored at a percentage position along the gradient axis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stop {
    pub id: StopId,
    pub color: HexColor,
    /// Position in percent, within `[0, 100]`.
    pub position: f64,
    /// Opacity within `[0, 1]`.
    pub opacity: f64,
}

impl Stop {
    /// Create a stop, clamping position and opacity into range.
    pub fn new(id: impl Into<StopId>, color: HexColor, position: f64, opacity: f64) -> Self {
        Self {
            id: id.into(),
            color,
            position: clamp(position, MIN_POSITION, MAX_POSITION),
            opacity: clamp(opacity, 0.0, 1.0),
        }
    }

    /// Create a fully opaque stop with a freshly generated id.
    pub fn generated(color: HexColor, position: f64) -> Self {
        Self::new(StopId::generate(), color, position, 1.0)
    }

    /// The stop's color as a CSS `rgba(...)` string.
    pub fn rgba(&self) -> String {
        self.color.to_rgba(self.opacity)
    }
}

/// Partial update of a stop. The id is never part of an update.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StopUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<HexColor>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f64>,
}

impl StopUpdate {
    pub fn color(color: HexColor) -> Self {
        Self {
            color: Some(color),
            ..Self::default()
        }
    }

    /// Position update, clamped to `[0, 100]`.
    pub fn position(position: f64) -> Self {
        Self {
            position: Some(clamp(position, MIN_POSITION, MAX_POSITION)),
            ..Self::default()
        }
    }

    /// Opacity update, clamped to `[0, 1]`.
    pub fn opacity(opacity: f64) -> Self {
        Self {
            opacity: Some(clamp(opacity, 0.0, 1.0)),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.color.is_none() && self.position.is_none() && self.opacity.is_none()
    }

    /// Merge this update into a copy of `stop`.
    ///
    /// Values are taken as given; clamping happens where updates are built.
    pub fn apply_to(&self, stop: &Stop) -> Stop {
        Stop {
            id: stop.id.clone(),
            color: self.color.clone().unwrap_or_else(|| stop.color.clone()),
            position: self.position.unwrap_or(stop.position),
            opacity: self.opacity.unwrap_or(stop.opacity),
        }
    }
}

/// The red to blue pair used when no initial stops are supplied.
pub fn default_stops() -> Vec<Stop> {
    vec![
        Stop::new("1", HexColor::red(), 0.0, 1.0),
        Stop::new("2", HexColor::blue(), 100.0, 1.0),
    ]
}

/// Stops ordered by ascending position. Equal positions keep insertion order.
pub fn sorted_by_position(stops: &[Stop]) -> Vec<&Stop> {
    let mut sorted: Vec<&Stop> = stops.iter().collect();
    sorted.sort_by(|a, b| a.position.total_cmp(&b.position));
    sorted
}

/// Position for a newly added stop: the center of the widest gap.
///
/// With no stops the center of the bar is used; with one stop the new stop
/// goes to the opposite half. Ties between equal gaps favor the leftmost.
pub fn find_midpoint(stops: &[Stop]) -> f64 {
    let sorted = sorted_by_position(stops);
    match sorted.as_slice() {
        [] => 50.0,
        [only] => {
            if only.position < 50.0 {
                75.0
            } else {
                25.0
            }
        }
        _ => {
            let mut max_gap = 0.0;
            let mut midpoint = 50.0;
            for pair in sorted.windows(2) {
                let gap = pair[1].position - pair[0].position;
                if gap > max_gap {
                    max_gap = gap;
                    midpoint = pair[0].position + gap / 2.0;
                }
            }
            midpoint.round()
        }
    }
}

/// Color for a stop inserted at `position`: the nearer neighbor of the
/// enclosing pair, preferring the right one on a tie.
pub fn nearest_color(stops: &[Stop], position: f64) -> HexColor {
    let sorted = sorted_by_position(stops);
    sorted
        .windows(2)
        .find(|pair| position >= pair[0].position && position <= pair[1].position)
        .map(|pair| {
            let to_left = position - pair[0].position;
            let to_right = pair[1].position - position;
            if to_left < to_right {
                pair[0].color.clone()
            } else {
                pair[1].color.clone()
            }
        })
        .unwrap_or_else(HexColor::mid_gray)
}
