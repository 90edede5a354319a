//! Gradient presets exchanged as JSON.

use crate::state::{GradientState, MIN_STOPS};
use crate::stop::Stop;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Preset errors.
#[derive(Debug, Error)]
pub enum PresetError {
    #[error("Invalid preset JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Preset has {0} stops, at least 2 are required")]
    TooFewStops(usize),
}

/// A named gradient that can be loaded into an editor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Preset {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub stops: Vec<Stop>,
    #[serde(default = "default_direction")]
    pub direction: f64,
}

fn default_direction() -> f64 {
    crate::state::DEFAULT_DIRECTION
}

impl Preset {
    pub fn new(stops: Vec<Stop>, direction: f64) -> Self {
        Self {
            name: None,
            stops,
            direction,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Capture the current state of an editor.
    pub fn from_state(state: &GradientState) -> Self {
        Self::new(state.stops().to_vec(), state.direction())
    }

    /// Parse a preset. Colors are validated; stop count is not.
    pub fn from_json(json: &str) -> Result<Self, PresetError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String, PresetError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Check that the preset can seed an editor.
    pub fn validate(&self) -> Result<(), PresetError> {
        if self.stops.len() < MIN_STOPS {
            return Err(PresetError::TooFewStops(self.stops.len()));
        }
        Ok(())
    }
}
