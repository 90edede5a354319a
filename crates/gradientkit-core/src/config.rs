//! Editor configuration.

use crate::state::{GradientState, DEFAULT_DIRECTION};
use crate::stop::{default_stops, Stop};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid configuration: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Settings applied when an editor is created.
///
/// Every field has a default, so `{}` is a valid configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Angle of a freshly mounted editor.
    pub default_direction: f64,
    /// Stops of a freshly mounted editor.
    pub initial_stops: Vec<Stop>,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            default_direction: DEFAULT_DIRECTION,
            initial_stops: default_stops(),
        }
    }
}

impl EditorConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// The state an editor starts from.
    pub fn initial_state(&self) -> GradientState {
        GradientState::new(self.initial_stops.clone(), self.default_direction)
    }
}
