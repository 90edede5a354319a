//! Projection of a stop list and angle into CSS and Tailwind strings.

use crate::state::GradientState;
use crate::stop::{sorted_by_position, Stop};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Render stops as `rgba(...) <position>%` entries, sorted by position.
///
/// The caller's slice is left untouched.
pub fn stops_to_css_string(stops: &[Stop]) -> String {
    sorted_by_position(stops)
        .into_iter()
        .map(|stop| format!("{} {}%", stop.rgba(), stop.position))
        .collect::<Vec<_>>()
        .join(", ")
}

/// `linear-gradient(<direction>deg, <stops>)`.
pub fn linear_gradient(stops: &[Stop], direction: f64) -> String {
    format!("linear-gradient({}deg, {})", direction, stops_to_css_string(stops))
}

/// A complete CSS `background` declaration.
pub fn css_code(stops: &[Stop], direction: f64) -> String {
    format!("background: {};", linear_gradient(stops, direction))
}

/// A Tailwind arbitrary-value background class.
///
/// Tailwind class names cannot contain spaces, so every space in the stop
/// list is removed, including the ones inside `rgba(...)`.
pub fn tailwind_code(stops: &[Stop], direction: f64) -> String {
    let stops = stops_to_css_string(stops).replace(' ', "");
    format!("bg-[linear-gradient({}deg,{})]", direction, stops)
}

/// Background for the live preview of a gradient state.
pub fn preview_background(state: &GradientState) -> String {
    linear_gradient(state.stops(), state.direction())
}

/// Output flavor shown by the code display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CodeFormat {
    #[default]
    Css,
    Tailwind,
}

impl CodeFormat {
    pub const ALL: [CodeFormat; 2] = [CodeFormat::Css, CodeFormat::Tailwind];

    /// Tab label.
    pub fn label(self) -> &'static str {
        match self {
            CodeFormat::Css => "CSS",
            CodeFormat::Tailwind => "Tailwind",
        }
    }

    /// Render the stops in this format.
    pub fn render(self, stops: &[Stop], direction: f64) -> String {
        match self {
            CodeFormat::Css => css_code(stops, direction),
            CodeFormat::Tailwind => tailwind_code(stops, direction),
        }
    }

    /// Split rendered code into the single line the code display shows.
    pub fn snippet(self, stops: &[Stop], direction: f64) -> CodeSnippet {
        match self {
            CodeFormat::Css => {
                let code = css_code(stops, direction);
                let value = code.replacen("background: ", "", 1);
                CodeSnippet {
                    key: "background",
                    separator: ": ",
                    value,
                }
            }
            CodeFormat::Tailwind => CodeSnippet {
                key: "class",
                separator: "=",
                value: format!("\"{}\"", tailwind_code(stops, direction)),
            },
        }
    }
}

impl fmt::Display for CodeFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One highlighted line of the code display: `key`, `separator`, `value`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeSnippet {
    pub key: &'static str,
    pub separator: &'static str,
    pub value: String,
}

impl fmt::Display for CodeSnippet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.key, self.separator, self.value)
    }
}
