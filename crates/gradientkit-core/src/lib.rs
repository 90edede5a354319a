//! GradientKit Core Library
//!
//! Platform-agnostic state model, reducer and CSS projection for the
//! GradientKit linear gradient editor. Presentation layers drive a
//! [`GradientEditor`] with actions and pointer events and read CSS strings back.

pub mod color;
pub mod config;
pub mod css;
pub mod drag;
pub mod editor;
pub mod input;
pub mod preset;
pub mod slider;
pub mod state;
pub mod stop;

pub use color::{clamp, hex_to_rgba, ColorError, HexColor};
pub use config::{ConfigError, EditorConfig};
pub use css::{
    css_code, linear_gradient, preview_background, stops_to_css_string, tailwind_code,
    CodeFormat, CodeSnippet,
};
pub use drag::{BarGeometry, DragController, DragState, NoCapture, PointerCapture};
pub use editor::{ChangeListener, GradientEditor};
pub use input::{parse_number_input, HexInput, PointerEvent};
pub use preset::{Preset, PresetError};
pub use slider::{slider_background, slider_markers, SliderMarker};
pub use state::{reduce, Action, GradientState, DEFAULT_DIRECTION, MIN_STOPS};
pub use stop::{default_stops, find_midpoint, Stop, StopId, StopUpdate};
