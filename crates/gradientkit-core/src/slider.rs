//! Read model for the gradient bar and its stop markers.

use crate::css::linear_gradient;
use crate::stop::{Stop, StopId};

/// Angle of the bar preview: always left to right.
pub const SLIDER_DIRECTION: f64 = 90.0;

/// A marker drawn on the bar for one stop.
#[derive(Debug, Clone, PartialEq)]
pub struct SliderMarker {
    pub id: StopId,
    /// Horizontal offset within the bar, in percent.
    pub left_percent: f64,
    /// Swatch fill as a CSS `rgba(...)` string.
    pub swatch: String,
    pub selected: bool,
}

/// Background of the bar: the gradient laid out left to right.
pub fn slider_background(stops: &[Stop]) -> String {
    linear_gradient(stops, SLIDER_DIRECTION)
}

/// Markers for every stop, in insertion order.
pub fn slider_markers(stops: &[Stop], selected: Option<&StopId>) -> Vec<SliderMarker> {
    stops
        .iter()
        .map(|stop| SliderMarker {
            id: stop.id.clone(),
            left_percent: stop.position,
            swatch: stop.rgba(),
            selected: selected == Some(&stop.id),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stop::default_stops;

    #[test]
    fn test_background_is_horizontal() {
        assert_eq!(
            slider_background(&default_stops()),
            "linear-gradient(90deg, rgba(255, 0, 0, 1) 0%, rgba(0, 0, 255, 1) 100%)"
        );
    }

    #[test]
    fn test_markers() {
        let stops = default_stops();
        let markers = slider_markers(&stops, Some(&"2".into()));
        assert_eq!(markers.len(), 2);
        assert_eq!(markers[0].left_percent, 0.0);
        assert_eq!(markers[0].swatch, "rgba(255, 0, 0, 1)");
        assert!(!markers[0].selected);
        assert!(markers[1].selected);

        assert!(slider_markers(&stops, None).iter().all(|m| !m.selected));
    }
}
