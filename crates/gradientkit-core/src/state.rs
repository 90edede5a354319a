//! Gradient state, the action vocabulary and the reducer.
//!
//! All mutation of a gradient goes through [`reduce`], a pure function from
//! the current state and an action to the next state. A no-op returns the
//! input by reference (`Cow::Borrowed`), so callers can tell "nothing
//! changed" apart from "changed to an equal value" without comparing.

use crate::color::{clamp, HexColor};
use crate::stop::{
    default_stops, find_midpoint, nearest_color, Stop, StopId, StopUpdate, MAX_POSITION,
    MIN_POSITION,
};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;

/// A gradient never has fewer stops than this once initialized.
pub const MIN_STOPS: usize = 2;
/// Angle used when the caller supplies none.
pub const DEFAULT_DIRECTION: f64 = 90.0;
/// Largest accepted angle, in degrees.
pub const MAX_DIRECTION: f64 = 360.0;

/// The stops of a linear gradient plus its angle.
///
/// Stops keep insertion order; they are not sorted by position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawGradientState")]
pub struct GradientState {
    stops: Vec<Stop>,
    direction: f64,
}

/// Wire form of [`GradientState`]; loading goes through [`GradientState::new`].
#[derive(Deserialize)]
struct RawGradientState {
    stops: Vec<Stop>,
    #[serde(default = "default_direction")]
    direction: f64,
}

fn default_direction() -> f64 {
    DEFAULT_DIRECTION
}

impl From<RawGradientState> for GradientState {
    fn from(raw: RawGradientState) -> Self {
        Self::new(raw.stops, raw.direction)
    }
}

impl Default for GradientState {
    fn default() -> Self {
        Self::new(default_stops(), DEFAULT_DIRECTION)
    }
}

impl GradientState {
    /// Create a state. The direction is clamped; the stops are taken as given.
    pub fn new(stops: Vec<Stop>, direction: f64) -> Self {
        Self {
            stops,
            direction: clamp(direction, 0.0, MAX_DIRECTION),
        }
    }

    pub fn stops(&self) -> &[Stop] {
        &self.stops
    }

    pub fn direction(&self) -> f64 {
        self.direction
    }

    pub fn stop(&self, id: &StopId) -> Option<&Stop> {
        self.stops.iter().find(|stop| &stop.id == id)
    }

    pub fn contains(&self, id: &StopId) -> bool {
        self.stop(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.stops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stops.is_empty()
    }

    /// Whether removing a stop would be applied.
    pub fn can_remove(&self) -> bool {
        self.stops.len() > MIN_STOPS
    }

    fn with_stops(&self, stops: Vec<Stop>) -> Self {
        Self {
            stops,
            direction: self.direction,
        }
    }

    fn with_appended(&self, stop: Stop) -> Self {
        let mut stops = self.stops.clone();
        stops.push(stop);
        self.with_stops(stops)
    }
}

/// The ways a gradient can change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Action {
    /// Append a mid-gray stop in the widest gap.
    AddStop,
    /// Remove a stop, unless only the minimum number remains.
    RemoveStop { id: StopId },
    /// Merge fields into a stop.
    UpdateStop { id: StopId, updates: StopUpdate },
    /// Set the angle, clamped to `[0, 360]`.
    SetDirection { direction: f64 },
    /// Replace all stops without validation.
    SetStops { stops: Vec<Stop> },
    /// Append a stop at a position, colored like its nearer neighbor.
    InsertStopAt { position: f64 },
    /// Any action tag this version does not know.
    #[serde(other)]
    Unknown,
}

impl Action {
    /// Short name for logging.
    pub fn kind(&self) -> &'static str {
        match self {
            Action::AddStop => "ADD_STOP",
            Action::RemoveStop { .. } => "REMOVE_STOP",
            Action::UpdateStop { .. } => "UPDATE_STOP",
            Action::SetDirection { .. } => "SET_DIRECTION",
            Action::SetStops { .. } => "SET_STOPS",
            Action::InsertStopAt { .. } => "INSERT_STOP_AT",
            Action::Unknown => "UNKNOWN",
        }
    }
}

/// Apply `action` to `state`.
///
/// Returns `Cow::Borrowed(state)` when the action changes nothing, otherwise
/// the new state. The input is never mutated.
pub fn reduce<'a>(state: &'a GradientState, action: &Action) -> Cow<'a, GradientState> {
    match action {
        Action::AddStop => {
            let position = find_midpoint(&state.stops);
            let stop = Stop::generated(HexColor::mid_gray(), position);
            Cow::Owned(state.with_appended(stop))
        }
        Action::RemoveStop { id } => {
            if !state.can_remove() || !state.contains(id) {
                return Cow::Borrowed(state);
            }
            let stops = state
                .stops
                .iter()
                .filter(|stop| &stop.id != id)
                .cloned()
                .collect();
            Cow::Owned(state.with_stops(stops))
        }
        Action::UpdateStop { id, updates } => {
            let changed = state
                .stops
                .iter()
                .any(|stop| &stop.id == id && updates.apply_to(stop) != *stop);
            if !changed {
                return Cow::Borrowed(state);
            }
            let stops = state
                .stops
                .iter()
                .map(|stop| {
                    if &stop.id == id {
                        updates.apply_to(stop)
                    } else {
                        stop.clone()
                    }
                })
                .collect();
            Cow::Owned(state.with_stops(stops))
        }
        Action::SetDirection { direction } => {
            let direction = clamp(*direction, 0.0, MAX_DIRECTION);
            if direction == state.direction {
                return Cow::Borrowed(state);
            }
            Cow::Owned(GradientState {
                stops: state.stops.clone(),
                direction,
            })
        }
        Action::SetStops { stops } => {
            if *stops == state.stops {
                return Cow::Borrowed(state);
            }
            Cow::Owned(state.with_stops(stops.clone()))
        }
        Action::InsertStopAt { position } => {
            let position = clamp(*position, MIN_POSITION, MAX_POSITION).round();
            let color = nearest_color(&state.stops, position);
            Cow::Owned(state.with_appended(Stop::generated(color, position)))
        }
        Action::Unknown => Cow::Borrowed(state),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn three_stops() -> GradientState {
        let mut stops = default_stops();
        stops.push(Stop::new("3", HexColor::mid_gray(), 50.0, 1.0));
        GradientState::new(stops, 90.0)
    }

    fn is_noop(state: &GradientState, action: &Action) -> bool {
        matches!(reduce(state, action), Cow::Borrowed(_))
    }

    #[test]
    fn test_default_state() {
        let state = GradientState::default();
        assert_eq!(state.len(), 2);
        assert_eq!(state.direction(), 90.0);
        assert_eq!(state.stops()[0].color.as_str(), "#ff0000");
        assert_eq!(state.stops()[1].color.as_str(), "#0000ff");
    }

    #[test]
    fn test_add_stop_appends_at_midpoint() {
        let state = GradientState::default();
        let next = reduce(&state, &Action::AddStop).into_owned();

        assert_eq!(next.len(), 3);
        let added = &next.stops()[2];
        assert_eq!(added.position, 50.0);
        assert_eq!(added.color, HexColor::mid_gray());
        assert_eq!(added.opacity, 1.0);
        assert!(!state.contains(&added.id));
        // Input untouched.
        assert_eq!(state.len(), 2);
    }

    #[test]
    fn test_add_stop_is_append_only() {
        let state = GradientState::new(
            vec![
                Stop::new("a", HexColor::red(), 100.0, 1.0),
                Stop::new("b", HexColor::blue(), 60.0, 1.0),
            ],
            0.0,
        );
        let next = reduce(&state, &Action::AddStop).into_owned();
        assert_eq!(next.stops()[2].position, 80.0);
        assert_eq!(next.stops()[0].id.as_str(), "a");
        assert_eq!(next.stops()[1].id.as_str(), "b");
    }

    #[test]
    fn test_remove_respects_minimum() {
        let state = GradientState::default();
        for id in ["1", "2", "missing"] {
            let action = Action::RemoveStop { id: id.into() };
            assert!(is_noop(&state, &action), "removing {} should be a no-op", id);
        }
    }

    #[test]
    fn test_remove_stop() {
        let state = three_stops();
        let next = reduce(&state, &Action::RemoveStop { id: "1".into() }).into_owned();
        let ids: Vec<&str> = next.stops().iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, ["2", "3"]);

        assert!(is_noop(&state, &Action::RemoveStop { id: "missing".into() }));
    }

    #[test]
    fn test_update_stop() {
        let state = three_stops();
        let action = Action::UpdateStop {
            id: "3".into(),
            updates: StopUpdate {
                color: Some(HexColor::parse("#00ff00").unwrap()),
                opacity: Some(0.5),
                ..StopUpdate::default()
            },
        };
        let next = reduce(&state, &action).into_owned();
        let stop = next.stop(&"3".into()).unwrap();
        assert_eq!(stop.color.as_str(), "#00ff00");
        assert_eq!(stop.opacity, 0.5);
        assert_eq!(stop.position, 50.0);
        assert_eq!(next.stops()[0], state.stops()[0]);
        assert_eq!(next.stops()[1], state.stops()[1]);
    }

    #[test]
    fn test_update_does_not_reclamp() {
        let state = three_stops();
        let action = Action::UpdateStop {
            id: "3".into(),
            updates: StopUpdate {
                position: Some(120.0),
                ..StopUpdate::default()
            },
        };
        let next = reduce(&state, &action).into_owned();
        assert_eq!(next.stop(&"3".into()).unwrap().position, 120.0);
    }

    #[test]
    fn test_update_noops() {
        let state = three_stops();
        assert!(is_noop(
            &state,
            &Action::UpdateStop {
                id: "missing".into(),
                updates: StopUpdate::position(10.0),
            }
        ));
        assert!(is_noop(
            &state,
            &Action::UpdateStop {
                id: "3".into(),
                updates: StopUpdate::position(50.0),
            }
        ));
        assert!(is_noop(
            &state,
            &Action::UpdateStop {
                id: "3".into(),
                updates: StopUpdate::default(),
            }
        ));
    }

    #[test]
    fn test_set_direction_clamps() {
        let state = GradientState::default();
        let cases = [
            (-45.0, 0.0),
            (0.0, 0.0),
            (180.0, 180.0),
            (360.0, 360.0),
            (400.0, 360.0),
            (f64::NAN, 0.0),
        ];
        for (input, expected) in cases {
            let next = reduce(&state, &Action::SetDirection { direction: input });
            assert_eq!(next.direction(), expected, "direction {}", input);
        }
    }

    #[test]
    fn test_set_direction_idempotent() {
        let state = GradientState::default();
        assert!(is_noop(&state, &Action::SetDirection { direction: 90.0 }));
        match reduce(&state, &Action::SetDirection { direction: 90.0 }) {
            Cow::Borrowed(same) => assert!(std::ptr::eq(same, &state)),
            Cow::Owned(_) => panic!("expected the same state back"),
        }
    }

    #[test]
    fn test_set_stops_replaces_without_validation() {
        let state = GradientState::default();
        let single = vec![Stop::new("only", HexColor::red(), 10.0, 1.0)];
        let next = reduce(&state, &Action::SetStops { stops: single.clone() }).into_owned();
        assert_eq!(next.stops(), single.as_slice());
        assert_eq!(next.direction(), state.direction());

        let same = state.stops().to_vec();
        assert!(is_noop(&state, &Action::SetStops { stops: same }));
    }

    #[test]
    fn test_insert_stop_at() {
        let state = GradientState::default();
        let next = reduce(&state, &Action::InsertStopAt { position: 20.4 }).into_owned();
        let added = next.stops().last().unwrap();
        assert_eq!(added.position, 20.0);
        assert_eq!(added.color, HexColor::red());

        let next = reduce(&state, &Action::InsertStopAt { position: 180.0 }).into_owned();
        let added = next.stops().last().unwrap();
        assert_eq!(added.position, 100.0);
        assert_eq!(added.color, HexColor::blue());
    }

    #[test]
    fn test_deserialize_clamps_direction() {
        let state: GradientState = serde_json::from_str(
            r##"{"stops":[{"id":"a","color":"#ff0000","position":0,"opacity":1}],"direction":-45}"##,
        )
        .unwrap();
        assert_eq!(state.direction(), 0.0);
        assert_eq!(state.len(), 1);

        let state: GradientState =
            serde_json::from_str(r#"{"stops":[],"direction":900}"#).unwrap();
        assert_eq!(state.direction(), MAX_DIRECTION);

        let json = serde_json::to_string(&GradientState::default()).unwrap();
        let back: GradientState = serde_json::from_str(&json).unwrap();
        assert_eq!(back, GradientState::default());
    }

    #[test]
    fn test_unknown_action() {
        let state = GradientState::default();
        assert!(is_noop(&state, &Action::Unknown));

        let action: Action = serde_json::from_str(r#"{"type":"REVERSE_STOPS"}"#).unwrap();
        assert_eq!(action, Action::Unknown);
    }

    #[test]
    fn test_action_json_shape() {
        let action: Action =
            serde_json::from_str(r#"{"type":"SET_DIRECTION","direction":45}"#).unwrap();
        assert_eq!(action, Action::SetDirection { direction: 45.0 });

        let action: Action = serde_json::from_str(
            r##"{"type":"UPDATE_STOP","id":"1","updates":{"color":"#123456"}}"##,
        )
        .unwrap();
        assert_eq!(action.kind(), "UPDATE_STOP");

        let bad: Result<Action, _> = serde_json::from_str(
            r##"{"type":"UPDATE_STOP","id":"1","updates":{"color":"#12"}}"##,
        );
        assert!(bad.is_err());
    }
}
