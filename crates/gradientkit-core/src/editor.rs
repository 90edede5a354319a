//! The editor instance: owns one gradient and routes all edits through the reducer.

use crate::config::EditorConfig;
use crate::css::{css_code, preview_background, tailwind_code, CodeFormat, CodeSnippet};
use crate::drag::{BarGeometry, DragController, DragState, NoCapture, PointerCapture};
use crate::input::{parse_number_input, HexInput, PointerEvent};
use crate::preset::Preset;
use crate::slider::{slider_background, slider_markers, SliderMarker};
use crate::state::{reduce, Action, GradientState, MIN_STOPS};
use crate::stop::{Stop, StopId, StopUpdate};
use kurbo::Rect;
use std::borrow::Cow;

/// Callback invoked with a read-only snapshot after every state change.
pub type ChangeListener = Box<dyn FnMut(&GradientState)>;

/// An interactive linear gradient editor.
///
/// The editor exclusively owns its [`GradientState`]. Every change, whether it
/// comes from a text field, a button or a marker drag, is expressed as an
/// [`Action`] and applied with [`reduce`].
pub struct GradientEditor<C: PointerCapture = NoCapture> {
    state: GradientState,
    config: EditorConfig,
    drag: DragController<C>,
    /// Stop highlighted on the bar.
    selected: Option<StopId>,
    listener: Option<ChangeListener>,
}

impl Default for GradientEditor<NoCapture> {
    fn default() -> Self {
        Self::new(EditorConfig::default())
    }
}

impl GradientEditor<NoCapture> {
    /// Create a headless editor.
    pub fn new(config: EditorConfig) -> Self {
        Self::with_capture(config, NoCapture)
    }
}

impl<C: PointerCapture> GradientEditor<C> {
    /// Create an editor whose drags acquire `capture`.
    pub fn with_capture(config: EditorConfig, capture: C) -> Self {
        let state = config.initial_state();
        if state.len() < MIN_STOPS {
            log::warn!(
                "Editor created with {} stops, expected at least {}",
                state.len(),
                MIN_STOPS
            );
        }
        Self {
            state,
            config,
            drag: DragController::new(capture),
            selected: None,
            listener: None,
        }
    }

    /// Replace the initial stops and/or direction supplied by the config.
    pub fn with_initial(mut self, stops: Option<Vec<Stop>>, direction: Option<f64>) -> Self {
        let stops = stops.unwrap_or_else(|| self.state.stops().to_vec());
        let direction = direction.unwrap_or(self.state.direction());
        self.state = GradientState::new(stops, direction);
        self
    }

    /// Register the change listener, replacing any previous one.
    pub fn on_change(&mut self, listener: impl FnMut(&GradientState) + 'static) {
        self.listener = Some(Box::new(listener));
    }

    pub fn state(&self) -> &GradientState {
        &self.state
    }

    pub fn stops(&self) -> &[Stop] {
        self.state.stops()
    }

    pub fn direction(&self) -> f64 {
        self.state.direction()
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    /// Whether the remove buttons are enabled.
    pub fn can_remove(&self) -> bool {
        self.state.can_remove()
    }

    /// Apply an action. Returns `true` if the state changed.
    ///
    /// The listener is only notified on change.
    pub fn dispatch(&mut self, action: Action) -> bool {
        let next = match reduce(&self.state, &action) {
            Cow::Borrowed(_) => {
                log::trace!("{} left state unchanged", action.kind());
                return false;
            }
            Cow::Owned(next) => next,
        };
        log::debug!(
            "{}: {} stops, {}deg",
            action.kind(),
            next.len(),
            next.direction()
        );
        self.state = next;
        self.reconcile();
        if let Some(listener) = self.listener.as_mut() {
            listener(&self.state);
        }
        true
    }

    /// Drop selection and drag targets that no longer exist.
    fn reconcile(&mut self) {
        if self
            .selected
            .as_ref()
            .is_some_and(|id| !self.state.contains(id))
        {
            self.selected = None;
        }
        if let Some(id) = self.drag.state().stop().cloned() {
            if !self.state.contains(&id) {
                self.drag.cancel_for(&id);
            }
        }
    }

    /// Bulk-load a preset: replace the stops, then set the direction.
    pub fn load_preset(&mut self, preset: &Preset) -> bool {
        if let Some(name) = &preset.name {
            log::info!("Loading preset {:?}", name);
        }
        let stops_changed = self.dispatch(Action::SetStops {
            stops: preset.stops.clone(),
        });
        let direction_changed = self.dispatch(Action::SetDirection {
            direction: preset.direction,
        });
        stops_changed || direction_changed
    }

    /// Snapshot the current gradient as a preset.
    pub fn to_preset(&self) -> Preset {
        Preset::from_state(&self.state)
    }

    /// Append a stop in the widest gap. Returns its id.
    pub fn add_stop(&mut self) -> Option<StopId> {
        if self.dispatch(Action::AddStop) {
            self.last_stop_id()
        } else {
            None
        }
    }

    /// Append a stop at `position` and select it. Returns its id.
    pub fn insert_stop_at(&mut self, position: f64) -> Option<StopId> {
        if !self.dispatch(Action::InsertStopAt { position }) {
            return None;
        }
        let id = self.last_stop_id()?;
        self.selected = Some(id.clone());
        Some(id)
    }

    fn last_stop_id(&self) -> Option<StopId> {
        self.state.stops().last().map(|stop| stop.id.clone())
    }

    pub fn remove_stop(&mut self, id: &StopId) -> bool {
        self.dispatch(Action::RemoveStop { id: id.clone() })
    }

    pub fn update_stop(&mut self, id: &StopId, updates: StopUpdate) -> bool {
        self.dispatch(Action::UpdateStop {
            id: id.clone(),
            updates,
        })
    }

    /// Handle text typed into a stop's hex field.
    ///
    /// Only a complete `#rrggbb` value is dispatched; anything else is
    /// reported back so the field can keep or reject the text.
    pub fn edit_color(&mut self, id: &StopId, text: &str) -> HexInput {
        let input = HexInput::classify(text);
        match &input {
            HexInput::Complete(color) => {
                self.update_stop(id, StopUpdate::color(color.clone()));
            }
            HexInput::Partial => log::trace!("Partial color {:?} for {}", text, id),
            HexInput::Invalid => log::warn!("Rejected color {:?} for {}", text, id),
        }
        input
    }

    /// Handle text typed into a stop's position field.
    pub fn edit_position(&mut self, id: &StopId, text: &str) -> bool {
        self.update_stop(id, StopUpdate::position(parse_number_input(text)))
    }

    /// Handle text typed into a stop's opacity field.
    pub fn edit_opacity(&mut self, id: &StopId, text: &str) -> bool {
        self.update_stop(id, StopUpdate::opacity(parse_number_input(text)))
    }

    /// Handle the angle slider or number field.
    pub fn edit_direction(&mut self, text: &str) -> bool {
        self.set_direction(parse_number_input(text))
    }

    pub fn set_direction(&mut self, direction: f64) -> bool {
        self.dispatch(Action::SetDirection { direction })
    }

    pub fn selected(&self) -> Option<&StopId> {
        self.selected.as_ref()
    }

    /// Select a stop. Unknown ids are ignored.
    pub fn select(&mut self, id: &StopId) -> bool {
        if !self.state.contains(id) {
            return false;
        }
        self.selected = Some(id.clone());
        true
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    pub fn drag_state(&self) -> &DragState {
        self.drag.state()
    }

    pub fn bar(&self) -> BarGeometry {
        self.drag.bar()
    }

    /// Update the on-screen bounds of the gradient bar.
    pub fn set_bar_bounds(&mut self, bounds: Rect) {
        self.drag.set_bar(BarGeometry::from_rect(bounds));
    }

    /// Press on the marker of `id`: select it and start dragging.
    ///
    /// Ignored while another marker is being dragged.
    pub fn pointer_down(&mut self, id: &StopId) -> bool {
        if self.drag.state().is_dragging() || !self.select(id) {
            return false;
        }
        self.drag.press(id.clone())
    }

    /// Pointer moved to viewport x-coordinate `x`.
    pub fn pointer_move(&mut self, x: f64) -> bool {
        match self.drag.drag_to(x) {
            Some(action) => self.dispatch(action),
            None => false,
        }
    }

    /// Pointer released anywhere. Returns the stop that was being dragged.
    pub fn pointer_up(&mut self) -> Option<StopId> {
        self.drag.release()
    }

    /// Route a raw pointer event. Returns `true` if the gradient changed.
    pub fn handle_pointer_event(&mut self, event: PointerEvent) -> bool {
        match event {
            PointerEvent::Down { stop, .. } => {
                self.pointer_down(&stop);
                false
            }
            PointerEvent::Move { position } => self.pointer_move(position.x),
            PointerEvent::Up { .. } => {
                self.pointer_up();
                false
            }
        }
    }

    pub fn css_code(&self) -> String {
        css_code(self.stops(), self.direction())
    }

    pub fn tailwind_code(&self) -> String {
        tailwind_code(self.stops(), self.direction())
    }

    pub fn code(&self, format: CodeFormat) -> String {
        format.render(self.stops(), self.direction())
    }

    pub fn snippet(&self, format: CodeFormat) -> CodeSnippet {
        format.snippet(self.stops(), self.direction())
    }

    /// Background for the large preview.
    pub fn preview_background(&self) -> String {
        preview_background(&self.state)
    }

    pub fn slider_background(&self) -> String {
        slider_background(self.stops())
    }

    pub fn slider_markers(&self) -> Vec<SliderMarker> {
        slider_markers(self.stops(), self.selected.as_ref())
    }
}
