//! Dragging stop markers along the gradient bar.
//!
//! The controller is a two-state machine (`Idle`, `Dragging`). It never
//! touches gradient state itself: pointer moves become
//! [`Action::UpdateStop`] values for the editor to dispatch.
//!
//! Viewport-wide pointer tracking is modeled by [`PointerCapture`]. It is
//! acquired when a drag starts and released on pointer-up, on cancellation,
//! and when the controller is dropped mid-drag.

use crate::color::clamp;
use crate::state::Action;
use crate::stop::{StopId, StopUpdate, MAX_POSITION, MIN_POSITION};
use kurbo::Rect;

/// Viewport-level pointer listeners owned by the presentation layer.
pub trait PointerCapture {
    /// Start receiving move and release events for the whole viewport.
    fn acquire(&mut self);
    /// Stop receiving viewport-wide events.
    fn release(&mut self);
}

/// Capture for headless use where every event is already delivered.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoCapture;

impl PointerCapture for NoCapture {
    fn acquire(&mut self) {}
    fn release(&mut self) {}
}

/// Drag lifecycle.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DragState {
    #[default]
    Idle,
    Dragging(StopId),
}

impl DragState {
    pub fn is_dragging(&self) -> bool {
        matches!(self, Self::Dragging(_))
    }

    /// The stop being dragged, if any.
    pub fn stop(&self) -> Option<&StopId> {
        match self {
            Self::Idle => None,
            Self::Dragging(id) => Some(id),
        }
    }
}

/// Horizontal extent of the gradient bar in viewport coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BarGeometry {
    pub left: f64,
    pub width: f64,
}

impl Default for BarGeometry {
    fn default() -> Self {
        Self {
            left: 0.0,
            width: 100.0,
        }
    }
}

impl BarGeometry {
    pub fn new(left: f64, width: f64) -> Self {
        Self { left, width }
    }

    pub fn from_rect(rect: Rect) -> Self {
        Self::new(rect.x0, rect.width())
    }

    /// Map a pointer x-coordinate to a whole-number percentage in `[0, 100]`.
    ///
    /// Returns `None` for a collapsed bar.
    pub fn position_at(&self, x: f64) -> Option<f64> {
        if self.width.is_nan() || self.width <= 0.0 {
            return None;
        }
        let raw = (x - self.left) / self.width * 100.0;
        Some(clamp(raw, MIN_POSITION, MAX_POSITION).round())
    }
}

/// Tracks at most one marker drag at a time.
pub struct DragController<C: PointerCapture = NoCapture> {
    state: DragState,
    bar: BarGeometry,
    capture: C,
}

impl Default for DragController<NoCapture> {
    fn default() -> Self {
        Self::new(NoCapture)
    }
}

impl<C: PointerCapture> DragController<C> {
    pub fn new(capture: C) -> Self {
        Self {
            state: DragState::Idle,
            bar: BarGeometry::default(),
            capture,
        }
    }

    pub fn state(&self) -> &DragState {
        &self.state
    }

    pub fn bar(&self) -> BarGeometry {
        self.bar
    }

    pub fn set_bar(&mut self, bar: BarGeometry) {
        self.bar = bar;
    }

    pub fn capture(&self) -> &C {
        &self.capture
    }

    /// Begin dragging `stop`. Ignored while another drag is in progress.
    pub fn press(&mut self, stop: StopId) -> bool {
        if let DragState::Dragging(current) = &self.state {
            log::warn!("Ignoring press on {} while dragging {}", stop, current);
            return false;
        }
        log::debug!("Drag start: {}", stop);
        self.capture.acquire();
        self.state = DragState::Dragging(stop);
        true
    }

    /// Position update for a pointer move, if a drag is active.
    pub fn drag_to(&self, x: f64) -> Option<Action> {
        let DragState::Dragging(id) = &self.state else {
            return None;
        };
        let position = self.bar.position_at(x)?;
        Some(Action::UpdateStop {
            id: id.clone(),
            updates: StopUpdate::position(position),
        })
    }

    /// End the drag. Returns the stop that was being dragged.
    pub fn release(&mut self) -> Option<StopId> {
        match std::mem::take(&mut self.state) {
            DragState::Idle => None,
            DragState::Dragging(id) => {
                log::debug!("Drag end: {}", id);
                self.capture.release();
                Some(id)
            }
        }
    }

    /// End the drag if it targets `stop` (e.g. the stop was removed).
    pub fn cancel_for(&mut self, stop: &StopId) -> bool {
        if self.state.stop() == Some(stop) {
            self.release();
            true
        } else {
            false
        }
    }
}

impl<C: PointerCapture> Drop for DragController<C> {
    fn drop(&mut self) {
        self.release();
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    /// Records acquire/release calls in a shared log.
    #[derive(Clone, Default)]
    pub(crate) struct RecordingCapture {
        pub(crate) log: Rc<RefCell<Vec<&'static str>>>,
    }

    impl PointerCapture for RecordingCapture {
        fn acquire(&mut self) {
            self.log.borrow_mut().push("acquire");
        }

        fn release(&mut self) {
            self.log.borrow_mut().push("release");
        }
    }

    fn position_of(action: Option<Action>) -> Option<(String, f64)> {
        match action? {
            Action::UpdateStop { id, updates } => Some((id.to_string(), updates.position?)),
            _ => None,
        }
    }

    #[test]
    fn test_position_mapping() {
        let bar = BarGeometry::new(100.0, 200.0);
        assert_eq!(bar.position_at(100.0), Some(0.0));
        assert_eq!(bar.position_at(200.0), Some(50.0));
        assert_eq!(bar.position_at(301.0), Some(100.0));
        assert_eq!(bar.position_at(50.0), Some(0.0));
        assert_eq!(bar.position_at(133.0), Some(17.0));
        assert_eq!(BarGeometry::new(0.0, 0.0).position_at(10.0), None);
    }

    #[test]
    fn test_bar_from_rect() {
        let bar = BarGeometry::from_rect(Rect::new(20.0, 5.0, 220.0, 25.0));
        assert_eq!(bar, BarGeometry::new(20.0, 200.0));
    }

    #[test]
    fn test_drag_sequence() {
        let capture = RecordingCapture::default();
        let log = capture.log.clone();
        let mut drag = DragController::new(capture);
        drag.set_bar(BarGeometry::new(0.0, 200.0));

        assert_eq!(drag.drag_to(50.0), None);

        assert!(drag.press("a".into()));
        assert_eq!(drag.state(), &DragState::Dragging("a".into()));
        assert_eq!(
            position_of(drag.drag_to(50.0)),
            Some(("a".to_string(), 25.0))
        );
        assert_eq!(
            position_of(drag.drag_to(-30.0)),
            Some(("a".to_string(), 0.0))
        );
        assert_eq!(
            position_of(drag.drag_to(900.0)),
            Some(("a".to_string(), 100.0))
        );

        assert_eq!(drag.release(), Some("a".into()));
        assert_eq!(drag.drag_to(50.0), None);
        assert_eq!(drag.release(), None);
        assert_eq!(*log.borrow(), ["acquire", "release"]);
    }

    #[test]
    fn test_single_drag_exclusive() {
        let mut drag = DragController::default();
        assert!(drag.press("a".into()));
        assert!(!drag.press("b".into()));
        assert_eq!(drag.state().stop(), Some(&"a".into()));
    }

    #[test]
    fn test_cancel_for() {
        let mut drag = DragController::default();
        drag.press("a".into());
        assert!(!drag.cancel_for(&"b".into()));
        assert!(drag.cancel_for(&"a".into()));
        assert_eq!(drag.state(), &DragState::Idle);
    }

    #[test]
    fn test_drop_mid_drag_releases() {
        let capture = RecordingCapture::default();
        let log = capture.log.clone();
        {
            let mut drag = DragController::new(capture);
            drag.press("a".into());
        }
        assert_eq!(*log.borrow(), ["acquire", "release"]);
    }

    #[test]
    fn test_drop_when_idle_does_not_release() {
        let capture = RecordingCapture::default();
        let log = capture.log.clone();
        drop(DragController::new(capture));
        assert!(log.borrow().is_empty());
    }
}
