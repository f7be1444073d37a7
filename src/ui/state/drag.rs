// SPDX-License-Identifier: MPL-2.0
//! Drag state management
//!
//! Tracks a press-move-release session on the crop surface and turns cursor
//! movement into crop offsets.

use crate::domain::Coordinate;

/// Manages grab-and-drag state
#[derive(Debug, Clone, Default)]
pub struct DragState {
    /// Cursor position at the previous drag step, `None` while idle
    reference: Option<Coordinate>,
}

impl DragState {
    /// Whether a drag operation is currently active
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.reference.is_some()
    }

    /// Starts a drag operation at the press position
    pub fn start(&mut self, position: Coordinate) {
        self.reference = Some(position);
    }

    /// Stops the drag operation
    pub fn stop(&mut self) {
        self.reference = None;
    }

    /// Advances the drag to `current` and returns the crop offset for this step.
    ///
    /// The offset is `reference - current`: moving the cursor left or up moves
    /// the crop square right or down over the image.
    #[must_use]
    pub fn step(&mut self, current: Coordinate) -> Option<Coordinate> {
        let reference = self.reference?;
        self.reference = Some(current);
        Some(reference.delta_from(current))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_drag_state_is_not_dragging() {
        let state = DragState::default();
        assert!(!state.is_dragging());
    }

    #[test]
    fn start_and_stop_toggle_state() {
        let mut state = DragState::default();
        state.start(Coordinate::new(100.0, 50.0));
        assert!(state.is_dragging());
        state.stop();
        assert!(!state.is_dragging());
    }

    #[test]
    fn step_returns_none_when_not_dragging() {
        let mut state = DragState::default();
        assert!(state.step(Coordinate::new(100.0, 50.0)).is_none());
    }

    #[test]
    fn step_computes_reference_minus_current() {
        let mut state = DragState::default();
        state.start(Coordinate::new(100.0, 100.0));

        let delta = state.step(Coordinate::new(80.0, 90.0));
        assert_eq!(delta, Some(Coordinate::new(20.0, 10.0)));
    }

    #[test]
    fn step_moves_the_reference() {
        let mut state = DragState::default();
        state.start(Coordinate::new(0.0, 0.0));
        let _ = state.step(Coordinate::new(-5.0, 3.0));

        // Second step is relative to the previous sample, not the press point
        let delta = state.step(Coordinate::new(-6.0, 3.0));
        assert_eq!(delta, Some(Coordinate::new(1.0, 0.0)));
    }
}
