use tracing::debug;

use super::model::LatLon;
use super::visibility::Focus;
use crate::map::Viewport;

/// Host-owned view inputs: where the map looks and what is focused
#[derive(Clone, Debug, PartialEq)]
pub struct SelectionState {
    pub center: LatLon,
    pub zoom: u8,
    pub focus: Focus,
}

impl SelectionState {
    pub fn new(center: LatLon, zoom: u8) -> Self {
        Self {
            center,
            zoom,
            focus: Focus::Unfocused,
        }
    }
}

/// One-way sync of `SelectionState` center and zoom into the viewport.
///
/// The host calls `apply` once per update cycle. Changes take effect
/// immediately; the viewport never writes back into the selection.
#[derive(Debug, Default)]
pub struct ViewController {
    applied: Option<(LatLon, u8)>,
}

impl ViewController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reposition the viewport if center or zoom changed since the last call.
    /// Returns true when the viewport was moved.
    pub fn apply(&mut self, state: &SelectionState, viewport: &mut Viewport) -> bool {
        let target = (state.center, state.zoom);
        if self.applied == Some(target) {
            return false;
        }

        viewport.set_view(state.center, state.zoom);
        debug!(
            lat = state.center.lat,
            lon = state.center.lon,
            zoom = state.zoom,
            "view applied"
        );
        self.applied = Some(target);
        true
    }

    /// Force the next `apply` to reposition, e.g. after a resize
    pub fn invalidate(&mut self) {
        self.applied = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::map::WorldWrap;

    fn viewport() -> Viewport {
        Viewport::new(LatLon::new(0.0, 0.0), 2, 2, 10, WorldWrap::default(), 200, 100)
    }

    #[test]
    fn test_apply_moves_viewport() {
        let mut vp = viewport();
        let mut ctl = ViewController::new();
        let state = SelectionState::new(LatLon::new(24.25, 119.5), 4);

        assert!(ctl.apply(&state, &mut vp));
        assert_eq!(vp.center(), LatLon::new(24.25, 119.5));
        assert_eq!(vp.zoom(), 4);
    }

    #[test]
    fn test_apply_is_idempotent() {
        let mut vp = viewport();
        let mut ctl = ViewController::new();
        let state = SelectionState::new(LatLon::new(20.0, 120.0), 3);

        assert!(ctl.apply(&state, &mut vp));
        assert!(!ctl.apply(&state, &mut vp));

        ctl.invalidate();
        assert!(ctl.apply(&state, &mut vp));
    }

    #[test]
    fn test_every_change_applies() {
        let mut vp = viewport();
        let mut ctl = ViewController::new();
        let mut state = SelectionState::new(LatLon::new(20.0, 120.0), 3);
        ctl.apply(&state, &mut vp);

        state.zoom = 5;
        assert!(ctl.apply(&state, &mut vp));
        assert_eq!(vp.zoom(), 5);

        state.center = LatLon::new(30.0, 32.5795);
        assert!(ctl.apply(&state, &mut vp));
        assert_eq!(vp.center(), LatLon::new(30.0, 32.5795));
    }

    #[test]
    fn test_focus_change_alone_does_not_move_view() {
        let mut vp = viewport();
        let mut ctl = ViewController::new();
        let mut state = SelectionState::new(LatLon::new(20.0, 120.0), 3);
        ctl.apply(&state, &mut vp);

        state.focus = Focus::from_id(Some("taiwan"));
        assert!(!ctl.apply(&state, &mut vp));
    }

    #[test]
    fn test_zoom_clamped_to_bounds() {
        let mut vp = viewport();
        let mut ctl = ViewController::new();
        let state = SelectionState::new(LatLon::new(0.0, 0.0), 42);
        ctl.apply(&state, &mut vp);
        assert_eq!(vp.zoom(), 10);
    }
}
