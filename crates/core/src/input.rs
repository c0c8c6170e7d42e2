//! Normalized input events and the engine's mutable state.
//!
//! The host shell translates raw platform callbacks into [`InputEvent`]s
//! and feeds them to [`EngineState::handle_event`]. All state lives in the
//! explicit `EngineState` struct the renderer borrows each frame; there are
//! no module-level singletons and no hidden bindings, so event ordering is
//! exactly the single-threaded call order.

use crate::camera::Camera;
use crate::config::ZoomProfile;
use crate::orientation::OrientationController;

/// A normalized input event from the host surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Primary pointer pressed at surface coordinates.
    PointerPressed { x: f32, y: f32 },
    /// Pointer moved to surface coordinates.
    PointerMoved { x: f32, y: f32 },
    /// Primary pointer released.
    PointerReleased,
    /// Pointer left the surface; ends any drag.
    PointerLeft,
    /// Pinch gesture scale delta, multiplied onto the current zoom.
    GestureScale { factor: f32 },
    /// Drawable surface resized to the given pixel dimensions.
    ViewportResized { width: u32, height: u32 },
    /// Shows or hides the triangulation overlay pass.
    ToggleMeshOverlay(bool),
    /// Legacy single-axis rotation control, in degrees about Y.
    SetRotationDegrees(f32),
}

/// All mutable engine state: camera, orientation, and pass toggles.
#[derive(Debug, Clone)]
pub struct EngineState {
    /// Projection and zoom state.
    pub camera: Camera,
    /// Trackball orientation state.
    pub orientation: OrientationController,
    /// Whether the mesh-overlay pass draws.
    pub mesh_overlay: bool,
}

impl EngineState {
    /// Creates engine state with the given zoom profile, the isometric
    /// base orientation, and the overlay disabled.
    pub fn new(profile: ZoomProfile) -> Self {
        Self {
            camera: Camera::new(profile),
            orientation: OrientationController::new(),
            mesh_overlay: false,
        }
    }

    /// Applies one input event synchronously.
    pub fn handle_event(&mut self, event: InputEvent) {
        match event {
            InputEvent::PointerPressed { x, y } => self.orientation.pointer_pressed(x, y),
            InputEvent::PointerMoved { x, y } => self.orientation.pointer_moved(x, y),
            InputEvent::PointerReleased | InputEvent::PointerLeft => {
                self.orientation.pointer_released();
            }
            InputEvent::GestureScale { factor } => {
                self.camera.set_zoom(self.camera.zoom() * factor);
            }
            InputEvent::ViewportResized { width, height } => {
                self.camera.set_viewport(width, height);
            }
            InputEvent::ToggleMeshOverlay(enabled) => self.mesh_overlay = enabled,
            InputEvent::SetRotationDegrees(degrees) => {
                self.orientation.set_angle_degrees(degrees);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Quat;

    #[test]
    fn new_state_has_overlay_disabled() {
        let state = EngineState::new(ZoomProfile::Desktop);
        assert!(!state.mesh_overlay);
    }

    #[test]
    fn press_move_release_sequence_rotates_then_idles() {
        let mut state = EngineState::new(ZoomProfile::Desktop);
        let before = state.orientation.orientation();

        state.handle_event(InputEvent::PointerPressed { x: 400.0, y: 300.0 });
        state.handle_event(InputEvent::PointerMoved { x: 450.0, y: 300.0 });
        state.handle_event(InputEvent::PointerReleased);

        assert!(!state.orientation.is_dragging());
        let after = state.orientation.orientation();
        assert!(
            after.dot(before).abs() < 1.0 - 1e-6,
            "drag sequence should have rotated the cube"
        );
    }

    #[test]
    fn pointer_left_ends_drag_like_release() {
        let mut state = EngineState::new(ZoomProfile::Desktop);
        state.handle_event(InputEvent::PointerPressed { x: 1.0, y: 1.0 });
        state.handle_event(InputEvent::PointerLeft);
        assert!(!state.orientation.is_dragging());

        // A move after pointer-left must not rotate.
        let before = state.orientation.orientation();
        state.handle_event(InputEvent::PointerMoved { x: 90.0, y: 90.0 });
        assert_eq!(state.orientation.orientation(), before);
    }

    #[test]
    fn gesture_scales_accumulate_multiplicatively() {
        let mut state = EngineState::new(ZoomProfile::Touch);
        state.handle_event(InputEvent::GestureScale { factor: 1.2 });
        state.handle_event(InputEvent::GestureScale { factor: 0.5 });
        assert!(
            (state.camera.zoom() - 0.6).abs() < 1e-6,
            "1.0 * 1.2 * 0.5 = 0.6, got {}",
            state.camera.zoom()
        );
    }

    #[test]
    fn gesture_scale_cannot_collapse_zoom() {
        let mut state = EngineState::new(ZoomProfile::Touch);
        for _ in 0..100 {
            state.handle_event(InputEvent::GestureScale { factor: 0.5 });
        }
        assert!(
            state.camera.zoom() >= 0.5,
            "zoom fell below the profile floor: {}",
            state.camera.zoom()
        );
    }

    #[test]
    fn viewport_resize_reaches_the_camera() {
        let mut state = EngineState::new(ZoomProfile::Desktop);
        state.handle_event(InputEvent::ViewportResized {
            width: 1920,
            height: 1080,
        });
        assert_eq!(state.camera.width(), 1920);
        assert_eq!(state.camera.height(), 1080);
    }

    #[test]
    fn overlay_toggle_is_tracked() {
        let mut state = EngineState::new(ZoomProfile::Desktop);
        state.handle_event(InputEvent::ToggleMeshOverlay(true));
        assert!(state.mesh_overlay);
        state.handle_event(InputEvent::ToggleMeshOverlay(false));
        assert!(!state.mesh_overlay);
    }

    #[test]
    fn legacy_rotation_setter_overrides_drag_state() {
        let mut state = EngineState::new(ZoomProfile::Desktop);
        state.handle_event(InputEvent::PointerPressed { x: 0.0, y: 0.0 });
        state.handle_event(InputEvent::PointerMoved { x: 37.0, y: 11.0 });
        state.handle_event(InputEvent::SetRotationDegrees(180.0));

        let expected = (crate::orientation::OrientationController::base_pose()
            * Quat::from_rotation_y(std::f32::consts::PI))
        .normalize();
        let got = state.orientation.orientation();
        assert!(
            got.dot(expected).abs() > 1.0 - 1e-5,
            "expected {expected:?}, got {got:?}"
        );
    }
}
