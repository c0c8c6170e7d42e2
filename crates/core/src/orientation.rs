//! Trackball orientation controller.
//!
//! Pointer drags accumulate into a unit quaternion: each move event builds
//! an incremental rotation whose angle grows with drag distance and whose
//! axis is the screen-space perpendicular of the drag direction, giving the
//! "ball spinning under the finger" feel. Increments are pre-multiplied onto
//! the accumulated orientation and the result is renormalized every time to
//! keep floating-point drift from denormalizing the quaternion.

use crate::config::DRAG_ROTATION_RATE;
use glam::{Quat, Vec3};

/// Drag state machine (idle/dragging) plus the accumulated orientation.
#[derive(Debug, Clone)]
pub struct OrientationController {
    orientation: Quat,
    // Last pointer position while dragging; None when idle.
    drag_anchor: Option<(f32, f32)>,
}

impl OrientationController {
    /// Creates a controller holding the isometric base pose.
    pub fn new() -> Self {
        Self {
            orientation: Self::base_pose(),
            drag_anchor: None,
        }
    }

    /// The initial view: 45 degrees about Y, then atan(sqrt(2)) about the
    /// (1, 0, -1) diagonal, which lines the camera up with a cube corner.
    pub fn base_pose() -> Quat {
        let tilt_axis = Vec3::new(1.0, 0.0, -1.0).normalize();
        let tilt_angle = 2.0_f32.sqrt().atan();
        Quat::from_rotation_y(std::f32::consts::FRAC_PI_4)
            * Quat::from_axis_angle(tilt_axis, tilt_angle)
    }

    /// Current accumulated orientation (always unit length).
    pub fn orientation(&self) -> Quat {
        self.orientation
    }

    /// Whether a drag is in progress.
    pub fn is_dragging(&self) -> bool {
        self.drag_anchor.is_some()
    }

    /// Enters the dragging state, anchoring at the press position.
    pub fn pointer_pressed(&mut self, x: f32, y: f32) {
        self.drag_anchor = Some((x, y));
    }

    /// Applies the rotation increment for a pointer move while dragging.
    ///
    /// Ignored when idle. A zero-length delta is skipped entirely: its
    /// rotation axis would be a normalized zero vector, which is undefined.
    pub fn pointer_moved(&mut self, x: f32, y: f32) {
        let Some((last_x, last_y)) = self.drag_anchor else {
            return;
        };
        let dx = x - last_x;
        let dy = y - last_y;
        self.drag_anchor = Some((x, y));

        let len_sq = dx * dx + dy * dy;
        if len_sq <= 0.0 {
            return;
        }

        let angle = DRAG_ROTATION_RATE * len_sq.sqrt();
        // Rotate about the axis perpendicular to the drag direction:
        // horizontal drags spin about Y, vertical drags about X.
        let axis = Vec3::new(dy, dx, 0.0).normalize();
        let increment = Quat::from_axis_angle(axis, angle);
        self.orientation = (increment * self.orientation).normalize();
    }

    /// Leaves the dragging state (release or pointer-left-surface).
    pub fn pointer_released(&mut self) {
        self.drag_anchor = None;
    }

    /// Legacy single-axis control: replaces the orientation with the base
    /// pose plus a Y rotation of `degrees`.
    pub fn set_angle_degrees(&mut self, degrees: f32) {
        self.orientation =
            (Self::base_pose() * Quat::from_rotation_y(degrees.to_radians())).normalize();
    }
}

impl Default for OrientationController {
    fn default() -> Self {
        Self::new()
    }
}
