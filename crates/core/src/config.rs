//! Fixed pipeline constants and the zoom profile selection.
//!
//! These values are not externally parameterized: the engine renders one
//! scene with one camera and one light, so the configuration surface is a
//! set of constants plus the [`ZoomProfile`] choice made at construction.

/// Vertical field of view in radians (45 degrees).
pub const FOV_Y_RADIANS: f32 = std::f32::consts::FRAC_PI_4;

/// Near clip plane distance.
pub const NEAR_PLANE: f32 = 0.1;

/// Far clip plane distance.
pub const FAR_PLANE: f32 = 100.0;

/// Distance from the camera (at the origin) to the cube center along -Z.
pub const CAMERA_DISTANCE: f32 = 6.0;

/// Radians of rotation per pixel of drag distance.
pub const DRAG_ROTATION_RATE: f32 = 0.01;

/// Maximum ray-march iteration count.
pub const RAY_MARCH_MAX_STEPS: u32 = 100;

/// Maximum ray-march travel distance in world units.
pub const RAY_MARCH_MAX_DISTANCE: f32 = 100.0;

/// Distance below which a ray-march step counts as a surface hit.
pub const RAY_MARCH_SURFACE_EPSILON: f32 = 0.01;

/// Depth comparison bias for the shadow map lookup.
pub const SHADOW_BIAS: f32 = 0.005;

/// Multiplier applied to lit color where the shadow comparison fails.
pub const SHADOW_DARKEN: f32 = 0.5;

/// Phong specular exponent shared by the lit programs.
pub const SPECULAR_EXPONENT: f32 = 32.0;

/// Point light position, in the same space the cube is shaded in.
pub const LIGHT_POSITION: [f32; 3] = [5.0, 5.0, 5.0];

/// Point light color.
pub const LIGHT_COLOR: [f32; 3] = [1.0, 1.0, 1.0];

/// Ambient light term.
pub const AMBIENT_COLOR: [f32; 3] = [0.3, 0.3, 0.3];

/// Side length in pixels of the square shadow depth map.
pub const SHADOW_MAP_SIZE: u32 = 1024;

/// Selects the minimum zoom clamp for the camera.
///
/// Pinch gestures accumulate multiplicatively, so a run of zoom-out events
/// can drive the raw product arbitrarily close to zero. The clamp keeps the
/// projection from degenerating; touch devices get a tighter floor because
/// accidental pinches are common there.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZoomProfile {
    /// Desktop scroll-wheel zoom: floor 0.1.
    Desktop,
    /// Touch pinch zoom: floor 0.5.
    Touch,
}

impl ZoomProfile {
    /// Returns the minimum zoom factor for this profile.
    pub fn min_zoom(self) -> f32 {
        match self {
            ZoomProfile::Desktop => 0.1,
            ZoomProfile::Touch => 0.5,
        }
    }
}
