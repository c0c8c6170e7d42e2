//! Perspective camera with zoom scaling and a cached projection matrix.
//!
//! The camera never moves: it sits at the origin looking down -Z, and the
//! cube is translated into view instead. Zoom is implemented by uniformly
//! scaling the projection's X/Y axes — a deliberate approximation of dolly
//! zoom that keeps the clip planes and the culling math unchanged.

use crate::config::{self, ZoomProfile};
use glam::{Mat4, Vec3};

/// Projection state: viewport, zoom, and a lazily recomputed matrix.
#[derive(Debug, Clone)]
pub struct Camera {
    width: u32,
    height: u32,
    zoom: f32,
    min_zoom: f32,
    cached: Option<Mat4>,
}

impl Camera {
    /// Creates a camera with a 1x1 viewport and zoom 1.0.
    pub fn new(profile: ZoomProfile) -> Self {
        Self {
            width: 1,
            height: 1,
            zoom: 1.0,
            min_zoom: profile.min_zoom(),
            cached: None,
        }
    }

    /// Updates the viewport and invalidates the cached projection.
    ///
    /// A zero-area viewport is a transient resize artifact and is ignored.
    pub fn set_viewport(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        if width != self.width || height != self.height {
            self.width = width;
            self.height = height;
            self.cached = None;
        }
    }

    /// Sets the zoom factor, clamped to the profile's minimum.
    pub fn set_zoom(&mut self, factor: f32) {
        let clamped = factor.max(self.min_zoom);
        if clamped != self.zoom {
            self.zoom = clamped;
            self.cached = None;
        }
    }

    /// Current zoom factor, always `>= min_zoom`.
    pub fn zoom(&self) -> f32 {
        self.zoom
    }

    /// Current viewport width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Current viewport height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Viewport aspect ratio (width / height).
    pub fn aspect(&self) -> f32 {
        self.width as f32 / self.height as f32
    }

    /// Returns the zoom-scaled perspective projection, recomputing it only
    /// when the viewport or zoom changed since the last call.
    pub fn projection_matrix(&mut self) -> Mat4 {
        if let Some(m) = self.cached {
            return m;
        }
        let perspective = Mat4::perspective_rh_gl(
            config::FOV_Y_RADIANS,
            self.aspect(),
            config::NEAR_PLANE,
            config::FAR_PLANE,
        );
        // Scaling clip-space X/Y after projection magnifies uniformly
        // without touching depth.
        let m = Mat4::from_scale(Vec3::new(self.zoom, self.zoom, 1.0)) * perspective;
        self.cached = Some(m);
        m
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn new_camera_has_unit_zoom() {
        let cam = Camera::new(ZoomProfile::Desktop);
        assert!((cam.zoom() - 1.0).abs() < f32::EPSILON);
    }

    #[test]
    fn set_viewport_updates_aspect() {
        let mut cam = Camera::new(ZoomProfile::Desktop);
        cam.set_viewport(800, 600);
        assert!((cam.aspect() - 800.0 / 600.0).abs() < 1e-6);
    }

    #[test]
    fn zero_area_viewport_is_ignored() {
        let mut cam = Camera::new(ZoomProfile::Desktop);
        cam.set_viewport(800, 600);
        cam.set_viewport(0, 600);
        cam.set_viewport(800, 0);
        assert_eq!(cam.width(), 800);
        assert_eq!(cam.height(), 600);
    }

    #[test]
    fn zoom_clamps_to_profile_minimum() {
        let mut cam = Camera::new(ZoomProfile::Touch);
        cam.set_zoom(0.01);
        assert!((cam.zoom() - 0.5).abs() < f32::EPSILON);

        let mut cam = Camera::new(ZoomProfile::Desktop);
        cam.set_zoom(-3.0);
        assert!((cam.zoom() - 0.1).abs() < f32::EPSILON);
    }

    #[test]
    fn zoom_above_minimum_is_unclamped() {
        let mut cam = Camera::new(ZoomProfile::Touch);
        cam.set_zoom(1.0 * 1.2 * 0.5);
        assert!((cam.zoom() - 0.6).abs() < 1e-6);
    }

    #[test]
    fn projection_is_cached_until_state_changes() {
        let mut cam = Camera::new(ZoomProfile::Desktop);
        cam.set_viewport(640, 480);
        let a = cam.projection_matrix();
        let b = cam.projection_matrix();
        assert_eq!(a, b, "repeated calls must return the cached matrix");

        cam.set_zoom(2.0);
        let c = cam.projection_matrix();
        assert_ne!(a, c, "zoom change must invalidate the cache");
    }

    #[test]
    fn zoom_scales_projection_xy_uniformly() {
        let mut cam = Camera::new(ZoomProfile::Desktop);
        cam.set_viewport(800, 600);
        let base = cam.projection_matrix();
        cam.set_zoom(2.0);
        let zoomed = cam.projection_matrix();

        assert!((zoomed.x_axis.x - 2.0 * base.x_axis.x).abs() < 1e-5);
        assert!((zoomed.y_axis.y - 2.0 * base.y_axis.y).abs() < 1e-5);
        // Depth mapping is untouched by zoom.
        assert!((zoomed.z_axis.z - base.z_axis.z).abs() < 1e-6);
        assert!((zoomed.w_axis.z - base.w_axis.z).abs() < 1e-6);
    }

    #[test]
    fn projection_maps_cube_center_inside_clip_volume() {
        let mut cam = Camera::new(ZoomProfile::Desktop);
        cam.set_viewport(800, 600);
        let clip = cam.projection_matrix() * glam::Vec4::new(0.0, 0.0, -6.0, 1.0);
        let ndc_z = clip.z / clip.w;
        assert!(
            (-1.0..=1.0).contains(&ndc_z),
            "cube center depth {ndc_z} fell outside NDC"
        );
    }

    proptest! {
        #[test]
        fn zoom_never_drops_below_minimum(factors in proptest::collection::vec(0.0f32..2.0, 1..200)) {
            let mut cam = Camera::new(ZoomProfile::Touch);
            for f in factors {
                cam.set_zoom(cam.zoom() * f);
                prop_assert!(cam.zoom() >= 0.5);
            }
        }

        #[test]
        fn projection_is_always_finite(w in 1u32..4096, h in 1u32..4096, zoom in 0.01f32..10.0) {
            let mut cam = Camera::new(ZoomProfile::Desktop);
            cam.set_viewport(w, h);
            cam.set_zoom(zoom);
            let m = cam.projection_matrix();
            prop_assert!(m.to_cols_array().iter().all(|v| v.is_finite()));
        }
    }
}
