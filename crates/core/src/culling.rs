//! Frustum plane extraction and per-face visibility testing.
//!
//! Planes come out of the combined view-projection matrix by the row
//! add/subtract method (Gribb/Hartmann): left/right from row 0, bottom/top
//! from row 1, near/far from row 2, each against row 3. Every plane is
//! normalized so its signed distance is in world units, with the normal
//! pointing into the frustum interior.
//!
//! The face test is deliberately conservative: a face counts as visible if
//! any of its vertices is inside all six planes. That under-culls faces
//! that straddle the frustum boundary, which is the safe direction for a
//! test whose result skips draw calls.

use glam::{Mat4, Vec3};

/// Plane index constants, in extraction order.
pub const PLANE_LEFT: usize = 0;
pub const PLANE_RIGHT: usize = 1;
pub const PLANE_BOTTOM: usize = 2;
pub const PLANE_TOP: usize = 3;
pub const PLANE_NEAR: usize = 4;
pub const PLANE_FAR: usize = 5;

/// A frustum boundary half-space: `normal . p + offset >= 0` is inside.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Plane {
    /// Unit normal pointing into the frustum.
    pub normal: Vec3,
    /// Signed offset from the origin along the normal.
    pub offset: f32,
}

impl Plane {
    /// Signed distance from `point` to the plane; positive is inside.
    pub fn signed_distance(&self, point: Vec3) -> f32 {
        self.normal.dot(point) + self.offset
    }
}

/// Extracts the six frustum planes from a view-projection matrix.
///
/// The planes live in whatever space the matrix transforms from; pass the
/// projection alone to get view-space planes. Planes are normalized by the
/// length of their normal component. A degenerate row pair (zero normal)
/// is left unnormalized rather than dividing by zero.
pub fn frustum_planes(view_projection: Mat4) -> [Plane; 6] {
    let r0 = view_projection.row(0);
    let r1 = view_projection.row(1);
    let r2 = view_projection.row(2);
    let r3 = view_projection.row(3);

    let raw = [r3 + r0, r3 - r0, r3 + r1, r3 - r1, r3 + r2, r3 - r2];

    raw.map(|v| {
        let normal = Vec3::new(v.x, v.y, v.z);
        let len = normal.length();
        if len > 0.0 {
            Plane {
                normal: normal / len,
                offset: v.w / len,
            }
        } else {
            Plane {
                normal,
                offset: v.w,
            }
        }
    })
}

/// Returns true if any vertex named by `face_indices` lies on the inside
/// of all six planes.
///
/// `positions` must already be transformed into the space the planes were
/// extracted for (view space when the planes come from the projection).
pub fn face_visible(face_indices: &[u16], positions: &[Vec3], planes: &[Plane; 6]) -> bool {
    face_indices.iter().any(|&idx| {
        let p = positions[idx as usize];
        planes.iter().all(|plane| plane.signed_distance(p) >= 0.0)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::camera::Camera;
    use crate::config::ZoomProfile;
    use crate::geometry;
    use glam::Mat4;

    fn axis_count(n: Vec3) -> usize {
        [n.x, n.y, n.z].iter().filter(|c| c.abs() > 1e-6).count()
    }

    #[test]
    fn identity_matrix_yields_axis_aligned_unit_planes() {
        let planes = frustum_planes(Mat4::IDENTITY);
        for (i, plane) in planes.iter().enumerate() {
            assert!(
                (plane.normal.length() - 1.0).abs() < 1e-6,
                "plane {i} normal is not unit length: {:?}",
                plane.normal
            );
            assert_eq!(
                axis_count(plane.normal),
                1,
                "plane {i} normal is not axis-aligned: {:?}",
                plane.normal
            );
        }
        // +X, -X, +Y, -Y, +Z, -Z in extraction order.
        assert_eq!(planes[PLANE_LEFT].normal, Vec3::X);
        assert_eq!(planes[PLANE_RIGHT].normal, -Vec3::X);
        assert_eq!(planes[PLANE_BOTTOM].normal, Vec3::Y);
        assert_eq!(planes[PLANE_TOP].normal, -Vec3::Y);
        assert_eq!(planes[PLANE_NEAR].normal, Vec3::Z);
        assert_eq!(planes[PLANE_FAR].normal, -Vec3::Z);
    }

    #[test]
    fn identity_planes_contain_the_origin() {
        let planes = frustum_planes(Mat4::IDENTITY);
        for (i, plane) in planes.iter().enumerate() {
            assert!(
                plane.signed_distance(Vec3::ZERO) > 0.0,
                "origin outside plane {i}"
            );
        }
    }

    #[test]
    fn perspective_planes_contain_a_point_in_front_of_the_camera() {
        let mut cam = Camera::new(ZoomProfile::Desktop);
        cam.set_viewport(800, 600);
        let planes = frustum_planes(cam.projection_matrix());
        let p = Vec3::new(0.0, 0.0, -6.0);
        for (i, plane) in planes.iter().enumerate() {
            assert!(
                plane.signed_distance(p) > 0.0,
                "cube center outside plane {i}: {}",
                plane.signed_distance(p)
            );
        }
    }

    #[test]
    fn perspective_planes_reject_points_behind_the_camera() {
        let mut cam = Camera::new(ZoomProfile::Desktop);
        cam.set_viewport(800, 600);
        let planes = frustum_planes(cam.projection_matrix());
        let behind = Vec3::new(0.0, 0.0, 5.0);
        assert!(
            planes.iter().any(|pl| pl.signed_distance(behind) < 0.0),
            "point behind the camera must be outside some plane"
        );
    }

    #[test]
    fn face_with_one_inside_vertex_is_visible() {
        let planes = frustum_planes(Mat4::IDENTITY);
        // Three vertices far outside +X, one at the origin.
        let positions = vec![
            Vec3::new(50.0, 0.0, 0.0),
            Vec3::new(50.0, 1.0, 0.0),
            Vec3::new(50.0, 0.0, 1.0),
            Vec3::ZERO,
        ];
        let indices = [0u16, 1, 2, 3];
        assert!(face_visible(&indices, &positions, &planes));
    }

    #[test]
    fn face_fully_beyond_one_plane_is_culled() {
        let mut cam = Camera::new(ZoomProfile::Desktop);
        cam.set_viewport(800, 600);
        let planes = frustum_planes(cam.projection_matrix());
        // All four vertices past the far clip (z < -100).
        let positions = vec![
            Vec3::new(-1.0, -1.0, -150.0),
            Vec3::new(1.0, -1.0, -150.0),
            Vec3::new(1.0, 1.0, -150.0),
            Vec3::new(-1.0, 1.0, -150.0),
        ];
        let indices = [0u16, 1, 2, 3];
        assert!(
            !face_visible(&indices, &positions, &planes),
            "face entirely beyond the far plane must be culled"
        );
    }

    #[test]
    fn cube_at_view_distance_has_all_faces_visible() {
        let mut cam = Camera::new(ZoomProfile::Desktop);
        cam.set_viewport(800, 600);
        let planes = frustum_planes(cam.projection_matrix());
        let model = Mat4::from_translation(Vec3::new(0.0, 0.0, -6.0));
        let positions: Vec<Vec3> = geometry::POSITIONS
            .iter()
            .map(|p| model.transform_point3(Vec3::from_array(*p)))
            .collect();

        for face in 0..geometry::FACE_COUNT {
            assert!(
                face_visible(geometry::face_indices(face), &positions, &planes),
                "face {face} of the centered cube should be visible"
            );
        }
    }

    #[test]
    fn cube_pushed_past_far_plane_has_no_visible_faces() {
        let mut cam = Camera::new(ZoomProfile::Desktop);
        cam.set_viewport(800, 600);
        let planes = frustum_planes(cam.projection_matrix());
        let model = Mat4::from_translation(Vec3::new(0.0, 0.0, -500.0));
        let positions: Vec<Vec3> = geometry::POSITIONS
            .iter()
            .map(|p| model.transform_point3(Vec3::from_array(*p)))
            .collect();

        for face in 0..geometry::FACE_COUNT {
            assert!(
                !face_visible(geometry::face_indices(face), &positions, &planes),
                "face {face} beyond the far plane should be culled"
            );
        }
    }

    #[test]
    fn planes_are_recomputed_not_persisted() {
        // Two different matrices must give different plane sets; nothing is
        // cached inside the extraction.
        let a = frustum_planes(Mat4::IDENTITY);
        let b = frustum_planes(Mat4::from_scale(Vec3::splat(2.0)));
        assert_ne!(a[PLANE_LEFT].offset, b[PLANE_LEFT].offset);
    }

    #[test]
    fn degenerate_matrix_does_not_produce_nan() {
        let planes = frustum_planes(Mat4::ZERO);
        for plane in planes {
            assert!(plane.normal.is_finite());
            assert!(plane.offset.is_finite());
        }
    }
}
