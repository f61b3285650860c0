//! View frustum for culling

use glimmer_core::{Mat4, Vec3};

/// A plane defined by normal and distance from origin
#[derive(Clone, Copy, Debug)]
pub struct Plane {
    pub normal: Vec3,
    pub distance: f32,
}

impl Plane {
    pub fn new(normal: Vec3, distance: f32) -> Self {
        Self { normal, distance }
    }

    /// Signed distance from point to plane (positive = inside)
    pub fn distance_to_point(&self, point: Vec3) -> f32 {
        self.normal.dot(&point) + self.distance
    }

    fn from_coefficients(c: [f32; 4]) -> Self {
        let normal = Vec3::new(c[0], c[1], c[2]);
        let len = normal.length();
        if len <= f32::EPSILON {
            // Degenerate row: accept everything rather than cull everything
            return Self::new(Vec3::ZERO, 1.0);
        }
        Self::new(normal * (1.0 / len), c[3] / len)
    }
}

/// View frustum with 6 planes (Near, Far, Left, Right, Top, Bottom)
#[derive(Clone, Copy, Debug)]
pub struct Frustum {
    pub planes: [Plane; 6],
}

impl Frustum {
    /// Extract frustum planes from a column-major view-projection matrix
    /// with clip depth in [-w, w].
    pub fn from_view_projection(vp: &Mat4) -> Self {
        let row = |i: usize| [vp[0][i], vp[1][i], vp[2][i], vp[3][i]];
        let combine = |a: [f32; 4], b: [f32; 4], sign: f32| {
            Plane::from_coefficients([
                a[0] + sign * b[0],
                a[1] + sign * b[1],
                a[2] + sign * b[2],
                a[3] + sign * b[3],
            ])
        };

        let (r0, r1, r2, r3) = (row(0), row(1), row(2), row(3));
        Self {
            planes: [
                combine(r3, r2, 1.0),  // near
                combine(r3, r2, -1.0), // far
                combine(r3, r0, 1.0),  // left
                combine(r3, r0, -1.0), // right
                combine(r3, r1, -1.0), // top
                combine(r3, r1, 1.0),  // bottom
            ],
        }
    }

    /// Check if point is inside frustum
    pub fn contains_point(&self, point: Vec3) -> bool {
        self.planes
            .iter()
            .all(|plane| plane.distance_to_point(point) >= 0.0)
    }

    /// Check if a sphere touches the frustum (conservative near corners)
    pub fn intersects_sphere(&self, center: Vec3, radius: f32) -> bool {
        self.planes
            .iter()
            .all(|plane| plane.distance_to_point(center) >= -radius)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::camera::Camera;

    #[test]
    fn test_plane_distance() {
        let plane = Plane::new(Vec3::UP, 0.0);
        assert_eq!(plane.distance_to_point(Vec3::new(0.0, 5.0, 0.0)), 5.0);
        assert_eq!(plane.distance_to_point(Vec3::new(0.0, -3.0, 0.0)), -3.0);
    }

    #[test]
    fn test_frustum_contains_point_ahead() {
        let frustum = Camera::new().frustum();
        assert!(frustum.contains_point(Vec3::new(0.0, 0.0, 5.0)));
        assert!(!frustum.contains_point(Vec3::new(0.0, 0.0, -5.0)));
    }

    #[test]
    fn test_frustum_rejects_beyond_far_and_before_near() {
        let cam = Camera::new();
        let frustum = cam.frustum();
        assert!(!frustum.contains_point(Vec3::new(0.0, 0.0, cam.far + 50.0)));
        assert!(!frustum.contains_point(Vec3::new(0.0, 0.0, cam.near * 0.5)));
    }

    #[test]
    fn test_frustum_side_planes() {
        // 60° vertical fov, 16:9: horizontal half-angle is about 45.7°
        let frustum = Camera::new().frustum();
        assert!(frustum.contains_point(Vec3::new(8.0, 0.0, 10.0)));
        assert!(!frustum.contains_point(Vec3::new(12.0, 0.0, 10.0)));
        assert!(!frustum.contains_point(Vec3::new(0.0, 7.0, 10.0)));
        assert!(!frustum.contains_point(Vec3::new(0.0, -7.0, 10.0)));
    }

    #[test]
    fn test_sphere_straddling_plane_intersects() {
        let frustum = Camera::new().frustum();
        // Center slightly behind the near plane, radius reaches inside
        assert!(frustum.intersects_sphere(Vec3::new(0.0, 0.0, 0.0), 0.5));
        assert!(!frustum.intersects_sphere(Vec3::new(0.0, 0.0, -2.0), 0.5));
    }
}
