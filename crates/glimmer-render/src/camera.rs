//! Perspective camera, read-only from the light system's point of view

use glimmer_core::{mat4_inverse, mat4_mul, Mat4, Vec3};

use crate::frustum::Frustum;

/// Squared length below which a direction counts as degenerate
const DEGENERATE_EPSILON: f32 = 1e-10;

const IDENTITY: Mat4 = [
    [1.0, 0.0, 0.0, 0.0],
    [0.0, 1.0, 0.0, 0.0],
    [0.0, 0.0, 1.0, 0.0],
    [0.0, 0.0, 0.0, 1.0],
];

/// A perspective camera
#[derive(Debug, Clone)]
pub struct Camera {
    /// Camera position
    pub position: Vec3,
    /// Target point the camera looks at
    pub target: Vec3,
    /// Up vector
    pub up: Vec3,
    /// Vertical field of view in degrees
    pub fov: f32,
    /// Near clipping plane
    pub near: f32,
    /// Far clipping plane
    pub far: f32,
    /// Aspect ratio (width / height)
    pub aspect: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            target: Vec3::FORWARD,
            up: Vec3::UP,
            fov: 60.0,
            near: 0.1,
            far: 500.0,
            aspect: 16.0 / 9.0,
        }
    }
}

impl Camera {
    pub fn new() -> Self {
        Self::default()
    }

    /// Camera at `position` looking toward `target`, default lens
    pub fn look_at(position: Vec3, target: Vec3) -> Self {
        Self {
            position,
            target,
            ..Self::default()
        }
    }

    /// Place the camera on a horizontal circle around `center`, looking at it.
    ///
    /// `yaw` is in radians; `height` is relative to `center`.
    pub fn orbit(&mut self, center: Vec3, distance: f32, yaw: f32, height: f32) {
        self.target = center;
        self.position = Vec3::new(
            center.x + distance * yaw.sin(),
            center.y + height,
            center.z + distance * yaw.cos(),
        );
    }

    /// Camera forward direction (world space). A camera sitting on its
    /// target looks down +Z.
    pub fn forward(&self) -> Vec3 {
        let dir = self.target - self.position;
        if dir.length_squared() < DEGENERATE_EPSILON {
            return Vec3::FORWARD;
        }
        dir.normalized()
    }

    /// Right, up and forward axes. Looking along `up` (or with a zero `up`)
    /// swaps in another reference axis so the basis stays orthonormal.
    fn basis(&self) -> (Vec3, Vec3, Vec3) {
        let f = self.forward();
        let mut s = f.cross(&self.up);
        if s.length_squared() < DEGENERATE_EPSILON {
            let fallback = if f.cross(&Vec3::FORWARD).length_squared() < DEGENERATE_EPSILON {
                Vec3::new(1.0, 0.0, 0.0)
            } else {
                Vec3::FORWARD
            };
            s = f.cross(&fallback);
        }
        let s = s.normalized();
        let u = s.cross(&f);
        (s, u, f)
    }

    /// World transform of the camera (4x4, column-major)
    pub fn world_matrix(&self) -> Mat4 {
        let (s, u, f) = self.basis();
        let p = self.position;
        [
            [s.x, s.y, s.z, 0.0],
            [u.x, u.y, u.z, 0.0],
            [-f.x, -f.y, -f.z, 0.0],
            [p.x, p.y, p.z, 1.0],
        ]
    }

    /// View matrix: the inverse of the world transform
    pub fn view_matrix(&self) -> Mat4 {
        // The basis is orthonormal, so the world matrix is never singular
        mat4_inverse(&self.world_matrix()).unwrap_or(IDENTITY)
    }

    /// Perspective projection (4x4, column-major, clip z in [-w, w])
    pub fn projection_matrix(&self) -> Mat4 {
        let f = 1.0 / (self.fov.to_radians() / 2.0).tan();
        let depth = self.far - self.near;

        [
            [f / self.aspect, 0.0, 0.0, 0.0],
            [0.0, f, 0.0, 0.0],
            [0.0, 0.0, -(self.far + self.near) / depth, -1.0],
            [0.0, 0.0, -(2.0 * self.far * self.near) / depth, 0.0],
        ]
    }

    /// Combined view-projection matrix
    pub fn view_projection_matrix(&self) -> Mat4 {
        mat4_mul(&self.projection_matrix(), &self.view_matrix())
    }

    /// The culling volume for the current pose and lens
    pub fn frustum(&self) -> Frustum {
        Frustum::from_view_projection(&self.view_projection_matrix())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_camera_looks_down_positive_z() {
        let cam = Camera::new();
        let f = cam.forward();
        assert!((f.z - 1.0).abs() < 1e-6);
    }

    #[test]
    fn world_matrix_holds_position() {
        let cam = Camera::look_at(Vec3::new(3.0, 4.0, 5.0), Vec3::ZERO);
        let world = cam.world_matrix();
        assert!((world[3][0] - 3.0).abs() < 1e-4);
        assert!((world[3][1] - 4.0).abs() < 1e-4);
        assert!((world[3][2] - 5.0).abs() < 1e-4);
    }

    #[test]
    fn view_inverts_world() {
        let cam = Camera::look_at(Vec3::new(-2.0, 7.0, 3.0), Vec3::new(4.0, 0.0, -1.0));
        let product = mat4_mul(&cam.view_matrix(), &cam.world_matrix());
        for (c, col) in product.iter().enumerate() {
            for (r, v) in col.iter().enumerate() {
                let expected = if c == r { 1.0 } else { 0.0 };
                assert!((v - expected).abs() < 1e-4, "[{c}][{r}] = {v}");
            }
        }
    }

    #[test]
    fn top_down_camera_keeps_side_planes() {
        let cam = Camera::look_at(Vec3::new(0.0, 20.0, 0.0), Vec3::ZERO);
        let (s, u, f) = cam.basis();
        assert!((s.length() - 1.0).abs() < 1e-5);
        assert!((u.length() - 1.0).abs() < 1e-5);
        assert!((f.y + 1.0).abs() < 1e-6);

        // 60 degree fov reaches about 11.5 units either side at the ground
        let frustum = cam.frustum();
        assert!(frustum.contains_point(Vec3::ZERO));
        assert!(frustum.contains_point(Vec3::new(5.0, 0.0, 5.0)));
        assert!(!frustum.contains_point(Vec3::new(150.0, 0.0, 0.0)));
        assert!(!frustum.contains_point(Vec3::new(-150.0, 0.0, 40.0)));
        assert!(!frustum.contains_point(Vec3::new(0.0, 0.0, 60.0)));
    }

    #[test]
    fn camera_on_its_target_looks_forward() {
        let cam = Camera::look_at(Vec3::new(1.0, 2.0, 3.0), Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(cam.forward(), Vec3::FORWARD);
        let frustum = cam.frustum();
        assert!(frustum.contains_point(Vec3::new(1.0, 2.0, 13.0)));
        assert!(!frustum.contains_point(Vec3::new(1.0, 2.0, -7.0)));
        assert!(!frustum.contains_point(Vec3::new(80.0, 2.0, 13.0)));
    }

    #[test]
    fn zero_up_vector_still_culls() {
        let mut cam = Camera::new();
        cam.up = Vec3::ZERO;
        let frustum = cam.frustum();
        assert!(frustum.contains_point(Vec3::new(0.0, 0.0, 10.0)));
        assert!(!frustum.contains_point(Vec3::new(0.0, 80.0, 10.0)));
        assert!(!frustum.contains_point(Vec3::new(80.0, 0.0, 10.0)));
    }

    #[test]
    fn orbit_keeps_distance() {
        let mut cam = Camera::new();
        cam.orbit(Vec3::new(1.0, 0.0, 1.0), 10.0, 1.2, 0.0);
        assert!((cam.position.distance(&cam.target) - 10.0).abs() < 1e-4);
    }

    #[test]
    fn point_ahead_projects_inside_clip_volume() {
        let cam = Camera::new();
        let vp = cam.view_projection_matrix();
        let p = [0.0f32, 0.0, 10.0, 1.0];
        let clip: Vec<f32> = (0..4)
            .map(|row| (0..4).map(|col| vp[col][row] * p[col]).sum())
            .collect();
        let w = clip[3];
        assert!(w > 0.0);
        assert!(clip[2].abs() <= w);
    }
}
