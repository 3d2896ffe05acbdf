//! Perspective camera looking at the galaxy.

use glam::{Mat4, Vec3};

/// Perspective camera with a cached projection matrix.
///
/// After changing `fov_y_degrees`, `aspect`, `near` or `far` call
/// [`update_projection`](Self::update_projection).
#[derive(Debug, Clone)]
pub struct PerspectiveCamera {
    /// Vertical field of view in degrees.
    pub fov_y_degrees: f32,
    /// Viewport width divided by height.
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
    /// World-space eye position.
    pub position: Vec3,
    /// Point the camera looks at.
    pub target: Vec3,
    projection: Mat4,
}

impl PerspectiveCamera {
    pub fn new(fov_y_degrees: f32, aspect: f32) -> Self {
        let mut camera = Self {
            fov_y_degrees,
            aspect,
            near: 0.1,
            far: 100.0,
            position: Vec3::new(5.0, 5.0, 0.0),
            target: Vec3::ZERO,
            projection: Mat4::IDENTITY,
        };
        camera.update_projection();
        camera
    }

    /// Set the aspect ratio and rebuild the projection.
    pub fn set_aspect(&mut self, aspect: f32) {
        self.aspect = aspect;
        self.update_projection();
    }

    pub fn update_projection(&mut self) {
        self.projection = Mat4::perspective_rh(
            self.fov_y_degrees.to_radians(),
            self.aspect,
            self.near,
            self.far,
        );
    }

    pub fn projection_matrix(&self) -> Mat4 {
        self.projection
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.target, Vec3::Y)
    }

    pub fn view_proj(&self) -> Mat4 {
        self.projection * self.view_matrix()
    }

    /// Unit vector pointing from the eye toward the target.
    pub fn forward(&self) -> Vec3 {
        (self.target - self.position).normalize_or_zero()
    }
}

impl Default for PerspectiveCamera {
    fn default() -> Self {
        Self::new(75.0, 16.0 / 9.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_aspect_rebuilds_projection() {
        let mut camera = PerspectiveCamera::new(75.0, 1.0);
        let square = camera.projection_matrix();
        camera.set_aspect(2.0);
        assert_eq!(camera.aspect, 2.0);
        assert_ne!(camera.projection_matrix(), square);
        // x scale halves when the viewport gets twice as wide
        let ratio = square.x_axis.x / camera.projection_matrix().x_axis.x;
        assert!((ratio - 2.0).abs() < 1e-5);
    }

    #[test]
    fn test_target_projects_to_center() {
        let camera = PerspectiveCamera::default();
        let clip = camera.view_proj() * camera.target.extend(1.0);
        let ndc = clip / clip.w;
        assert!(ndc.x.abs() < 1e-5 && ndc.y.abs() < 1e-5);
    }
}
