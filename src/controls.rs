//! Damped orbit camera controls.
//!
//! Pointer input accumulates rotation, dolly and pan requests. Each frame
//! [`OrbitControls::update`] applies a fraction of the pending motion to
//! the camera and decays the rest, so the view keeps gliding briefly after
//! the pointer stops.

use std::f32::consts::{PI, TAU};

use glam::{Vec2, Vec3};

use crate::gpu::camera::PerspectiveCamera;

const EPS: f32 = 1e-6;

/// Spherical coordinates around the orbit target. `phi` is measured from +Y.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
struct Spherical {
    radius: f32,
    theta: f32,
    phi: f32,
}

impl Spherical {
    fn from_offset(offset: Vec3) -> Self {
        let radius = offset.length();
        if radius == 0.0 {
            return Self::default();
        }
        Self {
            radius,
            theta: offset.x.atan2(offset.z),
            phi: (offset.y / radius).clamp(-1.0, 1.0).acos(),
        }
    }

    fn to_offset(self) -> Vec3 {
        let sin_phi = self.phi.sin();
        Vec3::new(
            self.radius * sin_phi * self.theta.sin(),
            self.radius * self.phi.cos(),
            self.radius * sin_phi * self.theta.cos(),
        )
    }
}

/// Orbit controller driving a [`PerspectiveCamera`].
#[derive(Debug, Clone)]
pub struct OrbitControls {
    pub target: Vec3,
    pub enable_damping: bool,
    /// Fraction of the pending motion applied per update.
    pub damping_factor: f32,
    pub rotate_speed: f32,
    pub zoom_speed: f32,
    pub pan_speed: f32,
    pub min_distance: f32,
    pub max_distance: f32,
    delta: Spherical,
    scale: f32,
    pan_offset: Vec3,
}

impl OrbitControls {
    pub fn new(target: Vec3) -> Self {
        Self {
            target,
            enable_damping: true,
            damping_factor: 0.05,
            rotate_speed: 1.0,
            zoom_speed: 1.0,
            pan_speed: 1.0,
            min_distance: 0.1,
            max_distance: 80.0,
            delta: Spherical::default(),
            scale: 1.0,
            pan_offset: Vec3::ZERO,
        }
    }

    pub fn with_damping(mut self, factor: f32) -> Self {
        self.enable_damping = factor > 0.0;
        self.damping_factor = factor;
        self
    }

    /// Queue a rotation for a pointer drag of `delta` logical pixels in a
    /// viewport `viewport_height` pixels tall. A full-height drag turns a
    /// full circle.
    pub fn rotate(&mut self, delta: Vec2, viewport_height: f32) {
        if viewport_height <= 0.0 {
            return;
        }
        self.delta.theta -= TAU * delta.x / viewport_height * self.rotate_speed;
        self.delta.phi -= TAU * delta.y / viewport_height * self.rotate_speed;
    }

    /// Queue a dolly for `steps` wheel notches. Positive moves closer.
    pub fn dolly(&mut self, steps: f32) {
        let zoom_scale = 0.95_f32.powf(self.zoom_speed);
        self.scale *= zoom_scale.powf(steps);
    }

    /// Queue a screen-space pan for a pointer drag of `delta` logical pixels.
    pub fn pan(&mut self, delta: Vec2, viewport_height: f32, camera: &PerspectiveCamera) {
        if viewport_height <= 0.0 {
            return;
        }
        let offset = camera.position - self.target;
        let target_distance =
            offset.length() * (camera.fov_y_degrees.to_radians() * 0.5).tan();

        let forward = camera.forward();
        let right = forward.cross(Vec3::Y).normalize_or_zero();
        let up = right.cross(forward);

        let per_pixel = 2.0 * target_distance / viewport_height * self.pan_speed;
        self.pan_offset += -right * delta.x * per_pixel + up * delta.y * per_pixel;
    }

    /// Apply pending motion to `camera`. Returns whether the camera moved.
    pub fn update(&mut self, camera: &mut PerspectiveCamera) -> bool {
        let offset = camera.position - self.target;
        let mut spherical = Spherical::from_offset(offset);

        let step = if self.enable_damping {
            self.damping_factor
        } else {
            1.0
        };

        spherical.theta += self.delta.theta * step;
        spherical.phi += self.delta.phi * step;
        spherical.phi = spherical.phi.clamp(EPS, PI - EPS);
        spherical.radius =
            (spherical.radius * self.scale).clamp(self.min_distance, self.max_distance);

        self.target += self.pan_offset * step;

        let previous = camera.position;
        camera.position = self.target + spherical.to_offset();
        camera.target = self.target;

        if self.enable_damping {
            self.delta.theta *= 1.0 - self.damping_factor;
            self.delta.phi *= 1.0 - self.damping_factor;
            self.pan_offset *= 1.0 - self.damping_factor;
        } else {
            self.delta = Spherical::default();
            self.pan_offset = Vec3::ZERO;
        }
        self.scale = 1.0;

        previous.distance_squared(camera.position) > EPS
    }

    /// Whether motion is still pending.
    pub fn is_settling(&self) -> bool {
        self.delta.theta.abs() > EPS
            || self.delta.phi.abs() > EPS
            || self.pan_offset.length_squared() > EPS
    }
}

impl Default for OrbitControls {
    fn default() -> Self {
        Self::new(Vec3::ZERO)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn camera() -> PerspectiveCamera {
        PerspectiveCamera::new(75.0, 1.0)
    }

    #[test]
    fn test_spherical_round_trip() {
        let offset = Vec3::new(5.0, 5.0, 0.0);
        let back = Spherical::from_offset(offset).to_offset();
        assert!(back.distance(offset) < 1e-4);
    }

    #[test]
    fn test_idle_update_keeps_camera() {
        let mut camera = camera();
        let mut controls = OrbitControls::default();
        let start = camera.position;
        assert!(!controls.update(&mut camera));
        assert!(camera.position.distance(start) < 1e-4);
    }

    #[test]
    fn test_damped_rotation_glides_and_decays() {
        let mut camera = camera();
        let mut controls = OrbitControls::default();
        let radius = camera.position.length();

        controls.rotate(Vec2::new(100.0, 0.0), 800.0);
        assert!(controls.update(&mut camera));
        let first = camera.position;
        assert!(controls.is_settling());

        // Keeps moving without further input
        assert!(controls.update(&mut camera));
        assert_ne!(camera.position, first);

        for _ in 0..2000 {
            controls.update(&mut camera);
        }
        assert!(!controls.is_settling());
        // Orbiting never changes the distance to the target
        assert!((camera.position.length() - radius).abs() < 1e-3);
    }

    #[test]
    fn test_undamped_rotation_applies_at_once() {
        let mut camera = camera();
        let mut controls = OrbitControls::default().with_damping(0.0);
        controls.rotate(Vec2::new(200.0, 0.0), 800.0);
        controls.update(&mut camera);
        assert!(!controls.is_settling());
        assert!(!controls.update(&mut camera));
    }

    #[test]
    fn test_polar_angle_stays_off_the_pole() {
        let mut camera = camera();
        let mut controls = OrbitControls::default().with_damping(0.0);
        controls.rotate(Vec2::new(0.0, 10_000.0), 100.0);
        controls.update(&mut camera);
        // Clamped just short of straight up, never flipped over the top
        assert!(camera.position.is_finite());
        assert!(camera.position.y > 0.0);
        assert!((camera.position.length() - 50.0_f32.sqrt()).abs() < 1e-3);
    }

    #[test]
    fn test_dolly_in_and_clamp() {
        let mut camera = camera();
        let mut controls = OrbitControls::default();
        let before = camera.position.length();
        controls.dolly(1.0);
        controls.update(&mut camera);
        assert!(camera.position.length() < before);

        controls.dolly(-1000.0);
        controls.update(&mut camera);
        assert!((camera.position.length() - controls.max_distance).abs() < 1e-3);
    }

    #[test]
    fn test_pan_moves_target() {
        let mut camera = camera();
        let mut controls = OrbitControls::default().with_damping(0.0);
        controls.pan(Vec2::new(50.0, 0.0), 600.0, &camera);
        controls.update(&mut camera);
        assert!(controls.target.length() > 0.0);
        assert_eq!(camera.target, controls.target);
    }
}
