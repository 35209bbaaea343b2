//! Orbit camera with auto-rotate.

use glam::{Mat4, Vec3};
use std::f32::consts::{FRAC_PI_2, FRAC_PI_6, TAU};

/// Closest the camera may get to its target.
pub const MIN_DISTANCE: f32 = 10.0;
/// Farthest the camera may get from its target.
pub const MAX_DISTANCE: f32 = 30.0;
/// Lowest pitch, a little below the horizon.
pub const MIN_PITCH: f32 = -FRAC_PI_6;
/// Highest pitch, just short of straight down.
pub const MAX_PITCH: f32 = FRAC_PI_2 - 0.01;

/// Orbit camera around the scene center.
#[derive(Debug, Clone)]
pub struct Camera {
    /// Horizontal rotation angle in radians.
    pub yaw: f32,
    /// Vertical rotation angle in radians.
    pub pitch: f32,
    /// Distance from the target point.
    pub distance: f32,
    /// Point the camera orbits around.
    pub target: Vec3,
    /// Idle spin in radians per second.
    pub auto_rotate: f32,
    /// Vertical field of view in degrees.
    pub fov_degrees: f32,
}

impl Camera {
    pub fn new() -> Self {
        Self {
            yaw: 0.0,
            pitch: 0.0,
            distance: 20.0,
            target: Vec3::ZERO,
            // one turn per two minutes
            auto_rotate: TAU / 120.0,
            fov_degrees: 45.0,
        }
    }

    /// Advance the idle rotation.
    pub fn update(&mut self, delta: f32) {
        self.yaw = (self.yaw + self.auto_rotate * delta).rem_euclid(TAU);
    }

    /// Rotate by a mouse drag of `(dx, dy)` pixels.
    pub fn orbit(&mut self, dx: f32, dy: f32) {
        self.yaw -= dx * 0.005;
        self.pitch = (self.pitch + dy * 0.005).clamp(MIN_PITCH, MAX_PITCH);
    }

    /// Move closer (positive `scroll`) or farther away.
    pub fn zoom(&mut self, scroll: f32) {
        self.distance = (self.distance - scroll).clamp(MIN_DISTANCE, MAX_DISTANCE);
    }

    /// Calculate the camera's world position.
    pub fn position(&self) -> Vec3 {
        let x = self.distance * self.pitch.cos() * self.yaw.sin();
        let y = self.distance * self.pitch.sin();
        let z = self.distance * self.pitch.cos() * self.yaw.cos();
        self.target + Vec3::new(x, y, z)
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position(), self.target, Vec3::Y)
    }

    pub fn projection_matrix(&self, aspect: f32) -> Mat4 {
        Mat4::perspective_rh(self.fov_degrees.to_radians(), aspect, 0.1, 200.0)
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_position() {
        let camera = Camera::new();
        assert!((camera.position() - Vec3::new(0.0, 0.0, 20.0)).length() < 1e-5);
    }

    #[test]
    fn test_zoom_is_clamped() {
        let mut camera = Camera::new();
        camera.zoom(100.0);
        assert_eq!(camera.distance, MIN_DISTANCE);
        camera.zoom(-100.0);
        assert_eq!(camera.distance, MAX_DISTANCE);
    }

    #[test]
    fn test_orbit_clamps_pitch() {
        let mut camera = Camera::new();
        camera.orbit(0.0, 10_000.0);
        assert_eq!(camera.pitch, MAX_PITCH);
        camera.orbit(0.0, -10_000.0);
        assert_eq!(camera.pitch, MIN_PITCH);
    }

    #[test]
    fn test_auto_rotate_wraps() {
        let mut camera = Camera::new();
        camera.update(1_000.0);
        assert!((0.0..TAU).contains(&camera.yaw));
    }
}
