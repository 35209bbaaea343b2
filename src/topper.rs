//! The star accent above the tree apex.
//!
//! Height and scale each follow a mode-dependent target with their own
//! damping rate, so the star lags behind its own position when popping in or
//! out. A constant spin and a slow hover wobble run regardless of mode.

use crate::config::{SceneConfig, TopperConfig};
use crate::easing::{lerp, Smoothing};
use crate::state::TransitionMode;
use crate::time::FrameContext;
use glam::{EulerRot, Mat4, Quat, Vec3};

/// Hover cycle speed multiplier.
const HOVER_SPEED: f32 = 2.0;
/// Strength of the hover tilt.
const HOVER_TILT: f32 = 0.5;
/// Strength of the hover bob.
const HOVER_BOB: f32 = 0.5;

/// The single accent object.
#[derive(Debug, Clone)]
pub struct Topper {
    config: TopperConfig,
    /// Apex height, `tree_height / 2`.
    apex: f32,
    y: f32,
    scale: f32,
    spin: f32,
    elapsed: f32,
}

impl Topper {
    pub fn new(config: &SceneConfig) -> Self {
        Self {
            config: config.topper,
            apex: config.tree_height / 2.0,
            y: 0.0,
            scale: 1.0,
            spin: 0.0,
            elapsed: 0.0,
        }
    }

    /// Target `(y, scale)` for `mode`.
    pub fn target(&self, mode: TransitionMode) -> (f32, f32) {
        match mode {
            TransitionMode::TreeShape => (self.apex + self.config.apex_offset, 1.0),
            TransitionMode::Scattered => {
                (self.apex + self.config.parked_offset, self.config.hidden_scale)
            }
        }
    }

    pub fn update(&mut self, frame: &FrameContext) {
        let (target_y, target_scale) = self.target(frame.mode);

        let position = Smoothing::Damped {
            rate: self.config.position_rate,
        };
        let scale = Smoothing::Damped {
            rate: self.config.scale_rate,
        };
        self.y = lerp(self.y, target_y, position.factor(frame.delta));
        self.scale = lerp(self.scale, target_scale, scale.factor(frame.delta));

        self.spin += frame.delta * self.config.spin_rate;
        self.elapsed = frame.elapsed;
    }

    #[inline]
    pub fn y(&self) -> f32 {
        self.y
    }

    #[inline]
    pub fn scale(&self) -> f32 {
        self.scale
    }

    #[inline]
    pub fn spin(&self) -> f32 {
        self.spin
    }

    pub fn color(&self) -> Vec3 {
        self.config.color
    }

    /// Model matrix: follow, spin and scale, then the hover wobble.
    pub fn transform(&self) -> Mat4 {
        let follow = Mat4::from_scale_rotation_translation(
            Vec3::splat(self.scale),
            Quat::from_rotation_y(self.spin),
            Vec3::new(0.0, self.y, 0.0),
        );
        follow * hover(self.elapsed)
    }
}

/// Slow floating wobble at time `t`.
pub fn hover(t: f32) -> Mat4 {
    let phase = t / 4.0 * HOVER_SPEED;
    let tilt = Quat::from_euler(
        EulerRot::XYZ,
        phase.cos() / 8.0 * HOVER_TILT,
        phase.sin() / 8.0 * HOVER_TILT,
        phase.sin() / 20.0 * HOVER_TILT,
    );
    let bob = phase.sin() / 10.0 * HOVER_BOB;
    Mat4::from_rotation_translation(tilt, Vec3::new(0.0, bob, 0.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn step(topper: &mut Topper, mode: TransitionMode, frames: usize) {
        let dt = 1.0 / 60.0;
        for _ in 0..frames {
            let elapsed = topper.elapsed + dt;
            topper.update(&FrameContext::new(elapsed, dt, mode, 1.0));
        }
    }

    #[test]
    fn test_targets() {
        let topper = Topper::new(&SceneConfig::default());
        assert_eq!(topper.target(TransitionMode::TreeShape), (6.5, 1.0));
        assert_eq!(topper.target(TransitionMode::Scattered), (11.0, 0.01));
    }

    #[test]
    fn test_converges_to_apex() {
        let mut topper = Topper::new(&SceneConfig::default());
        step(&mut topper, TransitionMode::TreeShape, 900);
        assert!((topper.y() - 6.5).abs() < 1e-3);
        assert!((topper.scale() - 1.0).abs() < 1e-3);
    }

    #[test]
    fn test_scale_leads_position_when_hiding() {
        let mut topper = Topper::new(&SceneConfig::default());
        step(&mut topper, TransitionMode::TreeShape, 900);
        step(&mut topper, TransitionMode::Scattered, 30);

        let y_done = (topper.y() - 6.5) / (11.0 - 6.5);
        let scale_done = (1.0 - topper.scale()) / (1.0 - 0.01);
        assert!(scale_done > y_done);
        assert!(topper.y() < 11.0 && topper.scale() > 0.01);
    }

    #[test]
    fn test_spin_is_unconditional() {
        let mut topper = Topper::new(&SceneConfig::default());
        step(&mut topper, TransitionMode::Scattered, 60);
        assert!((topper.spin() - 0.5).abs() < 1e-4);
        step(&mut topper, TransitionMode::TreeShape, 60);
        assert!((topper.spin() - 1.0).abs() < 1e-4);
    }

    #[test]
    fn test_zero_delta_holds_position() {
        let mut topper = Topper::new(&SceneConfig::default());
        topper.update(&FrameContext::new(0.0, 0.0, TransitionMode::Scattered, 1.0));
        assert_eq!(topper.y(), 0.0);
        assert_eq!(topper.scale(), 1.0);
    }

    #[test]
    fn test_hover_is_small() {
        for i in 0..100 {
            let (_, _, t) = hover(i as f32 * 0.37).to_scale_rotation_translation();
            assert!(t.y.abs() <= 0.05 + 1e-6);
            assert_eq!(t.x, 0.0);
        }
    }
}
