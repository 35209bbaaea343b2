//! Easing curves and the per-component progress scalar.

use serde::{Deserialize, Serialize};

/// Distance below which a progress value snaps onto its target.
pub const SNAP_EPSILON: f32 = 1e-6;

/// Linear interpolation, unclamped.
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Cubic ease-in-out on `[0, 1]`.
#[inline]
pub fn ease_in_out_cubic(x: f32) -> f32 {
    if x < 0.5 {
        4.0 * x * x * x
    } else {
        1.0 - (-2.0 * x + 2.0).powi(3) / 2.0
    }
}

/// How a progress scalar approaches its target each frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Smoothing {
    /// Fixed lerp factor per frame, independent of frame time. A frame with
    /// no elapsed time does not step.
    PerFrame { factor: f32 },
    /// Exponential damping, `1 − e^(−rate·dt)` per frame.
    Damped { rate: f32 },
}

impl Smoothing {
    /// Step factor for a frame of `delta` seconds, always within `[0, 1]`.
    #[inline]
    pub fn factor(&self, delta: f32) -> f32 {
        let f = match *self {
            Smoothing::PerFrame { .. } if delta <= 0.0 => 0.0,
            Smoothing::PerFrame { factor } => factor,
            Smoothing::Damped { rate } => 1.0 - (-rate * delta.max(0.0)).exp(),
        };
        if f.is_finite() {
            f.clamp(0.0, 1.0)
        } else {
            0.0
        }
    }
}

/// Interpolation progress between the scattered (0) and tree (1) layouts.
///
/// Each animated component owns one. It only ever moves towards its target
/// and never leaves `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Progress {
    value: f32,
    smoothing: Smoothing,
}

impl Progress {
    pub fn new(initial: f32, smoothing: Smoothing) -> Self {
        Self {
            value: initial.clamp(0.0, 1.0),
            smoothing,
        }
    }

    /// Raw progress value.
    #[inline]
    pub fn value(&self) -> f32 {
        self.value
    }

    /// Progress after the cubic ease.
    #[inline]
    pub fn eased(&self) -> f32 {
        ease_in_out_cubic(self.value)
    }

    pub fn smoothing(&self) -> Smoothing {
        self.smoothing
    }

    /// Advance towards `target` for one frame of `delta` seconds.
    ///
    /// Snaps onto the target once within [`SNAP_EPSILON`], or as soon as a
    /// non-zero step is too small to change the value in `f32`.
    pub fn advance(&mut self, target: f32, delta: f32) -> f32 {
        let target = target.clamp(0.0, 1.0);
        let factor = self.smoothing.factor(delta);
        let next = lerp(self.value, target, factor);
        let stalled = factor > 0.0 && next == self.value;
        self.value = if stalled || (target - next).abs() < SNAP_EPSILON {
            target
        } else {
            next.clamp(0.0, 1.0)
        };
        self.value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ease_endpoints_and_midpoint() {
        assert_eq!(ease_in_out_cubic(0.0), 0.0);
        assert_eq!(ease_in_out_cubic(1.0), 1.0);
        assert!((ease_in_out_cubic(0.5) - 0.5).abs() < 1e-6);
        assert!((ease_in_out_cubic(0.25) - 0.0625).abs() < 1e-6);
    }

    #[test]
    fn test_ease_is_monotonic() {
        let mut last = 0.0;
        for i in 1..=1000 {
            let v = ease_in_out_cubic(i as f32 / 1000.0);
            assert!(v >= last);
            last = v;
        }
    }

    #[test]
    fn test_damped_factor_is_bounded() {
        let s = Smoothing::Damped { rate: 2.0 };
        assert_eq!(s.factor(0.0), 0.0);
        assert!(s.factor(1.0 / 60.0) > 0.03 && s.factor(1.0 / 60.0) < 0.034);
        assert!(s.factor(100.0) <= 1.0);
        assert_eq!(s.factor(-1.0), 0.0);
    }

    #[test]
    fn test_per_frame_ignores_delta() {
        let s = Smoothing::PerFrame { factor: 0.02 };
        assert_eq!(s.factor(0.001), s.factor(0.5));
        assert_eq!(s.factor(0.0), 0.0);
    }

    #[test]
    fn test_per_frame_holds_at_zero_delta() {
        let mut p = Progress::new(0.2, Smoothing::PerFrame { factor: 0.02 });
        for _ in 0..100 {
            p.advance(1.0, 0.0);
        }
        assert_eq!(p.value(), 0.2);
    }

    #[test]
    fn test_progress_monotonic_convergence() {
        for smoothing in [
            Smoothing::PerFrame { factor: 0.02 },
            Smoothing::Damped { rate: 2.0 },
            Smoothing::Damped { rate: 500.0 },
        ] {
            let mut p = Progress::new(1.0, smoothing);
            let mut distance = p.value();
            for _ in 0..2000 {
                p.advance(0.0, 1.0 / 60.0);
                let d = p.value();
                assert!((0.0..=1.0).contains(&p.value()));
                assert!(d < distance || d == 0.0);
                distance = d;
            }
            assert_eq!(p.value(), 0.0);
        }
    }

    #[test]
    fn test_progress_reaches_one_exactly() {
        let mut p = Progress::new(0.0, Smoothing::PerFrame { factor: 0.02 });
        for _ in 0..3000 {
            p.advance(1.0, 1.0 / 60.0);
        }
        assert_eq!(p.value(), 1.0);
        assert_eq!(p.eased(), 1.0);
    }

    #[test]
    fn test_zero_delta_does_not_snap() {
        let mut p = Progress::new(0.5, Smoothing::Damped { rate: 2.0 });
        p.advance(1.0, 0.0);
        assert_eq!(p.value(), 0.5);
    }

    #[test]
    fn test_progress_clamps_initial() {
        let p = Progress::new(3.0, Smoothing::PerFrame { factor: 0.1 });
        assert_eq!(p.value(), 1.0);
    }
}
