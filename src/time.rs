//! Frame timing.
//!
//! [`Time`] is the single source of elapsed/delta time for the scene. It runs
//! off the wall clock in the viewer, or is stepped by hand for headless runs
//! and tests. Each frame it produces a [`FrameContext`] that every animated
//! component consumes.
//!
//! ```ignore
//! let mut time = Time::new();
//! // in the frame loop:
//! time.update();
//! let frame = time.frame_context(state.mode(), window.scale_factor() as f32);
//! ```

use crate::state::TransitionMode;
use std::time::Instant;

/// Highest pixel density the point sizes are scaled for.
pub const MAX_PIXEL_RATIO: f32 = 2.0;

/// Everything a component needs to advance one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameContext {
    /// Seconds since the scene started.
    pub elapsed: f32,
    /// Seconds since the previous frame.
    pub delta: f32,
    /// Mode snapshot taken once for this frame.
    pub mode: TransitionMode,
    /// Display pixel density, capped at [`MAX_PIXEL_RATIO`].
    pub pixel_ratio: f32,
}

impl FrameContext {
    pub fn new(elapsed: f32, delta: f32, mode: TransitionMode, pixel_ratio: f32) -> Self {
        Self {
            elapsed,
            delta: delta.max(0.0),
            mode,
            pixel_ratio: clamp_pixel_ratio(pixel_ratio),
        }
    }
}

/// Cap a device pixel ratio to `(0, MAX_PIXEL_RATIO]`, defaulting to 1.
pub fn clamp_pixel_ratio(ratio: f32) -> f32 {
    if ratio.is_finite() && ratio > 0.0 {
        ratio.min(MAX_PIXEL_RATIO)
    } else {
        1.0
    }
}

/// Time tracking for the frame loop.
#[derive(Debug)]
pub struct Time {
    /// When the last frame occurred (wall clock mode).
    last_frame: Instant,
    /// Total elapsed time in seconds.
    elapsed_secs: f32,
    /// Time since last frame in seconds.
    delta_secs: f32,
    /// Total frames since start.
    frame_count: u64,
    /// Calculated FPS (updated periodically).
    fps: f32,
    fps_frame_count: u64,
    fps_window_secs: f32,
    /// Whether time is paused.
    paused: bool,
    /// Fixed delta time for deterministic updates.
    fixed_delta: Option<f32>,
    /// Time scale multiplier (1.0 = normal speed).
    time_scale: f32,
}

const FPS_UPDATE_INTERVAL: f32 = 0.5;

impl Time {
    /// Create a new time tracker starting from now.
    pub fn new() -> Self {
        Self {
            last_frame: Instant::now(),
            elapsed_secs: 0.0,
            delta_secs: 0.0,
            frame_count: 0,
            fps: 0.0,
            fps_frame_count: 0,
            fps_window_secs: 0.0,
            paused: false,
            fixed_delta: None,
            time_scale: 1.0,
        }
    }

    /// Time tracker that always advances by `delta` per update.
    pub fn fixed(delta: f32) -> Self {
        let mut time = Self::new();
        time.set_fixed_delta(Some(delta));
        time
    }

    /// Update from the wall clock (or the fixed delta). Call once per frame.
    ///
    /// Returns `(elapsed_time, delta_time)`.
    pub fn update(&mut self) -> (f32, f32) {
        let now = Instant::now();
        let raw_delta = now.duration_since(self.last_frame).as_secs_f32();
        self.last_frame = now;
        self.advance(self.fixed_delta.unwrap_or(raw_delta))
    }

    /// Advance by an explicit `delta` seconds, ignoring the wall clock.
    pub fn advance(&mut self, delta: f32) -> (f32, f32) {
        if self.paused {
            self.delta_secs = 0.0;
            return (self.elapsed_secs, self.delta_secs);
        }

        self.delta_secs = delta.max(0.0) * self.time_scale;
        self.elapsed_secs += self.delta_secs;
        self.frame_count += 1;

        self.fps_window_secs += delta.max(0.0);
        if self.fps_window_secs >= FPS_UPDATE_INTERVAL {
            let frames_since = self.frame_count - self.fps_frame_count;
            self.fps = frames_since as f32 / self.fps_window_secs;
            self.fps_frame_count = self.frame_count;
            self.fps_window_secs = 0.0;
        }

        (self.elapsed_secs, self.delta_secs)
    }

    /// Frame context for the current frame.
    pub fn frame_context(&self, mode: TransitionMode, pixel_ratio: f32) -> FrameContext {
        FrameContext::new(self.elapsed_secs, self.delta_secs, mode, pixel_ratio)
    }

    /// Total elapsed time in seconds since start.
    #[inline]
    pub fn elapsed(&self) -> f32 {
        self.elapsed_secs
    }

    /// Time since last frame in seconds (delta time).
    #[inline]
    pub fn delta(&self) -> f32 {
        self.delta_secs
    }

    /// Total frames since start.
    #[inline]
    pub fn frame(&self) -> u64 {
        self.frame_count
    }

    /// Calculated frames per second.
    #[inline]
    pub fn fps(&self) -> f32 {
        self.fps
    }

    #[inline]
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    #[inline]
    pub fn time_scale(&self) -> f32 {
        self.time_scale
    }

    /// Toggle pause state. While paused, `delta()` is 0 and `elapsed()` holds.
    pub fn toggle_pause(&mut self) {
        self.paused = !self.paused;
        if !self.paused {
            self.last_frame = Instant::now();
        }
    }

    /// Set a fixed delta time for deterministic updates.
    ///
    /// Pass `None` to use real frame timing.
    pub fn set_fixed_delta(&mut self, delta: Option<f32>) {
        self.fixed_delta = delta;
    }

    /// Set time scale multiplier.
    ///
    /// - `1.0` = normal speed
    /// - `0.5` = half speed (slow motion)
    pub fn set_time_scale(&mut self, scale: f32) {
        self.time_scale = scale.max(0.0);
    }
}

impl Default for Time {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;
    use std::time::Duration;

    #[test]
    fn test_time_new() {
        let time = Time::new();
        assert_eq!(time.frame(), 0);
        assert!(!time.is_paused());
        assert_eq!(time.time_scale(), 1.0);
    }

    #[test]
    fn test_time_update() {
        let mut time = Time::new();
        thread::sleep(Duration::from_millis(10));
        let (elapsed, delta) = time.update();

        assert!(elapsed > 0.0);
        assert!(delta > 0.0);
        assert_eq!(time.frame(), 1);
    }

    #[test]
    fn test_fixed_delta() {
        let mut time = Time::fixed(1.0 / 60.0);
        thread::sleep(Duration::from_millis(20));
        time.update();

        let expected = 1.0 / 60.0;
        assert!((time.delta() - expected).abs() < 0.0001);
    }

    #[test]
    fn test_advance_accumulates() {
        let mut time = Time::new();
        for _ in 0..60 {
            time.advance(0.5);
        }
        assert_eq!(time.frame(), 60);
        assert!((time.elapsed() - 30.0).abs() < 1e-4);
        assert!(time.fps() > 1.9 && time.fps() < 2.1);
    }

    #[test]
    fn test_pause_holds_elapsed() {
        let mut time = Time::new();
        time.advance(0.1);
        time.toggle_pause();
        let elapsed = time.elapsed();
        time.advance(0.1);
        assert_eq!(time.elapsed(), elapsed);
        assert_eq!(time.delta(), 0.0);
    }

    #[test]
    fn test_time_scale() {
        let mut time = Time::new();
        time.set_time_scale(0.5);
        time.advance(1.0);
        assert!((time.elapsed() - 0.5).abs() < 1e-6);

        time.set_time_scale(-1.0);
        assert_eq!(time.time_scale(), 0.0);
    }

    #[test]
    fn test_frame_context_caps_pixel_ratio() {
        let ctx = FrameContext::new(1.0, 0.016, TransitionMode::TreeShape, 3.0);
        assert_eq!(ctx.pixel_ratio, 2.0);
        assert_eq!(clamp_pixel_ratio(f32::NAN), 1.0);
        assert_eq!(clamp_pixel_ratio(1.25), 1.25);
    }
}
