//! Point-cloud foliage.
//!
//! A dense set of points that blend between a scattered sphere and a thick
//! conical shell. Placement is generated once; every frame a vertex pass
//! (parallel over points) recomputes position, size and color into a packed
//! [`PointVertex`] buffer for the display surface.
//!
//! The per-point math:
//!
//! | Output | Formula |
//! |--------|---------|
//! | position | `mix(scatter, tree, e) + breathing(t, e, random)` |
//! | size | `point_size · pixel_ratio · (1 + 0.3·sin(t + 100·random))` |
//! | color | `mix(dark, light, height + sin(random))`, gold while sparkling |
//!
//! where `e` is the eased progress. The circular footprint and soft edge are
//! applied per pixel by the surface, see [`glow_alpha`].

use crate::config::SceneConfig;
use crate::easing::{lerp, Progress};
use crate::geometry::{normalized_index, radial, tree_position, GOLDEN_ANGLE};
use crate::spawn::SpawnContext;
use crate::time::FrameContext;
use bytemuck::{Pod, Zeroable};
use glam::{Vec2, Vec3};
use rayon::prelude::*;

/// Bottom-of-tree green.
pub const DARK_GREEN: Vec3 = Vec3::new(0.0, 0.2, 0.1);
/// Top-of-tree green.
pub const LIGHT_GREEN: Vec3 = Vec3::new(0.0, 0.4, 0.2);
/// Sparkle color.
pub const SPARKLE_GOLD: Vec3 = Vec3::new(1.0, 0.8, 0.2);
/// `sin(2t + 100·random)` at or above this makes a point sparkle.
pub const SPARKLE_THRESHOLD: f32 = 0.98;

/// One packed point for the display surface.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct PointVertex {
    pub position: [f32; 3],
    /// Point diameter in pixels at unit view depth.
    pub size: f32,
    pub color: [f32; 3],
    pub alpha: f32,
}

/// Fixed placement data of one point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FoliagePoint {
    pub scatter: Vec3,
    pub tree: Vec3,
    /// Stable per-point random in `[0, 1)`, used as animation phase.
    pub random: f32,
}

/// The foliage point cloud.
pub struct FoliageField {
    points: Vec<FoliagePoint>,
    vertices: Vec<PointVertex>,
    progress: Progress,
    tree_height: f32,
    point_size: f32,
}

impl FoliageField {
    /// Generate every point once from `seed`.
    pub fn new(config: &SceneConfig, seed: u64) -> Self {
        let foliage = &config.foliage;
        let count = foliage.count;
        let mut ctx = SpawnContext::new(seed);

        let points: Vec<FoliagePoint> = (0..count)
            .map(|i| {
                let scatter = ctx.scatter_position(config.scatter_radius);

                let ratio =
                    (normalized_index(i, count) + ctx.random_centered(foliage.ratio_jitter))
                        .clamp(0.0, 1.0);
                let angle = spiral_angle(i, foliage.spiral_turns);
                let thickness = ctx.random_centered(foliage.thickness);
                let lift = ctx.random() * foliage.lift;

                let tree = tree_position(ratio, angle, config.tree_height, config.base_radius)
                    + radial(angle) * thickness
                    + Vec3::Y * lift;

                FoliagePoint {
                    scatter,
                    tree,
                    random: ctx.random(),
                }
            })
            .collect();

        let mut field = Self {
            vertices: vec![PointVertex::zeroed(); points.len()],
            points,
            progress: Progress::new(0.0, foliage.smoothing),
            tree_height: config.tree_height,
            point_size: foliage.point_size,
        };
        field.shade(0.0, 1.0);
        field
    }

    /// Advance progress and recompute every vertex.
    pub fn update(&mut self, frame: &FrameContext) {
        self.progress.advance(frame.mode.target(), frame.delta);
        self.shade(frame.elapsed, frame.pixel_ratio);
    }

    fn shade(&mut self, elapsed: f32, pixel_ratio: f32) {
        let shader = PointShader {
            eased: self.progress.eased(),
            elapsed,
            pixel_ratio,
            tree_height: self.tree_height,
            point_size: self.point_size,
        };
        self.vertices
            .par_iter_mut()
            .zip(self.points.par_iter())
            .for_each(|(vertex, point)| *vertex = shader.shade(point));
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn points(&self) -> &[FoliagePoint] {
        &self.points
    }

    /// Packed vertices from the last update.
    pub fn vertices(&self) -> &[PointVertex] {
        &self.vertices
    }

    pub fn progress(&self) -> &Progress {
        &self.progress
    }
}

/// Spiral angle of point `index`, reduced into `[0, 2π)` in double precision.
fn spiral_angle(index: usize, turns: f32) -> f32 {
    let angle = index as f64 * GOLDEN_ANGLE as f64 * turns as f64;
    angle.rem_euclid(std::f64::consts::TAU) as f32
}

/// Per-frame uniforms of the vertex pass.
#[derive(Debug, Clone, Copy)]
pub struct PointShader {
    pub eased: f32,
    pub elapsed: f32,
    pub pixel_ratio: f32,
    pub tree_height: f32,
    pub point_size: f32,
}

impl PointShader {
    /// Vertex pass for one point.
    pub fn shade(&self, point: &FoliagePoint) -> PointVertex {
        let e = self.eased;
        let t = self.elapsed;
        let r = point.random;

        // calmer and slower once assembled
        let freq = lerp(0.5, 2.0, e);
        let amp = lerp(0.2, 0.05, e);
        let breathing = Vec3::new(
            (t * freq + r * 10.0).sin(),
            (t * freq + r * 15.0).cos(),
            (t * freq + r * 5.0).sin(),
        ) * amp;
        let position = point.scatter.lerp(point.tree, e) + breathing;

        let size = self.point_size * self.pixel_ratio * (1.0 + (t + r * 100.0).sin() * 0.3);

        let height = (point.tree.y + self.tree_height / 2.0) / self.tree_height;
        let mut color = DARK_GREEN.lerp(LIGHT_GREEN, height + r.sin());
        if is_sparkling(t, r) {
            color = SPARKLE_GOLD;
        }

        PointVertex {
            position: position.to_array(),
            size,
            color: color.to_array(),
            alpha: 1.0,
        }
    }
}

/// Whether a point with phase `random` shows the gold sparkle at time `t`.
#[inline]
pub fn is_sparkling(t: f32, random: f32) -> bool {
    (t * 2.0 + random * 100.0).sin() >= SPARKLE_THRESHOLD
}

/// Opacity of a point sprite at `point_coord` in `[0, 1]²`.
///
/// `None` outside the inscribed circle (the pixel is discarded), otherwise a
/// soft `(1 − 2d)^1.5` falloff from the center.
pub fn glow_alpha(point_coord: Vec2) -> Option<f32> {
    let dist = (point_coord - Vec2::splat(0.5)).length();
    if dist > 0.5 {
        None
    } else {
        Some((1.0 - dist * 2.0).powf(1.5))
    }
}
