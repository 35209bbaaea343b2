//! Instanced ornament populations.
//!
//! Each population is an independent field of rigid instances sharing one
//! mesh. Color and scale are drawn once per instance and published once;
//! only the per-instance transform is rewritten every frame.

use crate::config::{PopulationConfig, SceneConfig};
use crate::easing::{lerp, Progress, Smoothing};
use crate::geometry::tree_position;
use crate::spawn::SpawnContext;
use crate::time::FrameContext;
use bytemuck::{Pod, Zeroable};
use glam::{EulerRot, Mat4, Quat, Vec3};
use serde::{Deserialize, Serialize};

/// Lowest height ratio an ornament is placed at.
pub const MIN_RATIO: f32 = 0.05;
/// Highest height ratio an ornament is placed at.
pub const MAX_RATIO: f32 = 0.95;

/// Mesh shared by every instance of a population.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrnamentShape {
    /// Unit cube (gift boxes).
    Box,
    /// Unit sphere (baubles, lights).
    Sphere,
}

/// Fixed per-instance data, drawn once at construction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrnamentInstance {
    /// Height ratio on the cone, within `[MIN_RATIO, MAX_RATIO]`.
    pub ratio: f32,
    pub scatter: Vec3,
    pub tree: Vec3,
    pub color: Vec3,
    pub scale: f32,
    /// Signed spin multiplier in `[-0.5, 0.5)`.
    pub rotation_speed: f32,
    /// Phase in `[0, 2π)`.
    pub phase: f32,
}

/// Column-major model matrix of one instance.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct InstanceTransform {
    pub model: [[f32; 4]; 4],
}

impl From<Mat4> for InstanceTransform {
    fn from(m: Mat4) -> Self {
        Self {
            model: m.to_cols_array_2d(),
        }
    }
}

/// Linear RGBA color of one instance.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct InstanceColor {
    pub color: [f32; 4],
}

/// One ornament population.
pub struct OrnamentField {
    name: String,
    shape: OrnamentShape,
    instances: Vec<OrnamentInstance>,
    transforms: Vec<InstanceTransform>,
    colors: Vec<InstanceColor>,
    progress: Progress,
    /// Accumulated spin angle shared by the population.
    spin: f32,
    transforms_dirty: bool,
    colors_pending: bool,
}

impl OrnamentField {
    /// Generate every instance of `population` once from `seed`.
    pub fn new(population: &PopulationConfig, config: &SceneConfig, seed: u64) -> Self {
        let mut ctx = SpawnContext::new(seed);
        let range = population.scale_range;

        let instances: Vec<OrnamentInstance> = (0..population.count)
            .map(|_| {
                let ratio = ctx.random_range(MIN_RATIO, MAX_RATIO);
                let angle = ctx.random_angle();
                let on_cone = tree_position(ratio, angle, config.tree_height, config.base_radius);
                // push out radially so ornaments sit on top of the foliage shell
                let push = config.ornament_outward_push;
                let tree = Vec3::new(on_cone.x * push, on_cone.y, on_cone.z * push);
                let scatter = ctx.scatter_position(config.scatter_radius);

                OrnamentInstance {
                    ratio,
                    scatter,
                    tree,
                    color: ctx.pick(&population.palette).copied().unwrap_or(Vec3::ONE),
                    scale: ctx.random_range(range.min, range.max),
                    rotation_speed: ctx.random_centered(1.0),
                    phase: ctx.random_angle(),
                }
            })
            .collect();

        let colors = instances
            .iter()
            .map(|i| InstanceColor {
                color: i.color.extend(1.0).to_array(),
            })
            .collect();

        let mut field = Self {
            name: population.name.clone(),
            shape: population.shape,
            transforms: Vec::with_capacity(instances.len()),
            instances,
            colors,
            progress: Progress::new(
                0.0,
                Smoothing::Damped {
                    rate: config.ornament_damping,
                },
            ),
            spin: 0.0,
            transforms_dirty: true,
            colors_pending: true,
        };
        field.transforms = field
            .instances
            .iter()
            .map(|i| instance_matrix(i, 0.0, 0.0, 0.0).into())
            .collect();
        field
    }

    /// Advance progress and rewrite every instance transform.
    pub fn update(&mut self, frame: &FrameContext) {
        self.progress.advance(frame.mode.target(), frame.delta);
        let eased = self.progress.eased();

        // fast spin while scattered, nearly still once assembled
        self.spin += frame.delta * lerp(2.0, 0.2, eased);

        for (transform, instance) in self.transforms.iter_mut().zip(&self.instances) {
            *transform = instance_matrix(instance, eased, frame.elapsed, self.spin).into();
        }
        self.transforms_dirty = true;
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn shape(&self) -> OrnamentShape {
        self.shape
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.instances.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }

    pub fn instances(&self) -> &[OrnamentInstance] {
        &self.instances
    }

    pub fn transforms(&self) -> &[InstanceTransform] {
        &self.transforms
    }

    pub fn colors(&self) -> &[InstanceColor] {
        &self.colors
    }

    pub fn progress(&self) -> &Progress {
        &self.progress
    }

    /// Transforms written since the last call, if any.
    pub fn take_dirty_transforms(&mut self) -> Option<&[InstanceTransform]> {
        if std::mem::take(&mut self.transforms_dirty) {
            Some(&self.transforms)
        } else {
            None
        }
    }

    /// The color buffer, exactly once per field.
    pub fn take_pending_colors(&mut self) -> Option<&[InstanceColor]> {
        if std::mem::take(&mut self.colors_pending) {
            Some(&self.colors)
        } else {
            None
        }
    }
}

/// Model matrix of `instance` at eased progress `eased`.
///
/// Translate, then rotate about X and Y by `spin · rotation_speed + phase`,
/// then uniform scale.
pub fn instance_matrix(instance: &OrnamentInstance, eased: f32, elapsed: f32, spin: f32) -> Mat4 {
    let mut position = instance.scatter.lerp(instance.tree, eased);

    let float_amp = lerp(0.5, 0.05, eased);
    position.y += (elapsed + instance.phase).sin() * float_amp;
    position.x += (elapsed * 0.5 + instance.phase).cos() * float_amp * 0.5;

    let angle = spin * instance.rotation_speed + instance.phase;
    let rotation = Quat::from_euler(EulerRot::XYZ, angle, angle, 0.0);

    Mat4::from_scale_rotation_translation(Vec3::splat(instance.scale), rotation, position)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ScaleRange;
    use crate::state::TransitionMode;
    use std::f32::consts::TAU;

    fn field(population: PopulationConfig, seed: u64) -> OrnamentField {
        OrnamentField::new(&population, &SceneConfig::default(), seed)
    }

    fn frame(elapsed: f32, mode: TransitionMode) -> FrameContext {
        FrameContext::new(elapsed, 1.0 / 60.0, mode, 1.0)
    }

    #[test]
    fn test_population_counts() {
        let baubles = field(PopulationConfig::baubles(), 1);
        assert_eq!(baubles.len(), 300);
        assert_eq!(baubles.transforms().len(), 300);
        assert_eq!(baubles.colors().len(), 300);
        assert_eq!(baubles.shape(), OrnamentShape::Sphere);
        assert_eq!(baubles.name(), "baubles");
    }

    #[test]
    fn test_instances_respect_config() {
        let population = PopulationConfig::gifts();
        let f = field(population.clone(), 2);
        for inst in f.instances() {
            assert!(population.palette.contains(&inst.color));
            assert!(population.scale_range.contains(inst.scale));
            assert!((-0.5..0.5).contains(&inst.rotation_speed));
            assert!((0.0..TAU).contains(&inst.phase));
            assert!((MIN_RATIO..=MAX_RATIO).contains(&inst.ratio));
        }
    }

    #[test]
    fn test_tree_position_pushed_outward() {
        let config = SceneConfig::default();
        let f = field(PopulationConfig::lights(), 3);
        for inst in f.instances() {
            let radius = (inst.tree.x * inst.tree.x + inst.tree.z * inst.tree.z).sqrt();
            let expected = config.base_radius * (1.0 - inst.ratio) * config.ornament_outward_push;
            assert!((radius - expected).abs() < 1e-4);
            let y = inst.ratio * config.tree_height - config.tree_height / 2.0;
            assert!((inst.tree.y - y).abs() < 1e-5);
        }
    }

    #[test]
    fn test_colors_published_once() {
        let mut f = field(PopulationConfig::baubles(), 4);
        assert!(f.take_pending_colors().is_some());
        assert!(f.take_pending_colors().is_none());
    }

    #[test]
    fn test_transforms_marked_dirty_by_update() {
        let mut f = field(PopulationConfig::lights(), 5);
        assert!(f.take_dirty_transforms().is_some());
        assert!(f.take_dirty_transforms().is_none());
        f.update(&frame(0.1, TransitionMode::TreeShape));
        assert!(f.take_dirty_transforms().is_some());
    }

    #[test]
    fn test_matrix_scale_and_translation() {
        let inst = OrnamentInstance {
            ratio: 0.5,
            scatter: Vec3::new(10.0, 0.0, 0.0),
            tree: Vec3::new(1.0, 2.0, 3.0),
            color: Vec3::ONE,
            scale: 0.3,
            rotation_speed: 0.25,
            phase: 0.0,
        };
        let m = instance_matrix(&inst, 1.0, 0.0, 1.0);
        let (scale, _, translation) = m.to_scale_rotation_translation();
        assert!((scale - Vec3::splat(0.3)).length() < 1e-4);
        // float offsets at t = 0, phase = 0: y += 0, x += 0.05·0.5
        assert!((translation - Vec3::new(1.025, 2.0, 3.0)).length() < 1e-4);
    }

    #[test]
    fn test_update_converges_to_tree() {
        let mut f = field(PopulationConfig::gifts(), 6);
        for i in 1..=600 {
            f.update(&frame(i as f32 / 60.0, TransitionMode::TreeShape));
        }
        assert!((f.progress().value() - 1.0).abs() < 1e-3);
    }

    #[test]
    fn test_zero_count_population() {
        let population = PopulationConfig::new(
            "none",
            0,
            OrnamentShape::Box,
            vec![Vec3::ONE],
            ScaleRange::new(0.1, 0.2),
        );
        let mut f = field(population, 7);
        assert!(f.is_empty());
        f.update(&frame(0.1, TransitionMode::Scattered));
        assert!(f.transforms().is_empty());
    }
}
