//! The boundary between the animated scene and whatever draws it.
//!
//! The scene pushes plain packed buffers through [`DisplaySurface`] each
//! frame. Projection, lighting and presentation are entirely the surface's
//! business; nothing is ever read back.

use crate::foliage::PointVertex;
use crate::ornaments::{InstanceColor, InstanceTransform};
use glam::{Mat4, Vec3};

/// Receiver of per-frame scene buffers.
///
/// `population` is the index of the ornament population within the scene
/// config.
pub trait DisplaySurface {
    /// Whether the surface can accept a frame right now.
    fn is_ready(&self) -> bool {
        true
    }

    /// Packed foliage points, every frame.
    fn write_points(&mut self, points: &[PointVertex]);

    /// Per-instance colors, once per population.
    fn write_instance_colors(&mut self, population: usize, colors: &[InstanceColor]);

    /// Per-instance transforms, whenever they changed.
    fn write_instance_transforms(&mut self, population: usize, transforms: &[InstanceTransform]);

    /// Topper model matrix and color.
    fn write_topper(&mut self, transform: Mat4, color: Vec3);
}

/// A surface that does not exist yet is never ready.
impl<S: DisplaySurface> DisplaySurface for Option<S> {
    fn is_ready(&self) -> bool {
        self.as_ref().is_some_and(|s| s.is_ready())
    }

    fn write_points(&mut self, points: &[PointVertex]) {
        if let Some(s) = self {
            s.write_points(points);
        }
    }

    fn write_instance_colors(&mut self, population: usize, colors: &[InstanceColor]) {
        if let Some(s) = self {
            s.write_instance_colors(population, colors);
        }
    }

    fn write_instance_transforms(&mut self, population: usize, transforms: &[InstanceTransform]) {
        if let Some(s) = self {
            s.write_instance_transforms(population, transforms);
        }
    }

    fn write_topper(&mut self, transform: Mat4, color: Vec3) {
        if let Some(s) = self {
            s.write_topper(transform, color);
        }
    }
}

/// Keeps the most recent buffers in memory.
///
/// Used by the headless runner and by tests to observe exactly what the
/// scene publishes.
#[derive(Debug, Default, Clone)]
pub struct RecordingSurface {
    ready: bool,
    pub points: Vec<PointVertex>,
    pub colors: Vec<Vec<InstanceColor>>,
    pub transforms: Vec<Vec<InstanceTransform>>,
    pub topper: Option<(Mat4, Vec3)>,
    /// Number of color uploads per population.
    pub color_uploads: Vec<usize>,
    /// Number of frames that reached the surface.
    pub frames: usize,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self {
            ready: true,
            ..Default::default()
        }
    }

    /// A surface that refuses frames until [`set_ready`](Self::set_ready).
    pub fn not_ready() -> Self {
        Self::default()
    }

    pub fn set_ready(&mut self, ready: bool) {
        self.ready = ready;
    }

    fn slot<T: Default>(slots: &mut Vec<T>, index: usize) -> &mut T {
        if slots.len() <= index {
            slots.resize_with(index + 1, T::default);
        }
        &mut slots[index]
    }
}

impl DisplaySurface for RecordingSurface {
    fn is_ready(&self) -> bool {
        self.ready
    }

    fn write_points(&mut self, points: &[PointVertex]) {
        self.frames += 1;
        self.points.clear();
        self.points.extend_from_slice(points);
    }

    fn write_instance_colors(&mut self, population: usize, colors: &[InstanceColor]) {
        *Self::slot(&mut self.color_uploads, population) += 1;
        *Self::slot(&mut self.colors, population) = colors.to_vec();
    }

    fn write_instance_transforms(&mut self, population: usize, transforms: &[InstanceTransform]) {
        *Self::slot(&mut self.transforms, population) = transforms.to_vec();
    }

    fn write_topper(&mut self, transform: Mat4, color: Vec3) {
        self.topper = Some((transform, color));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_option_readiness() {
        let mut surface: Option<RecordingSurface> = None;
        assert!(!surface.is_ready());
        surface.write_points(&[]);

        surface = Some(RecordingSurface::new());
        assert!(surface.is_ready());
        surface = Some(RecordingSurface::not_ready());
        assert!(!surface.is_ready());
    }

    #[test]
    fn test_recording_grows_slots() {
        let mut surface = RecordingSurface::new();
        let color = InstanceColor { color: [1.0; 4] };
        surface.write_instance_colors(2, &[color]);
        assert_eq!(surface.color_uploads, vec![0, 0, 1]);
        assert_eq!(surface.colors[2], vec![color]);
        assert!(surface.colors[0].is_empty());
    }
}
