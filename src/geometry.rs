//! Placement generators for the two scene configurations.
//!
//! [`scatter_position`] samples the disassembled cloud, [`tree_position`]
//! places a point on the assembled cone. Both are plain functions so fields
//! can combine them with their own jitter.

use glam::Vec3;
use rand::Rng;
use std::f32::consts::TAU;

/// Golden angle in radians, `π(3 − √5)`.
pub const GOLDEN_ANGLE: f32 = 2.399_963_1;

/// Uniform random point inside a sphere of `radius`, centered at the origin.
///
/// The polar angle is drawn as `acos(2u − 1)` so directions are uniform over
/// the sphere, and the radius as `radius · ∛v` so points are uniform by volume.
pub fn scatter_position<R: Rng + ?Sized>(rng: &mut R, radius: f32) -> Vec3 {
    let theta = rng.gen_range(0.0..TAU);
    let phi = (2.0 * rng.gen::<f32>() - 1.0).clamp(-1.0, 1.0).acos();
    let r = radius * rng.gen::<f32>().cbrt();

    Vec3::new(
        r * phi.sin() * theta.cos(),
        r * phi.sin() * theta.sin(),
        r * phi.cos(),
    )
}

/// Point on a vertically centered cone.
///
/// `ratio` 0 is the base (radius `base_radius`, y = −height/2), `ratio` 1 the
/// apex (radius 0, y = height/2). Deterministic in its inputs.
pub fn tree_position(ratio: f32, angle: f32, height: f32, base_radius: f32) -> Vec3 {
    let y = ratio * height - height / 2.0;
    let radius = base_radius * (1.0 - ratio);
    Vec3::new(radius * angle.cos(), y, radius * angle.sin())
}

/// `index / (count − 1)`, or 0 when there is at most one element.
#[inline]
pub fn normalized_index(index: usize, count: usize) -> f32 {
    if count <= 1 {
        0.0
    } else {
        index as f32 / (count - 1) as f32
    }
}

/// Unit direction in the XZ plane for `angle`.
#[inline]
pub fn radial(angle: f32) -> Vec3 {
    Vec3::new(angle.cos(), 0.0, angle.sin())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;
    use std::f32::consts::PI;

    const HEIGHT: f32 = 12.0;
    const BASE: f32 = 4.5;

    #[test]
    fn test_golden_angle_value() {
        let expected = PI * (3.0 - 5.0_f32.sqrt());
        assert!((GOLDEN_ANGLE - expected).abs() < 1e-5);
    }

    #[test]
    fn test_scatter_within_radius() {
        let mut rng = SmallRng::seed_from_u64(7);
        for _ in 0..10_000 {
            let p = scatter_position(&mut rng, 15.0);
            assert!(p.length() <= 15.0 + 1e-4);
        }
    }

    #[test]
    fn test_scatter_uniform_by_volume() {
        // (r/R)^3 is uniform on [0, 1) when sampling uniformly by volume
        let mut rng = SmallRng::seed_from_u64(11);
        let samples = 20_000;
        let mut bins = [0u32; 10];
        for _ in 0..samples {
            let u = (scatter_position(&mut rng, 15.0).length() / 15.0).powi(3);
            bins[((u * 10.0) as usize).min(9)] += 1;
        }
        for count in bins {
            let fraction = count as f32 / samples as f32;
            assert!((fraction - 0.1).abs() < 0.02, "bin fraction {fraction}");
        }
    }

    #[test]
    fn test_scatter_directions_not_polar_biased() {
        // uniform directions give uniform z/r on [-1, 1]
        let mut rng = SmallRng::seed_from_u64(3);
        let samples = 20_000;
        let upper = (0..samples)
            .map(|_| scatter_position(&mut rng, 1.0))
            .filter(|p| p.z / p.length().max(1e-9) > 0.5)
            .count();
        let fraction = upper as f32 / samples as f32;
        assert!((fraction - 0.25).abs() < 0.02, "fraction {fraction}");
    }

    #[test]
    fn test_tree_position_height_and_radius() {
        for i in 0..=100 {
            let ratio = i as f32 / 100.0;
            for j in 0..16 {
                let angle = j as f32 / 16.0 * TAU;
                let p = tree_position(ratio, angle, HEIGHT, BASE);
                assert!((p.y - (ratio * HEIGHT - HEIGHT / 2.0)).abs() < 1e-5);
                let radius = (p.x * p.x + p.z * p.z).sqrt();
                assert!((radius - BASE * (1.0 - ratio)).abs() < 1e-4);
            }
        }
    }

    #[test]
    fn test_tree_position_base_and_apex() {
        let base = tree_position(0.0, 0.0, HEIGHT, BASE);
        assert!((base - Vec3::new(BASE, -6.0, 0.0)).length() < 1e-5);

        let apex = tree_position(1.0, 1.3, HEIGHT, BASE);
        assert!(apex.x.abs() < 1e-6 && apex.z.abs() < 1e-6);
        assert!((apex.y - 6.0).abs() < 1e-6);
    }

    #[test]
    fn test_tree_position_deterministic() {
        let a = tree_position(0.37, 2.1, HEIGHT, BASE);
        let b = tree_position(0.37, 2.1, HEIGHT, BASE);
        assert_eq!(a, b);
    }

    #[test]
    fn test_normalized_index_guards_single_element() {
        assert_eq!(normalized_index(0, 0), 0.0);
        assert_eq!(normalized_index(0, 1), 0.0);
        assert_eq!(normalized_index(0, 5), 0.0);
        assert_eq!(normalized_index(4, 5), 1.0);
        assert!((normalized_index(2, 5) - 0.5).abs() < 1e-6);
    }
}
