//! Scene configuration.
//!
//! [`SceneConfig::default`] reproduces the reference scene. Every constant can
//! be changed through the `with_*` builder methods or loaded from JSON, and
//! the whole config is checked once by [`SceneConfig::validate`] before any
//! field is built.
//!
//! ```ignore
//! let config = SceneConfig::default()
//!     .with_seed(7)
//!     .with_foliage_count(4_000)
//!     .with_foliage_smoothing(Smoothing::Damped { rate: 1.2 });
//! let scene = Scene::new(config, TransitionState::new())?;
//! ```

use crate::easing::Smoothing;
use crate::error::ConfigError;
use crate::ornaments::OrnamentShape;
use crate::palette::NamedColor;
use glam::Vec3;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Half-open `[min, max)` range of uniform ornament scales.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScaleRange {
    pub min: f32,
    pub max: f32,
}

impl ScaleRange {
    pub fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    /// True when the range holds at least one value.
    pub fn is_valid(&self) -> bool {
        self.min.is_finite() && self.max.is_finite() && self.min < self.max
    }

    pub fn contains(&self, value: f32) -> bool {
        value >= self.min && value < self.max
    }
}

/// Point-cloud settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FoliageConfig {
    /// Number of points.
    pub count: usize,
    /// How the progress scalar approaches its target.
    pub smoothing: Smoothing,
    /// Total width of the random jitter added to each height ratio.
    pub ratio_jitter: f32,
    /// Multiplier on `index · golden angle` for the spiral placement.
    pub spiral_turns: f32,
    /// Total width of the radial shell thickness offset.
    pub thickness: f32,
    /// Maximum random upward offset.
    pub lift: f32,
    /// Point size before pulsing and pixel ratio scaling.
    pub point_size: f32,
}

impl Default for FoliageConfig {
    fn default() -> Self {
        Self {
            count: 12_000,
            smoothing: Smoothing::PerFrame { factor: 0.02 },
            ratio_jitter: 0.05,
            spiral_turns: 50.0,
            thickness: 1.5,
            lift: 0.5,
            point_size: 40.0,
        }
    }
}

/// One ornament population.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PopulationConfig {
    /// Name used in logs and errors.
    pub name: String,
    pub count: usize,
    pub shape: OrnamentShape,
    /// Linear RGB colors, one is drawn per instance.
    pub palette: Vec<Vec3>,
    pub scale_range: ScaleRange,
}

impl PopulationConfig {
    pub fn new(
        name: impl Into<String>,
        count: usize,
        shape: OrnamentShape,
        palette: Vec<Vec3>,
        scale_range: ScaleRange,
    ) -> Self {
        Self {
            name: name.into(),
            count,
            shape,
            palette,
            scale_range,
        }
    }

    /// Gold and rose-gold baubles.
    pub fn baubles() -> Self {
        Self::new(
            "baubles",
            300,
            OrnamentShape::Sphere,
            vec![NamedColor::GoldMetallic.linear(), NamedColor::GoldRose.linear()],
            ScaleRange::new(0.2, 0.4),
        )
    }

    /// Red and emerald gift boxes.
    pub fn gifts() -> Self {
        Self::new(
            "gifts",
            150,
            OrnamentShape::Box,
            vec![NamedColor::RedVelvet.linear(), NamedColor::EmeraldLight.linear()],
            ScaleRange::new(0.3, 0.5),
        )
    }

    /// Tiny warm-white lights.
    pub fn lights() -> Self {
        Self::new(
            "lights",
            500,
            OrnamentShape::Sphere,
            vec![NamedColor::WarmWhite.linear()],
            ScaleRange::new(0.05, 0.08),
        )
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.palette.is_empty() {
            return Err(ConfigError::EmptyPalette {
                population: self.name.clone(),
            });
        }
        for color in &self.palette {
            finite_vec("populations.palette", *color)?;
        }
        if !self.scale_range.is_valid() {
            return Err(ConfigError::EmptyScaleRange {
                population: self.name.clone(),
                min: self.scale_range.min,
                max: self.scale_range.max,
            });
        }
        Ok(())
    }
}

/// Star topper settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TopperConfig {
    /// Damping rate of the vertical follow.
    pub position_rate: f32,
    /// Damping rate of the scale follow.
    pub scale_rate: f32,
    /// Constant spin in radians per second.
    pub spin_rate: f32,
    /// Height above the apex when assembled.
    pub apex_offset: f32,
    /// Height above the apex while scattered.
    pub parked_offset: f32,
    /// Scale while scattered.
    pub hidden_scale: f32,
    pub color: Vec3,
}

impl Default for TopperConfig {
    fn default() -> Self {
        Self {
            position_rate: 2.0,
            scale_rate: 3.0,
            spin_rate: 0.5,
            apex_offset: 0.5,
            parked_offset: 5.0,
            hidden_scale: 0.01,
            color: NamedColor::GoldMetallic.linear(),
        }
    }
}

/// Full scene configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    /// Height of the cone.
    pub tree_height: f32,
    /// Cone radius at its base.
    pub base_radius: f32,
    /// Radius of the scatter sphere.
    pub scatter_radius: f32,
    /// RNG seed; `None` seeds from the clock.
    pub seed: Option<u64>,
    /// Translation applied to the whole scene by the display surface.
    pub world_offset: Vec3,
    pub foliage: FoliageConfig,
    pub ornament_damping: f32,
    /// Radial push that seats ornaments on the foliage shell.
    pub ornament_outward_push: f32,
    pub populations: Vec<PopulationConfig>,
    pub topper: TopperConfig,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            tree_height: 12.0,
            base_radius: 4.5,
            scatter_radius: 15.0,
            seed: None,
            world_offset: Vec3::new(0.0, -2.0, 0.0),
            foliage: FoliageConfig::default(),
            ornament_damping: 2.0,
            ornament_outward_push: 1.1,
            populations: vec![
                PopulationConfig::baubles(),
                PopulationConfig::gifts(),
                PopulationConfig::lights(),
            ],
            topper: TopperConfig::default(),
        }
    }
}

impl SceneConfig {
    /// Parse a config from JSON. Missing fields keep their defaults.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: SceneConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read and parse a JSON config file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_tree(mut self, height: f32, base_radius: f32) -> Self {
        self.tree_height = height;
        self.base_radius = base_radius;
        self
    }

    pub fn with_scatter_radius(mut self, radius: f32) -> Self {
        self.scatter_radius = radius;
        self
    }

    pub fn with_foliage_count(mut self, count: usize) -> Self {
        self.foliage.count = count;
        self
    }

    pub fn with_foliage_smoothing(mut self, smoothing: Smoothing) -> Self {
        self.foliage.smoothing = smoothing;
        self
    }

    pub fn with_ornament_damping(mut self, rate: f32) -> Self {
        self.ornament_damping = rate;
        self
    }

    /// Replace all ornament populations.
    pub fn with_populations(mut self, populations: Vec<PopulationConfig>) -> Self {
        self.populations = populations;
        self
    }

    /// Add one ornament population.
    pub fn with_population(mut self, population: PopulationConfig) -> Self {
        self.populations.push(population);
        self
    }

    /// Check every constant. Called by `Scene::new` before anything is built.
    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("tree_height", self.tree_height)?;
        positive("base_radius", self.base_radius)?;
        positive("scatter_radius", self.scatter_radius)?;
        positive("ornament_damping", self.ornament_damping)?;
        positive("ornament_outward_push", self.ornament_outward_push)?;
        positive("topper.position_rate", self.topper.position_rate)?;
        positive("topper.scale_rate", self.topper.scale_rate)?;
        positive("topper.hidden_scale", self.topper.hidden_scale)?;
        positive("foliage.point_size", self.foliage.point_size)?;
        smoothing("foliage.smoothing", self.foliage.smoothing)?;
        finite("foliage.spiral_turns", self.foliage.spiral_turns)?;
        non_negative("foliage.ratio_jitter", self.foliage.ratio_jitter)?;
        non_negative("foliage.thickness", self.foliage.thickness)?;
        non_negative("foliage.lift", self.foliage.lift)?;
        finite("topper.spin_rate", self.topper.spin_rate)?;
        finite("topper.apex_offset", self.topper.apex_offset)?;
        finite("topper.parked_offset", self.topper.parked_offset)?;
        finite_vec("topper.color", self.topper.color)?;
        finite_vec("world_offset", self.world_offset)?;

        for population in &self.populations {
            population.validate()?;
        }
        Ok(())
    }
}

fn positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NotPositive { field, value })
    }
}

fn finite(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::NotFinite { field, value })
    }
}

fn finite_vec(field: &'static str, value: Vec3) -> Result<(), ConfigError> {
    value.to_array().into_iter().try_for_each(|v| finite(field, v))
}

fn non_negative(field: &'static str, value: f32) -> Result<(), ConfigError> {
    finite(field, value)?;
    if value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Negative { field, value })
    }
}

fn smoothing(field: &'static str, smoothing: Smoothing) -> Result<(), ConfigError> {
    match smoothing {
        Smoothing::PerFrame { factor } if factor > 0.0 && factor <= 1.0 => Ok(()),
        Smoothing::PerFrame { factor } => Err(ConfigError::SmoothingFactor {
            field,
            value: factor,
        }),
        Smoothing::Damped { rate } => positive(field, rate),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = SceneConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.foliage.count, 12_000);
        assert_eq!(config.populations.len(), 3);
        assert_eq!(
            config.populations.iter().map(|p| p.count).sum::<usize>(),
            950
        );
    }

    #[test]
    fn test_empty_palette_rejected() {
        let mut bad = PopulationConfig::lights();
        bad.palette.clear();
        let config = SceneConfig::default().with_population(bad);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::EmptyPalette { .. })
        ));
    }

    #[test]
    fn test_zero_width_scale_range_rejected() {
        let mut bad = PopulationConfig::gifts();
        bad.scale_range = ScaleRange::new(0.3, 0.3);
        let config = SceneConfig::default().with_populations(vec![bad]);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::EmptyScaleRange { .. })
        ));
    }

    #[test]
    fn test_non_positive_constants_rejected() {
        let config = SceneConfig::default().with_tree(0.0, 4.5);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NotPositive {
                field: "tree_height",
                ..
            })
        ));

        let config = SceneConfig::default().with_scatter_radius(f32::NAN);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_non_finite_foliage_constants_rejected() {
        let json = r#"{ "seed": 1, "foliage": { "count": 10, "spiral_turns": 1e39 } }"#;
        assert!(matches!(
            SceneConfig::from_json_str(json),
            Err(ConfigError::NotFinite {
                field: "foliage.spiral_turns",
                ..
            })
        ));

        let mut config = SceneConfig::default();
        config.foliage.thickness = f32::INFINITY;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NotFinite {
                field: "foliage.thickness",
                ..
            })
        ));

        let mut config = SceneConfig::default();
        config.foliage.lift = -0.5;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Negative {
                field: "foliage.lift",
                ..
            })
        ));

        let mut config = SceneConfig::default();
        config.foliage.ratio_jitter = f32::NAN;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_non_finite_topper_and_offset_rejected() {
        let mut config = SceneConfig::default();
        config.topper.spin_rate = f32::NEG_INFINITY;
        assert!(config.validate().is_err());

        let mut config = SceneConfig::default();
        config.topper.color = Vec3::new(1.0, f32::NAN, 0.0);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NotFinite {
                field: "topper.color",
                ..
            })
        ));

        let mut config = SceneConfig::default();
        config.world_offset = Vec3::splat(f32::INFINITY);
        assert!(config.validate().is_err());

        let mut lights = PopulationConfig::lights();
        lights.palette.push(Vec3::new(f32::INFINITY, 1.0, 1.0));
        let config = SceneConfig::default().with_populations(vec![lights]);
        assert!(config.validate().is_err());

        let mut config = SceneConfig::default();
        config.topper.parked_offset = -3.0;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_smoothing_factor_rejected() {
        let config =
            SceneConfig::default().with_foliage_smoothing(Smoothing::PerFrame { factor: 1.5 });
        assert!(matches!(
            config.validate(),
            Err(ConfigError::SmoothingFactor { .. })
        ));
    }

    #[test]
    fn test_json_partial_override() {
        let json = r#"{
            "seed": 9,
            "tree_height": 10.0,
            "foliage": { "count": 500, "smoothing": { "kind": "damped", "rate": 1.5 } }
        }"#;
        let config = SceneConfig::from_json_str(json).unwrap();
        assert_eq!(config.seed, Some(9));
        assert_eq!(config.tree_height, 10.0);
        assert_eq!(config.base_radius, 4.5);
        assert_eq!(config.foliage.count, 500);
        assert_eq!(config.foliage.smoothing, Smoothing::Damped { rate: 1.5 });
        assert_eq!(config.foliage.thickness, 1.5);
        assert_eq!(config.populations.len(), 3);
    }

    #[test]
    fn test_json_rejects_invalid_population() {
        let json = r#"{
            "populations": [{
                "name": "empty",
                "count": 3,
                "shape": "box",
                "palette": [],
                "scale_range": { "min": 0.1, "max": 0.2 }
            }]
        }"#;
        assert!(matches!(
            SceneConfig::from_json_str(json),
            Err(ConfigError::EmptyPalette { .. })
        ));
    }

    #[test]
    fn test_json_parse_error() {
        assert!(matches!(
            SceneConfig::from_json_str("{ not json"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_scale_range_contains() {
        let range = ScaleRange::new(0.2, 0.4);
        assert!(range.contains(0.2));
        assert!(!range.contains(0.4));
        assert!(!ScaleRange::new(0.5, 0.1).is_valid());
    }
}
