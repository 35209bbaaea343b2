//! # Conifer
//!
//! An interactive particle scene that morphs between a scattered cloud and a
//! cone-shaped tree.
//!
//! Every element has two precomputed homes: a random point inside a sphere and
//! a point on the tree. A single shared [`TransitionMode`] says which home is
//! the target; each component chases it with its own smoothed progress scalar
//! and hands packed buffers to a [`DisplaySurface`] every frame.
//!
//! ## Quick Start
//!
//! ```ignore
//! use conifer::prelude::*;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let state = TransitionState::new();
//!     let scene = Scene::new(SceneConfig::default().with_seed(7), state)?;
//!     conifer::window::run(scene)?;
//!     Ok(())
//! }
//! ```
//!
//! ## Components
//!
//! | Component | What moves | Smoothing |
//! |-----------|------------|-----------|
//! | [`FoliageField`] | ~12,000 glowing points on a thick conical shell | per-frame lerp (configurable) |
//! | [`OrnamentField`] | instanced baubles, gifts and lights | exponential damping |
//! | [`Topper`] | one star above the apex | separate damping for height and scale |
//!
//! ## Headless use
//!
//! Nothing outside [`gpu`] and [`window`] touches the GPU. Drive the scene
//! with a fixed-step [`Time`] and a [`RecordingSurface`] to inspect exactly
//! what would be drawn:
//!
//! ```ignore
//! let mut time = Time::fixed(1.0 / 60.0);
//! let mut surface = RecordingSurface::new();
//! for _ in 0..600 {
//!     time.update();
//!     scene.frame(&time, 1.0, &mut surface);
//! }
//! assert_eq!(surface.points.len(), scene.foliage().len());
//! ```

pub mod config;
pub mod easing;
pub mod error;
pub mod foliage;
pub mod geometry;
pub mod gpu;
pub mod ornaments;
pub mod palette;
pub mod scene;
pub mod spawn;
pub mod state;
pub mod surface;
pub mod time;
pub mod topper;
pub mod window;

pub use bytemuck;
pub use config::{FoliageConfig, PopulationConfig, ScaleRange, SceneConfig, TopperConfig};
pub use easing::{Progress, Smoothing};
pub use error::{ConfigError, GpuError, ViewerError};
pub use foliage::{FoliageField, PointVertex};
pub use glam::{Mat4, Vec2, Vec3, Vec4};
pub use ornaments::{InstanceColor, InstanceTransform, OrnamentField, OrnamentShape};
pub use palette::NamedColor;
pub use scene::Scene;
pub use spawn::SpawnContext;
pub use state::{TransitionMode, TransitionState};
pub use surface::{DisplaySurface, RecordingSurface};
pub use time::{FrameContext, Time};
pub use topper::Topper;

/// Convenient re-exports for common usage.
///
/// ```ignore
/// use conifer::prelude::*;
/// ```
pub mod prelude {
    pub use crate::config::{PopulationConfig, ScaleRange, SceneConfig};
    pub use crate::easing::Smoothing;
    pub use crate::ornaments::OrnamentShape;
    pub use crate::palette::NamedColor;
    pub use crate::scene::Scene;
    pub use crate::state::{TransitionMode, TransitionState};
    pub use crate::surface::{DisplaySurface, RecordingSurface};
    pub use crate::time::Time;
    pub use crate::{Vec2, Vec3, Vec4};
}
