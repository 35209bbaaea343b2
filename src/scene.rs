//! The animated scene: foliage, ornament populations and the topper.
//!
//! [`Scene`] owns every component and drives them from one frame loop. The
//! transition mode is read once per frame and handed to each component
//! through the [`FrameContext`], so all of them chase the same target within
//! a frame.
//!
//! ```ignore
//! let state = TransitionState::new();
//! let mut scene = Scene::new(SceneConfig::default().with_seed(7), state.clone())?;
//! let mut time = Time::fixed(1.0 / 60.0);
//! let mut surface = RecordingSurface::new();
//!
//! time.update();
//! scene.frame(&time, 1.0, &mut surface);
//! state.toggle(); // picked up on the next frame
//! ```

use crate::config::SceneConfig;
use crate::error::ConfigError;
use crate::foliage::FoliageField;
use crate::ornaments::OrnamentField;
use crate::spawn::{derive_seed, resolve_seed};
use crate::state::TransitionState;
use crate::surface::DisplaySurface;
use crate::time::{FrameContext, Time};
use crate::topper::Topper;
use tracing::{info, trace};

/// Sub-seed stream of the foliage field. Population `i` uses `1 + i`.
const FOLIAGE_STREAM: u64 = 0;

pub struct Scene {
    config: SceneConfig,
    seed: u64,
    state: TransitionState,
    foliage: FoliageField,
    ornaments: Vec<OrnamentField>,
    topper: Topper,
}

impl Scene {
    /// Validate `config` and generate every component once.
    pub fn new(config: SceneConfig, state: TransitionState) -> Result<Self, ConfigError> {
        config.validate()?;
        let seed = resolve_seed(config.seed);

        let foliage = FoliageField::new(&config, derive_seed(seed, FOLIAGE_STREAM));
        let ornaments: Vec<OrnamentField> = config
            .populations
            .iter()
            .enumerate()
            .map(|(i, population)| {
                OrnamentField::new(population, &config, derive_seed(seed, 1 + i as u64))
            })
            .collect();
        let topper = Topper::new(&config);

        info!(
            seed,
            points = foliage.len(),
            populations = ornaments.len(),
            ornaments = ornaments.iter().map(OrnamentField::len).sum::<usize>(),
            mode = %state.mode(),
            "scene built"
        );

        Ok(Self {
            config,
            seed,
            state,
            foliage,
            ornaments,
            topper,
        })
    }

    /// Advance every component by one frame.
    pub fn update(&mut self, frame: &FrameContext) {
        self.foliage.update(frame);
        for field in &mut self.ornaments {
            field.update(frame);
        }
        self.topper.update(frame);
    }

    /// Run one frame against `surface`.
    ///
    /// Returns `false` and leaves the scene untouched when the surface is not
    /// ready. While `time` is paused nothing advances; the current buffers
    /// are still republished.
    pub fn frame<S: DisplaySurface + ?Sized>(
        &mut self,
        time: &Time,
        pixel_ratio: f32,
        surface: &mut S,
    ) -> bool {
        if !surface.is_ready() {
            trace!(frame = time.frame(), "surface not ready, frame skipped");
            return false;
        }

        if !time.is_paused() {
            let frame = time.frame_context(self.state.mode(), pixel_ratio);
            self.update(&frame);
        }
        self.publish(surface);
        true
    }

    /// Hand the current buffers to `surface`.
    ///
    /// Colors go out once per population, transforms only when rewritten.
    pub fn publish<S: DisplaySurface + ?Sized>(&mut self, surface: &mut S) {
        surface.write_points(self.foliage.vertices());
        for (i, field) in self.ornaments.iter_mut().enumerate() {
            if let Some(colors) = field.take_pending_colors() {
                surface.write_instance_colors(i, colors);
            }
            if let Some(transforms) = field.take_dirty_transforms() {
                surface.write_instance_transforms(i, transforms);
            }
        }
        surface.write_topper(self.topper.transform(), self.topper.color());
    }

    /// Handle for reading or toggling the mode.
    pub fn state(&self) -> &TransitionState {
        &self.state
    }

    /// The seed actually used, after clock fallback.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    pub fn foliage(&self) -> &FoliageField {
        &self.foliage
    }

    pub fn ornaments(&self) -> &[OrnamentField] {
        &self.ornaments
    }

    pub fn topper(&self) -> &Topper {
        &self.topper
    }
}
