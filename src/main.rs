use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use conifer::{RecordingSurface, Scene, SceneConfig, Time, TransitionState};

/// Particle tree that assembles and scatters.
#[derive(Parser, Debug)]
#[command(name = "conifer", version, about)]
struct Args {
    /// JSON scene config; missing fields keep their defaults.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// RNG seed, overrides the config.
    #[arg(short, long)]
    seed: Option<u64>,

    /// Run without a window against an in-memory surface.
    #[arg(long)]
    headless: bool,

    /// Frames to run in headless mode.
    #[arg(long, default_value_t = 600)]
    frames: u64,

    /// Fixed frame time in seconds for headless mode.
    #[arg(long, default_value_t = 1.0 / 60.0)]
    dt: f32,

    /// Start scattered instead of assembled.
    #[arg(long)]
    scattered: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("conifer=info")),
        )
        .init();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => SceneConfig::from_json_file(path)
            .with_context(|| format!("loading {}", path.display()))?,
        None => SceneConfig::default(),
    };
    if let Some(seed) = args.seed {
        config = config.with_seed(seed);
    }

    let state = TransitionState::new();
    if args.scattered {
        state.toggle();
    }
    let scene = Scene::new(config, state).context("building scene")?;

    if args.headless {
        run_headless(scene, args.frames, args.dt);
        Ok(())
    } else {
        conifer::window::run(scene).context("running viewer")
    }
}

fn run_headless(mut scene: Scene, frames: u64, dt: f32) {
    let mut time = Time::fixed(dt);
    let mut surface = RecordingSurface::new();

    for _ in 0..frames {
        time.update();
        scene.frame(&time, 1.0, &mut surface);
    }

    info!(
        frames = surface.frames,
        elapsed = time.elapsed(),
        mode = %scene.state().mode(),
        foliage = scene.foliage().progress().value(),
        smoothing = ?scene.foliage().progress().smoothing(),
        topper_y = scene.topper().y(),
        "headless run finished"
    );
    for field in scene.ornaments() {
        info!(
            population = field.name(),
            progress = field.progress().value(),
            "population"
        );
    }
}
