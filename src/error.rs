//! Error types for conifer.
//!
//! Configuration problems are reported once, at startup. The per-frame path
//! never fails; GPU and windowing errors only exist in the viewer.

use thiserror::Error;

/// Errors found while building or loading a [`SceneConfig`](crate::SceneConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A population has no colors to draw from.
    #[error("population `{population}` has an empty color palette")]
    EmptyPalette { population: String },

    /// A population's scale range contains no values.
    #[error("population `{population}` has an empty scale range {min}..{max}")]
    EmptyScaleRange {
        population: String,
        min: f32,
        max: f32,
    },

    /// A geometric constant or rate is zero, negative, or not finite.
    #[error("`{field}` must be a positive finite number, got {value}")]
    NotPositive { field: &'static str, value: f32 },

    /// A constant that may be zero or negative is not finite.
    #[error("`{field}` must be a finite number, got {value}")]
    NotFinite { field: &'static str, value: f32 },

    /// A width or offset that must not be negative.
    #[error("`{field}` must not be negative, got {value}")]
    Negative { field: &'static str, value: f32 },

    /// A per-frame smoothing factor outside (0, 1].
    #[error("`{field}` smoothing factor must be in (0, 1], got {value}")]
    SmoothingFactor { field: &'static str, value: f32 },

    /// Failed to read a config file from disk.
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    /// Config file is not valid JSON for a scene.
    #[error("failed to parse config file: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Errors that can occur during GPU initialization.
#[derive(Debug, Error)]
pub enum GpuError {
    /// Failed to create a surface for rendering.
    #[error("failed to create GPU surface: {0}")]
    SurfaceCreation(#[from] wgpu::CreateSurfaceError),

    /// No compatible GPU adapter found.
    #[error("no compatible GPU adapter found: {0}")]
    NoAdapter(#[from] wgpu::RequestAdapterError),

    /// Failed to create GPU device.
    #[error("failed to create GPU device: {0}")]
    DeviceCreation(#[from] wgpu::RequestDeviceError),
}

/// Errors that can occur when running the viewer.
#[derive(Debug, Error)]
pub enum ViewerError {
    /// Failed to create event loop.
    #[error("failed to create event loop: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),

    /// Failed to create window.
    #[error("failed to create window: {0}")]
    Window(#[from] winit::error::OsError),

    /// GPU initialization failed.
    #[error("GPU error: {0}")]
    Gpu(#[from] GpuError),

    /// Scene configuration was rejected.
    #[error("invalid scene configuration: {0}")]
    Config(#[from] ConfigError),
}
