use std::path::PathBuf;
use thiserror::Error;

/// Construction invariants of widgets and scene bodies. Checked once at startup, never per frame.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LayoutError {
    #[error("rectangle has no area ({width} x {height})")]
    DegenerateRect { width: f32, height: f32 },
    #[error("slider track ({track_width}) must be wider than its handle ({handle_width})")]
    TrackNarrowerThanHandle { track_width: f32, handle_width: f32 },
    #[error("value range [{min}, {max}] is empty or inverted")]
    EmptyRange { min: f32, max: f32 },
    #[error("orbit period must be finite and positive, got {period}")]
    InvalidPeriod { period: f32 },
}

#[derive(Error, Debug)]
pub enum AssetError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("{path}:{line}: {message}")]
    Parse { path: PathBuf, line: usize, message: String },
    #[error("{0} contains no drawable geometry")]
    Empty(PathBuf),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Anything that stops the scene from starting. There is no recovery; `main` exits non-zero.
#[derive(Error, Debug)]
pub enum StartupError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("failed to load map model: {0}")]
    Asset(#[from] AssetError),
    #[error("invalid settings panel layout: {0}")]
    Layout(#[from] LayoutError),
    #[error("event loop: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),
    #[error("window creation: {0}")]
    Window(#[from] winit::error::OsError),
    #[error("surface creation: {0}")]
    Surface(#[from] wgpu::CreateSurfaceError),
    #[error("no suitable GPU adapter: {0}")]
    Adapter(#[from] wgpu::RequestAdapterError),
    #[error("GPU device request failed: {0}")]
    Device(#[from] wgpu::RequestDeviceError),
}
