//! Error type for starting and running the demo

use thiserror::Error;

use crate::config::ConfigError;

#[derive(Debug, Error)]
pub enum LeafFallError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("event loop failed: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),
    #[error("could not create window: {0}")]
    Window(#[from] winit::error::OsError),
    #[error("could not create surface: {0}")]
    Surface(#[from] wgpu::CreateSurfaceError),
    #[error("no suitable GPU adapter: {0}")]
    Adapter(#[from] wgpu::RequestAdapterError),
    #[error("could not open GPU device: {0}")]
    Device(#[from] wgpu::RequestDeviceError),
    #[error("surface reports no supported texture formats")]
    NoSurfaceFormat,
    #[error("GPU ran out of memory while presenting")]
    OutOfMemory,
}

pub type Result<T> = std::result::Result<T, LeafFallError>;
