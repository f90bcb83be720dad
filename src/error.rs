//! Host-side error types
//!
//! Simulations never fail; these cover surface/device setup and tuning files.

use thiserror::Error;

/// Errors raised while wiring simulations to a browser or GPU
#[derive(Debug, Error)]
pub enum Error {
    /// The canvas or 2D context could not be obtained
    #[error("drawing surface `{0}` is not available")]
    SurfaceUnavailable(String),

    /// Creating the wgpu surface for a canvas failed
    #[error("failed to create GPU surface: {0}")]
    CreateSurface(#[from] wgpu::CreateSurfaceError),

    /// No compatible GPU adapter
    #[error("no suitable GPU adapter: {0}")]
    RequestAdapter(#[from] wgpu::RequestAdapterError),

    /// Device request rejected
    #[error("failed to create GPU device: {0}")]
    RequestDevice(#[from] wgpu::RequestDeviceError),

    /// Surface reported no usable texture format
    #[error("surface exposes no supported texture format")]
    NoSurfaceFormat,

    /// Tuning or settings JSON was malformed
    #[error("invalid tuning data: {0}")]
    Tuning(#[from] serde_json::Error),

    /// Reading a tuning file on native failed
    #[error("failed to read tuning file: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
