use thiserror::Error;

use super::Backend;

/// Compute backend errors
#[derive(Debug, Error)]
pub enum ComputeError {
    #[error("no suitable GPU adapter found: {0}")]
    NoAdapter(#[from] wgpu::RequestAdapterError),

    #[error("adapter {0:?} does not support compute shaders")]
    ComputeUnsupported(String),

    #[error("failed to create GPU device: {0}")]
    RequestDevice(#[from] wgpu::RequestDeviceError),

    #[error("device poll failed: {0}")]
    Poll(#[from] wgpu::PollError),

    #[error("failed to map readback buffer: {0}")]
    BufferMap(#[from] wgpu::BufferAsyncError),

    #[error("readback callback was dropped before it ran")]
    MapCallbackDropped,

    #[error("input has {actual} elements, kernel expects {expected}")]
    ShapeMismatch { expected: usize, actual: usize },

    #[error("output {width}x{height} needs more workgroups than the device allows ({limit} per dimension)")]
    DispatchTooLarge { width: u32, height: u32, limit: u32 },

    #[error("{0} backend is not available")]
    Unavailable(Backend),
}
