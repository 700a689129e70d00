//! GPU execution module for the cubemap resampling kernel.
//!
//! Built on wgpu (WebGPU): Metal on macOS, Vulkan on Linux/Windows, DX12 on
//! Windows. The kernel does its per-texel math in 64-bit floats, so a device
//! exposing `SHADER_F64` is required; `is_gpu_available()` reflects that.

mod buffers;
mod context;
mod pipeline;
mod shaders;

pub use buffers::{CubemapTexture, EquirecBuffer};
pub use context::{GpuContext, GpuError};
pub use pipeline::{
    auto_multisample_level, plan_batches, render_cubemap, resolve_multisample_level, DispatchBatch,
};

/// Check if a suitable GPU is available on this system.
pub fn is_gpu_available() -> bool {
    GpuContext::is_available()
}

/// Get information about the available GPU device.
pub fn gpu_info() -> Option<String> {
    GpuContext::device_info()
}
