//! Cubemapper Core Library
//!
//! Core functionality for converting an equirectangular panorama into the
//! six faces of a cubemap with a GPU compute kernel.

pub mod config;
pub mod decoders;
pub mod exporters;
pub mod gpu;
pub mod models;
pub mod projection;

// Re-export commonly used types
pub use models::{CubeFace, FaceImage, RenderOptions, SampleMode};

// Re-export the GPU entry points
pub use gpu::{gpu_info, is_gpu_available, render_cubemap, resolve_multisample_level, GpuContext};
