//! WGSL shader sources embedded at compile time.

/// Container for all shader source code.
pub struct Shaders;

impl Shaders {
    /// Equirectangular-to-cubemap resampling kernel.
    pub const EQUIRECT_TO_CUBE: &'static str = include_str!("equirect_to_cube.wgsl");
}
