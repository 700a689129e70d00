//! Core data types shared between the CLI and the GPU pipeline.

use serde::{Deserialize, Serialize};

/// One face of a cubemap.
///
/// The discriminants are the kernel's array-layer indices; the order is part
/// of the output contract and must not change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CubeFace {
    /// Layer 0, principal axis (-1, 0, 0)
    NegX = 0,
    /// Layer 1, principal axis (1, 0, 0)
    PosX = 1,
    /// Layer 2, principal axis (0, -1, 0)
    NegY = 2,
    /// Layer 3, principal axis (0, 1, 0)
    PosY = 3,
    /// Layer 4, principal axis (0, 0, -1)
    NegZ = 4,
    /// Layer 5, principal axis (0, 0, 1)
    PosZ = 5,
}

impl CubeFace {
    /// All six faces in layer order.
    pub const ALL: [CubeFace; 6] = [
        CubeFace::NegX,
        CubeFace::PosX,
        CubeFace::NegY,
        CubeFace::PosY,
        CubeFace::NegZ,
        CubeFace::PosZ,
    ];

    /// Array-layer index of this face in the destination cube texture.
    pub fn index(self) -> u32 {
        self as u32
    }

    /// Filename suffix appended to the output stem for this face.
    pub fn suffix(self) -> &'static str {
        match self {
            CubeFace::NegX => "neg_x",
            CubeFace::PosX => "pos_x",
            CubeFace::NegY => "neg_y",
            CubeFace::PosY => "pos_y",
            CubeFace::NegZ => "neg_z",
            CubeFace::PosZ => "pos_z",
        }
    }
}

/// Sampling mode for the resampling kernel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SampleMode {
    /// Average all channels identically.
    #[default]
    Color,

    /// Renormalize averaged direction vectors for normal maps.
    /// Declared in the interface but not implemented; selecting it is an
    /// error before any GPU work is issued.
    NormalMap,
}

/// Options for a single cubemap render.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Edge size of each output face in pixels (1..=16384).
    pub cubemap_size: u32,

    /// Sampling mode.
    pub mode: SampleMode,

    /// Requested multisample level. Negative values request automatic
    /// derivation from the source/target texel density ratio.
    pub multisample: i32,
}

/// A finished cube face read back from the GPU.
#[derive(Debug, Clone)]
pub struct FaceImage {
    /// Edge size in pixels (faces are square).
    pub size: u32,

    /// Tightly packed RGBA8 pixel data, `size * size * 4` bytes.
    pub data: Vec<u8>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_face_indices_are_layer_order() {
        for (i, face) in CubeFace::ALL.iter().enumerate() {
            assert_eq!(face.index(), i as u32);
        }
    }

    #[test]
    fn test_face_suffixes() {
        let suffixes: Vec<&str> = CubeFace::ALL.iter().map(|f| f.suffix()).collect();
        assert_eq!(
            suffixes,
            vec!["neg_x", "pos_x", "neg_y", "pos_y", "neg_z", "pos_z"]
        );
    }

    #[test]
    fn test_sample_mode_default() {
        assert_eq!(SampleMode::default(), SampleMode::Color);
    }
}
