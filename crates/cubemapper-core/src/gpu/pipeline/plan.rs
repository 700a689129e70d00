//! Multisample level derivation and face/batch partitioning.

use super::ROWS_PER_BATCH;
use crate::models::CubeFace;

/// A rectangular band of one cube face: full width, `rows` texel rows
/// starting at `origin_y`. Each output texel is independent, so ordering
/// carries no correctness weight; batches exist for progress reporting and
/// driver responsiveness.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DispatchBatch {
    pub face: CubeFace,
    pub origin_y: u32,
    pub rows: u32,
}

/// Derive the multisample level from the source/target texel density ratio.
///
/// The source's face-equivalent size is `max(W/4, H/2)` (a 2:1 panorama maps
/// a quarter of its width onto each horizontal face); the level is
/// `ceil((face_size / dest_size) / 2)`, floored at 0.
pub fn auto_multisample_level(src_width: u32, src_height: u32, dest_size: u32) -> u32 {
    let face_size = (src_width as f64 / 4.0).max(src_height as f64 / 2.0);
    let scale_factor = face_size / dest_size as f64;
    (scale_factor / 2.0).ceil().max(0.0) as u32
}

/// Resolve the requested multisample level: negative requests auto-derivation,
/// anything else is used as-is.
pub fn resolve_multisample_level(
    requested: i32,
    src_width: u32,
    src_height: u32,
    dest_size: u32,
) -> u32 {
    if requested < 0 {
        auto_multisample_level(src_width, src_height, dest_size)
    } else {
        requested as u32
    }
}

/// Partition the six faces of an `size`-edged cubemap into dispatch batches,
/// face-major.
pub fn plan_batches(size: u32) -> Vec<DispatchBatch> {
    let mut batches = Vec::new();
    for face in CubeFace::ALL {
        let mut origin_y = 0;
        while origin_y < size {
            let rows = ROWS_PER_BATCH.min(size - origin_y);
            batches.push(DispatchBatch {
                face,
                origin_y,
                rows,
            });
            origin_y += rows;
        }
    }
    batches
}
