//! GPU pipeline orchestration for the cubemap render.

mod plan;
mod render;

// Re-export public API
pub use plan::{auto_multisample_level, plan_batches, resolve_multisample_level, DispatchBatch};
pub use render::render_cubemap;

/// Workgroup edge for the resample kernel (8x8 texel tiles)
pub(crate) const TILE_SIZE: u32 = 8;

/// Workgroup rows issued per dispatch batch
pub(crate) const GROUPS_PER_BATCH: u32 = 8;

/// Texel rows covered by one dispatch batch
pub(crate) const ROWS_PER_BATCH: u32 = TILE_SIZE * GROUPS_PER_BATCH;
