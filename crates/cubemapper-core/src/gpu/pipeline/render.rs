//! Dispatch loop: specialize the kernel, run every (face, batch) pair, and
//! read each finished face back for the sink.

use super::plan::{plan_batches, resolve_multisample_level, DispatchBatch};
use super::TILE_SIZE;
use crate::decoders::DecodedImage;
use crate::gpu::buffers::{create_uniform_buffer, BatchParams, CubemapTexture, EquirecBuffer};
use crate::gpu::context::GpuContext;
use crate::models::{CubeFace, FaceImage, RenderOptions, SampleMode};
use crate::verbose_println;

/// Render the six cube faces of `source` and hand each finished face to
/// `sink` in layer order.
///
/// Each face is delivered only after all of its batches completed and its
/// readback succeeded, so a failing run never leaves the sink with a
/// partially computed face.
pub fn render_cubemap(
    ctx: &GpuContext,
    source: &DecodedImage,
    options: &RenderOptions,
    mut sink: impl FnMut(CubeFace, FaceImage) -> Result<(), String>,
) -> Result<(), String> {
    // Unsupported modes abort before any GPU work
    ensure_mode_supported(options.mode)?;

    let level = resolve_multisample_level(
        options.multisample,
        source.width,
        source.height,
        options.cubemap_size,
    );

    let pipeline = ctx
        .pipelines
        .resample_for_level(&ctx.device, level)
        .map_err(|e| e.to_string())?;

    let equirec = EquirecBuffer::upload(&ctx.device, source).map_err(|e| e.to_string())?;
    let cubemap = CubemapTexture::new(ctx.device.clone(), ctx.queue.clone(), options.cubemap_size);

    let batches = plan_batches(options.cubemap_size);
    let per_face = batches.len() / 6;

    for face in CubeFace::ALL {
        for (i, batch) in batches.iter().filter(|b| b.face == face).enumerate() {
            dispatch_batch(ctx, &pipeline, &equirec, &cubemap, batch);
            verbose_println!(
                "[cubemapper] face {} batch {}/{}",
                face.suffix(),
                i + 1,
                per_face
            );
        }

        let image = cubemap.read_face(face).map_err(|e| e.to_string())?;
        sink(face, image)?;
    }

    Ok(())
}

/// Reject modes the kernel does not implement. The check runs before any
/// upload or dispatch; there is no silent fallback to color mode.
fn ensure_mode_supported(mode: SampleMode) -> Result<(), String> {
    match mode {
        SampleMode::Color => Ok(()),
        SampleMode::NormalMap => Err("normal map mode is not implemented".to_string()),
    }
}

/// Record and submit one batch, waiting for completion before returning.
fn dispatch_batch(
    ctx: &GpuContext,
    pipeline: &wgpu::ComputePipeline,
    equirec: &EquirecBuffer,
    cubemap: &CubemapTexture,
    batch: &DispatchBatch,
) {
    let params = BatchParams {
        origin: [0, batch.origin_y, batch.face.index()],
        _pad0: 0,
        equirec_size: [equirec.width, equirec.height],
        _pad1: [0, 0],
    };
    let uniform_buffer = create_uniform_buffer(&ctx.device, &params, "batch_params");

    let bind_group = ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some("resample_bind_group"),
        layout: &ctx.pipelines.resample_layout,
        entries: &[
            wgpu::BindGroupEntry {
                binding: 0,
                resource: equirec.buffer.as_entire_binding(),
            },
            wgpu::BindGroupEntry {
                binding: 1,
                resource: wgpu::BindingResource::TextureView(cubemap.view()),
            },
            wgpu::BindGroupEntry {
                binding: 2,
                resource: uniform_buffer.as_entire_binding(),
            },
        ],
    });

    let mut encoder = ctx
        .device
        .create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("resample_encoder"),
        });

    {
        let mut pass = encoder.begin_compute_pass(&wgpu::ComputePassDescriptor {
            label: Some("resample_pass"),
            timestamp_writes: None,
        });

        pass.set_pipeline(pipeline);
        pass.set_bind_group(0, &bind_group, &[]);
        pass.dispatch_workgroups(
            cubemap.size.div_ceil(TILE_SIZE),
            batch.rows.div_ceil(TILE_SIZE),
            1,
        );
    }

    ctx.submit_and_wait(encoder);
}
