//! GPU buffer management for the source panorama and the destination cubemap.

use bytemuck::{Pod, Zeroable};
use std::sync::Arc;
use wgpu::{self, util::DeviceExt};

use super::context::GpuError;
use crate::decoders::DecodedImage;
use crate::models::{CubeFace, FaceImage};

/// Read-only storage buffer holding the packed RGBA8 source panorama.
///
/// The kernel indexes it as `array<u32>`, one u32 per texel, and unpacks
/// with `unpack4x8unorm`.
pub struct EquirecBuffer {
    pub(crate) buffer: wgpu::Buffer,
    pub width: u32,
    pub height: u32,
}

impl EquirecBuffer {
    /// Upload the decoded source image.
    pub fn upload(device: &wgpu::Device, image: &DecodedImage) -> Result<Self, GpuError> {
        let expected_size = (image.width as usize) * (image.height as usize) * 4;
        if image.data.len() != expected_size {
            return Err(GpuError::BufferError(format!(
                "Source size mismatch: expected {} bytes, got {}",
                expected_size,
                image.data.len()
            )));
        }

        let buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("equirec_source"),
            contents: &image.data,
            usage: wgpu::BufferUsages::STORAGE,
        });

        Ok(Self {
            buffer,
            width: image.width,
            height: image.height,
        })
    }
}

/// Destination cube texture: six square rgba8 layers, written by the kernel
/// and read back one face at a time.
pub struct CubemapTexture {
    texture: wgpu::Texture,
    view: wgpu::TextureView,
    pub size: u32,
    device: Arc<wgpu::Device>,
    queue: Arc<wgpu::Queue>,
}

impl CubemapTexture {
    /// Create the destination texture for the given face edge size.
    pub fn new(device: Arc<wgpu::Device>, queue: Arc<wgpu::Queue>, size: u32) -> Self {
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("cubemap_target"),
            size: wgpu::Extent3d {
                width: size,
                height: size,
                depth_or_array_layers: 6,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Rgba8Unorm,
            usage: wgpu::TextureUsages::STORAGE_BINDING | wgpu::TextureUsages::COPY_SRC,
            view_formats: &[],
        });

        let view = texture.create_view(&wgpu::TextureViewDescriptor {
            label: Some("cubemap_target_view"),
            dimension: Some(wgpu::TextureViewDimension::D2Array),
            ..Default::default()
        });

        Self {
            texture,
            view,
            size,
            device,
            queue,
        }
    }

    /// View bound as the kernel's write-only destination.
    pub fn view(&self) -> &wgpu::TextureView {
        &self.view
    }

    /// Read one face back into a tight host-side RGBA8 buffer.
    ///
    /// Copy rows must be padded to wgpu's row alignment; the padding is
    /// stripped after mapping.
    pub fn read_face(&self, face: CubeFace) -> Result<FaceImage, GpuError> {
        let tight_bpr = (self.size as usize) * 4;
        let padded_bpr = align_bytes_per_row(tight_bpr);
        let buffer_size = (padded_bpr * self.size as usize) as u64;

        let staging = self.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("face_readback_staging"),
            size: buffer_size,
            usage: wgpu::BufferUsages::MAP_READ | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("face_readback_encoder"),
            });

        encoder.copy_texture_to_buffer(
            wgpu::ImageCopyTexture {
                texture: &self.texture,
                mip_level: 0,
                origin: wgpu::Origin3d {
                    x: 0,
                    y: 0,
                    z: face.index(),
                },
                aspect: wgpu::TextureAspect::All,
            },
            wgpu::ImageCopyBuffer {
                buffer: &staging,
                layout: wgpu::ImageDataLayout {
                    offset: 0,
                    bytes_per_row: Some(padded_bpr as u32),
                    rows_per_image: Some(self.size),
                },
            },
            wgpu::Extent3d {
                width: self.size,
                height: self.size,
                depth_or_array_layers: 1,
            },
        );

        self.queue.submit(std::iter::once(encoder.finish()));

        // Map the staging buffer and read data
        let buffer_slice = staging.slice(..);
        let (tx, rx) = std::sync::mpsc::channel();

        buffer_slice.map_async(wgpu::MapMode::Read, move |result| {
            let _ = tx.send(result);
        });

        self.device.poll(wgpu::Maintain::Wait);

        rx.recv()
            .map_err(|e| GpuError::BufferError(e.to_string()))?
            .map_err(|e| GpuError::BufferError(e.to_string()))?;

        let data = buffer_slice.get_mapped_range();
        let mut tight = vec![0u8; tight_bpr * self.size as usize];
        for row in 0..self.size as usize {
            let src_offset = row * padded_bpr;
            let dst_offset = row * tight_bpr;
            tight[dst_offset..dst_offset + tight_bpr]
                .copy_from_slice(&data[src_offset..src_offset + tight_bpr]);
        }

        drop(data);
        staging.unmap();

        Ok(FaceImage {
            size: self.size,
            data: tight,
        })
    }
}

/// Align a row length to wgpu's copy row alignment (256 bytes).
fn align_bytes_per_row(value: usize) -> usize {
    let align = wgpu::COPY_BYTES_PER_ROW_ALIGNMENT as usize;
    value.div_ceil(align) * align
}

// Parameter structures for uniform buffers
// These must match the WGSL struct layouts exactly

/// Per-batch parameters for the resample kernel.
#[repr(C)]
#[derive(Clone, Copy, Pod, Zeroable)]
pub struct BatchParams {
    /// Invocation origin: x, y texel offset and the face layer in z
    pub origin: [u32; 3],
    pub _pad0: u32,
    /// Source panorama dimensions in texels
    pub equirec_size: [u32; 2],
    pub _pad1: [u32; 2],
}

/// Create a uniform buffer from parameter data.
pub fn create_uniform_buffer<T: Pod>(device: &wgpu::Device, data: &T, label: &str) -> wgpu::Buffer {
    device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
        label: Some(label),
        contents: bytemuck::bytes_of(data),
        usage: wgpu::BufferUsages::UNIFORM,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_align_bytes_per_row() {
        assert_eq!(align_bytes_per_row(1), 256);
        assert_eq!(align_bytes_per_row(256), 256);
        assert_eq!(align_bytes_per_row(257), 512);
        // 513 texels -> 2052 tight bytes -> padded to the next 256 boundary
        assert_eq!(align_bytes_per_row(513 * 4), 2304);
    }

    #[test]
    fn test_batch_params_layout() {
        // WGSL uniform layout: vec3<u32> (16-byte slot) + vec2<u32> + padding
        assert_eq!(std::mem::size_of::<BatchParams>(), 32);
    }
}
