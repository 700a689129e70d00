//! Compute pipeline creation and per-level specialization cache.
//!
//! The multisample level is a WGSL `override` constant, so each distinct
//! level gets its own specialized pipeline. The shader module and layouts
//! are created once; pipelines are built on first use per level and cached.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use super::GpuError;
use crate::gpu::shaders::Shaders;

/// Shader module, bind group layout, and the specialized pipeline cache.
pub struct GpuPipelines {
    module: wgpu::ShaderModule,
    pipeline_layout: wgpu::PipelineLayout,
    /// Layout for the resample pass: source buffer + cube texture + batch uniform
    pub resample_layout: wgpu::BindGroupLayout,
    by_level: Mutex<HashMap<u32, Arc<wgpu::ComputePipeline>>>,
}

/// Create the shader module and layouts.
pub fn create_pipelines(device: &wgpu::Device) -> Result<GpuPipelines, GpuError> {
    let module = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some("equirect_to_cube"),
        source: wgpu::ShaderSource::Wgsl(Shaders::EQUIRECT_TO_CUBE.into()),
    });

    let resample_layout = create_resample_layout(device);

    let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some("resample_pipeline_layout"),
        bind_group_layouts: &[&resample_layout],
        push_constant_ranges: &[],
    });

    Ok(GpuPipelines {
        module,
        pipeline_layout,
        resample_layout,
        by_level: Mutex::new(HashMap::new()),
    })
}

impl GpuPipelines {
    /// Get the resample pipeline specialized for the given multisample level,
    /// creating and caching it on first use.
    pub fn resample_for_level(
        &self,
        device: &wgpu::Device,
        level: u32,
    ) -> Result<Arc<wgpu::ComputePipeline>, GpuError> {
        let mut cache = self
            .by_level
            .lock()
            .map_err(|e| GpuError::PipelineError(e.to_string()))?;

        if let Some(pipeline) = cache.get(&level) {
            return Ok(pipeline.clone());
        }

        let constants = HashMap::from([("multisample_level".to_string(), level as f64)]);
        let pipeline = device.create_compute_pipeline(&wgpu::ComputePipelineDescriptor {
            label: Some("resample_face"),
            layout: Some(&self.pipeline_layout),
            module: &self.module,
            entry_point: Some("resample_face"),
            compilation_options: wgpu::PipelineCompilationOptions {
                constants: &constants,
                ..Default::default()
            },
            cache: None,
        });

        let pipeline = Arc::new(pipeline);
        cache.insert(level, pipeline.clone());
        Ok(pipeline)
    }
}

/// Create the resample bind group layout.
fn create_resample_layout(device: &wgpu::Device) -> wgpu::BindGroupLayout {
    device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some("resample_layout"),
        entries: &[
            // Equirectangular source (read-only packed RGBA8)
            wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::COMPUTE,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Storage { read_only: true },
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            },
            // Destination cube texture (write-only)
            wgpu::BindGroupLayoutEntry {
                binding: 1,
                visibility: wgpu::ShaderStages::COMPUTE,
                ty: wgpu::BindingType::StorageTexture {
                    access: wgpu::StorageTextureAccess::WriteOnly,
                    format: wgpu::TextureFormat::Rgba8Unorm,
                    view_dimension: wgpu::TextureViewDimension::D2Array,
                },
                count: None,
            },
            // Batch parameters (uniform)
            wgpu::BindGroupLayoutEntry {
                binding: 2,
                visibility: wgpu::ShaderStages::COMPUTE,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            },
        ],
    })
}
