//! Device and adapter initialization for GPU context.

use super::GpuError;

/// Features the resampling kernel cannot run without. The per-texel math is
/// done in f64, which wgpu gates behind SHADER_F64.
const REQUIRED_FEATURES: wgpu::Features = wgpu::Features::SHADER_F64;

async fn request_adapter(instance: &wgpu::Instance) -> Option<wgpu::Adapter> {
    instance
        .request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::HighPerformance,
            compatible_surface: None,
            force_fallback_adapter: false,
        })
        .await
}

/// Check if a usable GPU is available without fully initializing.
pub fn is_available() -> bool {
    let instance = wgpu::Instance::new(wgpu::InstanceDescriptor {
        backends: wgpu::Backends::all(),
        ..Default::default()
    });

    pollster::block_on(async {
        match request_adapter(&instance).await {
            Some(adapter) => adapter.features().contains(REQUIRED_FEATURES),
            None => false,
        }
    })
}

/// Get information about the available GPU device.
pub fn device_info() -> Option<String> {
    let instance = wgpu::Instance::new(wgpu::InstanceDescriptor {
        backends: wgpu::Backends::all(),
        ..Default::default()
    });

    pollster::block_on(async {
        request_adapter(&instance).await.map(|adapter| {
            let info = adapter.get_info();
            format!("{} ({:?}, {:?})", info.name, info.device_type, info.backend)
        })
    })
}

/// Initialize the wgpu device and queue.
///
/// Returns the device, queue, and adapter info.
pub async fn initialize_device() -> Result<(wgpu::Device, wgpu::Queue, wgpu::AdapterInfo), GpuError>
{
    let instance = wgpu::Instance::new(wgpu::InstanceDescriptor {
        backends: wgpu::Backends::all(),
        ..Default::default()
    });

    let adapter = request_adapter(&instance).await.ok_or(GpuError::NoAdapter)?;

    let adapter_info = adapter.get_info();

    if !adapter.features().contains(REQUIRED_FEATURES) {
        return Err(GpuError::UnsupportedDevice(format!(
            "{} does not support 64-bit floats in shaders",
            adapter_info.name
        )));
    }

    // Request higher buffer limits for large panoramas; an 8K equirec source
    // alone is 128MB of RGBA data
    let adapter_limits = adapter.limits();
    let limits = wgpu::Limits {
        max_storage_buffer_binding_size: adapter_limits.max_storage_buffer_binding_size,
        max_buffer_size: adapter_limits.max_buffer_size,
        max_texture_dimension_2d: adapter_limits.max_texture_dimension_2d,
        ..Default::default()
    };

    let (device, queue) = adapter
        .request_device(
            &wgpu::DeviceDescriptor {
                label: Some("cubemapper-gpu"),
                required_features: REQUIRED_FEATURES,
                required_limits: limits,
                memory_hints: wgpu::MemoryHints::Performance,
            },
            None,
        )
        .await
        .map_err(|e| GpuError::DeviceRequest(e.to_string()))?;

    Ok((device, queue, adapter_info))
}
