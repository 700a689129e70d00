//! Image decoders for the source panorama
//!
//! Support for PNG and TIFF file formats. All sources are normalized to
//! packed RGBA with 8 bits per channel, the layout the resampling kernel
//! reads from its storage buffer.

mod png;
mod tiff;

#[cfg(test)]
mod tests;

use std::path::Path;

/// Decoded equirectangular source image
#[derive(Debug, Clone)]
pub struct DecodedImage {
    /// Image width in pixels
    pub width: u32,

    /// Image height in pixels
    pub height: u32,

    /// Packed RGBA data, 8 bits per channel, `width * height * 4` bytes
    pub data: Vec<u8>,

    /// Number of channels in the source file (1, 3, or 4) before
    /// normalization to RGBA
    pub channels: u8,
}

impl DecodedImage {
    /// Build an image from already-packed RGBA bytes.
    ///
    /// Fails when the buffer length does not match the dimensions.
    pub fn from_rgba(width: u32, height: u32, data: Vec<u8>) -> Result<Self, String> {
        let expected = (width as usize) * (height as usize) * 4;
        if data.len() != expected {
            return Err(format!(
                "RGBA buffer size mismatch: expected {}, got {}",
                expected,
                data.len()
            ));
        }
        Ok(Self {
            width,
            height,
            data,
            channels: 4,
        })
    }

    /// RGBA value of the texel at (x, y). Callers must stay in bounds.
    pub(crate) fn texel(&self, x: u32, y: u32) -> [u8; 4] {
        let idx = ((y * self.width + x) * 4) as usize;
        [
            self.data[idx],
            self.data[idx + 1],
            self.data[idx + 2],
            self.data[idx + 3],
        ]
    }
}

/// Decode an image from a file path
pub fn decode_image<P: AsRef<Path>>(path: P) -> Result<DecodedImage, String> {
    let path = path.as_ref();
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
        .ok_or_else(|| "No file extension found".to_string())?;

    match extension.as_str() {
        "png" => png::decode_png(path),
        "tif" | "tiff" => tiff::decode_tiff(path),
        _ => Err(format!("Unsupported file format: {}", extension)),
    }
}
