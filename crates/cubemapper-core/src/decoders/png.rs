//! PNG image decoder

use std::path::Path;

use super::DecodedImage;

/// Decode a PNG file
pub(crate) fn decode_png<P: AsRef<Path>>(path: P) -> Result<DecodedImage, String> {
    use std::fs::File;
    use std::io::BufReader;

    let file = File::open(path.as_ref()).map_err(|e| format!("Failed to open PNG file: {}", e))?;
    let decoder = png::Decoder::new(BufReader::new(file));
    let mut reader = decoder
        .read_info()
        .map_err(|e| format!("Failed to read PNG info: {}", e))?;

    let info = reader.info();
    let width = info.width;
    let height = info.height;
    let color_type = info.color_type;
    let bit_depth = info.bit_depth;

    // Allocate buffer for image data
    let buffer_size = reader
        .output_buffer_size()
        .ok_or_else(|| "Failed to determine PNG buffer size".to_string())?;
    let mut buf = vec![0u8; buffer_size];
    let frame_info = reader
        .next_frame(&mut buf)
        .map_err(|e| format!("Failed to read PNG frame: {}", e))?;

    // Get the actual bytes used
    let bytes = &buf[..frame_info.buffer_size()];

    // Normalize to packed RGBA8
    let (data, channels) = match (color_type, bit_depth) {
        (png::ColorType::Grayscale, png::BitDepth::Eight) => {
            (expand_rgba(bytes, width, height, 1)?, 1)
        }
        (png::ColorType::Rgb, png::BitDepth::Eight) => (expand_rgba(bytes, width, height, 3)?, 3),
        (png::ColorType::Rgba, png::BitDepth::Eight) => (expand_rgba(bytes, width, height, 4)?, 4),
        (png::ColorType::Grayscale, png::BitDepth::Sixteen) => {
            (expand_rgba(&take_high_bytes(bytes), width, height, 1)?, 1)
        }
        (png::ColorType::Rgb, png::BitDepth::Sixteen) => {
            (expand_rgba(&take_high_bytes(bytes), width, height, 3)?, 3)
        }
        (png::ColorType::Rgba, png::BitDepth::Sixteen) => {
            (expand_rgba(&take_high_bytes(bytes), width, height, 4)?, 4)
        }
        (png::ColorType::GrayscaleAlpha, _) => {
            return Err("Grayscale+Alpha PNG not supported".to_string());
        }
        (png::ColorType::Indexed, _) => {
            return Err("Indexed PNG not supported".to_string());
        }
        _ => {
            return Err(format!(
                "Unsupported PNG format: {:?} with bit depth {:?}",
                color_type, bit_depth
            ));
        }
    };

    Ok(DecodedImage {
        width,
        height,
        data,
        channels,
    })
}

/// Reduce big-endian 16-bit samples to their high bytes.
fn take_high_bytes(bytes: &[u8]) -> Vec<u8> {
    bytes.chunks_exact(2).map(|pair| pair[0]).collect()
}

/// Expand 8-bit samples with the given channel count to packed RGBA.
pub(crate) fn expand_rgba(
    bytes: &[u8],
    width: u32,
    height: u32,
    channels: u32,
) -> Result<Vec<u8>, String> {
    let expected_len = (width * height * channels) as usize;
    if bytes.len() != expected_len {
        return Err(format!(
            "Pixel buffer size mismatch: expected {}, got {}",
            expected_len,
            bytes.len()
        ));
    }

    let mut rgba = Vec::with_capacity((width * height * 4) as usize);
    match channels {
        1 => {
            for &gray in bytes {
                rgba.extend_from_slice(&[gray, gray, gray, 255]);
            }
        }
        3 => {
            for rgb in bytes.chunks_exact(3) {
                rgba.extend_from_slice(&[rgb[0], rgb[1], rgb[2], 255]);
            }
        }
        4 => {
            rgba.extend_from_slice(bytes);
        }
        _ => return Err(format!("Unsupported channel count: {}", channels)),
    }

    Ok(rgba)
}
