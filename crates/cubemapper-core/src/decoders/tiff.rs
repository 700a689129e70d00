//! TIFF image decoder

use std::path::Path;

use super::png::expand_rgba;
use super::DecodedImage;

/// Decode a TIFF file
pub(crate) fn decode_tiff<P: AsRef<Path>>(path: P) -> Result<DecodedImage, String> {
    use std::fs::File;
    use std::io::BufReader;

    let file = File::open(path.as_ref()).map_err(|e| format!("Failed to open TIFF file: {}", e))?;

    let mut decoder = tiff::decoder::Decoder::new(BufReader::new(file))
        .map_err(|e| format!("Failed to create TIFF decoder: {}", e))?;

    let (width, height) = decoder
        .dimensions()
        .map_err(|e| format!("Failed to get TIFF dimensions: {}", e))?;

    let color_type = decoder
        .colortype()
        .map_err(|e| format!("Failed to get TIFF color type: {}", e))?;

    let channels: u32 = match color_type {
        tiff::ColorType::Gray(_) => 1,
        tiff::ColorType::RGB(_) => 3,
        tiff::ColorType::RGBA(_) => 4,
        _ => return Err(format!("Unsupported TIFF color type: {:?}", color_type)),
    };

    let image_data = decoder
        .read_image()
        .map_err(|e| format!("Failed to read TIFF image data: {}", e))?;

    // Reduce to 8-bit samples, then normalize to packed RGBA
    let bytes: Vec<u8> = match image_data {
        tiff::decoder::DecodingResult::U8(buf) => buf,
        tiff::decoder::DecodingResult::U16(buf) => buf.iter().map(|&v| (v >> 8) as u8).collect(),
        _ => return Err("Unsupported TIFF sample format".to_string()),
    };

    let data = expand_rgba(&bytes, width, height, channels)?;

    Ok(DecodedImage {
        width,
        height,
        data,
        channels: channels as u8,
    })
}
