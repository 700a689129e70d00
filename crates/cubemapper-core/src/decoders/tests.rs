//! Tests for image decoders

use super::*;

/// Write a PNG with the given layout and pixel bytes, then decode it back.
fn roundtrip_png(
    width: u32,
    height: u32,
    color: ::png::ColorType,
    bytes: &[u8],
) -> Result<DecodedImage, String> {
    use std::io::BufWriter;

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("source.png");

    let file = std::fs::File::create(&path).unwrap();
    let mut encoder = ::png::Encoder::new(BufWriter::new(file), width, height);
    encoder.set_color(color);
    encoder.set_depth(::png::BitDepth::Eight);
    let mut writer = encoder.write_header().unwrap();
    writer.write_image_data(bytes).unwrap();
    writer.finish().unwrap();

    decode_image(&path)
}

#[test]
fn test_decode_rgb_png_gains_opaque_alpha() {
    let pixels = [10u8, 20, 30, 40, 50, 60];
    let image = roundtrip_png(2, 1, ::png::ColorType::Rgb, &pixels).expect("decode failed");

    assert_eq!(image.width, 2);
    assert_eq!(image.height, 1);
    assert_eq!(image.channels, 3);
    assert_eq!(image.data, vec![10, 20, 30, 255, 40, 50, 60, 255]);
}

#[test]
fn test_decode_rgba_png_passthrough() {
    let pixels = [1u8, 2, 3, 4, 5, 6, 7, 8];
    let image = roundtrip_png(2, 1, ::png::ColorType::Rgba, &pixels).expect("decode failed");

    assert_eq!(image.channels, 4);
    assert_eq!(image.data, pixels.to_vec());
}

#[test]
fn test_decode_grayscale_png_expands() {
    let pixels = [0u8, 128, 255];
    let image = roundtrip_png(3, 1, ::png::ColorType::Grayscale, &pixels).expect("decode failed");

    assert_eq!(image.channels, 1);
    assert_eq!(
        image.data,
        vec![0, 0, 0, 255, 128, 128, 128, 255, 255, 255, 255, 255]
    );
}

#[test]
fn test_decode_unknown_extension() {
    let result = decode_image("panorama.webp");
    assert!(result.is_err());
    assert!(result.unwrap_err().contains("Unsupported file format"));
}

#[test]
fn test_decode_missing_file() {
    let result = decode_image("no_such_panorama.png");
    assert!(result.is_err());
    assert!(result.unwrap_err().contains("Failed to open PNG file"));
}

#[test]
fn test_from_rgba_validates_length() {
    assert!(DecodedImage::from_rgba(2, 2, vec![0; 16]).is_ok());

    let result = DecodedImage::from_rgba(2, 2, vec![0; 15]);
    assert!(result.is_err());
    assert!(result.unwrap_err().contains("size mismatch"));
}

#[test]
fn test_texel_lookup() {
    let mut data = vec![0u8; 2 * 2 * 4];
    // (1, 1) -> solid red
    data[12..16].copy_from_slice(&[255, 0, 0, 255]);
    let image = DecodedImage::from_rgba(2, 2, data).unwrap();

    assert_eq!(image.texel(0, 0), [0, 0, 0, 0]);
    assert_eq!(image.texel(1, 1), [255, 0, 0, 255]);
}
