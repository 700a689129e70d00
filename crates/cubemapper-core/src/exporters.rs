//! Image exporters for finished cube faces
//!
//! Export RGBA8 face buffers to PNG or TIFF, dispatched on the output
//! path's extension.

use crate::models::FaceImage;
use std::path::Path;

/// Export a cube face to the given path.
///
/// The format follows the path's extension; the face's data is written as
/// 8-bit RGBA in both formats.
pub fn export_face<P: AsRef<Path>>(face: &FaceImage, path: P) -> Result<(), String> {
    let path = path.as_ref();
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
        .ok_or_else(|| "Output path has no file extension".to_string())?;

    let expected = (face.size as usize) * (face.size as usize) * 4;
    if face.data.len() != expected {
        return Err(format!(
            "Face buffer size mismatch: expected {}, got {}",
            expected,
            face.data.len()
        ));
    }

    match extension.as_str() {
        "png" => export_png(face, path),
        "tif" | "tiff" => export_tiff(face, path),
        _ => Err(format!("Unsupported output format: {}", extension)),
    }
}

/// Export a cube face as 8-bit RGBA PNG
fn export_png(face: &FaceImage, path: &Path) -> Result<(), String> {
    use std::fs::File;
    use std::io::BufWriter;

    let file =
        File::create(path).map_err(|e| format!("Failed to create PNG file: {}", e))?;
    let mut encoder = png::Encoder::new(BufWriter::new(file), face.size, face.size);
    encoder.set_color(png::ColorType::Rgba);
    encoder.set_depth(png::BitDepth::Eight);

    let mut writer = encoder
        .write_header()
        .map_err(|e| format!("Failed to write PNG header: {}", e))?;
    writer
        .write_image_data(&face.data)
        .map_err(|e| format!("Failed to write PNG image: {}", e))?;
    writer
        .finish()
        .map_err(|e| format!("Failed to finish PNG file: {}", e))?;

    Ok(())
}

/// Export a cube face as 8-bit RGBA TIFF
fn export_tiff(face: &FaceImage, path: &Path) -> Result<(), String> {
    use std::fs::File;
    use std::io::BufWriter;

    let file =
        File::create(path).map_err(|e| format!("Failed to create TIFF file: {}", e))?;
    let writer = BufWriter::new(file);

    let mut encoder = tiff::encoder::TiffEncoder::new(writer)
        .map_err(|e| format!("Failed to create TIFF encoder: {}", e))?;

    encoder
        .write_image::<tiff::encoder::colortype::RGBA8>(face.size, face.size, &face.data)
        .map_err(|e| format!("Failed to write TIFF image: {}", e))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn create_test_face(size: u32) -> FaceImage {
        let pixel_count = (size * size) as usize;
        FaceImage {
            size,
            data: vec![128; pixel_count * 4],
        }
    }

    #[test]
    fn test_export_png_success() {
        let face = create_test_face(16);
        let dir = tempdir().unwrap();
        let path = dir.path().join("face_neg_x.png");

        let result = export_face(&face, &path);

        assert!(result.is_ok(), "PNG export should succeed: {:?}", result);
        assert!(path.exists(), "PNG file should exist");

        let metadata = fs::metadata(&path).unwrap();
        assert!(metadata.len() > 0, "PNG file should not be empty");
    }

    #[test]
    fn test_export_tiff_success() {
        let face = create_test_face(16);
        let dir = tempdir().unwrap();
        let path = dir.path().join("face_pos_y.tif");

        let result = export_face(&face, &path);

        assert!(result.is_ok(), "TIFF export should succeed: {:?}", result);
        assert!(path.exists(), "TIFF file should exist");
    }

    #[test]
    fn test_export_unsupported_extension() {
        let face = create_test_face(4);
        let dir = tempdir().unwrap();
        let path = dir.path().join("face.bmp");

        let result = export_face(&face, &path);

        assert!(result.is_err());
        assert!(result.unwrap_err().contains("Unsupported output format"));
    }

    #[test]
    fn test_export_no_extension() {
        let face = create_test_face(4);

        let result = export_face(&face, "face_without_extension");

        assert!(result.is_err());
        assert!(result.unwrap_err().contains("no file extension"));
    }

    #[test]
    fn test_export_size_mismatch() {
        let face = FaceImage {
            size: 8,
            data: vec![0; 16],
        };
        let dir = tempdir().unwrap();
        let path = dir.path().join("face.png");

        let result = export_face(&face, &path);

        assert!(result.is_err());
        assert!(result.unwrap_err().contains("size mismatch"));
    }

    #[test]
    fn test_export_invalid_path() {
        let face = create_test_face(4);
        let path = "/nonexistent/directory/face.png";

        let result = export_face(&face, path);

        assert!(result.is_err());
        assert!(result.unwrap_err().contains("Failed to create PNG file"));
    }

    #[test]
    fn test_png_roundtrip_preserves_pixels() {
        let mut face = create_test_face(2);
        face.data = vec![
            255, 0, 0, 255, // red
            0, 255, 0, 255, // green
            0, 0, 255, 255, // blue
            255, 255, 255, 128, // translucent white
        ];
        let dir = tempdir().unwrap();
        let path = dir.path().join("face.png");

        export_face(&face, &path).expect("export failed");
        let decoded = crate::decoders::decode_image(&path).expect("decode failed");

        assert_eq!(decoded.width, 2);
        assert_eq!(decoded.height, 2);
        assert_eq!(decoded.data, face.data);
    }
}
