//! Output path handling for the six face files.

use std::path::{Path, PathBuf};

use cubemapper_core::CubeFace;

/// Build the output path for one face: the face suffix is appended to the
/// file stem, keeping the directory and extension of the requested output.
///
/// `renders/pano.png` becomes `renders/pano_neg_x.png` and so on.
pub fn face_output_path(output: &Path, face: CubeFace) -> Result<PathBuf, String> {
    let stem = output
        .file_stem()
        .and_then(|s| s.to_str())
        .ok_or_else(|| format!("Invalid output filename: {}", output.display()))?;
    let extension = output
        .extension()
        .and_then(|e| e.to_str())
        .ok_or_else(|| format!("Output path has no extension: {}", output.display()))?;

    Ok(output.with_file_name(format!("{}_{}.{}", stem, face.suffix(), extension)))
}

/// Create the output path's parent directory if it is missing.
pub fn ensure_parent_dir(output: &Path) -> Result<(), String> {
    if let Some(parent) = output.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create output directory: {}", e))?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_face_output_paths() {
        let output = Path::new("renders/pano.png");

        let expected = [
            "renders/pano_neg_x.png",
            "renders/pano_pos_x.png",
            "renders/pano_neg_y.png",
            "renders/pano_pos_y.png",
            "renders/pano_neg_z.png",
            "renders/pano_pos_z.png",
        ];

        for (face, expected) in CubeFace::ALL.into_iter().zip(expected) {
            assert_eq!(
                face_output_path(output, face).unwrap(),
                PathBuf::from(expected)
            );
        }
    }

    #[test]
    fn test_face_output_path_keeps_extension() {
        let output = Path::new("sky.tif");
        assert_eq!(
            face_output_path(output, CubeFace::PosY).unwrap(),
            PathBuf::from("sky_pos_y.tif")
        );
    }

    #[test]
    fn test_face_output_path_without_extension() {
        let result = face_output_path(Path::new("renders/pano"), CubeFace::NegX);
        assert!(result.is_err());
        assert!(result.unwrap_err().contains("no extension"));
    }

    #[test]
    fn test_ensure_parent_dir_creates_missing() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("nested/deeper/pano.png");

        ensure_parent_dir(&output).expect("should create directories");
        assert!(output.parent().unwrap().is_dir());
    }

    #[test]
    fn test_ensure_parent_dir_accepts_existing() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("pano.png");

        ensure_parent_dir(&output).expect("existing directory is fine");
    }
}
