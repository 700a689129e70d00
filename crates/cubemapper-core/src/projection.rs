//! Host-side mirror of the resampling kernel math.
//!
//! The GPU kernel and this module implement the same projection: cube-face
//! texel -> unit direction -> equirectangular UV -> wrapped bilinear fetch,
//! averaged over the multisample grid. The kernel carries a polynomial
//! atan2 because no backend exposes double-precision transcendentals; here
//! the native `f64::atan2` is used. The test suite uses this module as the
//! reference implementation when checking GPU output.

use crate::decoders::DecodedImage;
use crate::models::CubeFace;

use std::f64::consts::PI;

const TAU: f64 = PI * 2.0;

/// Direction for a cube-face UV in [0, 1]^2, normalized to unit length.
pub fn cube_uv_to_dir(face: CubeFace, u: f64, v: f64) -> [f64; 3] {
    let u = u * 2.0 - 1.0;
    let v = v * 2.0 - 1.0;
    let dir = match face {
        CubeFace::NegX => [-1.0, u, v],
        CubeFace::PosX => [1.0, u, v],
        CubeFace::NegY => [u, -1.0, v],
        CubeFace::PosY => [u, 1.0, v],
        CubeFace::NegZ => [u, v, -1.0],
        CubeFace::PosZ => [u, v, 1.0],
    };
    let len = (dir[0] * dir[0] + dir[1] * dir[1] + dir[2] * dir[2]).sqrt();
    [dir[0] / len, dir[1] / len, dir[2] / len]
}

/// Equirectangular UV for a direction: longitude to [0, 1), latitude to [0, 1].
pub fn dir_to_equirec_uv(dir: [f64; 3]) -> [f64; 2] {
    let longitude = dir[2].atan2(dir[0]);
    let latitude = dir[1].atan2((dir[0] * dir[0] + dir[2] * dir[2]).sqrt());
    [(longitude + PI) / TAU, (latitude + PI / 2.0) / PI]
}

/// Floored modulo; wraps negative and past-the-end indices into [0, b).
fn floored_mod(a: i64, b: i64) -> i64 {
    ((a % b) + b) % b
}

/// Fetch one source texel with both axes wrapped.
fn fetch_wrapped(image: &DecodedImage, x: i64, y: i64) -> [f64; 4] {
    let xi = floored_mod(x, image.width as i64) as u32;
    let yi = floored_mod(y, image.height as i64) as u32;
    let texel = image.texel(xi, yi);
    [
        texel[0] as f64 / 255.0,
        texel[1] as f64 / 255.0,
        texel[2] as f64 / 255.0,
        texel[3] as f64 / 255.0,
    ]
}

fn mix4(a: [f64; 4], b: [f64; 4], t: f64) -> [f64; 4] {
    [
        a[0] + (b[0] - a[0]) * t,
        a[1] + (b[1] - a[1]) * t,
        a[2] + (b[2] - a[2]) * t,
        a[3] + (b[3] - a[3]) * t,
    ]
}

/// Bilinear sample of the source at a continuous equirectangular UV.
///
/// The UV is scaled into source pixel space; the four neighboring texels are
/// wrapped on both axes. Wrapping latitude with the same floored modulo as
/// longitude is an intentional approximation near the poles.
pub fn sample_equirec(image: &DecodedImage, uv: [f64; 2]) -> [f64; 4] {
    let x = uv[0] * image.width as f64;
    let y = uv[1] * image.height as f64;
    let x0 = x.floor() as i64;
    let y0 = y.floor() as i64;
    let bx = x - x.floor();
    let by = y - y.floor();

    let aa = fetch_wrapped(image, x0, y0);
    let ba = fetch_wrapped(image, x0 + 1, y0);
    let ab = fetch_wrapped(image, x0, y0 + 1);
    let bb = fetch_wrapped(image, x0 + 1, y0 + 1);

    mix4(mix4(aa, ba, bx), mix4(ab, bb, bx), by)
}

/// Bilinear sample of the source in the given direction.
pub fn sample_equirec_dir(image: &DecodedImage, dir: [f64; 3]) -> [f64; 4] {
    sample_equirec(image, dir_to_equirec_uv(dir))
}

/// Resolve one destination texel: average the multisample grid for the
/// texel at (x, y) on `face` of a cubemap with edge size `face_size`.
///
/// Sub-sample offsets are `(mx, my) / (level + 0.5) / 2` for mx, my in
/// [-level, level]; the mean is unweighted over all channels.
pub fn sample_face_texel(
    image: &DecodedImage,
    face: CubeFace,
    face_size: u32,
    x: u32,
    y: u32,
    level: u32,
) -> [u8; 4] {
    let level = level as i64;
    let center_x = x as f64 + 0.5;
    let center_y = y as f64 + 0.5;
    let mut acc = [0.0f64; 4];

    for my in -level..=level {
        for mx in -level..=level {
            let offset_x = mx as f64 / (level as f64 + 0.5) / 2.0;
            let offset_y = my as f64 / (level as f64 + 0.5) / 2.0;
            let u = (center_x + offset_x) / face_size as f64;
            let v = (center_y + offset_y) / face_size as f64;
            let value = sample_equirec_dir(image, cube_uv_to_dir(face, u, v));
            for c in 0..4 {
                acc[c] += value[c];
            }
        }
    }

    let grid = (level * 2 + 1) as f64;
    let inv_count = 1.0 / (grid * grid);
    let mut out = [0u8; 4];
    for c in 0..4 {
        out[c] = ((acc[c] * inv_count).clamp(0.0, 1.0) * 255.0).round() as u8;
    }
    out
}

/// Render a whole face on the host. Test helper for comparing against the
/// kernel's output.
#[cfg(test)]
pub(crate) fn render_face_reference(
    image: &DecodedImage,
    face: CubeFace,
    face_size: u32,
    level: u32,
) -> Vec<u8> {
    let mut data = Vec::with_capacity((face_size * face_size * 4) as usize);
    for y in 0..face_size {
        for x in 0..face_size {
            data.extend_from_slice(&sample_face_texel(image, face, face_size, x, y, level));
        }
    }
    data
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solid_image(width: u32, height: u32, rgba: [u8; 4]) -> DecodedImage {
        let mut data = Vec::with_capacity((width * height * 4) as usize);
        for _ in 0..width * height {
            data.extend_from_slice(&rgba);
        }
        DecodedImage::from_rgba(width, height, data).unwrap()
    }

    /// Horizontal gradient with distinct rows, useful for seam checks.
    fn gradient_image(width: u32, height: u32) -> DecodedImage {
        let mut data = Vec::with_capacity((width * height * 4) as usize);
        for y in 0..height {
            for x in 0..width {
                let r = (x * 255 / width.max(1)) as u8;
                let g = (y * 255 / height.max(1)) as u8;
                data.extend_from_slice(&[r, g, 64, 255]);
            }
        }
        DecodedImage::from_rgba(width, height, data).unwrap()
    }

    #[test]
    fn test_face_centers_hit_principal_axes() {
        let expected = [
            (CubeFace::NegX, [-1.0, 0.0, 0.0]),
            (CubeFace::PosX, [1.0, 0.0, 0.0]),
            (CubeFace::NegY, [0.0, -1.0, 0.0]),
            (CubeFace::PosY, [0.0, 1.0, 0.0]),
            (CubeFace::NegZ, [0.0, 0.0, -1.0]),
            (CubeFace::PosZ, [0.0, 0.0, 1.0]),
        ];

        for (face, axis) in expected {
            let dir = cube_uv_to_dir(face, 0.5, 0.5);
            for c in 0..3 {
                assert!(
                    (dir[c] - axis[c]).abs() < 1e-12,
                    "{:?} center direction {:?} != {:?}",
                    face,
                    dir,
                    axis
                );
            }
        }
    }

    #[test]
    fn test_directions_are_unit_length() {
        for face in CubeFace::ALL {
            for &(u, v) in &[(0.0, 0.0), (1.0, 1.0), (0.25, 0.75), (0.5, 0.0)] {
                let dir = cube_uv_to_dir(face, u, v);
                let len = (dir[0] * dir[0] + dir[1] * dir[1] + dir[2] * dir[2]).sqrt();
                assert!((len - 1.0).abs() < 1e-12);
            }
        }
    }

    #[test]
    fn test_equirec_uv_ranges() {
        // Looking along -x: longitude atan2(0, -1) = pi -> u = 1.0
        let uv = dir_to_equirec_uv([-1.0, 0.0, 0.0]);
        assert!((uv[0] - 1.0).abs() < 1e-12);
        assert!((uv[1] - 0.5).abs() < 1e-12);

        // Straight up: latitude pi/2 -> v = 1.0
        let uv = dir_to_equirec_uv([0.0, 1.0, 0.0]);
        assert!((uv[1] - 1.0).abs() < 1e-12);

        // Straight down: v = 0.0
        let uv = dir_to_equirec_uv([0.0, -1.0, 0.0]);
        assert!(uv[1].abs() < 1e-12);
    }

    #[test]
    fn test_horizontal_wraparound_is_seamless() {
        let image = gradient_image(16, 8);

        for row in 0..8 {
            let v = (row as f64 + 0.5) / 8.0;
            let left = sample_equirec(&image, [0.0, v]);
            let right = sample_equirec(&image, [1.0, v]);
            for c in 0..4 {
                assert!(
                    (left[c] - right[c]).abs() < 1e-12,
                    "row {}: seam mismatch {:?} vs {:?}",
                    row,
                    left,
                    right
                );
            }
        }
    }

    #[test]
    fn test_fetch_wraps_negative_indices() {
        let image = gradient_image(16, 8);
        assert_eq!(fetch_wrapped(&image, -1, 2), fetch_wrapped(&image, 15, 2));
        assert_eq!(fetch_wrapped(&image, 3, -1), fetch_wrapped(&image, 3, 7));
        assert_eq!(fetch_wrapped(&image, 16, 8), fetch_wrapped(&image, 0, 0));
    }

    #[test]
    fn test_constant_input_invariant_under_multisampling() {
        let color = [17u8, 200, 96, 255];
        let image = solid_image(8, 4, color);

        for level in [0, 1, 3] {
            for face in CubeFace::ALL {
                let texel = sample_face_texel(&image, face, 16, 7, 3, level);
                assert_eq!(
                    texel, color,
                    "face {:?} level {} should reproduce the constant exactly",
                    face, level
                );
            }
        }
    }

    #[test]
    fn test_solid_red_panorama_renders_solid_red_faces() {
        let red = [255u8, 0, 0, 255];
        let image = solid_image(8, 4, red);

        for face in CubeFace::ALL {
            let data = render_face_reference(&image, face, 16, 0);
            assert_eq!(data.len(), 16 * 16 * 4);
            for texel in data.chunks_exact(4) {
                assert_eq!(texel, red);
            }
        }
    }

    #[test]
    fn test_bilinear_blends_neighbors() {
        // Two-texel-wide image, black then white; sampling the boundary
        // between them lands halfway.
        let mut data = Vec::new();
        data.extend_from_slice(&[0, 0, 0, 255]);
        data.extend_from_slice(&[255, 255, 255, 255]);
        let image = DecodedImage::from_rgba(2, 1, data).unwrap();

        // x = 1.0 in pixel space: floor = 1, fract = 0 -> full white texel
        let at_texel = sample_equirec(&image, [0.5, 0.0]);
        assert!((at_texel[0] - 1.0).abs() < 1e-12);

        // x = 1.5: halfway between texel 1 (white) and wrapped texel 0 (black)
        let halfway = sample_equirec(&image, [0.75, 0.0]);
        assert!((halfway[0] - 0.5).abs() < 1e-12);
    }
}
