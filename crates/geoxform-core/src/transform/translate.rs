//! Pure shifts on a fixed-size canvas.

use tracing::{debug, trace};

use super::matrix::Matrix2x3;
use super::types::ensure_valid_image;
use super::warp::warp_affine;
use super::TransformError;
use crate::decode::PixelBuffer;

/// Check if an offset leaves the image untouched.
#[inline]
pub fn is_zero_shift(tx: f64, ty: f64) -> bool {
    tx.abs() < f64::EPSILON && ty.abs() < f64::EPSILON
}

/// Shift an image by (tx, ty) pixels, keeping its canvas size.
///
/// Content shifted past an edge is lost; uncovered pixels are white. Whole
/// pixel offsets move pixels exactly, fractional ones interpolate.
pub fn apply_translation(image: &PixelBuffer, tx: f64, ty: f64) -> Result<PixelBuffer, TransformError> {
    ensure_valid_image(image)?;

    if !tx.is_finite() {
        return Err(TransformError::invalid("translate_x", format!("{} is not finite", tx)));
    }
    if !ty.is_finite() {
        return Err(TransformError::invalid("translate_y", format!("{} is not finite", ty)));
    }

    if is_zero_shift(tx, ty) {
        trace!("translation skipped at identity");
        return Ok(image.clone());
    }

    let shifted = warp_affine(image, &Matrix2x3::translation(tx, ty), image.width, image.height)?;
    debug!(tx, ty, width = image.width, height = image.height, "translated image");
    Ok(shifted)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transform::warp::BORDER_COLOR;

    fn test_image(width: u32, height: u32) -> PixelBuffer {
        let mut pixels = Vec::with_capacity((width * height * 3) as usize);
        for y in 0..height {
            for x in 0..width {
                pixels.extend_from_slice(&[x as u8, y as u8, 7]);
            }
        }
        PixelBuffer::new(width, height, pixels)
    }

    #[test]
    fn test_zero_shift_is_exact_copy() {
        let img = test_image(9, 9);
        assert_eq!(apply_translation(&img, 0.0, 0.0).unwrap(), img);
    }

    #[test]
    fn test_shift_keeps_canvas_size() {
        let img = test_image(30, 20);
        let result = apply_translation(&img, 100.0, -50.0).unwrap();
        assert_eq!(result.dimensions(), (30, 20));
    }

    #[test]
    fn test_positive_shift_moves_right_and_down() {
        let img = test_image(20, 20);
        let result = apply_translation(&img, 10.0, 5.0).unwrap();

        assert_eq!(result.get_pixel(10, 5).unwrap(), img.get_pixel(0, 0).unwrap());
        assert_eq!(result.get_pixel(19, 19).unwrap(), img.get_pixel(9, 14).unwrap());
        assert_eq!(result.get_pixel(9, 5).unwrap(), BORDER_COLOR);
        assert_eq!(result.get_pixel(10, 4).unwrap(), BORDER_COLOR);
    }

    #[test]
    fn test_negative_shift_moves_left_and_up() {
        let img = test_image(20, 20);
        let result = apply_translation(&img, -10.0, 0.0).unwrap();

        assert_eq!(result.get_pixel(0, 3).unwrap(), img.get_pixel(10, 3).unwrap());
        assert_eq!(result.get_pixel(10, 3).unwrap(), BORDER_COLOR);
    }

    #[test]
    fn test_shift_past_canvas_is_all_white() {
        let img = test_image(10, 10);
        let result = apply_translation(&img, 500.0, 0.0).unwrap();
        assert!(result.pixels.iter().all(|&v| v == 255));
    }

    #[test]
    fn test_non_finite_offset_rejected() {
        let img = test_image(4, 4);
        assert!(apply_translation(&img, f64::INFINITY, 0.0).is_err());
        assert!(apply_translation(&img, 0.0, f64::NAN).is_err());
    }
}
