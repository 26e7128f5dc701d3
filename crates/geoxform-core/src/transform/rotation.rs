//! Rotation about the image center with canvas growth.
//!
//! The canvas is enlarged to the bounding box of the rotated rectangle so
//! no corner is clipped:
//!
//! ```text
//! new_w = round(h * |sin θ| + w * |cos θ|)
//! new_h = round(h * |cos θ| + w * |sin θ|)
//! ```
//!
//! The rotation pivots on the integer center `(w / 2, h / 2)` and the
//! matrix translation is shifted by `(new_w / 2 - cx, new_h / 2 - cy)` so
//! the rotated content sits in the middle of the new canvas. Uncovered
//! pixels are white.

use tracing::{debug, trace};

use super::matrix::{Matrix2x3, Point};
use super::types::ensure_valid_image;
use super::warp::warp_affine;
use super::TransformError;
use crate::decode::PixelBuffer;

/// Check if an angle leaves the image untouched.
#[inline]
pub fn is_zero_rotation(angle_degrees: f64) -> bool {
    angle_degrees.abs() < f64::EPSILON
}

/// Compute the dimensions of the bounding box for a rotated image.
///
/// # Arguments
///
/// * `width` - Original image width
/// * `height` - Original image height
/// * `angle_degrees` - Rotation angle in degrees (positive = counter-clockwise)
///
/// # Returns
///
/// Tuple of (new_width, new_height) for the rotated bounding box.
pub fn compute_rotated_bounds(width: u32, height: u32, angle_degrees: f64) -> (u32, u32) {
    let abs_angle = (angle_degrees % 360.0).abs();

    // Quarter turns are exact; skip the trig so rounding noise cannot leak in.
    if abs_angle < 0.001 || (abs_angle - 180.0).abs() < 0.001 || (360.0 - abs_angle) < 0.001 {
        return (width, height);
    }
    if (abs_angle - 90.0).abs() < 0.001 || (abs_angle - 270.0).abs() < 0.001 {
        return (height, width);
    }

    let theta = angle_degrees.to_radians();
    let cos = theta.cos().abs();
    let sin = theta.sin().abs();

    let w = width as f64;
    let h = height as f64;

    let new_w = (h * sin + w * cos).round() as u32;
    let new_h = (h * cos + w * sin).round() as u32;

    (new_w, new_h)
}

/// Build the forward rotation matrix for a `width` x `height` image and
/// the canvas it maps onto.
pub fn rotation_matrix(width: u32, height: u32, angle_degrees: f64) -> (Matrix2x3, (u32, u32)) {
    let center = Point::new((width / 2) as f64, (height / 2) as f64);
    let (new_w, new_h) = compute_rotated_bounds(width, height, angle_degrees);

    let matrix = Matrix2x3::rotation_about(center, angle_degrees).translated(
        new_w as f64 / 2.0 - center.x,
        new_h as f64 / 2.0 - center.y,
    );

    (matrix, (new_w, new_h))
}

/// Apply rotation to an image.
///
/// The image is rotated around its center. The output canvas is expanded
/// to fit the entire rotated image; uncovered pixels are white. A zero
/// angle returns an exact copy.
///
/// # Errors
///
/// `TransformError::InvalidParameter` if the angle is not finite or the
/// buffer is malformed.
pub fn apply_rotation(image: &PixelBuffer, angle_degrees: f64) -> Result<PixelBuffer, TransformError> {
    ensure_valid_image(image)?;

    if !angle_degrees.is_finite() {
        return Err(TransformError::invalid(
            "rotation_degrees",
            format!("{} is not finite", angle_degrees),
        ));
    }

    if is_zero_rotation(angle_degrees) {
        trace!("rotation skipped at identity");
        return Ok(image.clone());
    }

    let (matrix, (width, height)) = rotation_matrix(image.width, image.height, angle_degrees);
    let rotated = warp_affine(image, &matrix, width, height)?;

    debug!(
        angle_degrees,
        from_width = image.width,
        from_height = image.height,
        width,
        height,
        "rotated image"
    );
    Ok(rotated)
}
