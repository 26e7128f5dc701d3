//! General affine warps from three point correspondences.
//!
//! Three non-collinear points and their targets determine exactly one
//! affine map. The warped image keeps the input's canvas size: content
//! mapped outside is clipped and uncovered pixels are white.

use tracing::debug;

use super::matrix::{triangle_area2, Matrix2x3, Point, COLLINEAR_EPSILON};
use super::params::AffineParams;
use super::types::ensure_valid_image;
use super::warp::warp_affine;
use super::TransformError;
use crate::decode::PixelBuffer;

/// Solve for the matrix mapping each source point onto its destination.
///
/// # Errors
///
/// `TransformError::InvalidCorrespondence` if either set of points is
/// collinear (or not finite), since no invertible map exists.
pub fn affine_from_points(
    source_points: &[Point; 3],
    dest_points: &[Point; 3],
) -> Result<Matrix2x3, TransformError> {
    if triangle_area2(source_points).abs() < COLLINEAR_EPSILON {
        return Err(TransformError::InvalidCorrespondence(
            "source points are collinear".to_string(),
        ));
    }
    if triangle_area2(dest_points).abs() < COLLINEAR_EPSILON {
        return Err(TransformError::InvalidCorrespondence(
            "destination points are collinear".to_string(),
        ));
    }

    Matrix2x3::from_three_points(source_points, dest_points)
        .filter(Matrix2x3::is_finite)
        .ok_or_else(|| {
            TransformError::InvalidCorrespondence("point correspondence is singular".to_string())
        })
}

/// Warp `image` so that each source point lands on its destination point.
///
/// # Errors
///
/// * `TransformError::InvalidParameter` if a point is outside the image
/// * `TransformError::InvalidCorrespondence` for collinear points
pub fn apply_affine(
    image: &PixelBuffer,
    source_points: &[Point; 3],
    dest_points: &[Point; 3],
) -> Result<PixelBuffer, TransformError> {
    ensure_valid_image(image)?;
    AffineParams::new(*source_points, *dest_points).validate(image.width, image.height)?;

    let matrix = affine_from_points(source_points, dest_points)?;
    let warped = warp_affine(image, &matrix, image.width, image.height)?;

    debug!(
        coeffs = ?matrix.coeffs(),
        width = image.width,
        height = image.height,
        "applied affine warp"
    );
    Ok(warped)
}
