//! Uniform scaling with bilinear resampling.

use image::imageops::FilterType;
use tracing::{debug, trace};

use super::types::ensure_valid_image;
use super::TransformError;
use crate::decode::PixelBuffer;

/// Check if a scale factor leaves the image untouched.
#[inline]
pub fn is_unit_scale(scale_factor: f64) -> bool {
    (scale_factor - 1.0).abs() < f64::EPSILON
}

/// Output dimensions for scaling `width` x `height` by `scale_factor`.
///
/// Each side is rounded to the nearest pixel. The result may contain a zero
/// for very small inputs; [`apply_scale`] rejects that.
pub fn scaled_dimensions(width: u32, height: u32, scale_factor: f64) -> (u32, u32) {
    let w = (width as f64 * scale_factor).round();
    let h = (height as f64 * scale_factor).round();
    (w.clamp(0.0, u32::MAX as f64) as u32, h.clamp(0.0, u32::MAX as f64) as u32)
}

/// Resize an image by `scale_factor` using bilinear (triangle) filtering.
///
/// A unit scale, or one that rounds to the same dimensions, returns an
/// exact copy with no resampling.
///
/// # Errors
///
/// * `TransformError::InvalidParameter` if the factor is not a positive
///   finite number or the buffer is malformed
/// * `TransformError::DegenerateOutput` if a side would round to zero
pub fn apply_scale(image: &PixelBuffer, scale_factor: f64) -> Result<PixelBuffer, TransformError> {
    ensure_valid_image(image)?;

    if !scale_factor.is_finite() || scale_factor <= 0.0 {
        return Err(TransformError::invalid(
            "scale_factor",
            format!("{} must be a positive finite number", scale_factor),
        ));
    }

    if is_unit_scale(scale_factor) {
        trace!("scale skipped at identity");
        return Ok(image.clone());
    }

    let (width, height) = scaled_dimensions(image.width, image.height, scale_factor);
    resize_exact(image, width, height)
}

/// Resize an image to exact dimensions.
///
/// Matching dimensions return a copy without resampling.
pub(crate) fn resize_exact(
    image: &PixelBuffer,
    width: u32,
    height: u32,
) -> Result<PixelBuffer, TransformError> {
    if width == 0 || height == 0 {
        return Err(TransformError::DegenerateOutput { width, height });
    }

    if image.width == width && image.height == height {
        return Ok(image.clone());
    }

    let rgb_image = image
        .to_rgb_image()
        .ok_or_else(|| TransformError::invalid("image", "pixel data does not match dimensions"))?;

    let resized = image::imageops::resize(&rgb_image, width, height, FilterType::Triangle);

    debug!(
        from_width = image.width,
        from_height = image.height,
        width,
        height,
        "scaled image"
    );
    Ok(PixelBuffer::from_rgb_image(resized))
}
