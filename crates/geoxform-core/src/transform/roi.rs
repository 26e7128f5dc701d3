//! Region-of-interest extraction.
//!
//! Regions are rectangles in source pixel coordinates. A region that
//! hangs over an edge is clamped to the image; one that misses the image
//! entirely, or has zero area, is an error.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::params::{check_range, SCALE_RANGE};
use super::scale::apply_scale;
use super::types::ensure_valid_image;
use super::TransformError;
use crate::decode::{PixelBuffer, CHANNELS};

/// An axis-aligned rectangle in pixel coordinates.
///
/// `x`/`y` may be negative; the part outside the image is ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl Rect {
    pub fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Intersect with a `width` x `height` image.
    ///
    /// # Errors
    ///
    /// `TransformError::EmptyRegion` if the rectangle has zero area or
    /// does not overlap the image.
    pub fn clamp_to(&self, width: u32, height: u32) -> Result<Rect, TransformError> {
        if self.width == 0 || self.height == 0 {
            return Err(TransformError::EmptyRegion(format!(
                "region {}x{} has zero area",
                self.width, self.height
            )));
        }

        let left = (self.x as i64).max(0);
        let top = (self.y as i64).max(0);
        let right = (self.x as i64 + self.width as i64).min(width as i64);
        let bottom = (self.y as i64 + self.height as i64).min(height as i64);

        if right <= left || bottom <= top {
            return Err(TransformError::EmptyRegion(format!(
                "region {}x{} at ({}, {}) lies outside the {}x{} image",
                self.width, self.height, self.x, self.y, width, height
            )));
        }

        Ok(Rect {
            x: left as i32,
            y: top as i32,
            width: (right - left) as u32,
            height: (bottom - top) as u32,
        })
    }
}

/// The two buffers produced by [`extract_and_scale_roi`].
#[derive(Debug, Clone, PartialEq)]
pub struct RoiResult {
    /// The region exactly as cropped from the source.
    pub original: PixelBuffer,
    /// The cropped region resized by the requested factor.
    pub scaled: PixelBuffer,
}

/// Copy the pixels inside `region` (clamped to the image) into a new buffer.
pub fn crop(image: &PixelBuffer, region: &Rect) -> Result<PixelBuffer, TransformError> {
    ensure_valid_image(image)?;
    let rect = region.clamp_to(image.width, image.height)?;

    // Fast path: full-image region returns a clone
    if rect.x == 0 && rect.y == 0 && rect.width == image.width && rect.height == image.height {
        return Ok(image.clone());
    }

    let src_row_len = image.width as usize * CHANNELS;
    let dst_row_len = rect.width as usize * CHANNELS;
    let mut output = Vec::with_capacity(dst_row_len * rect.height as usize);

    // Copy pixel data row by row
    for row in rect.y as usize..(rect.y as usize + rect.height as usize) {
        let start = row * src_row_len + rect.x as usize * CHANNELS;
        output.extend_from_slice(&image.pixels[start..start + dst_row_len]);
    }

    Ok(PixelBuffer::new(rect.width, rect.height, output))
}

/// Crop `image` to `region` and produce a bilinearly resized copy of the crop.
///
/// A `scale_factor` of 1.0 yields a `scaled` buffer identical to `original`.
///
/// # Errors
///
/// * `TransformError::EmptyRegion` for zero-area or out-of-image regions
/// * `TransformError::InvalidParameter` if `scale_factor` is out of range
/// * `TransformError::DegenerateOutput` if the scaled crop would be empty
pub fn extract_and_scale_roi(
    image: &PixelBuffer,
    region: &Rect,
    scale_factor: f64,
) -> Result<RoiResult, TransformError> {
    check_range("scale_factor", scale_factor, &SCALE_RANGE)?;

    let original = crop(image, region)?;
    let scaled = apply_scale(&original, scale_factor)?;

    debug!(
        x = region.x,
        y = region.y,
        width = original.width,
        height = original.height,
        scaled_width = scaled.width,
        scaled_height = scaled.height,
        "extracted region"
    );
    Ok(RoiResult { original, scaled })
}


// ============================================================================
// Property-Based Tests
// ============================================================================
