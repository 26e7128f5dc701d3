//! Error and result types for the transform engine.

use thiserror::Error;

use super::roi::RoiResult;
use crate::decode::PixelBuffer;

/// Errors produced by transform operations.
///
/// Every error is detected before any output is produced; a failed call
/// leaves nothing half-applied.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TransformError {
    /// A parameter is out of range, not finite, or the input buffer is malformed.
    #[error("Invalid parameter `{name}`: {reason}")]
    InvalidParameter { name: &'static str, reason: String },

    /// The affine point correspondence does not determine an invertible map.
    #[error("Invalid point correspondence: {0}")]
    InvalidCorrespondence(String),

    /// The region of interest has zero area or misses the image entirely.
    #[error("Empty region: {0}")]
    EmptyRegion(String),

    /// A resample would produce an image with a zero dimension.
    #[error("Transform would produce a degenerate {width}x{height} image")]
    DegenerateOutput { width: u32, height: u32 },
}

impl TransformError {
    pub(crate) fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        TransformError::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }

    /// True for errors caused by out-of-range inputs, including parameters
    /// that would shrink the image to nothing.
    pub fn is_invalid_parameter(&self) -> bool {
        matches!(
            self,
            TransformError::InvalidParameter { .. } | TransformError::DegenerateOutput { .. }
        )
    }
}

/// The result of [`apply`](super::apply).
#[derive(Debug, Clone, PartialEq)]
pub enum TransformOutput {
    /// Output of a basic or affine transform.
    Image(PixelBuffer),
    /// Output of a region-of-interest extraction.
    Roi(RoiResult),
}

impl TransformOutput {
    /// The buffer a caller displays or downloads: the transformed image, or
    /// the scaled region for ROI extraction.
    pub fn image(&self) -> &PixelBuffer {
        match self {
            TransformOutput::Image(image) => image,
            TransformOutput::Roi(roi) => &roi.scaled,
        }
    }

    pub fn into_image(self) -> PixelBuffer {
        match self {
            TransformOutput::Image(image) => image,
            TransformOutput::Roi(roi) => roi.scaled,
        }
    }

    /// Final (width, height) of [`image`](Self::image).
    pub fn dimensions(&self) -> (u32, u32) {
        self.image().dimensions()
    }
}

/// Reject buffers the engine cannot safely index.
pub(crate) fn ensure_valid_image(image: &PixelBuffer) -> Result<(), TransformError> {
    if image.width == 0 || image.height == 0 {
        return Err(TransformError::invalid(
            "image",
            format!("dimensions {}x{} must be non-zero", image.width, image.height),
        ));
    }
    if !image.is_consistent() {
        return Err(TransformError::invalid(
            "image",
            format!(
                "expected {} bytes for {}x{} RGB, got {}",
                image.width as usize * image.height as usize * crate::decode::CHANNELS,
                image.width,
                image.height,
                image.pixels.len()
            ),
        ));
    }
    Ok(())
}
