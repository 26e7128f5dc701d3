//! Request-level entry points: the basic scale/rotate/translate chain and
//! dispatch over [`TransformParameters`].

use std::borrow::Cow;

use tracing::trace;

use super::affine::apply_affine;
use super::params::{BasicParams, TransformParameters};
use super::roi::extract_and_scale_roi;
use super::rotation::{apply_rotation, is_zero_rotation};
use super::scale::{apply_scale, is_unit_scale};
use super::translate::{apply_translation, is_zero_shift};
use super::types::{ensure_valid_image, TransformOutput};
use super::TransformError;
use crate::decode::PixelBuffer;

/// Apply scale, then rotation, then translation.
///
/// Each step is a separate resampling pass over the output of the previous
/// one. A step whose parameter is at its identity value is skipped, so the
/// identity parameters return a byte-identical copy of `image`.
///
/// # Errors
///
/// * `TransformError::InvalidParameter` if any parameter is out of range
/// * `TransformError::DegenerateOutput` if scaling rounds a side to zero
pub fn apply_basic(image: &PixelBuffer, params: &BasicParams) -> Result<PixelBuffer, TransformError> {
    ensure_valid_image(image)?;
    params.validate()?;

    let mut current = Cow::Borrowed(image);

    if is_unit_scale(params.scale_factor) {
        trace!("basic: scale step skipped");
    } else {
        current = Cow::Owned(apply_scale(&current, params.scale_factor)?);
    }

    if is_zero_rotation(params.rotation_degrees) {
        trace!("basic: rotation step skipped");
    } else {
        current = Cow::Owned(apply_rotation(&current, params.rotation_degrees)?);
    }

    if is_zero_shift(params.translate_x, params.translate_y) {
        trace!("basic: translation step skipped");
    } else {
        current = Cow::Owned(apply_translation(
            &current,
            params.translate_x,
            params.translate_y,
        )?);
    }

    Ok(current.into_owned())
}

/// Validate `params` against `image` and run the requested operation.
pub fn apply(image: &PixelBuffer, params: &TransformParameters) -> Result<TransformOutput, TransformError> {
    ensure_valid_image(image)?;
    params.validate(image)?;

    match params {
        TransformParameters::Basic(basic) => apply_basic(image, basic).map(TransformOutput::Image),
        TransformParameters::Affine(affine) => {
            apply_affine(image, &affine.source_points, &affine.dest_points).map(TransformOutput::Image)
        }
        TransformParameters::Roi(roi) => {
            extract_and_scale_roi(image, &roi.region, roi.scale_factor).map(TransformOutput::Roi)
        }
    }
}
