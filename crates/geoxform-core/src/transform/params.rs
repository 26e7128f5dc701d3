//! Transform parameters and their validation.
//!
//! Parameters are plain immutable values built by the caller for each
//! request. Ranges mirror the controls a UI offers; the engine checks them
//! itself rather than trusting the caller.

use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

use super::matrix::Point;
use super::roi::Rect;
use super::TransformError;
use crate::decode::PixelBuffer;

/// Accepted rotation angles in degrees (counter-clockwise).
pub const ROTATION_RANGE: RangeInclusive<f64> = 0.0..=360.0;
/// Accepted scale factors.
pub const SCALE_RANGE: RangeInclusive<f64> = 0.1..=3.0;
/// Accepted translation offsets in pixels, for each axis.
pub const TRANSLATE_RANGE: RangeInclusive<f64> = -500.0..=500.0;

/// UI control granularity. Advisory only: validation checks ranges.
pub const ROTATION_STEP: f64 = 1.0;
pub const SCALE_STEP: f64 = 0.1;
pub const TRANSLATE_STEP: f64 = 10.0;
pub const POINT_STEP: f64 = 5.0;

/// Scale, rotate, translate, applied in that order.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BasicParams {
    /// Rotation angle in degrees (0 to 360, counter-clockwise)
    pub rotation_degrees: f64,
    /// Uniform scale factor (0.1 to 3.0)
    pub scale_factor: f64,
    /// Horizontal shift in pixels (-500 to 500)
    pub translate_x: f64,
    /// Vertical shift in pixels (-500 to 500)
    pub translate_y: f64,
}

impl Default for BasicParams {
    fn default() -> Self {
        Self {
            rotation_degrees: 0.0,
            scale_factor: 1.0,
            translate_x: 0.0,
            translate_y: 0.0,
        }
    }
}

impl BasicParams {
    /// Create new params at the identity (same as `Default`)
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if every step is at its identity value
    pub fn is_identity(&self) -> bool {
        *self == Self::default()
    }

    pub fn validate(&self) -> Result<(), TransformError> {
        check_range("rotation_degrees", self.rotation_degrees, &ROTATION_RANGE)?;
        check_range("scale_factor", self.scale_factor, &SCALE_RANGE)?;
        check_range("translate_x", self.translate_x, &TRANSLATE_RANGE)?;
        check_range("translate_y", self.translate_y, &TRANSLATE_RANGE)
    }
}

/// Three source points and where they should land.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AffineParams {
    pub source_points: [Point; 3],
    pub dest_points: [Point; 3],
}

impl AffineParams {
    pub fn new(source_points: [Point; 3], dest_points: [Point; 3]) -> Self {
        Self {
            source_points,
            dest_points,
        }
    }

    /// Every point must be finite and inside `[0, width) x [0, height)`.
    pub fn validate(&self, width: u32, height: u32) -> Result<(), TransformError> {
        for point in &self.source_points {
            check_point("source_points", *point, width, height)?;
        }
        for point in &self.dest_points {
            check_point("dest_points", *point, width, height)?;
        }
        Ok(())
    }
}

/// A region to extract and a scale for the extracted copy.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RoiParams {
    pub region: Rect,
    #[serde(default = "unit_scale")]
    pub scale_factor: f64,
}

fn unit_scale() -> f64 {
    1.0
}

impl RoiParams {
    pub fn new(region: Rect, scale_factor: f64) -> Self {
        Self {
            region,
            scale_factor,
        }
    }

    pub fn validate(&self) -> Result<(), TransformError> {
        check_range("scale_factor", self.scale_factor, &SCALE_RANGE)
    }
}

/// One transform request.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum TransformParameters {
    Basic(BasicParams),
    Affine(AffineParams),
    Roi(RoiParams),
}

impl TransformParameters {
    /// Validate against a specific input image.
    ///
    /// Affine points are checked against the image bounds; region bounds
    /// are resolved when the region is cropped.
    pub fn validate(&self, image: &PixelBuffer) -> Result<(), TransformError> {
        match self {
            TransformParameters::Basic(params) => params.validate(),
            TransformParameters::Affine(params) => params.validate(image.width, image.height),
            TransformParameters::Roi(params) => params.validate(),
        }
    }
}

impl From<BasicParams> for TransformParameters {
    fn from(params: BasicParams) -> Self {
        TransformParameters::Basic(params)
    }
}

impl From<AffineParams> for TransformParameters {
    fn from(params: AffineParams) -> Self {
        TransformParameters::Affine(params)
    }
}

impl From<RoiParams> for TransformParameters {
    fn from(params: RoiParams) -> Self {
        TransformParameters::Roi(params)
    }
}

pub(crate) fn check_range(
    name: &'static str,
    value: f64,
    range: &RangeInclusive<f64>,
) -> Result<(), TransformError> {
    if !value.is_finite() {
        return Err(TransformError::invalid(name, format!("{} is not finite", value)));
    }
    if !range.contains(&value) {
        return Err(TransformError::invalid(
            name,
            format!(
                "{} is outside {}..={}",
                value,
                range.start(),
                range.end()
            ),
        ));
    }
    Ok(())
}

fn check_point(
    name: &'static str,
    point: Point,
    width: u32,
    height: u32,
) -> Result<(), TransformError> {
    if !point.x.is_finite() || !point.y.is_finite() {
        return Err(TransformError::invalid(
            name,
            format!("({}, {}) is not finite", point.x, point.y),
        ));
    }
    let inside = point.x >= 0.0
        && point.y >= 0.0
        && point.x < width as f64
        && point.y < height as f64;
    if !inside {
        return Err(TransformError::invalid(
            name,
            format!(
                "({}, {}) lies outside the {}x{} image",
                point.x, point.y, width, height
            ),
        ));
    }
    Ok(())
}
