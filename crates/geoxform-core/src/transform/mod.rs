//! Geometric transforms over [`PixelBuffer`](crate::decode::PixelBuffer)s.
//!
//! Three operations are offered:
//!
//! 1. **Basic**: scale, then rotate, then translate ([`apply_basic`]).
//!    Each step is its own resampling pass and is skipped at its identity.
//! 2. **Affine**: the map fixed by three point correspondences
//!    ([`apply_affine`]), drawn on the original canvas size.
//! 3. **Region of interest**: crop a rectangle and return it alongside a
//!    rescaled copy ([`extract_and_scale_roi`]).
//!
//! [`apply`] takes a [`TransformParameters`] value and dispatches to one of
//! them. Every function is pure: the same input always produces the same
//! bytes.
//!
//! # Coordinate System
//!
//! - Origin is the top-left corner, x grows right, y grows down
//! - Rotation angles are in degrees, positive = counter-clockwise
//! - Points and regions are in source pixel coordinates
//! - Pixels with no source are white ([`BORDER_COLOR`])

mod affine;
mod matrix;
mod params;
mod pipeline;
mod roi;
mod rotation;
mod scale;
mod translate;
mod types;
mod warp;

pub use affine::{affine_from_points, apply_affine};
pub use matrix::{triangle_area2, Matrix2x3, Point, COLLINEAR_EPSILON};
pub use params::{
    AffineParams, BasicParams, RoiParams, TransformParameters, POINT_STEP, ROTATION_RANGE,
    ROTATION_STEP, SCALE_RANGE, SCALE_STEP, TRANSLATE_RANGE, TRANSLATE_STEP,
};
pub use pipeline::{apply, apply_basic};
pub use roi::{crop, extract_and_scale_roi, Rect, RoiResult};
pub use rotation::{apply_rotation, compute_rotated_bounds, rotation_matrix};
pub use scale::{apply_scale, scaled_dimensions};
pub use translate::apply_translation;
pub use types::{TransformError, TransformOutput};
pub use warp::{warp_affine, BORDER_COLOR};
