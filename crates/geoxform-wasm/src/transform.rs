//! WASM bindings for the transform engine.
//!
//! Every binding takes the source image by reference and returns a new
//! image; the source is never modified.
//!
//! # Example (TypeScript)
//!
//! ```typescript
//! // Basic mode: scale, then rotate, then translate
//! const out = apply_basic(image, 45, 1.5, 20, -10);
//!
//! // Affine mode: three source points and their destinations
//! const warped = apply_affine(
//!   image,
//!   [{ x: 50, y: 50 }, { x: 200, y: 50 }, { x: 50, y: 200 }],
//!   [{ x: 10, y: 100 }, { x: 200, y: 50 }, { x: 100, y: 250 }],
//! );
//!
//! // Any mode from a parameters object
//! const roi = apply_transform(image, { mode: 'roi', region: { x: 0, y: 0, width: 64, height: 64 }, scale_factor: 2 });
//! ```

use crate::types::{to_js_error, JsPixelBuffer, JsRoiResult};
use geoxform_core::transform::{self, BasicParams, Point, Rect, TransformParameters};
use wasm_bindgen::prelude::*;

/// Scale, rotate and translate an image.
///
/// # Arguments
///
/// * `rotation_degrees` - 0 to 360, positive = counter-clockwise
/// * `scale_factor` - 0.1 to 3.0
/// * `translate_x` / `translate_y` - -500 to 500 pixels
///
/// Rotation grows the canvas to fit the rotated image; uncovered pixels
/// are white.
#[wasm_bindgen]
pub fn apply_basic(
    image: &JsPixelBuffer,
    rotation_degrees: f64,
    scale_factor: f64,
    translate_x: f64,
    translate_y: f64,
) -> Result<JsPixelBuffer, JsValue> {
    let params = BasicParams {
        rotation_degrees,
        scale_factor,
        translate_x,
        translate_y,
    };
    transform::apply_basic(&image.to_buffer(), &params)
        .map(JsPixelBuffer::from_buffer)
        .map_err(to_js_error)
}

/// Warp an image so three source points land on three destination points.
///
/// # Arguments
///
/// * `source_points` - Array of three `{x: number, y: number}` objects
/// * `dest_points` - Array of three `{x: number, y: number}` objects
///
/// # Errors
///
/// Returns an error if the arrays cannot be read as three points, a point
/// lies outside the image, or either set of points is collinear.
#[wasm_bindgen]
pub fn apply_affine(
    image: &JsPixelBuffer,
    source_points: JsValue,
    dest_points: JsValue,
) -> Result<JsPixelBuffer, JsValue> {
    let source_points: [Point; 3] = serde_wasm_bindgen::from_value(source_points)
        .map_err(|e| JsValue::from_str(&format!("Invalid source points: {}", e)))?;
    let dest_points: [Point; 3] = serde_wasm_bindgen::from_value(dest_points)
        .map_err(|e| JsValue::from_str(&format!("Invalid destination points: {}", e)))?;

    transform::apply_affine(&image.to_buffer(), &source_points, &dest_points)
        .map(JsPixelBuffer::from_buffer)
        .map_err(to_js_error)
}

/// Crop a region and scale the crop.
///
/// The region is clamped to the image; a region with no overlap is an
/// error.
#[wasm_bindgen]
pub fn extract_and_scale_roi(
    image: &JsPixelBuffer,
    x: i32,
    y: i32,
    width: u32,
    height: u32,
    scale_factor: f64,
) -> Result<JsRoiResult, JsValue> {
    transform::extract_and_scale_roi(&image.to_buffer(), &Rect::new(x, y, width, height), scale_factor)
        .map(JsRoiResult::from)
        .map_err(to_js_error)
}

/// Apply a transform described by a parameters object.
///
/// `params` has a `mode` of `"basic"`, `"affine"` or `"roi"` plus that
/// mode's fields. For `"roi"` the scaled region is returned.
#[wasm_bindgen]
pub fn apply_transform(image: &JsPixelBuffer, params: JsValue) -> Result<JsPixelBuffer, JsValue> {
    let params: TransformParameters = serde_wasm_bindgen::from_value(params)
        .map_err(|e| JsValue::from_str(&format!("Invalid transform parameters: {}", e)))?;

    transform::apply(&image.to_buffer(), &params)
        .map(|output| JsPixelBuffer::from_buffer(output.into_image()))
        .map_err(to_js_error)
}
