//! PNG encoding WASM bindings for downloads.
//!
//! ```typescript
//! import { encode_png_from_image } from '@geoxform/wasm';
//!
//! const png = encode_png_from_image(result);
//! const blob = new Blob([png], { type: 'image/png' });
//! ```

use crate::types::{to_js_error, JsPixelBuffer};
use geoxform_core::encode;
use wasm_bindgen::prelude::*;

/// Encode RGB pixel data to PNG bytes.
///
/// # Arguments
///
/// * `pixels` - RGB pixel data as a `Uint8Array` (3 bytes per pixel, row-major order)
/// * `width` - Image width in pixels
/// * `height` - Image height in pixels
///
/// # Errors
///
/// Returns an error if:
/// - The pixel data length doesn't match width * height * 3
/// - Width or height is zero
/// - Encoding fails internally
#[wasm_bindgen]
pub fn encode_png(pixels: &[u8], width: u32, height: u32) -> Result<Vec<u8>, JsValue> {
    encode::encode_png_raw(pixels, width, height).map_err(to_js_error)
}

/// Encode a JsPixelBuffer to PNG bytes.
#[wasm_bindgen]
pub fn encode_png_from_image(image: &JsPixelBuffer) -> Result<Vec<u8>, JsValue> {
    encode::encode_png(&image.to_buffer()).map_err(to_js_error)
}
