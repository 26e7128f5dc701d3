//! Image decoding WASM bindings.
//!
//! # Example
//!
//! ```typescript
//! import { decode_image, is_supported_image } from '@geoxform/wasm';
//!
//! const bytes = new Uint8Array(await file.arrayBuffer());
//! if (is_supported_image(bytes)) {
//!   const image = decode_image(bytes);
//!   console.log(`Decoded ${image.width}x${image.height}`);
//! }
//! ```

use crate::types::{to_js_error, JsPixelBuffer};
use geoxform_core::decode;
use wasm_bindgen::prelude::*;

/// Decode a JPEG or PNG image from bytes.
///
/// The EXIF orientation tag is applied, so the returned pixels are upright.
///
/// # Errors
///
/// Returns an error if:
/// - The bytes are not a recognizable image
/// - The image is neither JPEG nor PNG
/// - The file is corrupted or truncated
#[wasm_bindgen]
pub fn decode_image(bytes: &[u8]) -> Result<JsPixelBuffer, JsValue> {
    decode::decode_image(bytes)
        .map(JsPixelBuffer::from_buffer)
        .map_err(to_js_error)
}

/// Check whether bytes look like an image `decode_image` accepts.
///
/// Only the header is inspected; a `true` result does not guarantee the
/// rest of the file decodes.
#[wasm_bindgen]
pub fn is_supported_image(bytes: &[u8]) -> bool {
    decode::detect_format(bytes).is_ok()
}


#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_decode_invalid_bytes() {
        assert!(decode_image(b"definitely not an image").is_err());
    }
}
