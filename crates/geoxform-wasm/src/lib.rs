//! Geoxform WASM - WebAssembly bindings for the geoxform transform engine
//!
//! This crate exposes the geoxform-core functionality to JavaScript/TypeScript
//! applications.
//!
//! # Module Structure
//!
//! - `types` - WASM-compatible wrapper types for image data
//! - `decode` - Image decoding bindings (JPEG, PNG)
//! - `encode` - PNG encoding for downloads
//! - `transform` - Basic, affine and region-of-interest transforms
//! - `batch` - One transform applied across many files
//!
//! # Usage
//!
//! ```typescript
//! import init, { decode_image, apply_basic, encode_png_from_image } from '@geoxform/wasm';
//!
//! // Initialize WASM module (must call first)
//! await init();
//!
//! const bytes = new Uint8Array(await file.arrayBuffer());
//! const image = decode_image(bytes);
//! const rotated = apply_basic(image, 30, 1.0, 0, 0);
//! const png = encode_png_from_image(rotated);
//! ```

use wasm_bindgen::prelude::*;

mod batch;
mod decode;
mod encode;
mod transform;
mod types;

// Re-export public types
pub use batch::process_batch;
pub use decode::{decode_image, is_supported_image};
pub use encode::{encode_png, encode_png_from_image};
pub use transform::{apply_affine, apply_basic, apply_transform, extract_and_scale_roi};
pub use types::{JsPixelBuffer, JsRoiResult};

/// Initialize the WASM module (called automatically on load)
#[wasm_bindgen(start)]
pub fn init() {}

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert_eq!(version(), env!("CARGO_PKG_VERSION"));
    }
}
