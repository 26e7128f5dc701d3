//! WASM-compatible wrapper types for image data.
//!
//! These types wrap the core geoxform buffers and handle the conversion
//! between Rust and JavaScript data representations.

use geoxform_core::decode::PixelBuffer;
use geoxform_core::transform::RoiResult;
use wasm_bindgen::prelude::*;

/// An RGB image held in WASM memory.
///
/// # Memory Management
///
/// The pixel data is stored in WASM memory. When you call `pixels()`, a copy is made
/// to JavaScript memory as a `Uint8Array`. Keep images in WASM memory while chaining
/// transforms and only extract pixels for display or download.
///
/// The `free()` method can be called to explicitly release WASM memory, but this is
/// optional as wasm-bindgen's finalizer will handle cleanup automatically.
#[wasm_bindgen]
pub struct JsPixelBuffer {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

#[wasm_bindgen]
impl JsPixelBuffer {
    /// Create a new JsPixelBuffer from dimensions and pixel data.
    ///
    /// # Arguments
    /// * `width` - Image width in pixels
    /// * `height` - Image height in pixels
    /// * `pixels` - RGB pixel data (3 bytes per pixel, row-major order)
    ///
    /// The length is not checked here; transforms reject inconsistent buffers.
    #[wasm_bindgen(constructor)]
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> JsPixelBuffer {
        JsPixelBuffer {
            width,
            height,
            pixels,
        }
    }

    /// Get the image width in pixels
    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Get the image height in pixels
    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Get the number of bytes in the pixel buffer (width * height * 3 for RGB)
    #[wasm_bindgen(getter)]
    pub fn byte_length(&self) -> usize {
        self.pixels.len()
    }

    /// Returns RGB pixel data as Uint8Array.
    ///
    /// Note: This creates a copy of the pixel data.
    pub fn pixels(&self) -> Vec<u8> {
        self.pixels.clone()
    }

    /// Explicitly free WASM memory.
    ///
    /// This is optional - wasm-bindgen's finalizer will handle cleanup automatically.
    pub fn free(self) {
        // Dropping self releases the memory
    }
}

impl JsPixelBuffer {
    pub(crate) fn from_buffer(buffer: PixelBuffer) -> Self {
        Self {
            width: buffer.width,
            height: buffer.height,
            pixels: buffer.pixels,
        }
    }

    /// Copy into a core buffer. Clones the pixel data.
    pub(crate) fn to_buffer(&self) -> PixelBuffer {
        // Built field by field so a malformed buffer reaches the engine's
        // validation instead of a debug assertion.
        PixelBuffer {
            width: self.width,
            height: self.height,
            pixels: self.pixels.clone(),
        }
    }
}

/// Both outputs of a region-of-interest extraction.
#[wasm_bindgen]
pub struct JsRoiResult {
    original: PixelBuffer,
    scaled: PixelBuffer,
}

#[wasm_bindgen]
impl JsRoiResult {
    /// The region exactly as cropped from the source.
    #[wasm_bindgen(getter)]
    pub fn original(&self) -> JsPixelBuffer {
        JsPixelBuffer::from_buffer(self.original.clone())
    }

    /// The cropped region after scaling.
    #[wasm_bindgen(getter)]
    pub fn scaled(&self) -> JsPixelBuffer {
        JsPixelBuffer::from_buffer(self.scaled.clone())
    }
}

impl From<RoiResult> for JsRoiResult {
    fn from(roi: RoiResult) -> Self {
        Self {
            original: roi.original,
            scaled: roi.scaled,
        }
    }
}

/// Convert any displayable error into a JS string error.
pub(crate) fn to_js_error(err: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_js_pixel_buffer_creation() {
        let img = JsPixelBuffer::new(100, 50, vec![0u8; 100 * 50 * 3]);
        assert_eq!(img.width(), 100);
        assert_eq!(img.height(), 50);
        assert_eq!(img.byte_length(), 15000);
    }

    #[test]
    fn test_js_pixel_buffer_pixels() {
        let pixels = vec![255u8, 128, 64, 32, 16, 8]; // 2 RGB pixels
        let img = JsPixelBuffer::new(2, 1, pixels.clone());
        assert_eq!(img.pixels(), pixels);
    }

    #[test]
    fn test_buffer_round_trip() {
        let buffer = PixelBuffer::filled(20, 10, [1, 2, 3]);
        let js_img = JsPixelBuffer::from_buffer(buffer.clone());
        assert_eq!(js_img.to_buffer(), buffer);
    }

    #[test]
    fn test_malformed_buffer_survives_conversion() {
        let js_img = JsPixelBuffer::new(10, 10, vec![0u8; 7]);
        let buffer = js_img.to_buffer();
        assert!(!buffer.is_consistent());
    }

    #[test]
    fn test_roi_result_getters() {
        let roi = RoiResult {
            original: PixelBuffer::filled(4, 2, [9, 9, 9]),
            scaled: PixelBuffer::filled(8, 4, [9, 9, 9]),
        };
        let js_roi = JsRoiResult::from(roi);
        assert_eq!(js_roi.original().width(), 4);
        assert_eq!(js_roi.scaled().height(), 4);
    }
}
