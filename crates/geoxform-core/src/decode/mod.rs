//! Image codec: bytes in, [`PixelBuffer`] out.
//!
//! This module provides functionality for:
//! - Detecting the container format of uploaded bytes (JPEG or PNG)
//! - Decoding to an RGB pixel buffer
//! - Applying the EXIF orientation tag so pixels are upright
//!
//! All operations are synchronous and hold no state between calls.

mod reader;
mod types;

pub use reader::{decode_image, decode_image_no_orientation, detect_format, get_orientation};
pub use types::{DecodeError, ImageFormat, Orientation, PixelBuffer, CHANNELS};
