//! Image encoding for download.
//!
//! Output is always PNG: lossless, so the engine's pixels reach the user
//! exactly as computed.

mod png;

pub use png::{encode_png, encode_png_raw, EncodeError};
