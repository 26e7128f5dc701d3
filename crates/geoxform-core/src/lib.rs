//! Geoxform Core - Geometric transform engine
//!
//! This crate provides the pure computation behind the geoxform playground:
//! decoding uploaded images, applying scale/rotate/translate, three-point
//! affine and region-of-interest transforms, and encoding results as PNG.
//!
//! The engine holds no state between calls. Every operation takes an
//! immutable parameter value and an input buffer and returns a new buffer,
//! so identical inputs always reproduce identical bytes.

pub mod batch;
pub mod decode;
pub mod encode;
pub mod transform;

pub use batch::{apply_batch, apply_batch_with_cancel, process_encoded_batch, BatchError, BatchOptions};
pub use decode::{decode_image, DecodeError, PixelBuffer};
pub use encode::{encode_png, EncodeError};
pub use transform::{
    apply, apply_affine, apply_basic, extract_and_scale_roi, AffineParams, BasicParams, Matrix2x3,
    Point, Rect, RoiParams, RoiResult, TransformError, TransformOutput, TransformParameters,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_transform_encode() {
        let image = PixelBuffer::filled(24, 16, [10, 200, 30]);
        let png = encode_png(&image).unwrap();

        let decoded = decode_image(&png).unwrap();
        let params = BasicParams {
            scale_factor: 0.5,
            ..BasicParams::default()
        };
        let output = apply(&decoded, &params.into()).unwrap();

        let bytes = encode_png(output.image()).unwrap();
        let round_tripped = decode_image(&bytes).unwrap();
        assert_eq!(round_tripped.dimensions(), (12, 8));
    }
}
