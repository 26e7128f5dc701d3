//! JPEG/PNG decoding with EXIF orientation handling.

use std::io::Cursor;

use exif::{In, Reader, Tag};
use image::DynamicImage;
use tracing::debug;

use super::{DecodeError, ImageFormat, Orientation, PixelBuffer};

/// Detect the container format from the leading bytes.
///
/// # Errors
///
/// Returns `DecodeError::InvalidFormat` if the bytes match no known image
/// signature, and `DecodeError::UnsupportedFormat` if they are an image
/// container other than JPEG or PNG.
pub fn detect_format(bytes: &[u8]) -> Result<ImageFormat, DecodeError> {
    let format = image::guess_format(bytes).map_err(|_| DecodeError::InvalidFormat)?;
    ImageFormat::from_image_format(format)
}

/// Decode a JPEG or PNG image from bytes, applying EXIF orientation correction.
///
/// # Arguments
///
/// * `bytes` - Raw file bytes
///
/// # Returns
///
/// A `PixelBuffer` with RGB pixel data and correct orientation applied.
/// Alpha channels are dropped and grayscale is expanded to RGB.
///
/// # Errors
///
/// Returns `DecodeError::InvalidFormat` or `DecodeError::UnsupportedFormat`
/// if the container is not JPEG/PNG, and `DecodeError::CorruptedFile` if
/// decoding fails part way.
pub fn decode_image(bytes: &[u8]) -> Result<PixelBuffer, DecodeError> {
    let format = detect_format(bytes)?;
    let orientation = extract_orientation(bytes);

    let img = decode_dynamic(bytes, format)?;
    let oriented = apply_orientation(img, orientation);

    let buffer = PixelBuffer::from_rgb_image(oriented.into_rgb8());
    debug!(
        ?format,
        ?orientation,
        width = buffer.width,
        height = buffer.height,
        "decoded image"
    );
    Ok(buffer)
}

/// Decode a JPEG or PNG image from bytes without applying EXIF orientation.
///
/// Use this when the caller handles orientation itself.
pub fn decode_image_no_orientation(bytes: &[u8]) -> Result<PixelBuffer, DecodeError> {
    let format = detect_format(bytes)?;
    let img = decode_dynamic(bytes, format)?;
    Ok(PixelBuffer::from_rgb_image(img.into_rgb8()))
}

/// Extract EXIF orientation value from image bytes (for external use).
pub fn get_orientation(bytes: &[u8]) -> Orientation {
    extract_orientation(bytes)
}

fn decode_dynamic(bytes: &[u8], format: ImageFormat) -> Result<DynamicImage, DecodeError> {
    let img = image::load_from_memory_with_format(bytes, format.to_image_format())
        .map_err(|e| DecodeError::CorruptedFile(e.to_string()))?;

    if img.width() == 0 || img.height() == 0 {
        return Err(DecodeError::CorruptedFile(
            "image has zero width or height".to_string(),
        ));
    }

    Ok(img)
}

/// Extract EXIF orientation from JPEG or PNG bytes.
///
/// Returns `Orientation::Normal` if no EXIF data is found or orientation
/// cannot be determined.
fn extract_orientation(bytes: &[u8]) -> Orientation {
    let mut cursor = Cursor::new(bytes);

    match Reader::new().read_from_container(&mut cursor) {
        Ok(exif) => exif
            .get_field(Tag::Orientation, In::PRIMARY)
            .and_then(|field| field.value.get_uint(0))
            .map(Orientation::from)
            .unwrap_or_default(),
        Err(_) => Orientation::Normal,
    }
}

/// Apply EXIF orientation transformation to an image.
fn apply_orientation(img: DynamicImage, orientation: Orientation) -> DynamicImage {
    match orientation {
        Orientation::Normal => img,
        Orientation::FlipHorizontal => img.fliph(),
        Orientation::Rotate180 => img.rotate180(),
        Orientation::FlipVertical => img.flipv(),
        Orientation::Transpose => img.rotate90().fliph(),
        Orientation::Rotate90CW => img.rotate90(),
        Orientation::Transverse => img.rotate270().fliph(),
        Orientation::Rotate270CW => img.rotate270(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encode::encode_png;
    use image::codecs::jpeg::JpegEncoder;
    use image::{ExtendedColorType, ImageEncoder};

    fn two_by_one() -> PixelBuffer {
        PixelBuffer::new(2, 1, vec![255, 0, 0, 0, 255, 0])
    }

    fn encode_test_jpeg(width: u32, height: u32) -> Vec<u8> {
        let pixels = vec![200u8; (width * height * 3) as usize];
        let mut out = Vec::new();
        JpegEncoder::new_with_quality(&mut out, 90)
            .write_image(&pixels, width, height, ExtendedColorType::Rgb8)
            .unwrap();
        out
    }

    #[test]
    fn test_decode_png_is_lossless() {
        let original = two_by_one();
        let png = encode_png(&original).unwrap();

        let decoded = decode_image(&png).unwrap();
        assert_eq!(decoded, original);
    }

    #[test]
    fn test_decode_jpeg() {
        let jpeg = encode_test_jpeg(16, 8);

        let decoded = decode_image(&jpeg).unwrap();
        assert_eq!(decoded.dimensions(), (16, 8));
        assert_eq!(decoded.pixels.len(), 16 * 8 * 3);
    }

    #[test]
    fn test_detect_format() {
        assert_eq!(detect_format(&encode_test_jpeg(2, 2)).unwrap(), ImageFormat::Jpeg);
        assert_eq!(
            detect_format(&encode_png(&two_by_one()).unwrap()).unwrap(),
            ImageFormat::Png
        );
    }

    #[test]
    fn test_decode_unsupported_container() {
        let gif = b"GIF89a\x01\x00\x01\x00\x00\x00\x00";
        match decode_image(gif) {
            Err(DecodeError::UnsupportedFormat(_)) => {}
            other => panic!("Expected UnsupportedFormat, got: {:?}", other),
        }
    }

    #[test]
    fn test_decode_invalid_bytes() {
        let result = decode_image(&[0x00, 0x01, 0x02, 0x03]);
        assert!(matches!(result, Err(DecodeError::InvalidFormat)));
    }

    #[test]
    fn test_decode_empty_bytes() {
        assert!(decode_image(&[]).is_err());
    }

    #[test]
    fn test_decode_truncated_png() {
        let png = encode_png(&PixelBuffer::filled(8, 8, [1, 2, 3])).unwrap();
        let truncated = &png[0..24];

        match decode_image(truncated) {
            Err(DecodeError::CorruptedFile(_)) => {}
            other => panic!("Expected CorruptedFile, got: {:?}", other),
        }
    }

    #[test]
    fn test_no_orientation_variant_matches_for_untagged_images() {
        let png = encode_png(&two_by_one()).unwrap();
        assert_eq!(
            decode_image_no_orientation(&png).unwrap(),
            decode_image(&png).unwrap()
        );
    }

    #[test]
    fn test_orientation_extraction_no_exif() {
        assert_eq!(get_orientation(&encode_test_jpeg(4, 4)), Orientation::Normal);
        assert_eq!(get_orientation(&[0x00, 0x01, 0x02]), Orientation::Normal);
    }

    /// Encode a JPEG and splice in an APP1 EXIF segment carrying `orientation`.
    fn jpeg_with_orientation(width: u32, height: u32, orientation: u16) -> Vec<u8> {
        use exif::experimental::Writer;
        use exif::{Field, Value};

        let field = Field {
            tag: Tag::Orientation,
            ifd_num: In::PRIMARY,
            value: Value::Short(vec![orientation]),
        };
        let mut writer = Writer::new();
        writer.push_field(&field);
        let mut tiff = Cursor::new(Vec::new());
        writer.write(&mut tiff, false).unwrap();
        let tiff = tiff.into_inner();

        let mut payload = b"Exif\0\0".to_vec();
        payload.extend_from_slice(&tiff);
        let segment_len = (payload.len() + 2) as u16;

        let jpeg = encode_test_jpeg(width, height);
        let mut out = jpeg[..2].to_vec(); // SOI
        out.extend_from_slice(&[0xFF, 0xE1]);
        out.extend_from_slice(&segment_len.to_be_bytes());
        out.extend_from_slice(&payload);
        out.extend_from_slice(&jpeg[2..]);
        out
    }

    #[test]
    fn test_exif_orientation_read_from_jpeg() {
        let jpeg = jpeg_with_orientation(16, 8, 6);
        assert_eq!(get_orientation(&jpeg), Orientation::Rotate90CW);
    }

    #[test]
    fn test_decode_applies_exif_orientation() {
        let jpeg = jpeg_with_orientation(16, 8, 6);

        let oriented = decode_image(&jpeg).unwrap();
        assert_eq!(oriented.dimensions(), (8, 16));

        let raw = decode_image_no_orientation(&jpeg).unwrap();
        assert_eq!(raw.dimensions(), (16, 8));
    }

    #[test]
    fn test_decode_normal_exif_orientation_keeps_layout() {
        let jpeg = jpeg_with_orientation(16, 8, 1);
        assert_eq!(get_orientation(&jpeg), Orientation::Normal);
        assert_eq!(decode_image(&jpeg).unwrap().dimensions(), (16, 8));
    }

    #[test]
    fn test_apply_orientation_rotate90() {
        let img = DynamicImage::ImageRgb8(two_by_one().to_rgb_image().unwrap());

        let rgb = apply_orientation(img, Orientation::Rotate90CW).into_rgb8();
        assert_eq!(rgb.dimensions(), (1, 2));
    }

    #[test]
    fn test_apply_orientation_rotate180() {
        let img = DynamicImage::ImageRgb8(two_by_one().to_rgb_image().unwrap());

        let rgb = apply_orientation(img, Orientation::Rotate180).into_rgb8();
        assert_eq!(rgb.get_pixel(0, 0).0, [0, 255, 0]);
        assert_eq!(rgb.get_pixel(1, 0).0, [255, 0, 0]);
    }

    #[test]
    fn test_apply_orientation_flip_horizontal() {
        let img = DynamicImage::ImageRgb8(two_by_one().to_rgb_image().unwrap());

        let rgb = apply_orientation(img, Orientation::FlipHorizontal).into_rgb8();
        assert_eq!(rgb.get_pixel(0, 0).0, [0, 255, 0]);
        assert_eq!(rgb.get_pixel(1, 0).0, [255, 0, 0]);
    }
}
