//! Core types shared by the codec and the transform engine.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Number of interleaved channels in a [`PixelBuffer`] (RGB).
pub const CHANNELS: usize = 3;

/// Error types for image decoding operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// The bytes are not a recognizable image container.
    #[error("Invalid or unsupported image format")]
    InvalidFormat,

    /// The container was recognized but is not one we accept.
    #[error("Unsupported image format: {0}")]
    UnsupportedFormat(String),

    /// The image file is corrupted or incomplete.
    #[error("Corrupted or incomplete image file: {0}")]
    CorruptedFile(String),
}

/// Container formats accepted by [`decode_image`](super::decode_image).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ImageFormat {
    Jpeg,
    Png,
}

impl ImageFormat {
    /// Map the `image` crate's detected format onto the accepted set.
    pub fn from_image_format(format: image::ImageFormat) -> Result<Self, DecodeError> {
        match format {
            image::ImageFormat::Jpeg => Ok(ImageFormat::Jpeg),
            image::ImageFormat::Png => Ok(ImageFormat::Png),
            other => Err(DecodeError::UnsupportedFormat(format!("{:?}", other))),
        }
    }

    /// Convert back to the `image` crate's format enum.
    pub fn to_image_format(self) -> image::ImageFormat {
        match self {
            ImageFormat::Jpeg => image::ImageFormat::Jpeg,
            ImageFormat::Png => image::ImageFormat::Png,
        }
    }
}

/// EXIF orientation values (1-8).
/// See: https://exiftool.org/TagNames/EXIF.html
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[repr(u8)]
pub enum Orientation {
    /// Normal (no transformation needed).
    #[default]
    Normal = 1,
    /// Horizontal flip.
    FlipHorizontal = 2,
    /// Rotate 180 degrees.
    Rotate180 = 3,
    /// Vertical flip.
    FlipVertical = 4,
    /// Transpose (flip horizontal + rotate 270 CW).
    Transpose = 5,
    /// Rotate 90 degrees clockwise.
    Rotate90CW = 6,
    /// Transverse (flip horizontal + rotate 90 CW).
    Transverse = 7,
    /// Rotate 270 degrees clockwise (90 CCW).
    Rotate270CW = 8,
}

impl From<u32> for Orientation {
    fn from(value: u32) -> Self {
        match value {
            2 => Orientation::FlipHorizontal,
            3 => Orientation::Rotate180,
            4 => Orientation::FlipVertical,
            5 => Orientation::Transpose,
            6 => Orientation::Rotate90CW,
            7 => Orientation::Transverse,
            8 => Orientation::Rotate270CW,
            _ => Orientation::Normal,
        }
    }
}

/// An owned RGB raster.
///
/// Pixels are stored row-major, 3 bytes per pixel. A buffer handed out by
/// the codec or the engine always has non-zero width and height.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    /// Image width in pixels.
    pub width: u32,
    /// Image height in pixels.
    pub height: u32,
    /// RGB pixel data in row-major order.
    /// Length is width * height * 3.
    pub pixels: Vec<u8>,
}

impl PixelBuffer {
    /// Create a new PixelBuffer with the given dimensions and pixel data.
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> Self {
        debug_assert_eq!(
            pixels.len(),
            width as usize * height as usize * CHANNELS,
            "Pixel buffer size mismatch"
        );
        Self {
            width,
            height,
            pixels,
        }
    }

    /// Create a buffer where every pixel has the same color.
    pub fn filled(width: u32, height: u32, color: [u8; 3]) -> Self {
        let count = width as usize * height as usize;
        let mut pixels = Vec::with_capacity(count * CHANNELS);
        for _ in 0..count {
            pixels.extend_from_slice(&color);
        }
        Self {
            width,
            height,
            pixels,
        }
    }

    /// Create a PixelBuffer from an image::RgbImage.
    pub fn from_rgb_image(img: image::RgbImage) -> Self {
        let (width, height) = img.dimensions();
        Self {
            width,
            height,
            pixels: img.into_raw(),
        }
    }

    /// Convert to an image::RgbImage for further processing.
    ///
    /// Returns `None` if the pixel data does not match the dimensions.
    pub fn to_rgb_image(&self) -> Option<image::RgbImage> {
        image::RgbImage::from_raw(self.width, self.height, self.pixels.clone())
    }

    /// (width, height) in pixels.
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Read the pixel at (x, y).
    ///
    /// Returns `None` outside the buffer, or where a malformed buffer holds
    /// too few bytes.
    pub fn get_pixel(&self, x: u32, y: u32) -> Option<[u8; 3]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = (y as usize * self.width as usize + x as usize) * CHANNELS;
        match self.pixels.get(idx..idx + CHANNELS) {
            Some(&[r, g, b]) => Some([r, g, b]),
            _ => None,
        }
    }

    /// Get the size of the pixel buffer in bytes.
    pub fn byte_size(&self) -> usize {
        self.pixels.len()
    }

    /// Check if this is an empty/invalid image.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0 || self.pixels.is_empty()
    }

    /// True when the pixel data length agrees with the dimensions.
    pub fn is_consistent(&self) -> bool {
        self.pixels.len() == self.width as usize * self.height as usize * CHANNELS
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_orientation_from_u32() {
        assert_eq!(Orientation::from(1), Orientation::Normal);
        assert_eq!(Orientation::from(6), Orientation::Rotate90CW);
        assert_eq!(Orientation::from(99), Orientation::Normal); // Invalid defaults to Normal
    }

    #[test]
    fn test_image_format_mapping() {
        assert_eq!(
            ImageFormat::from_image_format(image::ImageFormat::Png).unwrap(),
            ImageFormat::Png
        );
        assert_eq!(
            ImageFormat::from_image_format(image::ImageFormat::Jpeg).unwrap(),
            ImageFormat::Jpeg
        );
        assert!(matches!(
            ImageFormat::from_image_format(image::ImageFormat::Gif),
            Err(DecodeError::UnsupportedFormat(_))
        ));
        assert_eq!(ImageFormat::Png.to_image_format(), image::ImageFormat::Png);
    }

    #[test]
    fn test_pixel_buffer_creation() {
        let buffer = PixelBuffer::new(100, 50, vec![0u8; 100 * 50 * 3]);

        assert_eq!(buffer.dimensions(), (100, 50));
        assert_eq!(buffer.byte_size(), 15000);
        assert!(!buffer.is_empty());
        assert!(buffer.is_consistent());
    }

    #[test]
    fn test_pixel_buffer_empty() {
        let buffer = PixelBuffer::new(0, 0, vec![]);
        assert!(buffer.is_empty());
    }

    #[test]
    fn test_filled_and_get_pixel() {
        let buffer = PixelBuffer::filled(3, 2, [10, 20, 30]);
        assert_eq!(buffer.pixels.len(), 18);
        assert_eq!(buffer.get_pixel(2, 1), Some([10, 20, 30]));
        assert_eq!(buffer.get_pixel(3, 0), None);
        assert_eq!(buffer.get_pixel(0, 2), None);
    }

    #[test]
    fn test_rgb_image_round_trip_keeps_layout() {
        let pixels = vec![1, 2, 3, 4, 5, 6];
        let buffer = PixelBuffer::new(2, 1, pixels.clone());
        let rgb = buffer.to_rgb_image().unwrap();
        assert_eq!(rgb.get_pixel(1, 0).0, [4, 5, 6]);
        assert_eq!(PixelBuffer::from_rgb_image(rgb).pixels, pixels);
    }

    #[test]
    fn test_to_rgb_image_rejects_mismatched_data() {
        let buffer = PixelBuffer {
            width: 4,
            height: 4,
            pixels: vec![0u8; 5],
        };
        assert!(!buffer.is_consistent());
        assert!(buffer.to_rgb_image().is_none());
    }

    #[test]
    fn test_get_pixel_on_short_buffer() {
        let buffer = PixelBuffer {
            width: 4,
            height: 4,
            pixels: vec![0u8; 5],
        };
        assert_eq!(buffer.get_pixel(3, 3), None);
        // The first pixel is still fully present.
        assert_eq!(buffer.get_pixel(0, 0), Some([0, 0, 0]));
        assert_eq!(buffer.get_pixel(1, 0), None);
    }

    #[test]
    fn test_decode_error_display() {
        let err = DecodeError::UnsupportedFormat("Gif".to_string());
        assert_eq!(err.to_string(), "Unsupported image format: Gif");

        let err = DecodeError::InvalidFormat;
        assert_eq!(err.to_string(), "Invalid or unsupported image format");
    }
}
