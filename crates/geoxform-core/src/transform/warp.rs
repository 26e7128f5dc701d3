//! Inverse-mapped affine resampling.
//!
//! For every pixel of the output canvas, the inverse matrix gives the
//! source coordinate, which is sampled with bilinear interpolation. Source
//! pixels outside the image read as [`BORDER_COLOR`], so exposed areas come
//! out solid white and edges blend into white the way a constant border
//! does in OpenCV's `warpAffine`.
//!
//! When the `parallel` feature is enabled, output rows are filled with rayon.

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use super::matrix::{Matrix2x3, Point};
use super::TransformError;
use crate::decode::{PixelBuffer, CHANNELS};

/// Fill color for pixels that map outside the source image.
pub const BORDER_COLOR: [u8; 3] = [255, 255, 255];

/// Resample `image` through the forward map `matrix` onto a
/// `out_width` x `out_height` canvas.
///
/// # Errors
///
/// * `TransformError::DegenerateOutput` if either output dimension is zero
/// * `TransformError::InvalidCorrespondence` if `matrix` is not invertible
pub fn warp_affine(
    image: &PixelBuffer,
    matrix: &Matrix2x3,
    out_width: u32,
    out_height: u32,
) -> Result<PixelBuffer, TransformError> {
    if out_width == 0 || out_height == 0 {
        return Err(TransformError::DegenerateOutput {
            width: out_width,
            height: out_height,
        });
    }

    let inverse = matrix
        .is_finite()
        .then(|| matrix.inverse())
        .flatten()
        .ok_or_else(|| {
            TransformError::InvalidCorrespondence("transform matrix is not invertible".to_string())
        })?;

    let row_len = out_width as usize * CHANNELS;
    let mut output = vec![0u8; row_len * out_height as usize];

    #[cfg(feature = "parallel")]
    output
        .par_chunks_mut(row_len)
        .enumerate()
        .for_each(|(y, row)| fill_row(image, &inverse, y, row));

    #[cfg(not(feature = "parallel"))]
    output
        .chunks_mut(row_len)
        .enumerate()
        .for_each(|(y, row)| fill_row(image, &inverse, y, row));

    Ok(PixelBuffer::new(out_width, out_height, output))
}

fn fill_row(image: &PixelBuffer, inverse: &Matrix2x3, y: usize, row: &mut [u8]) {
    for (x, dst) in row.chunks_exact_mut(CHANNELS).enumerate() {
        let src = inverse.transform_point(Point::new(x as f64, y as f64));
        dst.copy_from_slice(&sample_bilinear(image, src.x, src.y));
    }
}

/// Read a pixel as [f64; 3], substituting the border color outside the image.
#[inline]
fn pixel_or_border(image: &PixelBuffer, px: i64, py: i64) -> [f64; 3] {
    let color = if px >= 0 && py >= 0 && px < image.width as i64 && py < image.height as i64 {
        let idx = (py as usize * image.width as usize + px as usize) * CHANNELS;
        [image.pixels[idx], image.pixels[idx + 1], image.pixels[idx + 2]]
    } else {
        BORDER_COLOR
    };
    [color[0] as f64, color[1] as f64, color[2] as f64]
}

/// Sample a pixel using bilinear interpolation.
///
/// Bilinear interpolation considers the 4 nearest pixels and weights
/// their contribution based on distance.
pub(crate) fn sample_bilinear(image: &PixelBuffer, x: f64, y: f64) -> [u8; 3] {
    let xf = x.floor();
    let yf = y.floor();
    let x0 = xf as i64;
    let y0 = yf as i64;

    // Whole 2x2 neighbourhood outside the image.
    if x0 < -1 || y0 < -1 || x0 >= image.width as i64 || y0 >= image.height as i64 {
        return BORDER_COLOR;
    }

    let fx = x - xf;
    let fy = y - yf;

    let p00 = pixel_or_border(image, x0, y0);
    let p10 = pixel_or_border(image, x0 + 1, y0);
    let p01 = pixel_or_border(image, x0, y0 + 1);
    let p11 = pixel_or_border(image, x0 + 1, y0 + 1);

    let mut result = [0u8; 3];
    for i in 0..CHANNELS {
        let v = p00[i] * (1.0 - fx) * (1.0 - fy)
            + p10[i] * fx * (1.0 - fy)
            + p01[i] * (1.0 - fx) * fy
            + p11[i] * fx * fy;
        result[i] = v.clamp(0.0, 255.0).round() as u8;
    }

    result
}
