//! 2x3 affine matrices.
//!
//! ```text
//! | a  b  tx |
//! | c  d  ty |
//! ```
//!
//! A point maps as `x' = a*x + b*y + tx`, `y' = c*x + d*y + ty`. Matrices
//! are values: every operation returns a fresh matrix.

use serde::{Deserialize, Serialize};

/// Twice the signed area below which three points count as collinear.
pub const COLLINEAR_EPSILON: f64 = 1e-6;

/// Determinant magnitude below which a linear part is treated as singular.
const SINGULAR_EPSILON: f64 = 1e-12;

/// A point in pixel coordinates (origin top-left, y down).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Twice the signed area of the triangle (p1, p2, p3).
///
/// Zero when the points are collinear.
pub fn triangle_area2(points: &[Point; 3]) -> f64 {
    let [p1, p2, p3] = points;
    p1.x * (p2.y - p3.y) + p2.x * (p3.y - p1.y) + p3.x * (p1.y - p2.y)
}

/// A 2D affine transform: linear part plus translation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Matrix2x3 {
    /// Coefficients [a, b, tx, c, d, ty]
    coeffs: [f64; 6],
}

impl Default for Matrix2x3 {
    fn default() -> Self {
        Self::identity()
    }
}

impl Matrix2x3 {
    pub fn identity() -> Self {
        Self {
            coeffs: [1.0, 0.0, 0.0, 0.0, 1.0, 0.0],
        }
    }

    /// Create from raw coefficients [a, b, tx, c, d, ty]
    pub fn from_coeffs(coeffs: [f64; 6]) -> Self {
        Self { coeffs }
    }

    /// Get the coefficients [a, b, tx, c, d, ty]
    pub fn coeffs(&self) -> &[f64; 6] {
        &self.coeffs
    }

    /// Pure shift: `x' = x + tx`, `y' = y + ty`.
    pub fn translation(tx: f64, ty: f64) -> Self {
        Self {
            coeffs: [1.0, 0.0, tx, 0.0, 1.0, ty],
        }
    }

    /// Scale about the origin.
    pub fn scale(sx: f64, sy: f64) -> Self {
        Self {
            coeffs: [sx, 0.0, 0.0, 0.0, sy, 0.0],
        }
    }

    /// Rotation about `center` by `angle_degrees`.
    ///
    /// Positive angles rotate counter-clockwise as seen on screen (y axis
    /// pointing down), the same convention as OpenCV's
    /// `getRotationMatrix2D`:
    ///
    /// ```text
    /// |  cos  sin  (1-cos)*cx - sin*cy |
    /// | -sin  cos  sin*cx + (1-cos)*cy |
    /// ```
    pub fn rotation_about(center: Point, angle_degrees: f64) -> Self {
        let theta = angle_degrees.to_radians();
        let cos = theta.cos();
        let sin = theta.sin();

        Self {
            coeffs: [
                cos,
                sin,
                (1.0 - cos) * center.x - sin * center.y,
                -sin,
                cos,
                sin * center.x + (1.0 - cos) * center.y,
            ],
        }
    }

    /// Solve for the unique affine map sending `src[i]` to `dst[i]`.
    ///
    /// Returns `None` when either triangle is degenerate (collinear points):
    /// a collinear source leaves the system singular, and a collinear
    /// destination yields a map that cannot be inverted for resampling.
    pub fn from_three_points(src: &[Point; 3], dst: &[Point; 3]) -> Option<Self> {
        let det = triangle_area2(src);
        if det.abs() < COLLINEAR_EPSILON || triangle_area2(dst).abs() < COLLINEAR_EPSILON {
            return None;
        }

        // Cramer's rule on | x_i  y_i  1 | * [p q r]^T = v_i, once for the
        // x row and once for the y row of the result.
        let [p1, p2, p3] = src;
        let solve = |v1: f64, v2: f64, v3: f64| -> (f64, f64, f64) {
            let p = v1 * (p2.y - p3.y) + v2 * (p3.y - p1.y) + v3 * (p1.y - p2.y);
            let q = p1.x * (v2 - v3) + p2.x * (v3 - v1) + p3.x * (v1 - v2);
            let r = p1.x * (p2.y * v3 - p3.y * v2) - p1.y * (p2.x * v3 - p3.x * v2)
                + v1 * (p2.x * p3.y - p3.x * p2.y);
            (p / det, q / det, r / det)
        };

        let (a, b, tx) = solve(dst[0].x, dst[1].x, dst[2].x);
        let (c, d, ty) = solve(dst[0].y, dst[1].y, dst[2].y);

        Some(Self {
            coeffs: [a, b, tx, c, d, ty],
        })
    }

    /// Determinant of the linear part.
    pub fn determinant(&self) -> f64 {
        let [a, b, _, c, d, _] = self.coeffs;
        a * d - b * c
    }

    /// The inverse map, or `None` if the linear part is singular.
    pub fn inverse(&self) -> Option<Self> {
        let [a, b, tx, c, d, ty] = self.coeffs;

        let det = self.determinant();
        if !det.is_finite() || det.abs() < SINGULAR_EPSILON {
            return None;
        }
        let inv_det = 1.0 / det;

        let a_inv = d * inv_det;
        let b_inv = -b * inv_det;
        let c_inv = -c * inv_det;
        let d_inv = a * inv_det;

        Some(Self {
            coeffs: [
                a_inv,
                b_inv,
                -(a_inv * tx + b_inv * ty),
                c_inv,
                d_inv,
                -(c_inv * tx + d_inv * ty),
            ],
        })
    }

    /// Apply `self` first, then `other`.
    pub fn then(&self, other: &Self) -> Self {
        let [a1, b1, tx1, c1, d1, ty1] = self.coeffs;
        let [a2, b2, tx2, c2, d2, ty2] = other.coeffs;

        Self {
            coeffs: [
                a2 * a1 + b2 * c1,
                a2 * b1 + b2 * d1,
                a2 * tx1 + b2 * ty1 + tx2,
                c2 * a1 + d2 * c1,
                c2 * b1 + d2 * d1,
                c2 * tx1 + d2 * ty1 + ty2,
            ],
        }
    }

    /// Shift the translation terms by (dx, dy).
    pub fn translated(&self, dx: f64, dy: f64) -> Self {
        let mut coeffs = self.coeffs;
        coeffs[2] += dx;
        coeffs[5] += dy;
        Self { coeffs }
    }

    #[inline]
    pub fn transform_point(&self, pt: Point) -> Point {
        let [a, b, tx, c, d, ty] = self.coeffs;
        Point {
            x: a * pt.x + b * pt.y + tx,
            y: c * pt.x + d * pt.y + ty,
        }
    }

    pub fn is_finite(&self) -> bool {
        self.coeffs.iter().all(|v| v.is_finite())
    }
}
