use kurbo::{Affine, Point, Size, Vec2};

/// Values with magnitude below this are treated as zero when factoring
/// scales out of a transform.
pub(crate) const NEARLY_ZERO: f64 = 1e-6;

/// Determinants with magnitude below this mark a matrix as singular.
const SINGULAR_DET: f64 = 1e-12;

/// Row-major 3x3 transform over `f64`, including a perspective row.
///
/// Points are treated as column vectors: `a * b` maps a point through `b`
/// first, then `a`. kurbo's [`Affine`] converts losslessly into the upper two
/// rows; the third row enables the perspective handling that the CTM
/// decomposition requires.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Matrix {
    rows: [[f64; 3]; 3],
}

impl Matrix {
    /// The identity transform.
    pub const IDENTITY: Matrix = Matrix {
        rows: [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]],
    };

    /// Build a matrix from row-major entries.
    pub fn from_rows(rows: [[f64; 3]; 3]) -> Self {
        Self { rows }
    }

    /// A pure translation.
    pub fn translate(v: impl Into<Vec2>) -> Self {
        let v = v.into();
        Self {
            rows: [[1.0, 0.0, v.x], [0.0, 1.0, v.y], [0.0, 0.0, 1.0]],
        }
    }

    /// A pure (possibly non-uniform) scale about the origin.
    pub fn scale(sx: f64, sy: f64) -> Self {
        Self {
            rows: [[sx, 0.0, 0.0], [0.0, sy, 0.0], [0.0, 0.0, 1.0]],
        }
    }

    /// A counter-clockwise rotation about the origin, in radians.
    pub fn rotate(radians: f64) -> Self {
        Affine::rotate(radians).into()
    }

    /// Entry at `(row, col)`.
    pub fn rc(&self, row: usize, col: usize) -> f64 {
        self.rows[row][col]
    }

    /// True when the matrix is exactly axis-aligned scale + translate.
    pub fn is_scale_translate(&self) -> bool {
        self.rows[0][1] == 0.0
            && self.rows[1][0] == 0.0
            && !self.has_perspective()
    }

    /// True when the bottom row differs from `[0, 0, 1]`.
    pub fn has_perspective(&self) -> bool {
        self.rows[2][0] != 0.0 || self.rows[2][1] != 0.0 || self.rows[2][2] != 1.0
    }

    /// Entry-wise near-equality within `epsilon`.
    pub fn nearly_equal(&self, other: &Matrix, epsilon: f64) -> bool {
        for r in 0..3 {
            for c in 0..3 {
                if (self.rows[r][c] - other.rows[r][c]).abs() > epsilon {
                    return false;
                }
            }
        }
        true
    }

    /// Map a position, applying the perspective divide. A point on or behind
    /// the `w = 0` plane yields non-finite coordinates, which callers treat
    /// as transparent geometry.
    pub fn map_point(&self, p: Point) -> Point {
        let m = &self.rows;
        let x = m[0][0] * p.x + m[0][1] * p.y + m[0][2];
        let y = m[1][0] * p.x + m[1][1] * p.y + m[1][2];
        let w = m[2][0] * p.x + m[2][1] * p.y + m[2][2];
        Point::new(x / w, y / w)
    }

    /// Map a direction: the translation component does not apply.
    pub fn map_vector(&self, v: Vec2) -> Vec2 {
        if self.has_perspective() {
            let mapped = self.map_point(Point::new(v.x, v.y));
            let origin = self.map_point(Point::ORIGIN);
            Vec2::new(mapped.x - origin.x, mapped.y - origin.y)
        } else {
            let m = &self.rows;
            Vec2::new(m[0][0] * v.x + m[0][1] * v.y, m[1][0] * v.x + m[1][1] * v.y)
        }
    }

    fn determinant(&self) -> f64 {
        let m = &self.rows;
        m[0][0] * (m[1][1] * m[2][2] - m[1][2] * m[2][1])
            - m[0][1] * (m[1][0] * m[2][2] - m[1][2] * m[2][0])
            + m[0][2] * (m[1][0] * m[2][1] - m[1][1] * m[2][0])
    }

    /// The inverse transform, or `None` when the matrix is singular
    /// (non-finite entries or determinant magnitude below `1e-12`).
    pub fn invert(&self) -> Option<Matrix> {
        let det = self.determinant();
        if !det.is_finite() || det.abs() < SINGULAR_DET {
            return None;
        }
        let m = &self.rows;
        let inv_det = 1.0 / det;
        let adj = [
            [
                m[1][1] * m[2][2] - m[1][2] * m[2][1],
                m[0][2] * m[2][1] - m[0][1] * m[2][2],
                m[0][1] * m[1][2] - m[0][2] * m[1][1],
            ],
            [
                m[1][2] * m[2][0] - m[1][0] * m[2][2],
                m[0][0] * m[2][2] - m[0][2] * m[2][0],
                m[0][2] * m[1][0] - m[0][0] * m[1][2],
            ],
            [
                m[1][0] * m[2][1] - m[1][1] * m[2][0],
                m[0][1] * m[2][0] - m[0][0] * m[2][1],
                m[0][0] * m[1][1] - m[0][1] * m[1][0],
            ],
        ];
        let mut rows = [[0.0; 3]; 3];
        for r in 0..3 {
            for c in 0..3 {
                let v = adj[r][c] * inv_det;
                if !v.is_finite() {
                    return None;
                }
                rows[r][c] = v;
            }
        }
        Some(Matrix { rows })
    }

    /// Factor the transform into `remainder * scale(sx, sy)`.
    ///
    /// Fails for perspective transforms and when either factored scale is
    /// non-finite or nearly zero.
    pub fn decompose_scale(&self) -> Option<(Size, Matrix)> {
        if self.has_perspective() {
            return None;
        }
        let sx = f64::hypot(self.rows[0][0], self.rows[1][0]);
        let sy = f64::hypot(self.rows[0][1], self.rows[1][1]);
        if !sx.is_finite() || !sy.is_finite() || sx < NEARLY_ZERO || sy < NEARLY_ZERO {
            return None;
        }
        let remainder = *self * Matrix::scale(1.0 / sx, 1.0 / sy);
        Some((Size::new(sx, sy), remainder))
    }

    /// The local area-scale factor of the transform at `p`: the absolute
    /// Jacobian determinant of the projective map. Returns infinity when `p`
    /// maps onto or behind the `w = 0` plane.
    pub fn differential_area_scale(&self, p: Point) -> f64 {
        let m = &self.rows;
        let w = m[2][0] * p.x + m[2][1] * p.y + m[2][2];
        if !w.is_finite() || w < NEARLY_ZERO {
            return f64::INFINITY;
        }
        (self.determinant() / (w * w * w)).abs()
    }
}

impl Default for Matrix {
    fn default() -> Self {
        Matrix::IDENTITY
    }
}

impl From<Affine> for Matrix {
    fn from(affine: Affine) -> Self {
        let c = affine.as_coeffs();
        Matrix {
            rows: [[c[0], c[2], c[4]], [c[1], c[3], c[5]], [0.0, 0.0, 1.0]],
        }
    }
}

impl std::ops::Mul for Matrix {
    type Output = Matrix;

    fn mul(self, rhs: Matrix) -> Matrix {
        let mut rows = [[0.0; 3]; 3];
        for r in 0..3 {
            for c in 0..3 {
                rows[r][c] = self.rows[r][0] * rhs.rows[0][c]
                    + self.rows[r][1] * rhs.rows[1][c]
                    + self.rows[r][2] * rhs.rows[2][c];
            }
        }
        Matrix { rows }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/transform/matrix.rs"]
mod tests;
