//! Sub-pixel-safe rect mapping and rounding.
//!
//! Infinite precision would keep integer-producing transforms on integer
//! results, but float math lands just off them, and a strict round-out then
//! grabs a nearly full extra row or column of pixels. Every rounding step
//! here absorbs up to [`ROUND_EPSILON`] of float error first.

use kurbo::{Point, Rect};

use crate::foundation::core::{IPoint, IRect};
use crate::transform::matrix::Matrix;

/// Float error absorbed before rounding bounds to integers.
pub(crate) const ROUND_EPSILON: f64 = 1e-3;

/// Smallest enclosing integer rect, after insetting by the rounding epsilon.
pub fn round_out(r: Rect) -> IRect {
    if !(r.x0.is_finite() && r.y0.is_finite() && r.x1.is_finite() && r.y1.is_finite()) {
        return IRect::EMPTY;
    }
    IRect::new(
        (r.x0 + ROUND_EPSILON).floor() as i32,
        (r.y0 + ROUND_EPSILON).floor() as i32,
        (r.x1 - ROUND_EPSILON).ceil() as i32,
        (r.y1 - ROUND_EPSILON).ceil() as i32,
    )
}

/// Largest inscribed integer rect, after outsetting by the rounding epsilon.
pub fn round_in(r: Rect) -> IRect {
    if !(r.x0.is_finite() && r.y0.is_finite() && r.x1.is_finite() && r.y1.is_finite()) {
        return IRect::EMPTY;
    }
    IRect::new(
        (r.x0 - ROUND_EPSILON).ceil() as i32,
        (r.y0 - ROUND_EPSILON).ceil() as i32,
        (r.x1 + ROUND_EPSILON).floor() as i32,
        (r.y1 + ROUND_EPSILON).floor() as i32,
    )
}

fn rect_is_empty(r: Rect) -> bool {
    r.width() <= 0.0 || r.height() <= 0.0
}

/// Map a float rect to the hull of its mapped corners. Empty input maps to
/// empty output without touching the matrix; a corner mapped to a non-finite
/// position (behind the eye plane under perspective) empties the result.
pub(crate) fn map_rect(matrix: &Matrix, r: Rect) -> Rect {
    if rect_is_empty(r) {
        return Rect::ZERO;
    }
    let corners = [
        Point::new(r.x0, r.y0),
        Point::new(r.x1, r.y0),
        Point::new(r.x1, r.y1),
        Point::new(r.x0, r.y1),
    ];
    let mut min_x = f64::INFINITY;
    let mut min_y = f64::INFINITY;
    let mut max_x = f64::NEG_INFINITY;
    let mut max_y = f64::NEG_INFINITY;
    for corner in corners {
        let p = matrix.map_point(corner);
        if !(p.x.is_finite() && p.y.is_finite()) {
            return Rect::ZERO;
        }
        min_x = min_x.min(p.x);
        min_y = min_y.min(p.y);
        max_x = max_x.max(p.x);
        max_y = max_y.max(p.y);
    }
    Rect::new(min_x, min_y, max_x, max_y)
}

/// Map an integer rect, preserving 1px precision for scale+translate.
///
/// There is a range of integers exactly representable as i32 but not as f32;
/// for the common scale+translate case the edges are therefore computed in
/// f64 and the epsilon applied before floor/ceil, so mathematically
/// integer-producing transforms stay integer-exact. Everything else maps the
/// corner hull and rounds out. Conversions to `i32` saturate.
pub(crate) fn map_irect(matrix: &Matrix, r: IRect) -> IRect {
    if r.is_empty() {
        return IRect::EMPTY;
    }
    if matrix.is_scale_translate() {
        let sx = matrix.rc(0, 0);
        let sy = matrix.rc(1, 1);
        let tx = matrix.rc(0, 2);
        let ty = matrix.rc(1, 2);
        let l = sx * f64::from(r.x0) + tx;
        let rr = sx * f64::from(r.x1) + tx;
        let t = sy * f64::from(r.y0) + ty;
        let b = sy * f64::from(r.y1) + ty;
        IRect::new(
            (l.min(rr) + ROUND_EPSILON).floor() as i32,
            (t.min(b) + ROUND_EPSILON).floor() as i32,
            (l.max(rr) - ROUND_EPSILON).ceil() as i32,
            (t.max(b) - ROUND_EPSILON).ceil() as i32,
        )
    } else {
        round_out(map_rect(matrix, r.to_rect()))
    }
}

/// Inverse-map a float rect; `None` when the matrix is singular. Empty
/// input short-circuits to empty output.
pub(crate) fn inverse_map_rect(matrix: &Matrix, r: Rect) -> Option<Rect> {
    if rect_is_empty(r) {
        return Some(Rect::ZERO);
    }
    let inverse = matrix.invert()?;
    Some(map_rect(&inverse, r))
}

/// Inverse equivalent of [`map_irect`], with the same 1px precision for
/// scale+translate; `None` when the matrix is singular.
pub(crate) fn inverse_map_irect(matrix: &Matrix, r: IRect) -> Option<IRect> {
    if r.is_empty() {
        return Some(IRect::EMPTY);
    }
    if matrix.is_scale_translate() {
        let sx = matrix.rc(0, 0);
        let sy = matrix.rc(1, 1);
        if sx == 0.0 || sy == 0.0 {
            return None;
        }
        let tx = matrix.rc(0, 2);
        let ty = matrix.rc(1, 2);
        let l = (f64::from(r.x0) - tx) / sx;
        let rr = (f64::from(r.x1) - tx) / sx;
        let t = (f64::from(r.y0) - ty) / sy;
        let b = (f64::from(r.y1) - ty) / sy;
        Some(IRect::new(
            (l.min(rr) + ROUND_EPSILON).floor() as i32,
            (t.min(b) + ROUND_EPSILON).floor() as i32,
            (l.max(rr) - ROUND_EPSILON).ceil() as i32,
            (t.max(b) - ROUND_EPSILON).ceil() as i32,
        ))
    } else {
        inverse_map_rect(matrix, r.to_rect()).map(round_out)
    }
}

/// The integer translation `matrix` equals within [`ROUND_EPSILON`], if any.
/// All nine entries are compared, so scale/skew/perspective residue rules the
/// matrix out even when its translation column is integral.
pub(crate) fn nearly_integer_translation(matrix: &Matrix) -> Option<IPoint> {
    let w = matrix.rc(2, 2);
    let tx = (matrix.rc(0, 2) / w).round();
    let ty = (matrix.rc(1, 2) / w).round();
    if !(tx.is_finite() && ty.is_finite()) {
        return None;
    }
    let expected = Matrix::translate((tx, ty));
    matrix
        .nearly_equal(&expected, ROUND_EPSILON)
        .then(|| IPoint::new(tx as i32, ty as i32))
}

#[cfg(test)]
#[path = "../../tests/unit/space/rounding.rs"]
mod tests;
