use super::*;

#[test]
fn round_out_and_in_absorb_float_noise() {
    // Mathematically exactly (1, 1) .. (4, 4), off by well under the epsilon.
    let r = Rect::new(1.0004, 0.9996, 3.9996, 4.0004);
    assert_eq!(round_out(r), IRect::new(1, 1, 4, 4));
    assert_eq!(round_in(r), IRect::new(1, 1, 4, 4));

    let r = Rect::new(0.25, 0.25, 3.75, 3.75);
    assert_eq!(round_out(r), IRect::new(0, 0, 4, 4));
    assert_eq!(round_in(r), IRect::new(1, 1, 3, 3));
}

#[test]
fn round_out_non_finite_is_empty() {
    assert_eq!(round_out(Rect::new(f64::NAN, 0.0, 1.0, 1.0)), IRect::EMPTY);
}

#[test]
fn map_irect_preserves_integer_precision_for_scale_translate() {
    // Within 1e-3 of scale 2 / translate (3, 3): the mapped rect must come
    // out exactly as the infinite-precision transform would produce.
    let m = Matrix::scale(2.0000004, 1.9999996) * Matrix::translate((1.5000001, 1.4999999));
    let r = IRect::new(1, 2, 5, 9);
    assert_eq!(map_irect(&m, r), IRect::new(5, 7, 13, 21));
}

#[test]
fn map_and_inverse_map_roundtrip_near_integer_transform() {
    let m = Matrix::scale(2.0000004, 1.9999996) * Matrix::translate((1.5000001, 1.4999999));
    let r = IRect::new(1, 2, 5, 9);
    let mapped = map_irect(&m, r);
    assert_eq!(inverse_map_irect(&m, mapped), Some(r));
}

#[test]
fn map_irect_negative_scale_orders_edges() {
    let m = Matrix::scale(-1.0, 1.0);
    assert_eq!(map_irect(&m, IRect::new(1, 0, 3, 2)), IRect::new(-3, 0, -1, 2));
}

#[test]
fn map_irect_general_transform_rounds_out() {
    let m = Matrix::rotate(std::f64::consts::FRAC_PI_2);
    assert_eq!(map_irect(&m, IRect::new(0, 0, 4, 4)), IRect::new(-4, 0, 0, 4));
}

#[test]
fn empty_rects_short_circuit_without_matrix_math() {
    let singular = Matrix::scale(0.0, 0.0);
    assert_eq!(map_irect(&singular, IRect::EMPTY), IRect::EMPTY);
    assert_eq!(inverse_map_irect(&singular, IRect::EMPTY), Some(IRect::EMPTY));
    assert_eq!(map_rect(&singular, Rect::ZERO), Rect::ZERO);
}

#[test]
fn inverse_map_fails_on_singular_matrix() {
    assert_eq!(inverse_map_irect(&Matrix::scale(0.0, 1.0), IRect::new(0, 0, 2, 2)), None);
    let collapse = Matrix::from_rows([[1.0, 1.0, 0.0], [1.0, 1.0, 0.0], [0.0, 0.0, 1.0]]);
    assert_eq!(inverse_map_irect(&collapse, IRect::new(0, 0, 2, 2)), None);
}

#[test]
fn perspective_corner_behind_eye_empties_mapped_rect() {
    let persp = Matrix::from_rows([[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [-0.5, 0.0, 1.0]]);
    // The right edge of the rect sits at w = 0.
    let mapped = map_rect(&persp, Rect::new(0.0, 0.0, 2.0, 2.0));
    assert!(mapped.width() <= 0.0 || mapped.height() <= 0.0);
}

#[test]
fn nearly_integer_translation_tolerates_epsilon_only() {
    assert_eq!(
        nearly_integer_translation(&Matrix::translate((3.0004, -2.9996))),
        Some(IPoint::new(3, -3))
    );
    assert_eq!(nearly_integer_translation(&Matrix::translate((3.01, 0.0))), None);
    assert_eq!(nearly_integer_translation(&Matrix::scale(1.01, 1.0)), None);
    assert_eq!(
        nearly_integer_translation(&Matrix::IDENTITY),
        Some(IPoint::new(0, 0))
    );
}
