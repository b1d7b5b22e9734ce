use super::*;

#[test]
fn identity_maps_points_unchanged() {
    let p = Point::new(3.5, -2.25);
    assert_eq!(Matrix::IDENTITY.map_point(p), p);
}

#[test]
fn translate_and_scale_compose_in_application_order() {
    // scale * translate applies the translation first.
    let m = Matrix::scale(2.0, 2.0) * Matrix::translate((1.0, 0.0));
    assert_eq!(m.map_point(Point::new(0.0, 0.0)), Point::new(2.0, 0.0));

    let m = Matrix::translate((1.0, 0.0)) * Matrix::scale(2.0, 2.0);
    assert_eq!(m.map_point(Point::new(0.0, 0.0)), Point::new(1.0, 0.0));
}

#[test]
fn map_vector_ignores_translation() {
    let m = Matrix::translate((5.0, 7.0));
    assert_eq!(m.map_vector(Vec2::new(1.0, 2.0)), Vec2::new(1.0, 2.0));
}

#[test]
fn invert_roundtrips() {
    let m = Matrix::translate((3.0, -4.0)) * Matrix::rotate(0.7) * Matrix::scale(2.0, 0.5);
    let inv = m.invert().unwrap();
    assert!((inv * m).nearly_equal(&Matrix::IDENTITY, 1e-9));
    assert!((m * inv).nearly_equal(&Matrix::IDENTITY, 1e-9));
}

#[test]
fn invert_singular_is_none() {
    assert!(Matrix::scale(0.0, 1.0).invert().is_none());
    let collapse = Matrix::from_rows([[1.0, 1.0, 0.0], [1.0, 1.0, 0.0], [0.0, 0.0, 1.0]]);
    assert!(collapse.invert().is_none());
}

#[test]
fn decompose_scale_factors_rotation_times_scale() {
    let angle = 0.5;
    let m = Matrix::rotate(angle) * Matrix::scale(2.0, 3.0);
    let (scale, remainder) = m.decompose_scale().unwrap();
    assert!((scale.width - 2.0).abs() < 1e-9);
    assert!((scale.height - 3.0).abs() < 1e-9);
    assert!(remainder.nearly_equal(&Matrix::rotate(angle), 1e-9));
    assert!((remainder * Matrix::scale(scale.width, scale.height)).nearly_equal(&m, 1e-9));
}

#[test]
fn decompose_scale_rejects_perspective_and_degenerate() {
    let persp = Matrix::from_rows([[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.001, 0.0, 1.0]]);
    assert!(persp.decompose_scale().is_none());
    assert!(Matrix::scale(0.0, 1.0).decompose_scale().is_none());
}

#[test]
fn differential_area_scale_matches_affine_determinant() {
    assert!((Matrix::IDENTITY.differential_area_scale(Point::new(5.0, 5.0)) - 1.0).abs() < 1e-12);
    assert!((Matrix::scale(2.0, 3.0).differential_area_scale(Point::ORIGIN) - 6.0).abs() < 1e-12);
}

#[test]
fn differential_area_scale_behind_eye_plane_is_infinite() {
    let persp = Matrix::from_rows([[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [-0.1, 0.0, 1.0]]);
    // At x = 20 the point maps behind the w = 0 plane.
    assert!(
        persp
            .differential_area_scale(Point::new(20.0, 0.0))
            .is_infinite()
    );
}

#[test]
fn scale_translate_and_perspective_classification() {
    assert!(Matrix::scale(2.0, 3.0).is_scale_translate());
    assert!(Matrix::translate((1.0, 2.0)).is_scale_translate());
    assert!(!Matrix::rotate(0.3).is_scale_translate());
    let persp = Matrix::from_rows([[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.001, 1.0]]);
    assert!(persp.has_perspective());
    assert!(!persp.is_scale_translate());
}

#[test]
fn from_affine_matches_kurbo_mapping() {
    let affine = Affine::rotate(0.4) * Affine::translate((2.0, -1.0));
    let m = Matrix::from(affine);
    let p = Point::new(3.0, 4.0);
    let expected = affine * p;
    let mapped = m.map_point(p);
    assert!((mapped.x - expected.x).abs() < 1e-12);
    assert!((mapped.y - expected.y).abs() < 1e-12);
}
