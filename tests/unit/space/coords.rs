use super::*;

#[test]
fn tagged_irect_intersection_and_containment() {
    let a: LayerIRect = Tagged::new(IRect::from_xywh(0, 0, 10, 10));
    let b: LayerIRect = Tagged::new(IRect::from_xywh(5, 5, 10, 10));
    let both = a.intersect(b).unwrap();
    assert_eq!(*both.inner(), IRect::new(5, 5, 10, 10));
    assert!(a.contains(both));
    assert!(b.contains(both));

    let far: LayerIRect = Tagged::new(IRect::from_xywh(50, 50, 2, 2));
    assert!(a.intersect(far).is_none());
}

#[test]
fn tagged_point_plus_vector_stays_in_space() {
    let p: LayerPoint = Tagged::new(Point::new(1.0, 2.0));
    let v: Tagged<Layer, Vec2> = Tagged::new(Vec2::new(0.5, -1.0));
    assert_eq!(*(p + v).inner(), Point::new(1.5, 1.0));
}

#[test]
fn tagged_matrix_concat_applies_rhs_first() {
    let scale: LayerMatrix = Tagged::new(Matrix::scale(2.0, 2.0));
    let shift: LayerMatrix = Tagged::new(Matrix::translate((1.0, 0.0)));
    let m = scale * shift;
    let r = m.map_irect(Tagged::new(IRect::from_wh(1, 1)));
    assert_eq!(*r.inner(), IRect::new(2, 0, 4, 2));
}

#[test]
fn tagged_matrix_inverse_map_roundtrips_scale_translate() {
    let m: LayerMatrix = Tagged::new(Matrix::scale(2.0, 2.0) * Matrix::translate((3.0, -1.0)));
    let r: LayerIRect = Tagged::new(IRect::new(0, 0, 4, 6));
    let mapped = m.map_irect(r);
    let back = m.inverse_map_irect(mapped).unwrap();
    assert_eq!(back.inner(), r.inner());
}

#[test]
fn tagged_matrix_integer_translation_detection() {
    let m: LayerMatrix = Tagged::new(Matrix::translate((4.0002, -7.0)));
    let origin = m.nearly_integer_translation().unwrap();
    assert_eq!(*origin.inner(), IPoint::new(4, -7));

    let skewed: LayerMatrix = Tagged::new(Matrix::rotate(0.2) * Matrix::translate((4.0, 0.0)));
    assert!(skewed.nearly_integer_translation().is_none());
}

#[test]
fn round_out_round_in_through_tags() {
    let r: Tagged<Layer, Rect> = Tagged::new(Rect::new(0.25, 0.25, 3.75, 3.75));
    assert_eq!(*r.round_out().inner(), IRect::new(0, 0, 4, 4));
    assert_eq!(*r.round_in().inner(), IRect::new(1, 1, 3, 3));
}
