use super::*;
use std::sync::Arc;

use crate::filter::color::ColorMatrixTransform;
use crate::foundation::core::{Color4f, ISize, PixelFormat};

fn checker2x2() -> RasterImage {
    // (0,0) red, (1,0) green, (0,1) blue, (1,1) white, all opaque.
    let pixels = vec![
        255, 0, 0, 255, 0, 255, 0, 255, //
        0, 0, 255, 255, 255, 255, 255, 255,
    ];
    RasterImage::from_pixels(2, 2, pixels).unwrap()
}

fn draw(
    dst: IRect,
    image: &RasterImage,
    transform: Matrix,
    sampling: Sampling,
    filter: Option<&ColorTransformRef>,
) -> RasterImage {
    let mut surface = Surface::new(dst.size(), PixelFormat::Rgba8Premul).unwrap();
    draw_deferred(&mut surface, dst, image, &transform, sampling, filter);
    surface.snapshot()
}

#[test]
fn integer_translation_with_linear_sampling_is_exact() {
    let image = checker2x2();
    let out = draw(
        IRect::new(3, 3, 5, 5),
        &image,
        Matrix::translate((3.0, 3.0)),
        Sampling::Linear,
        None,
    );
    for y in 0..2 {
        for x in 0..2 {
            assert_eq!(out.pixel(x, y), image.pixel(x, y));
        }
    }
}

#[test]
fn nearest_snaps_subpixel_translation_to_texels() {
    let image = checker2x2();
    let out = draw(
        IRect::from_wh(2, 2),
        &image,
        Matrix::translate((0.25, 0.25)),
        Sampling::Nearest,
        None,
    );
    assert_eq!(out.pixel(0, 0), image.pixel(0, 0));
    assert_eq!(out.pixel(1, 1), image.pixel(1, 1));
}

#[test]
fn upscale_of_solid_image_keeps_interior_solid_and_decal_fades_outside() {
    let image = RasterImage::filled(4, 4, Color4f::WHITE).unwrap();
    let out = draw(
        IRect::from_wh(8, 8),
        &image,
        Matrix::scale(2.0, 2.0),
        Sampling::Linear,
        None,
    );
    assert_eq!(out.pixel(4, 4), [255, 255, 255, 255]);
    assert_eq!(out.pixel(2, 3), [255, 255, 255, 255]);
    // The outermost ring samples partly outside the image.
    assert!(out.pixel(0, 0)[3] < 255);
}

#[test]
fn bicubic_matches_solid_interior() {
    let image = RasterImage::filled(6, 6, Color4f::WHITE).unwrap();
    let out = draw(
        IRect::from_wh(6, 6),
        &image,
        Matrix::IDENTITY,
        Sampling::MITCHELL,
        None,
    );
    // Interior taps all land inside the solid image; kernel weights sum to 1.
    let px = out.pixel(3, 3);
    assert!(px[3] >= 254, "alpha was {}", px[3]);
    assert!(px[0] >= 254);
}

#[test]
fn singular_transform_draws_nothing() {
    let image = checker2x2();
    let out = draw(
        IRect::from_wh(4, 4),
        &image,
        Matrix::scale(0.0, 0.0),
        Sampling::Linear,
        None,
    );
    for y in 0..4 {
        for x in 0..4 {
            assert_eq!(out.pixel(x, y), [0, 0, 0, 0]);
        }
    }
}

#[test]
fn flood_color_transform_fills_beyond_image_footprint() {
    let image = RasterImage::filled(2, 2, Color4f::WHITE).unwrap();
    let flood: ColorTransformRef = Arc::new(ColorMatrixTransform::flood(Color4f::new(
        0.0, 0.0, 0.0, 1.0,
    )));
    let out = draw(
        IRect::from_wh(6, 6),
        &image,
        Matrix::IDENTITY,
        Sampling::Linear,
        Some(&flood),
    );
    // Outside the 2x2 image the decal sample is transparent, but the flood
    // turns it opaque black.
    assert_eq!(out.pixel(5, 5), [0, 0, 0, 255]);
    assert_eq!(out.pixel(0, 0), [0, 0, 0, 255]);
}

#[test]
fn non_flood_transform_applies_only_to_image_content() {
    let image = RasterImage::filled(2, 2, Color4f::WHITE).unwrap();
    let drop_red: ColorTransformRef = Arc::new(ColorMatrixTransform::scaling(0.0, 1.0, 1.0, 1.0));
    let out = draw(
        IRect::from_wh(4, 4),
        &image,
        Matrix::IDENTITY,
        Sampling::Linear,
        Some(&drop_red),
    );
    assert_eq!(out.pixel(0, 0), [0, 255, 255, 255]);
    assert_eq!(out.pixel(3, 3), [0, 0, 0, 0]);
}
