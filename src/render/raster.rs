use kurbo::Point;

use crate::filter::color::ColorTransformRef;
use crate::filter::sampling::Sampling;
use crate::foundation::core::IRect;
use crate::foundation::math::{premultiply, unpremultiply};
use crate::render::surface::{RasterImage, Surface};
use crate::transform::matrix::Matrix;

/// Rasterize a deferred image into `surface`, which covers `dst_bounds` in
/// layer space.
///
/// Each destination pixel center is inverse-mapped into image space, sampled
/// with decal reads, pushed through the color transform in straight space,
/// and written with replace blending. Because out-of-image samples are
/// transparent black, evaluating the color transform at every pixel realizes
/// a flood-affecting transform everywhere while leaving non-flooding
/// transforms untouched outside the image footprint. A singular transform
/// leaves the surface transparent.
pub(crate) fn draw_deferred(
    surface: &mut Surface,
    dst_bounds: IRect,
    image: &RasterImage,
    transform: &Matrix,
    sampling: Sampling,
    color_filter: Option<&ColorTransformRef>,
) {
    let Some(inverse) = transform.invert() else {
        return;
    };
    let size = surface.size();
    for y in 0..size.height {
        for x in 0..size.width {
            let layer = Point::new(
                f64::from(dst_bounds.x0 + x) + 0.5,
                f64::from(dst_bounds.y0 + y) + 0.5,
            );
            let src = inverse.map_point(layer);
            let mut px = if src.x.is_finite() && src.y.is_finite() {
                sample(image, sampling, src)
            } else {
                [0, 0, 0, 0]
            };
            if let Some(filter) = color_filter {
                px = premultiply(filter.eval(unpremultiply(px)));
            }
            surface.put_pixel(x, y, px);
        }
    }
}

fn sample(image: &RasterImage, sampling: Sampling, src: Point) -> [u8; 4] {
    match sampling {
        Sampling::Nearest => image.pixel(src.x.floor() as i32, src.y.floor() as i32),
        // Anisotropic footprints degrade to bilinear on the CPU backend.
        Sampling::Linear | Sampling::Aniso { .. } => sample_bilinear(image, src),
        Sampling::Cubic { b, c } => sample_bicubic(image, src, b, c),
    }
}

fn sample_bilinear(image: &RasterImage, src: Point) -> [u8; 4] {
    let fx = src.x - 0.5;
    let fy = src.y - 0.5;
    let x0 = fx.floor();
    let y0 = fy.floor();
    let tx = (fx - x0) as f32;
    let ty = (fy - y0) as f32;
    let x0 = x0 as i32;
    let y0 = y0 as i32;

    let mut acc = [0.0f32; 4];
    for (dy, wy) in [(0, 1.0 - ty), (1, ty)] {
        for (dx, wx) in [(0, 1.0 - tx), (1, tx)] {
            let p = image.pixel(x0 + dx, y0 + dy);
            let w = wx * wy;
            for ch in 0..4 {
                acc[ch] += w * f32::from(p[ch]);
            }
        }
    }
    quantize(acc)
}

fn sample_bicubic(image: &RasterImage, src: Point, b: f64, c: f64) -> [u8; 4] {
    let fx = src.x - 0.5;
    let fy = src.y - 0.5;
    let x0 = fx.floor();
    let y0 = fy.floor();
    let tx = fx - x0;
    let ty = fy - y0;
    let x0 = x0 as i32;
    let y0 = y0 as i32;

    let wx: Vec<f32> = (-1..=2)
        .map(|k| cubic_weight(f64::from(k) - tx, b, c) as f32)
        .collect();
    let wy: Vec<f32> = (-1..=2)
        .map(|k| cubic_weight(f64::from(k) - ty, b, c) as f32)
        .collect();

    let mut acc = [0.0f32; 4];
    for (j, wyj) in wy.iter().enumerate() {
        for (i, wxi) in wx.iter().enumerate() {
            let p = image.pixel(x0 + i as i32 - 1, y0 + j as i32 - 1);
            let w = wxi * wyj;
            for ch in 0..4 {
                acc[ch] += w * f32::from(p[ch]);
            }
        }
    }
    quantize(acc)
}

/// The (B, C) cubic filter family kernel.
fn cubic_weight(t: f64, b: f64, c: f64) -> f64 {
    let t = t.abs();
    let t2 = t * t;
    let t3 = t2 * t;
    if t < 1.0 {
        ((12.0 - 9.0 * b - 6.0 * c) * t3
            + (-18.0 + 12.0 * b + 6.0 * c) * t2
            + (6.0 - 2.0 * b))
            / 6.0
    } else if t < 2.0 {
        ((-b - 6.0 * c) * t3
            + (6.0 * b + 30.0 * c) * t2
            + (-12.0 * b - 48.0 * c) * t
            + (8.0 * b + 24.0 * c))
            / 6.0
    } else {
        0.0
    }
}

/// Round accumulated premultiplied channels back to u8, clamping color
/// channels to alpha so cubic ringing cannot break premultiplication.
fn quantize(acc: [f32; 4]) -> [u8; 4] {
    let a = acc[3].clamp(0.0, 255.0);
    let clamp_ch = |v: f32| (v.clamp(0.0, a) + 0.5) as u8;
    [
        clamp_ch(acc[0]),
        clamp_ch(acc[1]),
        clamp_ch(acc[2]),
        (a + 0.5) as u8,
    ]
}

#[cfg(test)]
#[path = "../../tests/unit/render/raster.rs"]
mod tests;
