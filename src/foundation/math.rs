use crate::foundation::core::Color4f;

/// Premultiplied RGBA8 -> straight f32 color. Zero alpha maps to transparent
/// black so unpremultiplication never divides by zero.
pub(crate) fn unpremultiply(px: [u8; 4]) -> Color4f {
    if px[3] == 0 {
        return Color4f::TRANSPARENT;
    }
    let a = f32::from(px[3]) / 255.0;
    let inv = 1.0 / a;
    Color4f::new(
        (f32::from(px[0]) / 255.0 * inv).min(1.0),
        (f32::from(px[1]) / 255.0 * inv).min(1.0),
        (f32::from(px[2]) / 255.0 * inv).min(1.0),
        a,
    )
}

/// Straight f32 color -> premultiplied RGBA8, clamping channels to `[0, 1]`.
pub(crate) fn premultiply(color: Color4f) -> [u8; 4] {
    let c = color.clamped();
    let quant = |v: f32| (v * 255.0 + 0.5) as u8;
    [
        quant(c.r * c.a),
        quant(c.g * c.a),
        quant(c.b * c.a),
        quant(c.a),
    ]
}
