use std::fmt;
use std::sync::Arc;

use crate::foundation::core::Color4f;

/// Per-pixel color function applied after sampling but before the layer
/// bounds crop.
///
/// Implementations evaluate straight (unpremultiplied) color. A transform is
/// "flood-affecting" when transparent black maps to visible output: such a
/// transform fills space even where the source had no content, which changes
/// how crops and deferred transforms may compose around it.
pub trait ColorTransform: fmt::Debug {
    /// Evaluate the transform for one straight RGBA color.
    fn eval(&self, color: Color4f) -> Color4f;

    /// True when fully transparent input produces visible output. The
    /// default evaluates transparent black; straight RGB with zero alpha is
    /// invisible and therefore not a flood.
    fn affects_transparent_black(&self) -> bool {
        self.eval(Color4f::TRANSPARENT).clamped().a > 0.0
    }
}

/// Shared handle to a color transform; cloning shares the chain.
pub type ColorTransformRef = Arc<dyn ColorTransform>;

/// Compose two color transforms: `inner` runs first, `outer` on its output.
pub fn compose(outer: ColorTransformRef, inner: ColorTransformRef) -> ColorTransformRef {
    Arc::new(Composed { outer, inner })
}

#[derive(Debug)]
struct Composed {
    outer: ColorTransformRef,
    inner: ColorTransformRef,
}

impl ColorTransform for Composed {
    fn eval(&self, color: Color4f) -> Color4f {
        self.outer.eval(self.inner.eval(color))
    }
}

/// 4x5 row-major color matrix over straight RGBA: each output channel is an
/// affine combination of the input channels plus an offset (the fifth
/// column).
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ColorMatrixTransform {
    matrix: [f32; 20],
}

impl ColorMatrixTransform {
    /// Build a transform from row-major 4x5 coefficients.
    pub fn new(matrix: [f32; 20]) -> Self {
        Self { matrix }
    }

    /// Uniform channel scaling with no offsets.
    pub fn scaling(r: f32, g: f32, b: f32, a: f32) -> Self {
        let mut matrix = [0.0; 20];
        matrix[0] = r;
        matrix[6] = g;
        matrix[12] = b;
        matrix[18] = a;
        Self { matrix }
    }

    /// A constant fill: ignores the input entirely. Flood-affecting whenever
    /// `color` has visible alpha.
    pub fn flood(color: Color4f) -> Self {
        let mut matrix = [0.0; 20];
        matrix[4] = color.r;
        matrix[9] = color.g;
        matrix[14] = color.b;
        matrix[19] = color.a;
        Self { matrix }
    }
}

impl ColorTransform for ColorMatrixTransform {
    fn eval(&self, color: Color4f) -> Color4f {
        let m = &self.matrix;
        let row = |i: usize| {
            m[i] * color.r + m[i + 1] * color.g + m[i + 2] * color.b + m[i + 3] * color.a + m[i + 4]
        };
        Color4f::new(row(0), row(5), row(10), row(15)).clamped()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/filter/color.rs"]
mod tests;
