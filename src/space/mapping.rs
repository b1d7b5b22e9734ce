use kurbo::{Point, Rect, Size, Vec2};

use crate::foundation::core::{IPoint, IRect, ISize};
use crate::space::coords::{Device, Layer, Param, ParamPoint, Tagged};
use crate::space::rounding;
use crate::transform::matrix::{Matrix, NEARLY_ZERO};

/// How much of the device transform a filter can absorb into its own
/// evaluation space.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum MatrixCapability {
    /// The filter only evaluates correctly under pure translation.
    Translate,
    /// The filter tolerates axis-aligned scale plus translation.
    ScaleTranslate,
    /// The filter evaluates correctly under any transform.
    Complex,
}

/// Geometry kinds a [`Mapping`] can carry between coordinate spaces.
///
/// Positions map as positions, directions (vectors, sizes) without the
/// translation component, integer kinds round after mapping, and matrices
/// map by conjugation.
pub trait MapGeometry: Sized {
    /// Apply `matrix` to `self`.
    fn map(self, matrix: &Matrix) -> Self;
}

impl MapGeometry for Point {
    fn map(self, matrix: &Matrix) -> Self {
        matrix.map_point(self)
    }
}

impl MapGeometry for Vec2 {
    fn map(self, matrix: &Matrix) -> Self {
        matrix.map_vector(self)
    }
}

impl MapGeometry for IPoint {
    fn map(self, matrix: &Matrix) -> Self {
        let p = matrix.map_point(self.to_point());
        IPoint::new(p.x.round() as i32, p.y.round() as i32)
    }
}

impl MapGeometry for Size {
    fn map(self, matrix: &Matrix) -> Self {
        let v = matrix.map_vector(Vec2::new(self.width, self.height));
        Size::new(v.x, v.y)
    }
}

impl MapGeometry for ISize {
    fn map(self, matrix: &Matrix) -> Self {
        let v = matrix.map_vector(Vec2::new(f64::from(self.width), f64::from(self.height)));
        ISize::new(v.x.round() as i32, v.y.round() as i32)
    }
}

impl MapGeometry for Rect {
    fn map(self, matrix: &Matrix) -> Self {
        rounding::map_rect(matrix, self)
    }
}

impl MapGeometry for IRect {
    fn map(self, matrix: &Matrix) -> Self {
        rounding::map_irect(matrix, self)
    }
}

impl MapGeometry for Matrix {
    /// Conjugation: a transform operating on space C1 becomes the equivalent
    /// transform on C2 by mapping C2 into C1, applying, and mapping back.
    fn map(self, matrix: &Matrix) -> Self {
        match matrix.invert() {
            Some(inverse) => *matrix * self * inverse,
            None => {
                // Mapping matrices are invertible by construction.
                debug_assert!(false, "conjugating by a singular matrix");
                self
            }
        }
    }
}

/// The split of a device transform into a filter-evaluation transform and a
/// post-filtering remainder.
///
/// Holds parameter->layer, layer->device, and device->layer matrices, the
/// last always the exact inverse of the second (enforced at construction).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Mapping {
    param_to_layer: Matrix,
    layer_to_device: Matrix,
    device_to_layer: Matrix,
}

impl Mapping {
    /// Decompose the current device transform for a filter with the given
    /// matrix capability.
    ///
    /// - `Translate` defers the entire CTM to after filtering.
    /// - A scale+translate CTM, or `Complex` capability, makes layer space
    ///   equal device space outright.
    /// - Otherwise the scale factors out into layer space and the
    ///   rotation/skew remainder is deferred.
    /// - Perspective picks one isotropic scale from the differential area at
    ///   `representative_point`, falling back to scale 1 when that point
    ///   lands behind the eye plane.
    ///
    /// Returns `None` when the remainder is not invertible: an
    /// ill-conditioned decomposition means "do not filter", not a crash.
    #[tracing::instrument]
    pub fn new(
        ctm: Matrix,
        capability: MatrixCapability,
        representative_point: ParamPoint,
    ) -> Option<Mapping> {
        let (layer, remainder) = if capability == MatrixCapability::Translate {
            (Matrix::IDENTITY, ctm)
        } else if ctm.is_scale_translate() || capability == MatrixCapability::Complex {
            (ctm, Matrix::IDENTITY)
        } else if let Some((scale, remainder)) = ctm.decompose_scale() {
            (Matrix::scale(scale.width, scale.height), remainder)
        } else {
            let area = ctm.differential_area_scale(*representative_point.inner());
            let scale = if area.is_finite() && area > NEARLY_ZERO {
                area.sqrt()
            } else {
                // Representative point behind the eye plane; defer the whole
                // CTM as in the translate-only case.
                1.0
            };
            (
                Matrix::scale(scale, scale),
                ctm * Matrix::scale(1.0 / scale, 1.0 / scale),
            )
        };
        Mapping::from_matrices(layer, remainder)
    }

    /// Build a mapping directly from parameter->layer and layer->device
    /// matrices; `None` when the latter is not invertible.
    pub fn from_matrices(param_to_layer: Matrix, layer_to_device: Matrix) -> Option<Mapping> {
        let device_to_layer = layer_to_device.invert()?;
        Some(Mapping {
            param_to_layer,
            layer_to_device,
            device_to_layer,
        })
    }

    /// The identity mapping: all three spaces coincide.
    pub fn identity() -> Mapping {
        Mapping {
            param_to_layer: Matrix::IDENTITY,
            layer_to_device: Matrix::IDENTITY,
            device_to_layer: Matrix::IDENTITY,
        }
    }

    /// Concatenate an extra invertible transform into layer space, used to
    /// snap layer space to integer pixel alignment. Fails and leaves the
    /// mapping unchanged when `extra` is singular.
    pub fn adjust_layer_space(&mut self, extra: &Matrix) -> bool {
        let Some(inverse) = extra.invert() else {
            return false;
        };
        self.param_to_layer = *extra * self.param_to_layer;
        self.device_to_layer = *extra * self.device_to_layer;
        self.layer_to_device = self.layer_to_device * inverse;
        true
    }

    /// The parameter->layer matrix.
    pub fn layer_matrix(&self) -> Matrix {
        self.param_to_layer
    }

    /// The layer->device matrix.
    pub fn device_matrix(&self) -> Matrix {
        self.layer_to_device
    }

    /// The full parameter->device transform.
    pub fn total_matrix(&self) -> Matrix {
        self.layer_to_device * self.param_to_layer
    }

    /// Map a parameter-space value into layer space.
    pub fn param_to_layer<T: MapGeometry>(&self, geom: Tagged<Param, T>) -> Tagged<Layer, T> {
        Tagged::new(geom.into_inner().map(&self.param_to_layer))
    }

    /// Map a layer-space value into device space.
    pub fn layer_to_device<T: MapGeometry>(&self, geom: Tagged<Layer, T>) -> Tagged<Device, T> {
        Tagged::new(geom.into_inner().map(&self.layer_to_device))
    }

    /// Map a device-space value into layer space.
    pub fn device_to_layer<T: MapGeometry>(&self, geom: Tagged<Device, T>) -> Tagged<Layer, T> {
        Tagged::new(geom.into_inner().map(&self.device_to_layer))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/space/mapping.rs"]
mod tests;
