use std::marker::PhantomData;

use kurbo::{Point, Rect, Vec2};

use crate::foundation::core::{IPoint, IRect, ISize};
use crate::space::rounding;
use crate::transform::matrix::Matrix;

mod sealed {
    pub trait Sealed {}
    impl Sealed for super::Param {}
    impl Sealed for super::Layer {}
    impl Sealed for super::Device {}
}

/// Marker for the three coordinate spaces a filtered value can live in.
///
/// The set is closed: filters only ever see parameter, layer, and device
/// space, and conversions between them go through a
/// [`Mapping`](crate::Mapping).
pub trait Space: sealed::Sealed + Copy + std::fmt::Debug + PartialEq + 'static {}

/// The filter's own local, untransformed space.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Param;

/// The common evaluation space chosen for an entire filter subtree.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Layer;

/// The final render-target space.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Device;

impl Space for Param {}
impl Space for Layer {}
impl Space for Device {}

/// A geometric value tagged with the coordinate space it lives in.
///
/// Two tagged values only combine when their space tags match; anything
/// cross-space must go through a [`Mapping`](crate::Mapping).
/// The tag is zero-sized, so the wrapper costs nothing at runtime.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Tagged<S: Space, T> {
    value: T,
    _space: PhantomData<S>,
}

impl<S: Space, T> Tagged<S, T> {
    /// Tag `value` as living in space `S`.
    pub fn new(value: T) -> Self {
        Self {
            value,
            _space: PhantomData,
        }
    }

    /// Borrow the untagged value (for producing API results).
    pub fn inner(&self) -> &T {
        &self.value
    }

    /// Unwrap the untagged value.
    pub fn into_inner(self) -> T {
        self.value
    }
}

/// Point in parameter space.
pub type ParamPoint = Tagged<Param, Point>;
/// Rect in parameter space.
pub type ParamRect = Tagged<Param, Rect>;
/// Integer rect in parameter space.
pub type ParamIRect = Tagged<Param, IRect>;
/// Point in layer space.
pub type LayerPoint = Tagged<Layer, Point>;
/// Integer point in layer space.
pub type LayerIPoint = Tagged<Layer, IPoint>;
/// Rect in layer space.
pub type LayerRect = Tagged<Layer, Rect>;
/// Integer rect in layer space.
pub type LayerIRect = Tagged<Layer, IRect>;
/// Matrix mapping layer space onto itself.
pub type LayerMatrix = Tagged<Layer, Matrix>;
/// Rect in device space.
pub type DeviceRect = Tagged<Device, Rect>;
/// Integer rect in device space.
pub type DeviceIRect = Tagged<Device, IRect>;

impl<S: Space> Tagged<S, IRect> {
    /// The empty rect in this space.
    pub fn empty() -> Self {
        Self::new(IRect::EMPTY)
    }

    /// True when the rect covers no pixels.
    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    /// Same-space intersection, `None` when disjoint.
    pub fn intersect(self, other: Self) -> Option<Self> {
        self.value.intersect(other.value).map(Self::new)
    }

    /// True when `other` lies fully inside `self`.
    pub fn contains(&self, other: Self) -> bool {
        self.value.contains(other.value)
    }

    /// Untagged dimensions (sizes carry no position to mix up).
    pub fn size(&self) -> ISize {
        self.value.size()
    }

    /// Top-left corner, still tagged.
    pub fn top_left(&self) -> Tagged<S, IPoint> {
        Tagged::new(self.value.top_left())
    }
}

impl<S: Space> Tagged<S, Rect> {
    /// True when the rect has no area.
    pub fn is_empty(&self) -> bool {
        self.value.width() <= 0.0 || self.value.height() <= 0.0
    }

    /// Enclosing integer rect after the epsilon inset (see
    /// [`round_out`](crate::round_out)).
    pub fn round_out(&self) -> Tagged<S, IRect> {
        Tagged::new(rounding::round_out(self.value))
    }

    /// Inscribed integer rect after the epsilon outset (see
    /// [`round_in`](crate::round_in)).
    pub fn round_in(&self) -> Tagged<S, IRect> {
        Tagged::new(rounding::round_in(self.value))
    }
}

impl<S: Space> std::ops::Add<Tagged<S, Vec2>> for Tagged<S, Point> {
    type Output = Tagged<S, Point>;

    fn add(self, rhs: Tagged<S, Vec2>) -> Self::Output {
        Tagged::new(self.value + rhs.value)
    }
}

impl<S: Space> Tagged<S, Matrix> {
    /// The identity transform within this space.
    pub fn identity() -> Self {
        Self::new(Matrix::IDENTITY)
    }

    /// Map a same-space rect (corner hull for general transforms).
    pub fn map_rect(&self, r: Tagged<S, Rect>) -> Tagged<S, Rect> {
        Tagged::new(rounding::map_rect(&self.value, *r.inner()))
    }

    /// Map a same-space integer rect with 1px-precision-preserving rounding.
    pub fn map_irect(&self, r: Tagged<S, IRect>) -> Tagged<S, IRect> {
        Tagged::new(rounding::map_irect(&self.value, *r.inner()))
    }

    /// Inverse-map a same-space rect; `None` when the matrix is singular.
    pub fn inverse_map_rect(&self, r: Tagged<S, Rect>) -> Option<Tagged<S, Rect>> {
        rounding::inverse_map_rect(&self.value, *r.inner()).map(Tagged::new)
    }

    /// Inverse-map a same-space integer rect; `None` when the matrix is
    /// singular.
    pub fn inverse_map_irect(&self, r: Tagged<S, IRect>) -> Option<Tagged<S, IRect>> {
        rounding::inverse_map_irect(&self.value, *r.inner()).map(Tagged::new)
    }

    /// The integer translation this matrix is (within rounding epsilon)
    /// equal to, if any.
    pub fn nearly_integer_translation(&self) -> Option<Tagged<S, IPoint>> {
        rounding::nearly_integer_translation(&self.value).map(Tagged::new)
    }
}

impl<S: Space> std::ops::Mul for Tagged<S, Matrix> {
    type Output = Tagged<S, Matrix>;

    fn mul(self, rhs: Tagged<S, Matrix>) -> Self::Output {
        Tagged::new(self.value * rhs.value)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/space/coords.rs"]
mod tests;
