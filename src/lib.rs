//! Filtra is a deferred evaluation engine for chained image-filter
//! pipelines.
//!
//! Given a sequence of geometric and color operations applied to a source
//! image, Filtra computes the minimal set of actual rasterization passes
//! needed to produce correctly-cropped, correctly-sampled output, carrying
//! exact geometric bookkeeping between operations that have not yet been
//! materialized.
//!
//! # Pipeline overview
//!
//! 1. **Decompose**: a device transform splits into a filter-evaluation
//!    ("layer") transform and a post-transform remainder ([`Mapping`]),
//!    according to each filter's [`MatrixCapability`].
//! 2. **Compose**: a [`FilterResult`] threads through
//!    [`FilterResult::apply_transform`] / [`FilterResult::apply_crop`] /
//!    [`FilterResult::apply_color_filter`] calls, each returning a new value
//!    and deferring work as pure metadata updates whenever merging cannot be
//!    told apart from evaluating stages separately.
//! 3. **Resolve**: [`FilterResult::resolve`] materializes pixels only when a
//!    consumer needs them: as a zero-copy subset of the backing image when
//!    possible, otherwise as one raster pass into a surface allocated
//!    through the [`Context`].
//!
//! The key design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Value semantics**: [`FilterResult`] values are immutable; operators
//!   return new values and share only reference-counted pixel storage.
//! - **Graceful degradation**: singular matrices, empty intersections, and
//!   allocation failures all collapse to the empty (transparent) result,
//!   never a panic.
//! - **Typed coordinate spaces**: parameter, layer, and device geometry
//!   cannot be mixed without going through a [`Mapping`].
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod filter;
mod foundation;
mod render;
mod space;
mod transform;

pub use filter::color::{ColorMatrixTransform, ColorTransform, ColorTransformRef, compose};
pub use filter::result::FilterResult;
pub use filter::sampling::Sampling;
pub use foundation::core::{Color4f, IPoint, IRect, ISize, PixelFormat, Point, Rect, Size, Vec2};
pub use foundation::error::{FiltraError, FiltraResult};
pub use render::context::{
    BackendKind, Context, RasterProvider, SurfaceProps, SurfaceProvider, create_provider,
};
pub use render::surface::{RasterImage, Surface};
pub use space::coords::{
    Device, DeviceIRect, DeviceRect, Layer, LayerIPoint, LayerIRect, LayerMatrix, LayerPoint,
    LayerRect, Param, ParamIRect, ParamPoint, ParamRect, Space, Tagged,
};
pub use space::mapping::{MapGeometry, Mapping, MatrixCapability};
pub use space::rounding::{round_in, round_out};
pub use transform::matrix::Matrix;
