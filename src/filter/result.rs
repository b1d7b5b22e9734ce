use kurbo::Point;

use crate::filter::color::{self, ColorTransformRef};
use crate::filter::sampling::{Sampling, compatible_sampling};
use crate::foundation::core::{Color4f, IPoint, IRect};
use crate::foundation::math::premultiply;
use crate::render::context::{Context, SurfaceProps};
use crate::render::raster;
use crate::render::surface::RasterImage;
use crate::space::coords::{LayerIPoint, LayerIRect, LayerMatrix, Tagged};
use crate::space::rounding::ROUND_EPSILON;
use crate::transform::matrix::Matrix;

/// A source image plus the still-unapplied operations needed to place it in
/// its destination.
///
/// The deferred state is: a pending layer-space `transform` (the image
/// origin is embedded in it as an integer translation), the `sampling` that
/// transform will use when rasterized, an optional composed color transform,
/// and `layer_bounds` acting as a crop: output outside it is transparent no
/// matter what the other fields would produce.
///
/// Values are immutable; every operator returns a new value, and cloning
/// shares only the backing pixel storage. The default value is the empty
/// (fully transparent) result, which every operator except a flood-affecting
/// color filter maps back to itself.
#[derive(Clone, Debug, Default)]
pub struct FilterResult {
    image: Option<RasterImage>,
    transform: LayerMatrix,
    sampling: Sampling,
    color_filter: Option<ColorTransformRef>,
    layer_bounds: LayerIRect,
}

impl FilterResult {
    /// The empty, fully transparent result.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Wrap an image positioned at `origin` in layer space, with no pending
    /// operations beyond that placement.
    pub fn new(image: RasterImage, origin: LayerIPoint) -> Self {
        let o = *origin.inner();
        let bounds = IRect::from_xywh(o.x, o.y, image.width(), image.height());
        Self {
            image: Some(image),
            transform: Tagged::new(Matrix::translate((f64::from(o.x), f64::from(o.y)))),
            sampling: Sampling::default(),
            color_filter: None,
            layer_bounds: Tagged::new(bounds),
        }
    }

    fn from_resolved(resolved: Option<(RasterImage, LayerIPoint)>) -> Self {
        match resolved {
            Some((image, origin)) => Self::new(image, origin),
            None => Self::empty(),
        }
    }

    /// True for the empty (transparent) value.
    pub fn is_empty(&self) -> bool {
        self.image.is_none()
    }

    /// The backing image, if any.
    pub fn image(&self) -> Option<&RasterImage> {
        self.image.as_ref()
    }

    /// The crop, in layer space, limiting this result's visible extent.
    pub fn layer_bounds(&self) -> LayerIRect {
        self.layer_bounds
    }

    /// The sampling the pending transform will use.
    pub fn sampling(&self) -> Sampling {
        self.sampling
    }

    /// The pending layer-space transform.
    pub fn transform(&self) -> LayerMatrix {
        self.transform
    }

    /// The composed color transform pending on this result, if any.
    pub fn color_filter(&self) -> Option<&ColorTransformRef> {
        self.color_filter.as_ref()
    }

    /// Restrict the result to `crop`.
    ///
    /// The crop is intersected with the desired output and the current
    /// layer bounds; an empty intersection produces the empty result. When
    /// the pending transform is a near-integer translation and no
    /// flood-affecting color transform intervenes, the crop is pushed down
    /// into a zero-copy subset of the backing image, which keeps later
    /// transforms and color filters mergeable; otherwise it is recorded in
    /// `layer_bounds` with no pixel work.
    pub fn apply_crop(&self, ctx: &Context, crop: LayerIRect) -> FilterResult {
        let Some(image) = self.image.as_ref() else {
            // A color filter that could revive transparent output must never
            // ride on an empty image.
            debug_assert!(self.color_filter.is_none());
            return FilterResult::empty();
        };
        let tight = crop
            .intersect(ctx.desired_output())
            .and_then(|b| b.intersect(self.layer_bounds));
        let Some(tight) = tight else {
            return FilterResult::empty();
        };

        if !fills_layer_bounds(self.color_filter.as_ref())
            && let Some(origin) = self.transform.nearly_integer_translation()
        {
            let mut restricted = FilterResult::from_resolved(extract_subset(image, origin, tight));
            if !restricted.is_empty() {
                restricted.color_filter = self.color_filter.clone();
            }
            restricted
        } else {
            let mut restricted = self.clone();
            restricted.layer_bounds = tight;
            restricted
        }
    }

    /// Compose a color transform onto this result.
    ///
    /// A flood-affecting transform forces the layer bounds out to the
    /// desired output: with no image (or no overlap with the desired
    /// output) the flood is materialized into a fresh surface; with a
    /// visible crop the current state is resolved first so the crop edge
    /// survives; otherwise the bounds widen without any pixel work. A
    /// non-flooding transform always composes deferred.
    pub fn apply_color_filter(&self, ctx: &Context, color_filter: ColorTransformRef) -> FilterResult {
        let desired = ctx.desired_output();
        let new_layer_bounds;
        if color_filter.affects_transparent_black() {
            let overlap = if self.image.is_some() {
                self.layer_bounds.intersect(desired)
            } else {
                None
            };
            if overlap.is_none() {
                // The visible region is currently all transparent, and the
                // new transform turns transparent into a solid flood across
                // the desired output.
                let Some(mut surface) = ctx.make_surface(desired.size(), None) else {
                    return FilterResult::empty();
                };
                surface.fill(premultiply(color_filter.eval(Color4f::TRANSPARENT)));
                return FilterResult::new(surface.snapshot(), desired.top_left());
            }

            if self.is_cropped(&LayerMatrix::identity(), desired) {
                // The new bounds must become the desired output, so a crop
                // still trimming visible content has to be baked into pixels
                // before the flood re-fills the cropped-away area.
                let resolved = FilterResult::from_resolved(self.resolve(ctx, desired));
                return resolved.apply_color_filter(ctx, color_filter);
            }

            new_layer_bounds = desired;
        } else {
            if self.image.is_none() {
                return FilterResult::empty();
            }
            let Some(bounds) = self.layer_bounds.intersect(desired) else {
                return FilterResult::empty();
            };
            new_layer_bounds = bounds;
        }

        let mut filtered = self.clone();
        filtered.layer_bounds = new_layer_bounds;
        filtered.color_filter = Some(match self.color_filter.clone() {
            Some(existing) => color::compose(color_filter, existing),
            None => color_filter,
        });
        filtered
    }

    /// Concatenate `transform` onto this result, merging with the pending
    /// transform when that cannot be told apart from sampling twice.
    ///
    /// Integer translations never resample, so their sampling normalizes to
    /// the default. The merge is refused, forcing a materialization first,
    /// when the layer-bounds crop would become newly visible under the
    /// combined transform or when the two samplings are incompatible. A
    /// singular `transform` produces the empty result.
    pub fn apply_transform(
        &self,
        ctx: &Context,
        transform: LayerMatrix,
        sampling: Sampling,
    ) -> FilterResult {
        if self.image.is_none() {
            // Transformed transparent black remains transparent black.
            debug_assert!(self.color_filter.is_none());
            return FilterResult::empty();
        }

        let current_is_integer = self.transform.nearly_integer_translation().is_some();
        let next_is_integer = transform.nearly_integer_translation().is_some();
        debug_assert!(!current_is_integer || self.sampling == Sampling::default());
        let mut next_sampling = if next_is_integer {
            Sampling::default()
        } else {
            sampling
        };

        // An integer translation keeps any crop edge pixel-aligned with the
        // desired output, so it can be settled later by bounds intersection
        // alone.
        let is_cropped = !next_is_integer && self.is_cropped(&transform, ctx.desired_output());

        let mut transformed;
        if !is_cropped
            && compatible_sampling(
                self.sampling,
                current_is_integer,
                &mut next_sampling,
                next_is_integer,
            )
        {
            transformed = self.clone();
        } else {
            // The pending state must be rasterized before 'transform' and
            // 'sampling' can be evaluated on it.
            let Some(tight_bounds) = transform.inverse_map_irect(ctx.desired_output()) else {
                return FilterResult::empty();
            };
            transformed = FilterResult::from_resolved(self.resolve(ctx, tight_bounds));
            if transformed.is_empty() {
                return FilterResult::empty();
            }
            next_sampling = sampling;
        }

        transformed.sampling = next_sampling;
        transformed.transform = transform * transformed.transform;
        // Map the prior layer bounds by the new transform instead of
        // recomputing from the image, so soft crops accumulated from earlier
        // desired outputs are not discarded.
        transformed.layer_bounds = transform.map_irect(transformed.layer_bounds);
        match transformed.layer_bounds.intersect(ctx.desired_output()) {
            Some(bounds) => transformed.layer_bounds = bounds,
            None => return FilterResult::empty(),
        }
        transformed
    }

    /// Materialize pixels restricted to `dst_bounds ∩ layer_bounds`.
    ///
    /// With no color transform and a near-integer pending translation this
    /// is a zero-copy subset of the backing image. Otherwise a surface is
    /// allocated from the context, the deferred state is drawn into it with
    /// replace blending, and the snapshot is returned with its layer-space
    /// origin. Returns `None` when the result is fully transparent or the
    /// allocation fails.
    #[tracing::instrument(skip(self, ctx))]
    pub fn resolve(
        &self,
        ctx: &Context,
        dst_bounds: LayerIRect,
    ) -> Option<(RasterImage, LayerIPoint)> {
        let image = self.image.as_ref()?;
        // The layer bounds is the final clip: even a flood-affecting color
        // transform is restricted to it.
        let dst_bounds = dst_bounds.intersect(self.layer_bounds)?;

        let subset_compatible = self.color_filter.is_none();
        if subset_compatible && let Some(origin) = self.transform.nearly_integer_translation() {
            return extract_subset(image, origin, dst_bounds);
        }

        let mut surface = ctx.make_surface(dst_bounds.size(), Some(&SurfaceProps::default()))?;
        surface.clear();
        raster::draw_deferred(
            &mut surface,
            *dst_bounds.inner(),
            image,
            self.transform.inner(),
            self.sampling,
            self.color_filter.as_ref(),
        );
        Some((surface.snapshot(), dst_bounds.top_left()))
    }

    /// Materialize over the current layer bounds.
    pub fn image_and_offset(&self, ctx: &Context) -> Option<(RasterImage, LayerIPoint)> {
        self.resolve(ctx, self.layer_bounds)
    }

    /// True when visible output within `dst_bounds`, after `extra_transform`,
    /// would show the edge of `layer_bounds`: either the color transform
    /// floods transparent black, or the bounds actually trim the mapped
    /// image content.
    fn is_cropped(&self, extra_transform: &LayerMatrix, dst_bounds: LayerIRect) -> bool {
        let mut fills = fills_layer_bounds(self.color_filter.as_ref());
        if !fills && let Some(image) = &self.image {
            let image_bounds = self
                .transform
                .map_irect(Tagged::new(IRect::from_wh(image.width(), image.height())));
            fills = !self.layer_bounds.contains(image_bounds);
        }
        if fills {
            // 'layer_bounds' can only be ignored when the desired output is
            // completely inside it, i.e. its edges are never visible.
            !quad_contains_rect(
                extra_transform.inner(),
                *self.layer_bounds.inner(),
                *dst_bounds.inner(),
            )
        } else {
            false
        }
    }
}

/// True when the color transform flood-fills everything `layer_bounds`
/// permits.
fn fills_layer_bounds(color_filter: Option<&ColorTransformRef>) -> bool {
    color_filter.is_some_and(|f| f.affects_transparent_black())
}

/// Zero-copy subset of a decal-tiled image: everything outside the image but
/// inside `dst_bounds` is transparent black, so the returned image may be
/// smaller than `dst_bounds`. `None` when they do not overlap.
fn extract_subset(
    image: &RasterImage,
    origin: LayerIPoint,
    dst_bounds: LayerIRect,
) -> Option<(RasterImage, LayerIPoint)> {
    let o = *origin.inner();
    let image_bounds = IRect::from_xywh(o.x, o.y, image.width(), image.height());
    let bounds = image_bounds.intersect(*dst_bounds.inner())?;

    // i64 keeps the offset subtraction from wrapping when the origin sits at
    // the far negative edge of the integer grid.
    let subset = IRect::new(
        (i64::from(bounds.x0) - i64::from(o.x)) as i32,
        (i64::from(bounds.y0) - i64::from(o.y)) as i32,
        (i64::from(bounds.x1) - i64::from(o.x)) as i32,
        (i64::from(bounds.y1) - i64::from(o.y)) as i32,
    );
    let sub = image.make_subset(subset)?;
    Some((sub, Tagged::new(IPoint::new(bounds.x0, bounds.y0))))
}

/// True when the quad `matrix(inner)` fully contains `outer`: every corner
/// of `outer`, pulled back through the inverse, lands inside `inner` (with
/// rounding-epsilon slack). A singular or behind-eye matrix reports `false`,
/// which fails safe toward resolving.
fn quad_contains_rect(matrix: &Matrix, inner: IRect, outer: IRect) -> bool {
    let Some(inverse) = matrix.invert() else {
        return false;
    };
    let inner = inner.to_rect();
    let outer = outer.to_rect();
    let corners = [
        Point::new(outer.x0, outer.y0),
        Point::new(outer.x1, outer.y0),
        Point::new(outer.x1, outer.y1),
        Point::new(outer.x0, outer.y1),
    ];
    for corner in corners {
        let p = inverse.map_point(corner);
        if !(p.x.is_finite() && p.y.is_finite()) {
            return false;
        }
        if p.x < inner.x0 - ROUND_EPSILON
            || p.x > inner.x1 + ROUND_EPSILON
            || p.y < inner.y0 - ROUND_EPSILON
            || p.y > inner.y1 + ROUND_EPSILON
        {
            return false;
        }
    }
    true
}

#[cfg(test)]
#[path = "../../tests/unit/filter/result.rs"]
mod tests;
