use std::fmt;
use std::sync::Arc;

use crate::foundation::core::{ISize, PixelFormat};
use crate::render::surface::Surface;
use crate::space::coords::LayerIRect;

/// Color and format configuration for surfaces allocated during filter
/// evaluation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct SurfaceProps {
    /// Pixel format of allocated surfaces.
    pub format: PixelFormat,
}

/// The one backend capability the engine needs: allocate a scoped render
/// surface of a given size. Backend selection happens once, when the
/// provider is constructed; the core never sees anything backend-specific.
///
/// Allocation failure is reported as `None` and downstream becomes an empty
/// (transparent) filter result, never an error.
pub trait SurfaceProvider: fmt::Debug {
    /// Allocate a surface, or `None` on failure.
    fn make_surface(&self, size: ISize, props: &SurfaceProps) -> Option<Surface>;
}

/// CPU raster allocation.
#[derive(Clone, Copy, Debug, Default)]
pub struct RasterProvider;

impl SurfaceProvider for RasterProvider {
    fn make_surface(&self, size: ISize, props: &SurfaceProps) -> Option<Surface> {
        Surface::new(size, props.format).ok()
    }
}

/// Available execution backends.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum BackendKind {
    /// CPU raster.
    #[default]
    Raster,
}

/// Resolve a backend kind into its surface provider.
pub fn create_provider(kind: BackendKind) -> Arc<dyn SurfaceProvider> {
    match kind {
        BackendKind::Raster => Arc::new(RasterProvider),
    }
}

/// Per-evaluation configuration consumed read-only by the engine: the
/// desired output bounds in layer space, surface properties, and the
/// allocate-surface capability.
#[derive(Clone, Debug)]
pub struct Context {
    desired_output: LayerIRect,
    props: SurfaceProps,
    provider: Arc<dyn SurfaceProvider>,
}

impl Context {
    /// Build a context from explicit parts.
    pub fn new(
        desired_output: LayerIRect,
        props: SurfaceProps,
        provider: Arc<dyn SurfaceProvider>,
    ) -> Self {
        Self {
            desired_output,
            props,
            provider,
        }
    }

    /// Convenience constructor with the CPU raster backend and default
    /// surface properties.
    pub fn with_raster_backend(desired_output: LayerIRect) -> Self {
        Self::new(
            desired_output,
            SurfaceProps::default(),
            create_provider(BackendKind::Raster),
        )
    }

    /// The bounds, in layer space, that the consumer of this evaluation
    /// wants filled. Fixed for one evaluation pass.
    pub fn desired_output(&self) -> LayerIRect {
        self.desired_output
    }

    /// Surface properties used when `make_surface` is called without an
    /// override.
    pub fn surface_props(&self) -> SurfaceProps {
        self.props
    }

    /// A context identical to this one but with different desired output
    /// bounds.
    pub fn with_desired_output(&self, desired_output: LayerIRect) -> Context {
        Context {
            desired_output,
            props: self.props,
            provider: Arc::clone(&self.provider),
        }
    }

    /// Allocate a scoped render surface, or `None` on failure.
    pub fn make_surface(&self, size: ISize, props: Option<&SurfaceProps>) -> Option<Surface> {
        self.provider
            .make_surface(size, props.unwrap_or(&self.props))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/context.rs"]
mod tests;
