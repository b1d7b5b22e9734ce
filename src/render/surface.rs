use std::sync::Arc;

use crate::foundation::core::{Color4f, IRect, ISize, PixelFormat};
use crate::foundation::error::{FiltraError, FiltraResult};
use crate::foundation::math::premultiply;

/// Surfaces larger than this per dimension are treated as allocation
/// failures rather than attempted.
const MAX_SURFACE_DIM: i32 = 1 << 15;

/// Immutable premultiplied RGBA8 image backed by reference-counted pixel
/// storage.
///
/// Cloning shares pixels; [`RasterImage::make_subset`] produces a window
/// into the same storage without copying. Reads outside the image are decal:
/// they return transparent black.
#[derive(Clone, Debug)]
pub struct RasterImage {
    pixels: Arc<[u8]>,
    storage_size: ISize,
    window: IRect,
}

impl RasterImage {
    /// Wrap a premultiplied RGBA8 buffer. The buffer length must be exactly
    /// `width * height * 4`.
    pub fn from_pixels(width: i32, height: i32, pixels: Vec<u8>) -> FiltraResult<Self> {
        if width <= 0 || height <= 0 {
            return Err(FiltraError::validation("image dimensions must be positive"));
        }
        let expected = (width as usize) * (height as usize) * 4;
        if pixels.len() != expected {
            return Err(FiltraError::validation(format!(
                "pixel buffer length {} does not match {}x{} rgba8",
                pixels.len(),
                width,
                height
            )));
        }
        Ok(Self {
            pixels: pixels.into(),
            storage_size: ISize::new(width, height),
            window: IRect::from_wh(width, height),
        })
    }

    /// A solid-color image.
    pub fn filled(width: i32, height: i32, color: Color4f) -> FiltraResult<Self> {
        if width <= 0 || height <= 0 {
            return Err(FiltraError::validation("image dimensions must be positive"));
        }
        let px = premultiply(color);
        let mut pixels = Vec::with_capacity((width as usize) * (height as usize) * 4);
        for _ in 0..(width as usize) * (height as usize) {
            pixels.extend_from_slice(&px);
        }
        Self::from_pixels(width, height, pixels)
    }

    /// Horizontal extent in pixels.
    pub fn width(&self) -> i32 {
        self.window.width()
    }

    /// Vertical extent in pixels.
    pub fn height(&self) -> i32 {
        self.window.height()
    }

    /// Dimensions as an [`ISize`].
    pub fn size(&self) -> ISize {
        self.window.size()
    }

    /// A new image sharing this image's pixel storage, windowed to `subset`
    /// (given in this image's coordinates). `None` when `subset` is empty or
    /// reaches outside the image.
    pub fn make_subset(&self, subset: IRect) -> Option<RasterImage> {
        if subset.is_empty() || !IRect::from_wh(self.width(), self.height()).contains(subset) {
            return None;
        }
        Some(RasterImage {
            pixels: Arc::clone(&self.pixels),
            storage_size: self.storage_size,
            window: subset.offset(self.window.x0, self.window.y0),
        })
    }

    /// True when `other` shares this image's pixel storage.
    pub fn shares_storage(&self, other: &RasterImage) -> bool {
        Arc::ptr_eq(&self.pixels, &other.pixels)
    }

    /// Decal pixel read: coordinates outside the image return transparent
    /// black.
    pub(crate) fn pixel(&self, x: i32, y: i32) -> [u8; 4] {
        if x < 0 || y < 0 || x >= self.width() || y >= self.height() {
            return [0, 0, 0, 0];
        }
        let sx = (self.window.x0 + x) as usize;
        let sy = (self.window.y0 + y) as usize;
        let idx = (sy * self.storage_size.width as usize + sx) * 4;
        [
            self.pixels[idx],
            self.pixels[idx + 1],
            self.pixels[idx + 2],
            self.pixels[idx + 3],
        ]
    }
}

/// Transient premultiplied RGBA8 render target.
///
/// Scoped to one resolve or flood pass: allocated through the
/// [`Context`](crate::Context), drawn into, then snapshotted
/// into an immutable [`RasterImage`].
#[derive(Clone, Debug)]
pub struct Surface {
    size: ISize,
    format: PixelFormat,
    data: Vec<u8>,
}

impl Surface {
    /// Allocate a surface cleared to transparent. Fails on empty or
    /// oversized dimensions.
    pub fn new(size: ISize, format: PixelFormat) -> FiltraResult<Surface> {
        if size.is_empty() {
            return Err(FiltraError::validation("surface dimensions must be positive"));
        }
        if size.width > MAX_SURFACE_DIM || size.height > MAX_SURFACE_DIM {
            return Err(FiltraError::validation(format!(
                "surface {}x{} exceeds the {} pixel dimension limit",
                size.width, size.height, MAX_SURFACE_DIM
            )));
        }
        let len = (size.width as usize) * (size.height as usize) * 4;
        Ok(Surface {
            size,
            format,
            data: vec![0; len],
        })
    }

    /// Dimensions of the surface.
    pub fn size(&self) -> ISize {
        self.size
    }

    /// The surface's pixel format.
    pub fn format(&self) -> PixelFormat {
        self.format
    }

    /// Reset every pixel to transparent black.
    pub fn clear(&mut self) {
        self.data.fill(0);
    }

    /// Fill every pixel with one premultiplied color.
    pub(crate) fn fill(&mut self, px: [u8; 4]) {
        for chunk in self.data.chunks_exact_mut(4) {
            chunk.copy_from_slice(&px);
        }
    }

    /// Write one premultiplied pixel (replace blending).
    pub(crate) fn put_pixel(&mut self, x: i32, y: i32, px: [u8; 4]) {
        debug_assert!(x >= 0 && y >= 0 && x < self.size.width && y < self.size.height);
        let idx = ((y as usize) * (self.size.width as usize) + x as usize) * 4;
        self.data[idx..idx + 4].copy_from_slice(&px);
    }

    /// Freeze the surface into an immutable image, consuming it.
    pub fn snapshot(self) -> RasterImage {
        RasterImage {
            pixels: self.data.into(),
            storage_size: self.size,
            window: IRect::from_wh(self.size.width, self.size.height),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/surface.rs"]
mod tests;
