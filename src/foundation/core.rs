pub use kurbo::{Point, Rect, Size, Vec2};

/// Integer point (pixel coordinates).
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct IPoint {
    /// Horizontal coordinate.
    pub x: i32,
    /// Vertical coordinate.
    pub y: i32,
}

impl IPoint {
    /// Build a point from its coordinates.
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// The floating-point equivalent.
    pub fn to_point(self) -> Point {
        Point::new(f64::from(self.x), f64::from(self.y))
    }
}

/// Integer size (pixel dimensions).
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct ISize {
    /// Horizontal extent.
    pub width: i32,
    /// Vertical extent.
    pub height: i32,
}

impl ISize {
    /// Build a size from its dimensions.
    pub fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    /// True when either dimension is non-positive.
    pub fn is_empty(self) -> bool {
        self.width <= 0 || self.height <= 0
    }
}

/// Integer rectangle with exclusive right/bottom edges.
///
/// Mirrors the kurbo `Rect` field layout (`x0, y0, x1, y1`). Constructors use
/// saturating arithmetic so callers cannot overflow the pixel grid.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct IRect {
    /// Left edge.
    pub x0: i32,
    /// Top edge.
    pub y0: i32,
    /// Right edge (exclusive).
    pub x1: i32,
    /// Bottom edge (exclusive).
    pub y1: i32,
}

impl IRect {
    /// The empty rectangle at the origin.
    pub const EMPTY: IRect = IRect {
        x0: 0,
        y0: 0,
        x1: 0,
        y1: 0,
    };

    /// Build a rect from its edges.
    pub fn new(x0: i32, y0: i32, x1: i32, y1: i32) -> Self {
        Self { x0, y0, x1, y1 }
    }

    /// Build a rect from origin and size, saturating on overflow.
    pub fn from_xywh(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x0: x,
            y0: y,
            x1: x.saturating_add(width),
            y1: y.saturating_add(height),
        }
    }

    /// Build a rect anchored at the origin.
    pub fn from_wh(width: i32, height: i32) -> Self {
        Self::from_xywh(0, 0, width, height)
    }

    /// Horizontal extent (zero when empty).
    pub fn width(self) -> i32 {
        (self.x1.saturating_sub(self.x0)).max(0)
    }

    /// Vertical extent (zero when empty).
    pub fn height(self) -> i32 {
        (self.y1.saturating_sub(self.y0)).max(0)
    }

    /// Dimensions as an [`ISize`].
    pub fn size(self) -> ISize {
        ISize::new(self.width(), self.height())
    }

    /// Top-left corner.
    pub fn top_left(self) -> IPoint {
        IPoint::new(self.x0, self.y0)
    }

    /// True when the rect covers no pixels.
    pub fn is_empty(self) -> bool {
        self.x1 <= self.x0 || self.y1 <= self.y0
    }

    /// Intersection with `other`, or `None` when the rects do not overlap.
    pub fn intersect(self, other: IRect) -> Option<IRect> {
        let out = IRect {
            x0: self.x0.max(other.x0),
            y0: self.y0.max(other.y0),
            x1: self.x1.min(other.x1),
            y1: self.y1.min(other.y1),
        };
        (!out.is_empty()).then_some(out)
    }

    /// True when `other` lies fully inside `self`. An empty `other` is
    /// contained by anything.
    pub fn contains(self, other: IRect) -> bool {
        other.is_empty()
            || (!self.is_empty()
                && self.x0 <= other.x0
                && self.y0 <= other.y0
                && self.x1 >= other.x1
                && self.y1 >= other.y1)
    }

    /// The rect translated by `(dx, dy)`, saturating on overflow.
    pub fn offset(self, dx: i32, dy: i32) -> IRect {
        IRect {
            x0: self.x0.saturating_add(dx),
            y0: self.y0.saturating_add(dy),
            x1: self.x1.saturating_add(dx),
            y1: self.y1.saturating_add(dy),
        }
    }

    /// The floating-point equivalent.
    pub fn to_rect(self) -> Rect {
        Rect::new(
            f64::from(self.x0),
            f64::from(self.y0),
            f64::from(self.x1),
            f64::from(self.y1),
        )
    }
}

/// Straight (unpremultiplied) RGBA color with `f32` channels in `[0, 1]`.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Color4f {
    /// Red channel.
    pub r: f32,
    /// Green channel.
    pub g: f32,
    /// Blue channel.
    pub b: f32,
    /// Alpha channel.
    pub a: f32,
}

impl Color4f {
    /// Fully transparent black.
    pub const TRANSPARENT: Color4f = Color4f {
        r: 0.0,
        g: 0.0,
        b: 0.0,
        a: 0.0,
    };

    /// Opaque white.
    pub const WHITE: Color4f = Color4f {
        r: 1.0,
        g: 1.0,
        b: 1.0,
        a: 1.0,
    };

    /// Build a color from straight channel values.
    pub fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// The color with every channel clamped to `[0, 1]`.
    pub fn clamped(self) -> Self {
        Self {
            r: self.r.clamp(0.0, 1.0),
            g: self.g.clamp(0.0, 1.0),
            b: self.b.clamp(0.0, 1.0),
            a: self.a.clamp(0.0, 1.0),
        }
    }
}

/// Supported pixel formats for render surfaces.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum PixelFormat {
    /// 8-bit RGBA with premultiplied alpha.
    #[default]
    Rgba8Premul,
}
