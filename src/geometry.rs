//! Geometry primitives and unit conversions.
//!
//! Frame geometry lives in three coordinate spaces:
//!
//! - **percent**: `0.0..=100.0` of the canvas width (x axis) or height (y axis).
//!   This is the canonical space; canvas resizes never lose relative layout.
//! - **centimeters**: physical wall units, via [`CanvasSize`].
//! - **screen pixels**: the live on-screen container, which changes with
//!   zoom and window size and is only ever passed in per call.
//!
//! # Example
//!
//! ```
//! use zenwall::{CanvasSize, Rect};
//!
//! let canvas = CanvasSize::new(200.0, 150.0).unwrap();
//! let rect = Rect::new(10.0, 20.0, 10.0, 20.0);
//!
//! let cm = canvas.to_cm(rect);
//! assert_eq!(cm, Rect::new(20.0, 30.0, 20.0, 30.0));
//! assert_eq!(canvas.to_percent(cm), rect);
//! ```

#[cfg(not(feature = "std"))]
use alloc::vec::Vec;
#[cfg(not(feature = "std"))]
use num_traits::Float;

/// A position in whatever space the caller is working in.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    /// Create a new point.
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Component-wise offset from `origin` to `self`.
    pub fn delta_from(self, origin: Point) -> (f64, f64) {
        (self.x - origin.x, self.y - origin.y)
    }

    /// Translate by `(dx, dy)`.
    pub fn offset(self, dx: f64, dy: f64) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }
}

/// Width × height, typically screen pixels.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    /// Create a new size.
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Whether both axes are finite and strictly positive.
    pub fn is_positive(&self) -> bool {
        is_positive(self.width) && is_positive(self.height)
    }
}

/// Axis-aligned rectangle, top-left origin.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    /// Create a new rect.
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Rectangle spanning two corner points in any order.
    pub fn from_corners(a: Point, b: Point) -> Self {
        let x = a.x.min(b.x);
        let y = a.y.min(b.y);
        Self::new(x, y, a.x.max(b.x) - x, a.y.max(b.y) - y)
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    pub fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Same size, new top-left corner.
    pub fn with_origin(self, origin: Point) -> Self {
        Self::new(origin.x, origin.y, self.width, self.height)
    }

    /// Same size, re-centered on `center`.
    pub fn centered_on(self, center: Point) -> Self {
        Self::new(
            center.x - self.width / 2.0,
            center.y - self.height / 2.0,
            self.width,
            self.height,
        )
    }

    /// Strict overlap on both axes. Touching edges do not intersect.
    pub fn intersects(&self, other: &Rect) -> bool {
        self.x < other.right()
            && self.right() > other.x
            && self.y < other.bottom()
            && self.bottom() > other.y
    }

    /// Project onto one axis as `(start, length)`.
    pub(crate) fn span(&self, axis: Axis) -> Span {
        match axis {
            Axis::Horizontal => Span::new(self.x, self.width),
            Axis::Vertical => Span::new(self.y, self.height),
        }
    }
}

/// One of the two layout axes.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub(crate) enum Axis {
    Horizontal,
    Vertical,
}

/// A one-dimensional interval `[start, start + len]`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub(crate) struct Span {
    pub start: f64,
    pub len: f64,
}

impl Span {
    pub const fn new(start: f64, len: f64) -> Self {
        Self { start, len }
    }

    pub fn end(&self) -> f64 {
        self.start + self.len
    }

    pub fn mid(&self) -> f64 {
        self.start + self.len / 2.0
    }
}

/// Physical wall size in centimeters.
///
/// Both dimensions are finite and strictly positive; [`CanvasSize::new`] is
/// the only way to build one.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RawCanvasSize"))]
pub struct CanvasSize {
    width_cm: f64,
    height_cm: f64,
}

#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RawCanvasSize {
    width_cm: f64,
    height_cm: f64,
}

#[cfg(feature = "serde")]
impl TryFrom<RawCanvasSize> for CanvasSize {
    type Error = GeometryError;

    fn try_from(raw: RawCanvasSize) -> Result<Self, Self::Error> {
        CanvasSize::new(raw.width_cm, raw.height_cm)
    }
}

impl CanvasSize {
    /// Wall size used before the user sets one.
    pub const DEFAULT: Self = Self {
        width_cm: 200.0,
        height_cm: 150.0,
    };

    /// Create a canvas size. Rejects zero, negative, and non-finite values.
    pub fn new(width_cm: f64, height_cm: f64) -> Result<Self, GeometryError> {
        if !is_positive(width_cm) || !is_positive(height_cm) {
            return Err(GeometryError::NonPositiveCanvas {
                width_cm,
                height_cm,
            });
        }
        Ok(Self {
            width_cm,
            height_cm,
        })
    }

    pub fn width_cm(&self) -> f64 {
        self.width_cm
    }

    pub fn height_cm(&self) -> f64 {
        self.height_cm
    }

    /// Width / height.
    pub fn aspect_ratio(&self) -> f64 {
        self.width_cm / self.height_cm
    }

    /// Convert a percent rect to centimeters.
    pub fn to_cm(&self, rect: Rect) -> Rect {
        Rect::new(
            rect.x * self.width_cm / 100.0,
            rect.y * self.height_cm / 100.0,
            rect.width * self.width_cm / 100.0,
            rect.height * self.height_cm / 100.0,
        )
    }

    /// Convert a centimeter rect to percent.
    pub fn to_percent(&self, rect: Rect) -> Rect {
        Rect::new(
            rect.x * 100.0 / self.width_cm,
            rect.y * 100.0 / self.height_cm,
            rect.width * 100.0 / self.width_cm,
            rect.height * 100.0 / self.height_cm,
        )
    }

    /// Re-express a percent rect of `self` as a percent rect of `target`,
    /// keeping its physical position and size.
    pub fn rescale_to(&self, target: &CanvasSize, rect: Rect) -> Rect {
        let sx = self.width_cm / target.width_cm;
        let sy = self.height_cm / target.height_cm;
        Rect::new(rect.x * sx, rect.y * sy, rect.width * sx, rect.height * sy)
    }
}

impl Default for CanvasSize {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Convert a pixel length to percent of a container axis.
///
/// Returns `None` when the container axis is not strictly positive.
pub fn px_to_percent(px: f64, container_px: f64) -> Option<f64> {
    is_positive(container_px).then(|| px * 100.0 / container_px)
}

/// Map a percent rect into the pixel space of a container.
pub fn percent_to_px(rect: Rect, container: Size) -> Rect {
    Rect::new(
        rect.x * container.width / 100.0,
        rect.y * container.height / 100.0,
        rect.width * container.width / 100.0,
        rect.height * container.height / 100.0,
    )
}

/// Round to two decimals, the precision physical units are reported at.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Largest `aspect`-shaped size that fits inside `available`.
pub fn fit_aspect(aspect: f64, available: Size) -> Size {
    let height_for_width = available.width / aspect;
    if height_for_width <= available.height {
        Size::new(available.width, height_for_width)
    } else {
        Size::new(available.height * aspect, available.height)
    }
}

/// Order indices row-major: top-to-bottom, then left-to-right.
///
/// Two points whose vertical keys differ by less than `tolerance` compare by
/// horizontal key, otherwise by vertical key. That comparison is not
/// transitive, so it runs through a stable insertion sort, which never
/// panics on an inconsistent order and keeps input order among ties.
pub(crate) fn row_major_order(points: &[Point], tolerance: f64) -> Vec<usize> {
    let before = |a: usize, b: usize| {
        let (p, q) = (points[a], points[b]);
        if (p.y - q.y).abs() < tolerance {
            p.x < q.x
        } else {
            p.y < q.y
        }
    };

    let mut order: Vec<usize> = (0..points.len()).collect();
    for i in 1..order.len() {
        let mut j = i;
        while j > 0 && before(order[j], order[j - 1]) {
            order.swap(j, j - 1);
            j -= 1;
        }
    }
    order
}

fn is_positive(v: f64) -> bool {
    v.is_finite() && v > 0.0
}

/// Geometry input error.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum GeometryError {
    /// Canvas width or height is zero, negative, or not finite.
    NonPositiveCanvas { width_cm: f64, height_cm: f64 },
    /// Image has zero width or height.
    ZeroImageDimension,
}

impl core::fmt::Display for GeometryError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::NonPositiveCanvas {
                width_cm,
                height_cm,
            } => write!(f, "canvas must be positive, got {width_cm}×{height_cm} cm"),
            Self::ZeroImageDimension => f.write_str("image has a zero dimension"),
        }
    }
}

impl core::error::Error for GeometryError {}
