//! Rectangle and coordinate-space types for region mapping.
//!
//! All region math in this crate happens in *point space*: device-independent
//! points with a bottom-left origin, matching the coordinate convention of the
//! text recognizer contract. Conversion to top-left-origin pixel space happens
//! only at the compositing boundary, via [`Rect::to_pixels`].

use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle with a bottom-left origin.
///
/// Depending on context the rect is either *normalized* (unit-square
/// coordinates, as delivered by a text recognizer) or expressed in image
/// point space. [`Rect::denormalized`] converts from the former to the latter.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    /// Horizontal offset of the left edge.
    pub x: f64,
    /// Vertical offset of the bottom edge.
    pub y: f64,
    /// Width of the rectangle.
    pub width: f64,
    /// Height of the rectangle.
    pub height: f64,
}

impl Rect {
    /// Create a new rectangle.
    #[must_use]
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// The x coordinate of the right edge.
    #[must_use]
    pub fn max_x(&self) -> f64 {
        self.x + self.width
    }

    /// The y coordinate of the top edge.
    #[must_use]
    pub fn max_y(&self) -> f64 {
        self.y + self.height
    }

    /// Check whether the rectangle has no area.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }

    /// Map a normalized unit-square rectangle into image point space.
    ///
    /// Both spaces share a bottom-left origin, so this is a componentwise
    /// multiply with no vertical flip.
    #[must_use]
    pub fn denormalized(&self, size: PointSize) -> Self {
        Self {
            x: self.x * size.width,
            y: self.y * size.height,
            width: self.width * size.width,
            height: self.height * size.height,
        }
    }

    /// Convert a top-left-origin rectangle into the bottom-left convention.
    ///
    /// Recognizer backends that report top-left-origin boxes must be adapted
    /// through this seam before their output enters the pipeline.
    /// `container_height` is the height of the enclosing space (`1.0` for
    /// normalized rects).
    #[must_use]
    pub fn from_top_left(rect: Rect, container_height: f64) -> Self {
        Self {
            x: rect.x,
            y: container_height - rect.y - rect.height,
            width: rect.width,
            height: rect.height,
        }
    }

    /// Grow the rectangle outward by `margin` on every side.
    #[must_use]
    pub fn expanded(&self, margin: f64) -> Self {
        Self {
            x: self.x - margin,
            y: self.y - margin,
            width: self.width + 2.0 * margin,
            height: self.height + 2.0 * margin,
        }
    }

    /// Intersect with another rectangle, returning `None` when disjoint.
    #[must_use]
    pub fn intersection(&self, other: &Rect) -> Option<Rect> {
        let x = self.x.max(other.x);
        let y = self.y.max(other.y);
        let max_x = self.max_x().min(other.max_x());
        let max_y = self.max_y().min(other.max_y());
        if max_x <= x || max_y <= y {
            return None;
        }
        Some(Rect::new(x, y, max_x - x, max_y - y))
    }

    /// Convert a point-space rectangle to a top-left-origin pixel rectangle.
    ///
    /// Rounds outward so the pixel rect fully covers the point rect, then
    /// clamps to the raster bounds implied by `container` and `scale`.
    /// Returns `None` when no pixels remain after clamping.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn to_pixels(&self, container: PointSize, scale: f32) -> Option<PixelRect> {
        if self.is_empty() || scale <= 0.0 {
            return None;
        }
        let scale = f64::from(scale);
        let raster_w = (container.width * scale).round() as i64;
        let raster_h = (container.height * scale).round() as i64;

        let left = (self.x * scale).floor() as i64;
        let right = (self.max_x() * scale).ceil() as i64;
        // Flip to top-left rows: the point rect's top edge becomes the first row.
        let top = ((container.height - self.max_y()) * scale).floor() as i64;
        let bottom = ((container.height - self.y) * scale).ceil() as i64;

        let x0 = left.clamp(0, raster_w);
        let y0 = top.clamp(0, raster_h);
        let x1 = right.clamp(0, raster_w);
        let y1 = bottom.clamp(0, raster_h);
        if x1 <= x0 || y1 <= y0 {
            return None;
        }

        Some(PixelRect {
            x: x0 as u32,
            y: y0 as u32,
            width: (x1 - x0) as u32,
            height: (y1 - y0) as u32,
        })
    }
}

/// Image size in device-independent points.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PointSize {
    /// Width in points.
    pub width: f64,
    /// Height in points.
    pub height: f64,
}

impl PointSize {
    /// Create a new size.
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// The full image bounds as a rectangle anchored at the origin.
    #[must_use]
    pub fn bounds(&self) -> Rect {
        Rect::new(0.0, 0.0, self.width, self.height)
    }
}

/// An axis-aligned rectangle in raster pixel space (top-left origin).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelRect {
    /// Column of the left edge.
    pub x: u32,
    /// Row of the top edge.
    pub y: u32,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}
