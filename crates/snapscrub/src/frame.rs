//! Raster frames with point-space sizing.
//!
//! A [`Frame`] pairs an RGBA pixel buffer with the backing scale that relates
//! physical pixels to device-independent points. All region math elsewhere in
//! the crate happens in points; the frame owns the conversion to its raster
//! dimensions. Frames are never mutated in place — every transform produces a
//! new frame.

use std::path::Path;

use image::RgbaImage;
use tracing::warn;

use crate::error::{Error, Result};
use crate::geometry::PointSize;

/// An opaque raster buffer with a point-space size.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    pixels: RgbaImage,
    backing_scale: f32,
}

impl Frame {
    /// Wrap a pixel buffer captured at the given backing scale.
    ///
    /// A non-positive scale is nonsensical and is replaced with `1.0` (with a
    /// logged warning) rather than poisoning later region math.
    #[must_use]
    pub fn new(pixels: RgbaImage, backing_scale: f32) -> Self {
        let backing_scale = if backing_scale > 0.0 {
            backing_scale
        } else {
            warn!(backing_scale, "ignoring non-positive backing scale");
            1.0
        };
        Self {
            pixels,
            backing_scale,
        }
    }

    /// Load a frame from an image file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened or decoded.
    pub fn open(path: impl AsRef<Path>, backing_scale: f32) -> Result<Self> {
        let path = path.as_ref();
        let decoded = image::open(path).map_err(|source| Error::ImageOpen {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::new(decoded.to_rgba8(), backing_scale))
    }

    /// Save the frame's pixels to an image file (format from the extension).
    ///
    /// # Errors
    ///
    /// Returns an error if encoding or writing fails.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        self.pixels.save(path).map_err(|source| Error::ImageSave {
            path: path.to_path_buf(),
            source,
        })
    }

    /// The frame size in device-independent points.
    #[must_use]
    pub fn size(&self) -> PointSize {
        let scale = f64::from(self.backing_scale);
        PointSize::new(
            f64::from(self.pixels.width()) / scale,
            f64::from(self.pixels.height()) / scale,
        )
    }

    /// Pixels per point for this frame (typically 1 or 2).
    #[must_use]
    pub fn backing_scale(&self) -> f32 {
        self.backing_scale
    }

    /// The underlying pixel buffer.
    #[must_use]
    pub fn pixels(&self) -> &RgbaImage {
        &self.pixels
    }

    /// Consume the frame, returning its pixel buffer.
    #[must_use]
    pub fn into_pixels(self) -> RgbaImage {
        self.pixels
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    fn uniform(width: u32, height: u32, color: [u8; 4]) -> RgbaImage {
        RgbaImage::from_pixel(width, height, Rgba(color))
    }

    #[test]
    fn test_size_at_unit_scale() {
        let frame = Frame::new(uniform(200, 100, [255, 255, 255, 255]), 1.0);
        assert_eq!(frame.size(), PointSize::new(200.0, 100.0));
    }

    #[test]
    fn test_size_at_retina_scale() {
        let frame = Frame::new(uniform(400, 200, [0, 0, 0, 255]), 2.0);
        assert_eq!(frame.size(), PointSize::new(200.0, 100.0));
    }

    #[test]
    fn test_non_positive_scale_falls_back() {
        let frame = Frame::new(uniform(10, 10, [0, 0, 0, 255]), 0.0);
        assert!((frame.backing_scale() - 1.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_open_missing_file() {
        let result = Frame::open("/nonexistent/screenshot.png", 1.0);
        assert!(matches!(result, Err(Error::ImageOpen { .. })));
    }

    #[test]
    fn test_clone_is_independent() {
        let frame = Frame::new(uniform(4, 4, [1, 2, 3, 255]), 1.0);
        let mut copy = frame.clone().into_pixels();
        copy.put_pixel(0, 0, Rgba([9, 9, 9, 255]));
        assert_eq!(frame.pixels().get_pixel(0, 0), &Rgba([1, 2, 3, 255]));
    }
}
