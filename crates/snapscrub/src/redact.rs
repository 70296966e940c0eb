//! The redaction compositor.
//!
//! Takes a frame, the accepted matches, and a style, and produces a new frame
//! with the selected regions obscured. The compositor is a pure function of
//! its inputs: it holds no state between calls and identical inputs produce
//! identical output. Per-region failures in the blur and pixelate paths
//! degrade to a solid fill for that region only; the call as a whole always
//! succeeds.

use clap::ValueEnum;
use image::imageops::{self, FilterType};
use image::{Rgba, RgbaImage};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::frame::Frame;
use crate::geometry::PixelRect;
use crate::scan::Match;

/// How an accepted region is obscured.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum,
)]
#[serde(rename_all = "kebab-case")]
pub enum RedactionStyle {
    /// Opaque solid fill with slightly rounded corners.
    #[default]
    BlackBox,
    /// Gaussian blur of the region contents.
    Blur,
    /// Block-averaging mosaic of the region contents.
    Pixelate,
}

impl std::fmt::Display for RedactionStyle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BlackBox => write!(f, "black-box"),
            Self::Blur => write!(f, "blur"),
            Self::Pixelate => write!(f, "pixelate"),
        }
    }
}

/// Margin added around each match region, in points, to cover anti-aliased
/// text edges.
const REGION_MARGIN: f64 = 4.0;

/// Corner radius of the solid fill, in points.
const CORNER_RADIUS: f64 = 2.0;

/// Gaussian sigma of the blur, in points (scaled by the backing scale).
const BLUR_SIGMA: f32 = 6.0;

/// Mosaic block edge, in points (scaled by the backing scale).
const MOSAIC_BLOCK: f32 = 8.0;

/// The fill color for black-box redaction and fallbacks.
const FILL: Rgba<u8> = Rgba([0, 0, 0, 255]);

/// Per-region failures of the blur/pixelate backends.
#[derive(Debug, Error)]
enum ObscureError {
    /// The region rounded down to zero pixels.
    #[error("region has no pixels")]
    EmptyRegion,

    /// The filter returned a buffer of the wrong size.
    #[error("filter produced {actual_w}x{actual_h}, expected {expected_w}x{expected_h}")]
    DimensionMismatch {
        expected_w: u32,
        expected_h: u32,
        actual_w: u32,
        actual_h: u32,
    },
}

/// Produce a new frame with the accepted match regions obscured.
///
/// Only matches with `should_redact == true` are applied; with none selected
/// the result is pixel-identical to the input. Each selected region is
/// expanded by a fixed margin, clamped to the image bounds, and obscured per
/// `style`. Pixels outside selected regions are bit-for-bit unchanged.
#[must_use]
pub fn apply_redaction(frame: &Frame, matches: &[Match], style: RedactionStyle) -> Frame {
    let mut canvas = frame.pixels().clone();
    let scale = frame.backing_scale();
    let size = frame.size();
    let bounds = size.bounds();

    let mut applied = 0usize;
    for m in matches.iter().filter(|m| m.should_redact) {
        let expanded = m.region.expanded(REGION_MARGIN);
        let Some(clipped) = expanded.intersection(&bounds) else {
            warn!(id = %m.id, "match region lies outside the image; skipping");
            continue;
        };
        let Some(px) = clipped.to_pixels(size, scale) else {
            warn!(id = %m.id, "match region has no pixels; skipping");
            continue;
        };
        let px = clamp_to_canvas(px, &canvas);

        match style {
            RedactionStyle::BlackBox => fill_black_box(&mut canvas, px, scale),
            RedactionStyle::Blur => {
                let patch = blurred_patch(&canvas, px, scale);
                composite_or_fill(&mut canvas, px, scale, patch);
            }
            RedactionStyle::Pixelate => {
                let patch = mosaic_patch(&canvas, px, scale);
                composite_or_fill(&mut canvas, px, scale, patch);
            }
        }
        applied += 1;
    }

    debug!(applied, %style, "redaction pass complete");
    Frame::new(canvas, scale)
}

/// Clamp a pixel rect so it cannot index outside the canvas.
fn clamp_to_canvas(px: PixelRect, canvas: &RgbaImage) -> PixelRect {
    let x = px.x.min(canvas.width());
    let y = px.y.min(canvas.height());
    PixelRect {
        x,
        y,
        width: px.width.min(canvas.width() - x),
        height: px.height.min(canvas.height() - y),
    }
}

/// Fill the rect with the opaque fill color, rounding the corners.
fn fill_black_box(canvas: &mut RgbaImage, px: PixelRect, scale: f32) {
    let radius = (CORNER_RADIUS * f64::from(scale))
        .round()
        .min(f64::from(px.width.min(px.height)) / 2.0);

    for dy in 0..px.height {
        for dx in 0..px.width {
            if outside_rounded_corner(dx, dy, px.width, px.height, radius) {
                continue;
            }
            canvas.put_pixel(px.x + dx, px.y + dy, FILL);
        }
    }
}

/// Whether the pixel at (dx, dy) of a w x h rect falls outside its rounded
/// corner arcs.
fn outside_rounded_corner(dx: u32, dy: u32, w: u32, h: u32, radius: f64) -> bool {
    if radius <= 0.0 {
        return false;
    }
    // Center of the pixel, relative to the rect.
    let cx = f64::from(dx) + 0.5;
    let cy = f64::from(dy) + 0.5;
    let near_x = if cx < radius {
        Some(radius)
    } else if cx > f64::from(w) - radius {
        Some(f64::from(w) - radius)
    } else {
        None
    };
    let near_y = if cy < radius {
        Some(radius)
    } else if cy > f64::from(h) - radius {
        Some(f64::from(h) - radius)
    } else {
        None
    };
    match (near_x, near_y) {
        (Some(ax), Some(ay)) => {
            let dist2 = (cx - ax).powi(2) + (cy - ay).powi(2);
            dist2 > radius * radius
        }
        _ => false,
    }
}

/// Produce a gaussian-blurred patch of the rect: crop, then blur.
fn blurred_patch(
    canvas: &RgbaImage,
    px: PixelRect,
    scale: f32,
) -> Result<RgbaImage, ObscureError> {
    if px.width == 0 || px.height == 0 {
        return Err(ObscureError::EmptyRegion);
    }
    let crop = imageops::crop_imm(canvas, px.x, px.y, px.width, px.height).to_image();
    Ok(imageops::blur(&crop, BLUR_SIGMA * scale))
}

/// Produce a mosaic patch of the rect: crop, average down, scale back up
/// with hard block edges.
fn mosaic_patch(
    canvas: &RgbaImage,
    px: PixelRect,
    scale: f32,
) -> Result<RgbaImage, ObscureError> {
    if px.width == 0 || px.height == 0 {
        return Err(ObscureError::EmptyRegion);
    }
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let block = ((MOSAIC_BLOCK * scale).round() as u32).max(1);
    let crop = imageops::crop_imm(canvas, px.x, px.y, px.width, px.height).to_image();

    let down_w = px.width.div_ceil(block).max(1);
    let down_h = px.height.div_ceil(block).max(1);
    // Triangle filtering averages each block; nearest-neighbor upscaling
    // keeps the block edges hard.
    let down = imageops::resize(&crop, down_w, down_h, FilterType::Triangle);
    Ok(imageops::resize(&down, px.width, px.height, FilterType::Nearest))
}

/// Composite a filtered patch over the rect, or solid-fill the rect when the
/// filter path failed or produced a patch of the wrong size.
fn composite_or_fill(
    canvas: &mut RgbaImage,
    px: PixelRect,
    scale: f32,
    patch: Result<RgbaImage, ObscureError>,
) {
    let checked = patch.and_then(|p| {
        if p.width() == px.width && p.height() == px.height {
            Ok(p)
        } else {
            Err(ObscureError::DimensionMismatch {
                expected_w: px.width,
                expected_h: px.height,
                actual_w: p.width(),
                actual_h: p.height(),
            })
        }
    });
    match checked {
        Ok(p) => imageops::replace(canvas, &p, i64::from(px.x), i64::from(px.y)),
        Err(e) => {
            warn!(error = %e, "filter unavailable; falling back to solid fill");
            fill_black_box(canvas, px, scale);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detect::DataCategory;
    use crate::geometry::Rect;

    const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);

    fn uniform_frame(width: u32, height: u32) -> Frame {
        Frame::new(RgbaImage::from_pixel(width, height, WHITE), 1.0)
    }

    fn match_at(region: Rect) -> Match {
        Match::new(
            DataCategory::Password,
            "password: hunter22".to_string(),
            region,
            0.9,
        )
    }

    #[test]
    fn test_no_matches_is_pixel_identical() {
        let frame = uniform_frame(64, 64);
        let out = apply_redaction(&frame, &[], RedactionStyle::Blur);
        assert_eq!(out.pixels(), frame.pixels());
        assert_eq!(out.size(), frame.size());
    }

    #[test]
    fn test_deselected_matches_are_ignored() {
        let frame = uniform_frame(64, 64);
        let mut m = match_at(Rect::new(10.0, 10.0, 20.0, 10.0));
        m.should_redact = false;
        let out = apply_redaction(&frame, &[m], RedactionStyle::BlackBox);
        assert_eq!(out.pixels(), frame.pixels());
    }

    #[test]
    fn test_black_box_covers_expanded_region() {
        let frame = uniform_frame(200, 200);
        // Point region (50, 50, 60, 30) expands to (46, 46, 68, 38); with a
        // bottom-left origin that is pixel rows 116..154, columns 46..114.
        let m = match_at(Rect::new(50.0, 50.0, 60.0, 30.0));
        let out = apply_redaction(&frame, &[m], RedactionStyle::BlackBox);
        let pixels = out.pixels();

        // Center of the expanded region is filled.
        assert_eq!(pixels.get_pixel(80, 135), &FILL);
        // Edge midpoints are filled (away from the rounded corners).
        assert_eq!(pixels.get_pixel(46, 135), &FILL);
        assert_eq!(pixels.get_pixel(113, 135), &FILL);
        assert_eq!(pixels.get_pixel(80, 116), &FILL);
        assert_eq!(pixels.get_pixel(80, 153), &FILL);
        // Just outside the expanded region is untouched.
        assert_eq!(pixels.get_pixel(45, 135), &WHITE);
        assert_eq!(pixels.get_pixel(114, 135), &WHITE);
        assert_eq!(pixels.get_pixel(80, 115), &WHITE);
        assert_eq!(pixels.get_pixel(80, 154), &WHITE);
        // Far corners of the image are untouched.
        assert_eq!(pixels.get_pixel(0, 0), &WHITE);
        assert_eq!(pixels.get_pixel(199, 199), &WHITE);
    }

    #[test]
    fn test_black_box_rounds_corners() {
        let frame = uniform_frame(100, 100);
        let m = match_at(Rect::new(20.0, 20.0, 40.0, 20.0));
        let out = apply_redaction(&frame, &[m], RedactionStyle::BlackBox);

        // Expanded region: points (16, 16, 48, 28) -> pixel rows 56..84,
        // columns 16..64. The very corner pixel lies outside the 2pt arc.
        assert_eq!(out.pixels().get_pixel(16, 56), &WHITE);
        // One block in from the corner is filled.
        assert_eq!(out.pixels().get_pixel(19, 59), &FILL);
    }

    #[test]
    fn test_blur_changes_only_selected_region() {
        let mut pixels = RgbaImage::from_pixel(100, 100, WHITE);
        // Paint a dark square inside the match region so the blur has
        // contrast to smear.
        for y in 60..70 {
            for x in 30..50 {
                pixels.put_pixel(x, y, Rgba([0, 0, 0, 255]));
            }
        }
        let frame = Frame::new(pixels, 1.0);
        // Points (26, 26, 48, 18) -> pixel rows 56..74, columns 26..74 after
        // the 4pt margin.
        let m = match_at(Rect::new(30.0, 30.0, 40.0, 10.0));
        let out = apply_redaction(&frame, &[m], RedactionStyle::Blur);

        // Inside the dark square the blur pulls values toward white.
        let center = out.pixels().get_pixel(40, 65);
        assert_ne!(center, &Rgba([0, 0, 0, 255]));
        // Outside the expanded region nothing moved.
        assert_eq!(out.pixels().get_pixel(10, 10), &WHITE);
        assert_eq!(out.pixels().get_pixel(90, 90), &WHITE);
    }

    #[test]
    fn test_pixelate_produces_uniform_blocks() {
        let mut pixels = RgbaImage::from_pixel(100, 100, WHITE);
        for y in 0..100 {
            for x in 0..100 {
                if (x + y) % 2 == 0 {
                    pixels.put_pixel(x, y, Rgba([0, 0, 0, 255]));
                }
            }
        }
        let frame = Frame::new(pixels, 1.0);
        let m = match_at(Rect::new(20.0, 20.0, 40.0, 40.0));
        let out = apply_redaction(&frame, &[m], RedactionStyle::Pixelate);

        // Within one mosaic block every pixel is identical.
        let base = *out.pixels().get_pixel(30, 50);
        assert_eq!(out.pixels().get_pixel(31, 50), &base);
        assert_eq!(out.pixels().get_pixel(30, 51), &base);
    }

    #[test]
    fn test_blurred_patch_rejects_empty_region() {
        let canvas = RgbaImage::from_pixel(20, 20, WHITE);
        let empty = PixelRect {
            x: 5,
            y: 5,
            width: 0,
            height: 4,
        };
        assert!(matches!(
            blurred_patch(&canvas, empty, 1.0),
            Err(ObscureError::EmptyRegion)
        ));
    }

    #[test]
    fn test_mosaic_patch_rejects_empty_region() {
        let canvas = RgbaImage::from_pixel(20, 20, WHITE);
        let empty = PixelRect {
            x: 5,
            y: 5,
            width: 4,
            height: 0,
        };
        assert!(matches!(
            mosaic_patch(&canvas, empty, 1.0),
            Err(ObscureError::EmptyRegion)
        ));
    }

    #[test]
    fn test_filter_error_falls_back_to_solid_fill() {
        let mut canvas = RgbaImage::from_pixel(40, 40, WHITE);
        let px = PixelRect {
            x: 10,
            y: 10,
            width: 20,
            height: 10,
        };
        composite_or_fill(&mut canvas, px, 1.0, Err(ObscureError::EmptyRegion));

        // The region is solid-filled instead of being left untouched.
        assert_eq!(canvas.get_pixel(20, 15), &FILL);
        assert_eq!(canvas.get_pixel(10, 15), &FILL);
        // Pixels outside the region stay put.
        assert_eq!(canvas.get_pixel(9, 15), &WHITE);
        assert_eq!(canvas.get_pixel(20, 25), &WHITE);
    }

    #[test]
    fn test_mismatched_patch_falls_back_to_solid_fill() {
        let mut canvas = RgbaImage::from_pixel(40, 40, WHITE);
        let px = PixelRect {
            x: 10,
            y: 10,
            width: 20,
            height: 10,
        };
        // A patch of the wrong size must never be composited.
        let bad_patch = RgbaImage::from_pixel(5, 5, Rgba([9, 9, 9, 255]));
        composite_or_fill(&mut canvas, px, 1.0, Ok(bad_patch));

        assert_eq!(canvas.get_pixel(20, 15), &FILL);
        // The mismatched patch itself was discarded, not composited.
        assert_ne!(canvas.get_pixel(10, 10), &Rgba([9, 9, 9, 255]));
        assert_ne!(canvas.get_pixel(14, 14), &Rgba([9, 9, 9, 255]));
    }

    #[test]
    fn test_region_outside_image_is_skipped() {
        let frame = uniform_frame(50, 50);
        let m = match_at(Rect::new(500.0, 500.0, 20.0, 10.0));
        let out = apply_redaction(&frame, &[m], RedactionStyle::BlackBox);
        assert_eq!(out.pixels(), frame.pixels());
    }

    #[test]
    fn test_overhanging_region_is_clamped() {
        let frame = uniform_frame(50, 50);
        let m = match_at(Rect::new(40.0, 40.0, 30.0, 30.0));
        let out = apply_redaction(&frame, &[m], RedactionStyle::BlackBox);

        // The clamped area is filled up to the image edge (sampled away from
        // the rounded corner).
        assert_eq!(out.pixels().get_pixel(45, 5), &FILL);
        // Opposite corner untouched.
        assert_eq!(out.pixels().get_pixel(0, 49), &WHITE);
    }

    #[test]
    fn test_deterministic_output() {
        let frame = uniform_frame(80, 80);
        let m = match_at(Rect::new(10.0, 10.0, 30.0, 15.0));
        let a = apply_redaction(&frame, std::slice::from_ref(&m), RedactionStyle::Pixelate);
        let b = apply_redaction(&frame, std::slice::from_ref(&m), RedactionStyle::Pixelate);
        assert_eq!(a.pixels(), b.pixels());
    }

    #[test]
    fn test_input_frame_unchanged() {
        let frame = uniform_frame(60, 60);
        let m = match_at(Rect::new(10.0, 10.0, 20.0, 10.0));
        let _ = apply_redaction(&frame, &[m], RedactionStyle::BlackBox);
        assert_eq!(frame.pixels().get_pixel(20, 45), &WHITE);
    }

    #[test]
    fn test_retina_scale_fills_pixel_space() {
        // 100x100 points at 2x backing scale: a 10pt region covers 20px.
        let frame = Frame::new(RgbaImage::from_pixel(200, 200, WHITE), 2.0);
        let m = match_at(Rect::new(40.0, 40.0, 20.0, 10.0));
        let out = apply_redaction(&frame, &[m], RedactionStyle::BlackBox);

        // Expanded: points (36, 36, 28, 18) -> pixels x 72..128, rows
        // (100-54)*2=92 .. (100-36)*2=128.
        assert_eq!(out.pixels().get_pixel(100, 110), &FILL);
        assert_eq!(out.pixels().get_pixel(70, 110), &WHITE);
    }

    #[test]
    fn test_style_display_and_serde() {
        assert_eq!(RedactionStyle::BlackBox.to_string(), "black-box");
        assert_eq!(
            serde_json::to_string(&RedactionStyle::Pixelate).unwrap(),
            r#""pixelate""#
        );
        let back: RedactionStyle = serde_json::from_str(r#""blur""#).unwrap();
        assert_eq!(back, RedactionStyle::Blur);
    }
}
