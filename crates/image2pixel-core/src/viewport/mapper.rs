//! Viewport-to-source crop mapping.
//!
//! Translates the crop frame the user sees (aspect ratio, zoom, pan offset,
//! view size) into the exact rectangle of the full-resolution source to
//! extract. The mapper is a pure function of its inputs.

use kurbo::{Point, Rect, Vec2};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::geometry::{crop_frame_size, fit_scale, ViewSize};
use crate::decode::{DecodedImage, SourceImage};
use crate::error::{EditError, Result};
use crate::transform::{apply_crop, PixelRect};

/// Snapshot of the interactive view state consumed by the mapper.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TransformParameters {
    /// Target width/height, or `None` when no crop framing is active.
    pub ratio: Option<f64>,
    /// Display zoom over the fit-to-view scale (1.0 = 100%).
    pub zoom: f64,
    /// Pan displacement of the image center from the view center, in
    /// current-zoom display pixels.
    pub offset: Vec2,
    /// Display area size, border padding included.
    pub view_size: ViewSize,
}

impl TransformParameters {
    /// Crop box for a `source_width x source_height` source.
    ///
    /// # Errors
    ///
    /// `NoRatioSelected` when no ratio is active, otherwise whatever
    /// [`compute_crop_box`] reports.
    pub fn crop_box(&self, source_width: u32, source_height: u32, padding: u32) -> Result<CropBox> {
        let ratio = self.ratio.ok_or(EditError::NoRatioSelected)?;
        compute_crop_box(
            source_width,
            source_height,
            ratio,
            self.zoom,
            self.offset,
            self.view_size,
            padding,
        )
    }
}

/// Crop rectangle in real-valued source pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CropBox {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl CropBox {
    pub fn width(&self) -> f64 {
        self.right - self.left
    }

    pub fn height(&self) -> f64 {
        self.bottom - self.top
    }

    /// Width over height.
    pub fn aspect_ratio(&self) -> f64 {
        self.width() / self.height()
    }

    /// Integer pixel rectangle inside a `source_width x source_height` image.
    ///
    /// Each edge is rounded to the nearest pixel, exact halves to the even
    /// neighbour. A side that rounds to zero is widened to one pixel, staying
    /// inside the image.
    pub fn to_pixel_rect(&self, source_width: u32, source_height: u32) -> PixelRect {
        let (x, width) = snap_span(self.left, self.right, source_width);
        let (y, height) = snap_span(self.top, self.bottom, source_height);
        PixelRect {
            x,
            y,
            width,
            height,
        }
    }
}

fn snap_span(start: f64, end: f64, limit: u32) -> (u32, u32) {
    let start = (start.round_ties_even().max(0.0) as u32).min(limit.saturating_sub(1));
    let end = (end.round_ties_even().max(0.0) as u32).min(limit);
    (start, end.saturating_sub(start).max(1))
}

/// Compute the source rectangle that corresponds to the on-screen crop frame.
///
/// # Algorithm
///
/// 1. `scale_fit` fits the source into the view minus `padding`
/// 2. `total_scale = scale_fit * zoom` converts display lengths to source lengths
/// 3. The crop frame is the largest `ratio` rectangle inside the padded view
/// 4. The frame is centered on `source_center - offset / total_scale`; the
///    offset is subtracted because moving the image right moves the frame
///    left relative to the image
/// 5. Edges are clamped to the source bounds
///
/// # Errors
///
/// `InvalidParameter` for a non-positive (or non-finite) ratio or zoom, zero
/// source dimensions, a view smaller than its padding, or a box that has
/// no area left after clamping.
pub fn compute_crop_box(
    source_width: u32,
    source_height: u32,
    ratio: f64,
    zoom: f64,
    offset: Vec2,
    view_size: ViewSize,
    padding: u32,
) -> Result<CropBox> {
    if !(ratio.is_finite() && ratio > 0.0) {
        return Err(EditError::invalid(format!(
            "ratio must be positive, got {}",
            ratio
        )));
    }
    if !(zoom.is_finite() && zoom > 0.0) {
        return Err(EditError::invalid(format!(
            "zoom must be positive, got {}",
            zoom
        )));
    }
    if !offset.is_finite() {
        return Err(EditError::invalid("offset must be finite"));
    }

    let scale_fit = fit_scale(source_width, source_height, view_size, padding)?;
    let total_scale = scale_fit * zoom;
    if total_scale <= 0.0 {
        return Err(EditError::invalid(format!(
            "total scale must be positive, got {}",
            total_scale
        )));
    }

    let frame = crop_frame_size(view_size.padded(padding)?, ratio);
    let source_center = Point::new(source_width as f64 / 2.0, source_height as f64 / 2.0);
    let unclamped = Rect::from_center_size(source_center - offset / total_scale, frame / total_scale);

    let crop = CropBox {
        left: unclamped.x0.clamp(0.0, source_width as f64),
        top: unclamped.y0.clamp(0.0, source_height as f64),
        right: unclamped.x1.clamp(0.0, source_width as f64),
        bottom: unclamped.y1.clamp(0.0, source_height as f64),
    };

    if crop.right <= crop.left || crop.bottom <= crop.top {
        return Err(EditError::invalid(format!(
            "crop box ({}, {}, {}, {}) has no area inside the {}x{} image",
            crop.left, crop.top, crop.right, crop.bottom, source_width, source_height
        )));
    }

    debug!(
        scale_fit,
        total_scale,
        left = crop.left,
        top = crop.top,
        right = crop.right,
        bottom = crop.bottom,
        "computed crop box"
    );

    Ok(crop)
}

/// Crop an already decoded full-resolution image. The input is untouched.
pub fn crop_image(
    image: &DecodedImage,
    params: &TransformParameters,
    padding: u32,
) -> Result<DecodedImage> {
    let crop = params.crop_box(image.width, image.height, padding)?;
    Ok(apply_crop(image, &crop.to_pixel_rect(image.width, image.height)))
}

/// Re-decode `source` and crop it.
///
/// # Errors
///
/// `SourceUnavailable` when the source cannot be read or decoded, plus the
/// errors of [`TransformParameters::crop_box`].
pub fn crop_source(
    source: &SourceImage,
    params: &TransformParameters,
    padding: u32,
) -> Result<DecodedImage> {
    // Validate before paying for a full decode.
    if params.ratio.is_none() {
        return Err(EditError::NoRatioSelected);
    }
    let image = source.decode()?;
    crop_image(&image, params, padding)
}


// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    const TOLERANCE: f64 = 1e-6;

    fn dimensions_strategy() -> impl Strategy<Value = (u32, u32)> {
        (16u32..=4000, 16u32..=4000)
    }

    fn view_strategy() -> impl Strategy<Value = ViewSize> {
        (200u32..=2000, 200u32..=1400).prop_map(|(w, h)| ViewSize::new(w, h))
    }

    proptest! {
        /// Property: Successful boxes always lie inside the source with positive area.
        #[test]
        fn prop_box_within_bounds(
            (width, height) in dimensions_strategy(),
            ratio in 0.2f64..=5.0,
            zoom in 1.0f64..=5.0,
            (dx, dy) in (-400.0f64..=400.0, -400.0f64..=400.0),
            view in view_strategy(),
        ) {
            if let Ok(crop) = compute_crop_box(width, height, ratio, zoom, Vec2::new(dx, dy), view, 40) {
                prop_assert!(crop.left >= 0.0);
                prop_assert!(crop.top >= 0.0);
                prop_assert!(crop.left < crop.right);
                prop_assert!(crop.top < crop.bottom);
                prop_assert!(crop.right <= width as f64);
                prop_assert!(crop.bottom <= height as f64);
            }
        }

        /// Property: An unclamped box has exactly the requested aspect ratio.
        #[test]
        fn prop_unclamped_box_keeps_ratio(
            (width, height) in dimensions_strategy(),
            ratio in 0.2f64..=5.0,
            zoom in 1.0f64..=5.0,
            (dx, dy) in (-50.0f64..=50.0, -50.0f64..=50.0),
            view in view_strategy(),
        ) {
            let crop = compute_crop_box(width, height, ratio, zoom, Vec2::new(dx, dy), view, 40);
            if let Ok(crop) = crop {
                let touches_edge = crop.left <= TOLERANCE
                    || crop.top <= TOLERANCE
                    || crop.right >= width as f64 - TOLERANCE
                    || crop.bottom >= height as f64 - TOLERANCE;
                if !touches_edge {
                    let actual = crop.aspect_ratio();
                    prop_assert!(
                        (actual - ratio).abs() / ratio < 1e-9,
                        "ratio {} became {}", ratio, actual
                    );
                }
            }
        }

        /// Property: Without offset the box is centered on the source.
        #[test]
        fn prop_zero_offset_is_centered(
            (width, height) in dimensions_strategy(),
            ratio in 0.2f64..=5.0,
            zoom in 1.0f64..=5.0,
            view in view_strategy(),
        ) {
            let crop = compute_crop_box(width, height, ratio, zoom, Vec2::ZERO, view, 40).unwrap();
            prop_assert!(((crop.left + crop.right) / 2.0 - width as f64 / 2.0).abs() < TOLERANCE);
            prop_assert!(((crop.top + crop.bottom) / 2.0 - height as f64 / 2.0).abs() < TOLERANCE);
        }

        /// Property: Integer rectangles stay inside the image and are never empty.
        #[test]
        fn prop_pixel_rect_inside_image(
            (width, height) in dimensions_strategy(),
            ratio in 0.2f64..=5.0,
            zoom in 1.0f64..=5.0,
            (dx, dy) in (-400.0f64..=400.0, -400.0f64..=400.0),
            view in view_strategy(),
        ) {
            if let Ok(crop) = compute_crop_box(width, height, ratio, zoom, Vec2::new(dx, dy), view, 40) {
                let rect = crop.to_pixel_rect(width, height);
                prop_assert!(rect.width >= 1 && rect.height >= 1);
                prop_assert!(rect.x + rect.width <= width);
                prop_assert!(rect.y + rect.height <= height);
            }
        }
    }
}
