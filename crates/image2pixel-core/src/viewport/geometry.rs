//! Display-space geometry shared by the crop mapper and the overlay renderer.
//!
//! # Coordinate System
//!
//! - Display coordinates are widget pixels, origin at the top-left corner
//! - The image is fit into the view minus a border padding, then zoomed
//! - The pan offset moves the image center away from the view center
//! - Source coordinates are full-resolution image pixels

use kurbo::{Affine, Point, Rect, Size, Vec2};
use serde::{Deserialize, Serialize};

use crate::error::{EditError, Result};

/// Size of the display area, border padding included.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ViewSize {
    pub width: u32,
    pub height: u32,
}

impl ViewSize {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Geometric center of the view in display coordinates.
    pub fn center(self) -> Point {
        Point::new(self.width as f64 / 2.0, self.height as f64 / 2.0)
    }

    /// Usable area after subtracting `padding` from each side length.
    ///
    /// # Errors
    ///
    /// `InvalidParameter` when the padding leaves no usable area.
    pub fn padded(self, padding: u32) -> Result<Size> {
        let area = Size::new(
            self.width as f64 - padding as f64,
            self.height as f64 - padding as f64,
        );
        if area.width <= 0.0 || area.height <= 0.0 {
            return Err(EditError::invalid(format!(
                "view {}x{} leaves no area inside padding {}",
                self.width, self.height, padding
            )));
        }
        Ok(area)
    }
}

/// Scale factor that fits a `source_width x source_height` image inside the
/// padded view while preserving its aspect ratio.
///
/// # Errors
///
/// `InvalidParameter` for zero source dimensions or a view smaller than its
/// padding.
pub fn fit_scale(source_width: u32, source_height: u32, view: ViewSize, padding: u32) -> Result<f64> {
    if source_width == 0 || source_height == 0 {
        return Err(EditError::invalid(format!(
            "image dimensions must be positive, got {}x{}",
            source_width, source_height
        )));
    }
    let area = view.padded(padding)?;
    Ok((area.width / source_width as f64).min(area.height / source_height as f64))
}

/// Display-space size of the aspect-locked crop frame inside `area`.
///
/// An area wider than `ratio` constrains the frame by height, otherwise by
/// width. The crop mapper and the overlay both go through this function so
/// the exported crop always matches the frame the user saw.
pub fn crop_frame_size(area: Size, ratio: f64) -> Size {
    if area.width / area.height > ratio {
        Size::new(area.height * ratio, area.height)
    } else {
        Size::new(area.width, area.width / ratio)
    }
}

/// Transform taking source pixels to display coordinates for one view, zoom
/// and pan offset. Its `inverse()` maps a display point back to the source
/// pixel under it.
///
/// # Errors
///
/// `InvalidParameter` when the fit scale times `zoom` is not a positive
/// finite number, plus the errors of [`fit_scale`].
pub fn source_to_display(
    source_width: u32,
    source_height: u32,
    view: ViewSize,
    padding: u32,
    zoom: f64,
    offset: Vec2,
) -> Result<Affine> {
    let total_scale = fit_scale(source_width, source_height, view, padding)? * zoom;
    if !(total_scale.is_finite() && total_scale > 0.0) {
        return Err(EditError::invalid(format!(
            "total scale must be positive, got {}",
            total_scale
        )));
    }
    let source_center = Vec2::new(source_width as f64 / 2.0, source_height as f64 / 2.0);
    let display_center = view.center() + offset;
    Ok(Affine::translate(display_center.to_vec2())
        * Affine::scale(total_scale)
        * Affine::translate(-source_center))
}

/// Where the zoomed, panned image is drawn inside the view.
pub fn display_rect(
    source_width: u32,
    source_height: u32,
    view: ViewSize,
    padding: u32,
    zoom: f64,
    offset: Vec2,
) -> Result<Rect> {
    let transform = source_to_display(source_width, source_height, view, padding, zoom, offset)?;
    let source = Rect::new(0.0, 0.0, source_width as f64, source_height as f64);
    Ok(transform.transform_rect_bbox(source))
}

/// The crop frame overlay, centered in the view.
///
/// # Errors
///
/// `InvalidParameter` for a non-positive ratio or a view smaller than its
/// padding.
pub fn overlay_rect(view: ViewSize, padding: u32, ratio: f64) -> Result<Rect> {
    if !(ratio.is_finite() && ratio > 0.0) {
        return Err(EditError::invalid(format!(
            "ratio must be positive, got {}",
            ratio
        )));
    }
    let frame = crop_frame_size(view.padded(padding)?, ratio);
    Ok(Rect::from_center_size(view.center(), frame))
}
