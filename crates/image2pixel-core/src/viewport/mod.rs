//! Viewport-to-source mapping.
//!
//! A UI shows the source image fit-scaled into a padded view, zoomed, and
//! panned, with an aspect-locked crop frame centered on top. This module
//! holds the geometry for both directions: from the on-screen frame to the
//! exact source rectangle ([`compute_crop_box`]), and from the view state to
//! what should be drawn ([`display_rect`], [`overlay_rect`]).
//!
//! Both directions share [`crop_frame_size`], so the exported crop always
//! matches the frame the user saw.

mod geometry;
mod mapper;

pub use geometry::{
    crop_frame_size, display_rect, fit_scale, overlay_rect, source_to_display, ViewSize,
};
pub use kurbo::{Affine, Point, Rect, Size, Vec2};
pub use mapper::{compute_crop_box, crop_image, crop_source, CropBox, TransformParameters};
