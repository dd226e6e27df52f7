//! Pixel rectangle extraction.
//!
//! # Coordinate System
//!
//! - (0, 0) = top-left pixel
//! - `x + width` and `y + height` are exclusive right and bottom edges
//!
//! # Example
//!
//! ```ignore
//! // Crop a 50x50 region starting at (25, 25)
//! let cropped = apply_crop(&image, &PixelRect { x: 25, y: 25, width: 50, height: 50 });
//! ```

use serde::{Deserialize, Serialize};

use crate::decode::DecodedImage;

/// Integer crop rectangle in source pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PixelRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl PixelRect {
    /// Rectangle covering a whole `width x height` image.
    pub fn full(width: u32, height: u32) -> Self {
        Self {
            x: 0,
            y: 0,
            width,
            height,
        }
    }
}

/// Copy a rectangle out of `image` into a new image.
///
/// # Behavior
///
/// - A rectangle reaching past the image is clamped to the image bounds
/// - Minimum output dimension is 1x1 pixels
/// - A full-image rectangle returns a copy of the original image
/// - The input image is never modified
pub fn apply_crop(image: &DecodedImage, rect: &PixelRect) -> DecodedImage {
    // Fast path: full crop returns a clone
    if *rect == PixelRect::full(image.width, image.height) {
        return image.clone();
    }

    let px_left = rect.x.min(image.width.saturating_sub(1));
    let px_top = rect.y.min(image.height.saturating_sub(1));
    let px_right = px_left.saturating_add(rect.width).min(image.width);
    let px_bottom = px_top.saturating_add(rect.height).min(image.height);

    let out_width = px_right.saturating_sub(px_left).max(1);
    let out_height = px_bottom.saturating_sub(px_top).max(1);

    let row_bytes = out_width as usize * 3;
    let mut output = Vec::with_capacity(row_bytes * out_height as usize);

    // Copy pixel data row by row
    for y in 0..out_height {
        let src_row_start = image.byte_offset(px_left, px_top + y);
        output.extend_from_slice(&image.pixels[src_row_start..src_row_start + row_bytes]);
    }

    DecodedImage {
        width: out_width,
        height: out_height,
        pixels: output,
    }
}


// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn dimensions_strategy() -> impl Strategy<Value = (u32, u32)> {
        (4u32..=100, 4u32..=100)
    }

    fn create_test_image(width: u32, height: u32) -> DecodedImage {
        let mut pixels = Vec::with_capacity(width as usize * height as usize * 3);
        for y in 0..height {
            for x in 0..width {
                pixels.extend_from_slice(&[x as u8, y as u8, 7]);
            }
        }
        DecodedImage {
            width,
            height,
            pixels,
        }
    }

    proptest! {
        /// Property: Output dimensions are positive and bounded by the input.
        #[test]
        fn prop_output_dimensions_bounded(
            (width, height) in dimensions_strategy(),
            (x, y, w, h) in (0u32..=120, 0u32..=120, 0u32..=120, 0u32..=120),
        ) {
            let img = create_test_image(width, height);
            let result = apply_crop(&img, &PixelRect { x, y, width: w, height: h });

            prop_assert!(result.width >= 1 && result.width <= width);
            prop_assert!(result.height >= 1 && result.height <= height);
            prop_assert_eq!(result.pixels.len(), (result.width * result.height * 3) as usize);
        }

        /// Property: Every output pixel is the source pixel at the shifted position.
        #[test]
        fn prop_pixels_come_from_offset_position(
            (width, height) in dimensions_strategy(),
            (x, y) in (0u32..4, 0u32..4),
        ) {
            let img = create_test_image(width, height);
            let rect = PixelRect { x, y, width: width - x, height: height - y };
            let result = apply_crop(&img, &rect);

            for oy in 0..result.height {
                for ox in 0..result.width {
                    prop_assert_eq!(result.pixel(ox, oy), img.pixel(ox + x, oy + y));
                }
            }
        }
    }
}
