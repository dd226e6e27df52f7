//! Pixel-art style pixelation.
//!
//! ## Algorithm
//!
//! The effect is a two-stage resample:
//! 1. Area-average the image down to a coarse grid `segments` cells wide,
//!    with the row count following the image aspect ratio
//! 2. Scale the grid back to the original size with nearest-neighbor
//!    sampling, turning every cell into a flat block with hard edges
//!
//! Averaging in the first stage gives each block the mean color of the
//! region it replaces instead of an arbitrary sample.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::decode::{downsample_area, upsample_nearest, DecodedImage};
use crate::error::{EditError, Result};

/// Named pixelation strength, expressed as a fraction of the image width.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PixelationIntensity {
    /// About 15% of the width in segments.
    Light,
    /// About 8% of the width in segments.
    #[default]
    Medium,
    /// About 4% of the width in segments.
    Heavy,
}

impl PixelationIntensity {
    pub fn width_fraction(self) -> f64 {
        match self {
            PixelationIntensity::Light => 0.15,
            PixelationIntensity::Medium => 0.08,
            PixelationIntensity::Heavy => 0.04,
        }
    }
}

impl fmt::Display for PixelationIntensity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PixelationIntensity::Light => "light",
            PixelationIntensity::Medium => "medium",
            PixelationIntensity::Heavy => "heavy",
        };
        f.write_str(name)
    }
}

impl FromStr for PixelationIntensity {
    type Err = EditError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "light" => Ok(PixelationIntensity::Light),
            "medium" => Ok(PixelationIntensity::Medium),
            "heavy" => Ok(PixelationIntensity::Heavy),
            other => Err(EditError::invalid(format!(
                "unknown intensity '{}', use: light, medium, heavy",
                other
            ))),
        }
    }
}

/// Suggested segment count for an image `width` pixels wide.
///
/// Never below 8, so even tiny images get a recognisable grid.
pub fn recommended_segment_count(width: u32, intensity: PixelationIntensity) -> u32 {
    ((width as f64 * intensity.width_fraction()).floor() as u32).max(8)
}

/// Size of the coarse grid used for an image of the given dimensions.
///
/// The width is `segments`, capped at the image width; the height follows
/// the aspect ratio, rounded, with at least one row.
pub fn pixel_grid(width: u32, height: u32, segments: u32) -> (u32, u32) {
    let small_w = segments.min(width).max(1);
    let small_h = (small_w as f64 * height as f64 / width as f64).round() as u32;
    (small_w, small_h.clamp(1, height.max(1)))
}

/// Pixelate `image` into blocks, `segments_count` blocks across.
///
/// The result has the same dimensions as the input; the input is not
/// modified.
///
/// # Errors
///
/// `InvalidParameter` if `segments_count` is zero or the image is empty.
pub fn pixelate(image: &DecodedImage, segments_count: u32) -> Result<DecodedImage> {
    if segments_count == 0 {
        return Err(EditError::invalid("segments_count must be positive, got 0"));
    }
    if image.is_empty() {
        return Err(EditError::invalid(format!(
            "image dimensions must be positive, got {}x{}",
            image.width, image.height
        )));
    }

    let (small_w, small_h) = pixel_grid(image.width, image.height, segments_count);
    debug!(
        width = image.width,
        height = image.height,
        small_w,
        small_h,
        "pixelating"
    );

    let small = downsample_area(image, small_w, small_h)?;
    Ok(upsample_nearest(&small, image.width, image.height)?)
}

/// Slider-driven pixelation of a clean baseline.
///
/// `segments_count == 0` means "off" and returns a copy of the baseline, so
/// the effect is always derived from the un-pixelated image and never stacks.
///
/// # Errors
///
/// `InvalidParameter` if `segments_count` exceeds `max_segments`.
pub fn apply_pixelation(
    baseline: &DecodedImage,
    segments_count: u32,
    max_segments: u32,
) -> Result<DecodedImage> {
    if segments_count > max_segments {
        return Err(EditError::invalid(format!(
            "segments_count must be at most {}, got {}",
            max_segments, segments_count
        )));
    }
    if segments_count == 0 {
        return Ok(baseline.clone());
    }
    pixelate(baseline, segments_count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    /// Create an image where every pixel has a distinct color.
    fn noisy_image(width: u32, height: u32) -> DecodedImage {
        let mut pixels = Vec::with_capacity((width * height * 3) as usize);
        for y in 0..height {
            for x in 0..width {
                pixels.push((x * 7 % 256) as u8);
                pixels.push((y * 13 % 256) as u8);
                pixels.push(((x + y) * 3 % 256) as u8);
            }
        }
        DecodedImage::new(width, height, pixels)
    }

    fn distinct_colors(image: &DecodedImage) -> usize {
        image
            .pixels
            .chunks_exact(3)
            .map(|p| [p[0], p[1], p[2]])
            .collect::<HashSet<_>>()
            .len()
    }

    #[test]
    fn test_pixelate_100x100_into_10x10_blocks() {
        let img = noisy_image(100, 100);
        let result = pixelate(&img, 10).unwrap();

        assert_eq!((result.width, result.height), (100, 100));
        assert!(distinct_colors(&result) <= 100);

        for by in 0..10 {
            for bx in 0..10 {
                let expected = result.pixel(bx * 10, by * 10);
                for y in 0..10 {
                    for x in 0..10 {
                        assert_eq!(result.pixel(bx * 10 + x, by * 10 + y), expected);
                    }
                }
            }
        }
    }

    #[test]
    fn test_block_color_is_area_mean() {
        // Left half red, right half blue; two segments give one block each
        let mut pixels = Vec::new();
        for _y in 0..4 {
            for x in 0..8 {
                if x < 4 {
                    pixels.extend_from_slice(&[255, 0, 0]);
                } else {
                    pixels.extend_from_slice(&[0, 0, 255]);
                }
            }
        }
        let img = DecodedImage::new(8, 4, pixels);
        let result = pixelate(&img, 2).unwrap();
        assert_eq!(result.pixel(0, 0), [255, 0, 0]);
        assert_eq!(result.pixel(7, 3), [0, 0, 255]);

        // A single segment averages everything
        let result = pixelate(&img, 1).unwrap();
        assert_eq!(result.pixel(3, 2), [128, 0, 128]);
    }

    #[test]
    fn test_pixelate_rejects_zero_segments() {
        let img = noisy_image(10, 10);
        assert!(matches!(
            pixelate(&img, 0),
            Err(EditError::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_pixelate_rejects_empty_image() {
        let img = DecodedImage::new(0, 0, vec![]);
        assert!(pixelate(&img, 4).is_err());
    }

    #[test]
    fn test_pixelate_does_not_mutate_input() {
        let img = noisy_image(30, 20);
        let before = img.clone();
        let _ = pixelate(&img, 5).unwrap();
        assert_eq!(img, before);
    }

    #[test]
    fn test_segments_wider_than_image_is_identity() {
        let img = noisy_image(12, 6);
        assert_eq!(pixelate(&img, 200).unwrap(), img);
    }

    #[test]
    fn test_pixel_grid_keeps_aspect_and_one_row() {
        assert_eq!(pixel_grid(1000, 500, 40), (40, 20));
        assert_eq!(pixel_grid(300, 100, 10), (10, 3));
        assert_eq!(pixel_grid(1000, 10, 8), (8, 1));
        assert_eq!(pixel_grid(10, 10, 50), (10, 10));
    }

    #[test]
    fn test_apply_pixelation_zero_is_passthrough() {
        let img = noisy_image(16, 16);
        assert_eq!(apply_pixelation(&img, 0, 200).unwrap(), img);
    }

    #[test]
    fn test_apply_pixelation_respects_maximum() {
        let img = noisy_image(16, 16);
        assert!(apply_pixelation(&img, 201, 200).is_err());
        assert!(apply_pixelation(&img, 200, 200).is_ok());
    }

    #[test]
    fn test_recommended_segment_count() {
        assert_eq!(recommended_segment_count(1000, PixelationIntensity::Light), 150);
        assert_eq!(recommended_segment_count(1000, PixelationIntensity::Medium), 80);
        assert_eq!(recommended_segment_count(1000, PixelationIntensity::Heavy), 40);
        assert_eq!(recommended_segment_count(50, PixelationIntensity::Heavy), 8);
    }

    #[test]
    fn test_intensity_parsing() {
        assert_eq!(
            "Heavy".parse::<PixelationIntensity>().unwrap(),
            PixelationIntensity::Heavy
        );
        assert_eq!(PixelationIntensity::Light.to_string(), "light");
        assert!("extreme".parse::<PixelationIntensity>().is_err());
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================
