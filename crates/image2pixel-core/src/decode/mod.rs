//! Image decoding and resampling for Image2Pixel.
//!
//! This module provides functionality for:
//! - Decoding source images (PNG, JPEG, WebP, BMP) with EXIF orientation applied
//! - Resampling for pixelation: area downsampling, nearest-neighbor upsampling
//!
//! # Architecture
//!
//! All operations are synchronous and single-threaded. A [`SourceImage`] is a
//! read-only handle that is decoded afresh whenever full-resolution pixels
//! are required.
//!
//! # Examples
//!
//! ```ignore
//! use image2pixel_core::decode::SourceImage;
//!
//! let source = SourceImage::from_path("photo.png");
//! let image = source.decode()?;
//! println!("Decoded {}x{} image", image.width, image.height);
//! ```

mod resample;
mod source;
mod types;

pub use resample::{downsample_area, upsample_nearest};
pub use source::{decode_image, SourceImage};
pub use types::{DecodeError, DecodedImage, Orientation};
