//! Image encoding for export.
//!
//! This module provides functionality for:
//! - Encoding the working image to JPEG (configurable quality), PNG or WebP
//! - Resolving output format names and file extensions
//!
//! All operations are synchronous and single-threaded.
//!
//! # Examples
//!
//! ```ignore
//! use image2pixel_core::encode::{encode_image, OutputFormat};
//!
//! let pixels = vec![128u8; 100 * 100 * 3]; // Gray image
//! let png_bytes = encode_image(&pixels, 100, 100, OutputFormat::Png, 90).unwrap();
//! println!("Encoded {} bytes", png_bytes.len());
//! ```

mod container;

pub use container::{encode_image, EncodeError, OutputFormat};
