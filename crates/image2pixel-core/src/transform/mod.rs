//! Image transformation operations.
//!
//! This module provides the non-destructive pixel operations of the editing
//! pipeline. The crop rectangle itself is derived by
//! [`crate::viewport::compute_crop_box`]; this module only extracts it.
//!
//! # Coordinate System
//!
//! - Crop rectangles are integer source pixels
//! - Origin is top-left corner

mod crop;

pub use crop::{apply_crop, PixelRect};
