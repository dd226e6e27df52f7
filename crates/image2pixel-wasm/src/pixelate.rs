//! WASM bindings for the pixelation effect.

use crate::error::to_js_error;
use crate::types::JsDecodedImage;
use image2pixel_core::pixelate::{self as core_pixelate, PixelationIntensity};
use wasm_bindgen::prelude::*;

/// Pixelate an image into blocks, `segments` blocks across.
///
/// `0` returns an unchanged copy. The result keeps the input dimensions.
///
/// # Example (TypeScript)
///
/// ```typescript
/// const blocky = pixelate(image, 40);
/// ```
#[wasm_bindgen]
pub fn pixelate(
    image: &JsDecodedImage,
    segments: u32,
    max_segments: u32,
) -> Result<JsDecodedImage, JsValue> {
    core_pixelate::apply_pixelation(&image.to_decoded(), segments, max_segments)
        .map(JsDecodedImage::from_decoded)
        .map_err(to_js_error)
}

/// Suggested segment count for an image `width` pixels wide at the named
/// intensity (`"light"`, `"medium"` or `"heavy"`).
#[wasm_bindgen]
pub fn recommended_segment_count(width: u32, intensity: &str) -> Result<u32, JsValue> {
    let intensity: PixelationIntensity = intensity.parse().map_err(to_js_error)?;
    Ok(core_pixelate::recommended_segment_count(width, intensity))
}
