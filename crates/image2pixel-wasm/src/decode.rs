//! Image decoding WASM binding.
//!
//! ```typescript
//! import { decode_image } from '@image2pixel/wasm';
//!
//! const image = decode_image(new Uint8Array(await file.arrayBuffer()));
//! ```

use crate::error::to_js_error;
use crate::types::JsDecodedImage;
use image2pixel_core::decode;
use wasm_bindgen::prelude::*;

/// Decode PNG, JPEG, WebP or BMP bytes to upright RGB.
///
/// The format is sniffed from the leading bytes and EXIF orientation is
/// applied.
///
/// # Errors
///
/// Returns an error if the bytes are not a supported image or are corrupted.
#[wasm_bindgen]
pub fn decode_image(bytes: &[u8]) -> Result<JsDecodedImage, JsValue> {
    decode::decode_image(bytes)
        .map(JsDecodedImage::from_decoded)
        .map_err(to_js_error)
}
