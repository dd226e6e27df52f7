//! Image encoding WASM bindings for the export workflow.
//!
//! # Example
//!
//! ```typescript
//! import { encode_image, output_mime_type } from '@image2pixel/wasm';
//!
//! const bytes = encode_image(image, 'png', 90);
//! const blob = new Blob([bytes], { type: output_mime_type('png') });
//! ```

use crate::error::to_js_error;
use crate::types::JsDecodedImage;
use image2pixel_core::encode::{self, OutputFormat};
use wasm_bindgen::prelude::*;

/// Encode a JsDecodedImage as `"jpeg"`, `"png"` or `"webp"`.
///
/// # Arguments
///
/// * `format` - Container name or extension (`"jpg"`, `".png"`, ...)
/// * `quality` - JPEG quality (1-100); ignored by PNG and WebP
///
/// # Errors
///
/// Returns an error for an unknown format or a pixel buffer that does not
/// match the image dimensions.
#[wasm_bindgen]
pub fn encode_image(image: &JsDecodedImage, format: &str, quality: u8) -> Result<Vec<u8>, JsValue> {
    let format: OutputFormat = format.parse().map_err(to_js_error)?;
    let decoded = image.to_decoded();
    encode::encode_image(&decoded.pixels, decoded.width, decoded.height, format, quality)
        .map_err(to_js_error)
}

/// MIME type for a format name, e.g. `"image/webp"`.
#[wasm_bindgen]
pub fn output_mime_type(format: &str) -> Result<String, JsValue> {
    let format: OutputFormat = format.parse().map_err(to_js_error)?;
    Ok(format.mime_type().to_string())
}

/// File name with the format's extension appended when missing.
#[wasm_bindgen]
pub fn export_file_name(name: &str, format: &str) -> Result<String, JsValue> {
    let format: OutputFormat = format.parse().map_err(to_js_error)?;
    Ok(format
        .ensure_extension(std::path::Path::new(name))
        .to_string_lossy()
        .into_owned())
}

#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_encode_png_signature() {
        let img = JsDecodedImage::new(8, 8, vec![200u8; 8 * 8 * 3]);
        let png = encode_image(&img, "png", 90).unwrap();
        assert_eq!(&png[1..4], b"PNG");
    }

    #[wasm_bindgen_test]
    fn test_encode_jpeg_markers() {
        let img = JsDecodedImage::new(16, 16, vec![128u8; 16 * 16 * 3]);
        let jpeg = encode_image(&img, "jpg", 90).unwrap();
        assert_eq!(&jpeg[0..2], &[0xFF, 0xD8]);
    }

    #[wasm_bindgen_test]
    fn test_encode_unknown_format() {
        let img = JsDecodedImage::new(1, 1, vec![0, 0, 0]);
        assert!(encode_image(&img, "gif", 90).is_err());
    }

    #[wasm_bindgen_test]
    fn test_export_file_name() {
        assert_eq!(export_file_name("result", "webp").unwrap(), "result.webp");
        assert_eq!(export_file_name("a.JPG", "jpeg").unwrap(), "a.JPG");
    }

    #[wasm_bindgen_test]
    fn test_mime_type() {
        assert_eq!(output_mime_type("jpeg").unwrap(), "image/jpeg");
    }
}
