//! JavaScript-facing image handle.

use image2pixel_core::decode::DecodedImage;
use wasm_bindgen::prelude::*;

/// RGB image owned by WASM memory.
///
/// `pixels()` and `rgba()` copy out to a fresh `Uint8Array`; the latter adds
/// an opaque alpha channel so the result can go straight into
/// `new ImageData(...)`.
#[wasm_bindgen]
pub struct JsDecodedImage {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

#[wasm_bindgen]
impl JsDecodedImage {
    /// Wrap `width x height` RGB bytes, row-major, 3 bytes per pixel.
    #[wasm_bindgen(constructor)]
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> JsDecodedImage {
        JsDecodedImage {
            width,
            height,
            pixels,
        }
    }

    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Length of the RGB buffer in bytes.
    #[wasm_bindgen(getter)]
    pub fn byte_length(&self) -> usize {
        self.pixels.len()
    }

    pub fn pixels(&self) -> Vec<u8> {
        self.pixels.clone()
    }

    /// RGBA copy with alpha 255 for canvas `ImageData`.
    pub fn rgba(&self) -> Vec<u8> {
        self.pixels
            .chunks_exact(3)
            .flat_map(|rgb| [rgb[0], rgb[1], rgb[2], 255])
            .collect()
    }
}

impl JsDecodedImage {
    pub(crate) fn from_decoded(img: DecodedImage) -> Self {
        Self::new(img.width, img.height, img.pixels)
    }

    /// Copy of one of the session's working images.
    pub(crate) fn from_ref(img: &DecodedImage) -> Self {
        Self::new(img.width, img.height, img.pixels.clone())
    }

    /// Core image for the stateless bindings. Clones the pixel data.
    ///
    /// Built field by field: a buffer of the wrong length from JavaScript
    /// is reported by the core operation instead of tripping a debug assert.
    pub(crate) fn to_decoded(&self) -> DecodedImage {
        DecodedImage {
            width: self.width,
            height: self.height,
            pixels: self.pixels.clone(),
        }
    }
}
