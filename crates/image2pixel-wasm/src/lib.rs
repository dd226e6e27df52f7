//! Image2Pixel WASM - WebAssembly bindings for Image2Pixel
//!
//! This crate provides WASM bindings to expose the image2pixel-core
//! functionality to JavaScript/TypeScript applications.
//!
//! # Module Structure
//!
//! - `editor` - Stateful [`Editor`] driving zoom, pan, crop and pixelation
//! - `types` - WASM-compatible wrapper types for image data
//! - `decode` - Image decoding
//! - `encode` - Export encoding (JPEG, PNG, WebP)
//! - `viewport` - Stateless crop-box mapping
//! - `pixelate` - Stateless pixelation
//!
//! # Usage
//!
//! ```typescript
//! import init, { Editor } from '@image2pixel/wasm';
//!
//! // Initialize WASM module (must call first)
//! await init();
//!
//! const editor = new Editor(undefined);
//! editor.set_viewport(840, 440);
//! const image = editor.load_bytes(new Uint8Array(await file.arrayBuffer()));
//! console.log(`Loaded ${image.width}x${image.height}`);
//! ```

use wasm_bindgen::prelude::*;

mod decode;
mod editor;
mod encode;
mod error;
mod pixelate;
mod types;
mod viewport;

// Re-export public types
pub use decode::decode_image;
pub use editor::Editor;
pub use encode::{encode_image, export_file_name, output_mime_type};
pub use pixelate::{pixelate, recommended_segment_count};
pub use types::JsDecodedImage;
pub use viewport::{compute_crop_box, crop_image, overlay_rect, JsCropBox};

/// Initialize the WASM module (called automatically on load)
#[wasm_bindgen(start)]
pub fn init() {}

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
