//! WASM bindings for the viewport-to-source crop mapping.
//!
//! These are stateless versions of what [`crate::Editor`] does internally,
//! for UIs that keep their own view state.

use crate::error::to_js_error;
use crate::types::JsDecodedImage;
use image2pixel_core::viewport::{self, CropBox, TransformParameters, Vec2, ViewSize};
use wasm_bindgen::prelude::*;

/// Crop rectangle in real-valued source pixel coordinates.
#[wasm_bindgen]
#[derive(Debug, Clone, Copy)]
pub struct JsCropBox {
    inner: CropBox,
}

#[wasm_bindgen]
impl JsCropBox {
    #[wasm_bindgen(getter)]
    pub fn left(&self) -> f64 {
        self.inner.left
    }

    #[wasm_bindgen(getter)]
    pub fn top(&self) -> f64 {
        self.inner.top
    }

    #[wasm_bindgen(getter)]
    pub fn right(&self) -> f64 {
        self.inner.right
    }

    #[wasm_bindgen(getter)]
    pub fn bottom(&self) -> f64 {
        self.inner.bottom
    }

    #[wasm_bindgen(getter)]
    pub fn width(&self) -> f64 {
        self.inner.width()
    }

    #[wasm_bindgen(getter)]
    pub fn height(&self) -> f64 {
        self.inner.height()
    }
}

impl From<CropBox> for JsCropBox {
    fn from(inner: CropBox) -> Self {
        Self { inner }
    }
}

/// Map an aspect-locked crop frame over a zoomed, panned view back to source
/// pixel coordinates.
///
/// # Arguments
///
/// * `ratio` - Target width/height of the crop
/// * `zoom` - Zoom factor over fit-to-view (1.0 = 100%)
/// * `offset_x`, `offset_y` - Pan offset in display pixels
/// * `view_width`, `view_height` - Display area, border padding included
/// * `padding` - Border padding subtracted from the view
///
/// # Example (TypeScript)
///
/// ```typescript
/// const box = compute_crop_box(1000, 500, 1.0, 1.0, 0, 0, 840, 440, 40);
/// // box.left === 250, box.right === 750
/// ```
#[wasm_bindgen]
#[allow(clippy::too_many_arguments)]
pub fn compute_crop_box(
    source_width: u32,
    source_height: u32,
    ratio: f64,
    zoom: f64,
    offset_x: f64,
    offset_y: f64,
    view_width: u32,
    view_height: u32,
    padding: u32,
) -> Result<JsCropBox, JsValue> {
    viewport::compute_crop_box(
        source_width,
        source_height,
        ratio,
        zoom,
        Vec2::new(offset_x, offset_y),
        ViewSize::new(view_width, view_height),
        padding,
    )
    .map(JsCropBox::from)
    .map_err(to_js_error)
}

/// The crop frame overlay `{ x0, y0, x1, y1 }`, centered in the view.
#[wasm_bindgen]
pub fn overlay_rect(
    view_width: u32,
    view_height: u32,
    padding: u32,
    ratio: f64,
) -> Result<JsValue, JsValue> {
    let rect = viewport::overlay_rect(ViewSize::new(view_width, view_height), padding, ratio)
        .map_err(to_js_error)?;
    serde_wasm_bindgen::to_value(&rect).map_err(to_js_error)
}

/// Crop an already decoded image with a parameters object as returned by
/// `Editor.transform_parameters()`.
#[wasm_bindgen]
pub fn crop_image(
    image: &JsDecodedImage,
    parameters: JsValue,
    padding: u32,
) -> Result<JsDecodedImage, JsValue> {
    let params: TransformParameters =
        serde_wasm_bindgen::from_value(parameters).map_err(to_js_error)?;
    viewport::crop_image(&image.to_decoded(), &params, padding)
        .map(JsDecodedImage::from_decoded)
        .map_err(to_js_error)
}
