//! Stateful editor binding.
//!
//! [`Editor`] wraps one core `EditSession`: the UI forwards its input events
//! (resize, slider, wheel, drag, ratio picker) as method calls and asks for
//! the images and rectangles to draw.
//!
//! # Example (TypeScript)
//!
//! ```typescript
//! const editor = new Editor({ border_padding: 40 });
//! editor.set_viewport(canvas.width, canvas.height);
//! editor.load_bytes(new Uint8Array(await file.arrayBuffer()));
//!
//! canvas.onwheel = (e) => {
//!   const percent = editor.zoom_at(-e.deltaY, e.offsetX, e.offsetY);
//!   if (percent !== undefined) zoomSlider.value = percent;
//! };
//!
//! editor.set_ratio('16:9');
//! const cropped = editor.crop();
//! const blocky = editor.pixelate(40);
//! ```

use crate::error::to_js_error;
use crate::types::JsDecodedImage;
use image2pixel_core::decode::SourceImage;
use image2pixel_core::encode::OutputFormat;
use image2pixel_core::pixelate::PixelationIntensity;
use image2pixel_core::state::{AspectRatio, ZoomDirection};
use image2pixel_core::viewport::Point;
use image2pixel_core::{EditSession, EditorConfig};
use wasm_bindgen::prelude::*;

/// Crop and pixelation editor for one image at a time.
#[wasm_bindgen]
pub struct Editor {
    session: EditSession,
}

#[wasm_bindgen]
impl Editor {
    /// Create an editor. `config` may be `undefined` or a partial
    /// configuration object; missing fields keep their defaults.
    #[wasm_bindgen(constructor)]
    pub fn new(config: JsValue) -> Result<Editor, JsValue> {
        let config: EditorConfig = if config.is_undefined() || config.is_null() {
            EditorConfig::default()
        } else {
            serde_wasm_bindgen::from_value(config).map_err(to_js_error)?
        };
        EditSession::new(config)
            .map(Editor::from_session)
            .map_err(to_js_error)
    }

    /// The active configuration as a plain object.
    pub fn config(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(self.session.config()).map_err(to_js_error)
    }

    /// Decode encoded image bytes and start editing them.
    pub fn load_bytes(&mut self, bytes: Vec<u8>) -> Result<JsDecodedImage, JsValue> {
        self.session
            .load(SourceImage::from_bytes(bytes))
            .map(JsDecodedImage::from_ref)
            .map_err(to_js_error)
    }

    /// Record the display area size, border padding included.
    pub fn set_viewport(&mut self, width: u32, height: u32) {
        self.session.state_mut().set_viewport(width, height);
    }

    /// Set zoom from the slider percentage (clamped to the configured range).
    pub fn set_zoom(&mut self, percent: u32) {
        self.session.state_mut().set_zoom(percent);
    }

    #[wasm_bindgen(getter)]
    pub fn zoom_percent(&self) -> u32 {
        self.session.state().zoom_percent()
    }

    /// Pan by a drag delta; ignored unless free-pan mode is on.
    pub fn set_pan_delta(&mut self, dx: f64, dy: f64) {
        self.session.state_mut().set_pan_delta(dx, dy);
    }

    /// Select a ratio by picker label (`"Original"`, `"1:1"`, `"4:3"`,
    /// `"16:9"` or any `"W:H"`). Unknown labels turn framing off.
    pub fn set_ratio(&mut self, name: &str) {
        self.session
            .state_mut()
            .set_ratio(AspectRatio::from_name(name));
    }

    /// Current ratio label.
    #[wasm_bindgen(getter)]
    pub fn ratio(&self) -> String {
        self.session.state().ratio().to_string()
    }

    pub fn set_free_pan(&mut self, enabled: bool) {
        self.session.state_mut().set_free_pan(enabled);
    }

    #[wasm_bindgen(getter)]
    pub fn free_pan(&self) -> bool {
        self.session.state().free_pan()
    }

    #[wasm_bindgen(getter)]
    pub fn overlay_visible(&self) -> bool {
        self.session.state().overlay_visible()
    }

    /// One wheel step at view point `(x, y)`. A positive `delta_y` zooms in,
    /// so browsers pass `-event.deltaY`.
    ///
    /// Returns the new zoom percentage for the slider, or `undefined` when
    /// nothing changed.
    pub fn zoom_at(&mut self, delta_y: f64, x: f64, y: f64) -> Option<u32> {
        self.session
            .state_mut()
            .zoom_at(ZoomDirection::from_wheel_delta(delta_y), Point::new(x, y))
    }

    /// Pointer pressed at `(x, y)`.
    pub fn begin_pan(&mut self, x: f64, y: f64) {
        self.session.state_mut().begin_pan(Point::new(x, y));
    }

    /// Pointer moved to `(x, y)`.
    pub fn drag_to(&mut self, x: f64, y: f64) {
        self.session.state_mut().drag_to(Point::new(x, y));
    }

    /// Pointer released.
    pub fn end_pan(&mut self) {
        self.session.state_mut().end_pan();
    }

    /// `{ ratio, zoom, offset: { x, y }, view_size: { width, height } }`.
    pub fn transform_parameters(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(&self.session.state().parameters()).map_err(to_js_error)
    }

    /// Where to draw the displayed image, `{ x0, y0, x1, y1 }`.
    pub fn display_rect(&self) -> Result<JsValue, JsValue> {
        let rect = self.session.display_rect().map_err(to_js_error)?;
        serde_wasm_bindgen::to_value(&rect).map_err(to_js_error)
    }

    /// The crop frame to draw as `{ x0, y0, x1, y1 }`, or `undefined` when
    /// hidden or no ratio is set.
    pub fn overlay_rect(&self) -> Result<JsValue, JsValue> {
        let rect = self.session.overlay_rect().map_err(to_js_error)?;
        serde_wasm_bindgen::to_value(&rect).map_err(to_js_error)
    }

    /// Crop the full-resolution source to the current frame.
    pub fn crop(&mut self) -> Result<JsDecodedImage, JsValue> {
        self.session
            .crop()
            .map(JsDecodedImage::from_ref)
            .map_err(to_js_error)
    }

    /// Pixelate the cropped image; `0` restores it.
    pub fn pixelate(&mut self, segments: u32) -> Result<JsDecodedImage, JsValue> {
        self.session
            .pixelate(segments)
            .map(JsDecodedImage::from_ref)
            .map_err(to_js_error)
    }

    #[wasm_bindgen(getter)]
    pub fn segments(&self) -> u32 {
        self.session.segments()
    }

    /// Suggested segment count for `"light"`, `"medium"` or `"heavy"`.
    pub fn recommended_segment_count(&self, intensity: &str) -> Result<u32, JsValue> {
        let intensity: PixelationIntensity = intensity.parse().map_err(to_js_error)?;
        self.session
            .recommended_segments(intensity)
            .map_err(to_js_error)
    }

    /// Discard all edits and reload the source.
    pub fn reset(&mut self) -> Result<JsDecodedImage, JsValue> {
        self.session
            .reset()
            .map(JsDecodedImage::from_ref)
            .map_err(to_js_error)
    }

    /// The image to show, or `undefined` before loading.
    pub fn displayed_image(&self) -> Option<JsDecodedImage> {
        self.session.displayed_image().map(JsDecodedImage::from_ref)
    }

    /// Status text such as `"<memory> | 500 x 500 px"`.
    pub fn status_line(&self) -> Option<String> {
        self.session.status_line()
    }

    /// Encode the displayed image as `"jpeg"`, `"png"` or `"webp"`.
    pub fn encode(&self, format: &str) -> Result<Vec<u8>, JsValue> {
        let format: OutputFormat = format.parse().map_err(to_js_error)?;
        self.session.encode(format).map_err(to_js_error)
    }
}

impl Editor {
    pub(crate) fn from_session(session: EditSession) -> Self {
        Self { session }
    }
}
