//! Interactive transform state: zoom, pan and aspect ratio bookkeeping.
//!
//! The UI feeds raw input (slider values, wheel steps, pointer drags, combo
//! selections) into [`TransformState`], and snapshots it with
//! [`TransformState::parameters`] when the user applies a crop. Changes the
//! UI needs to mirror back into its controls, such as the zoom slider after a
//! wheel zoom, are returned from the mutating call rather than pushed into
//! the UI.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::EditorConfig;
use crate::error::{EditError, Result};
use crate::viewport::{Point, TransformParameters, Vec2, ViewSize};

/// Crop framing choice.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub enum AspectRatio {
    /// No framing; the image is shown uncropped.
    #[default]
    Original,
    /// 1:1.
    Square,
    /// 4:3.
    Standard,
    /// 16:9.
    Widescreen,
    /// Any other positive width/height ratio.
    Custom(f64),
}

impl AspectRatio {
    /// Presets in the order a ratio picker lists them.
    pub const PRESETS: [AspectRatio; 4] = [
        AspectRatio::Original,
        AspectRatio::Square,
        AspectRatio::Standard,
        AspectRatio::Widescreen,
    ];

    /// Numeric width/height ratio, `None` for [`AspectRatio::Original`].
    pub fn value(self) -> Option<f64> {
        match self {
            AspectRatio::Original => None,
            AspectRatio::Square => Some(1.0),
            AspectRatio::Standard => Some(4.0 / 3.0),
            AspectRatio::Widescreen => Some(16.0 / 9.0),
            AspectRatio::Custom(ratio) => Some(ratio),
        }
    }

    /// Resolve a picker label. Unknown labels mean no framing.
    pub fn from_name(name: &str) -> Self {
        name.parse().unwrap_or_default()
    }
}

impl fmt::Display for AspectRatio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AspectRatio::Original => f.write_str("Original"),
            AspectRatio::Square => f.write_str("1:1"),
            AspectRatio::Standard => f.write_str("4:3"),
            AspectRatio::Widescreen => f.write_str("16:9"),
            AspectRatio::Custom(ratio) => write!(f, "{}:1", ratio),
        }
    }
}

impl FromStr for AspectRatio {
    type Err = EditError;

    /// Parses `"Original"`, the preset labels, or any `"W:H"` with positive parts.
    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        match s {
            "Original" | "original" => return Ok(AspectRatio::Original),
            "1:1" => return Ok(AspectRatio::Square),
            "4:3" => return Ok(AspectRatio::Standard),
            "16:9" => return Ok(AspectRatio::Widescreen),
            _ => {}
        }

        let (w, h) = s
            .split_once(':')
            .ok_or_else(|| EditError::invalid(format!("unknown aspect ratio '{}'", s)))?;
        let w: f64 = w
            .trim()
            .parse()
            .map_err(|_| EditError::invalid(format!("bad ratio width in '{}'", s)))?;
        let h: f64 = h
            .trim()
            .parse()
            .map_err(|_| EditError::invalid(format!("bad ratio height in '{}'", s)))?;
        let ratio = w / h;
        if !(w > 0.0 && h > 0.0 && ratio.is_finite()) {
            return Err(EditError::invalid(format!(
                "ratio parts must be positive in '{}'",
                s
            )));
        }
        Ok(AspectRatio::Custom(ratio))
    }
}

/// Direction of one zoom step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZoomDirection {
    In,
    Out,
}

impl ZoomDirection {
    /// Map a wheel delta: positive zooms in, anything else zooms out.
    pub fn from_wheel_delta(delta: f64) -> Self {
        if delta > 0.0 {
            ZoomDirection::In
        } else {
            ZoomDirection::Out
        }
    }
}

/// Zoom, pan, ratio and viewport of the interactive crop view.
#[derive(Debug, Clone, PartialEq)]
pub struct TransformState {
    config: EditorConfig,
    zoom: f64,
    offset: Vec2,
    ratio: AspectRatio,
    free_pan: bool,
    overlay_visible: bool,
    view_size: ViewSize,
    image_loaded: bool,
    last_pointer: Option<Point>,
}

impl Default for TransformState {
    fn default() -> Self {
        Self::new(EditorConfig::default())
    }
}

impl TransformState {
    pub fn new(config: EditorConfig) -> Self {
        Self {
            zoom: config.min_zoom,
            config,
            offset: Vec2::ZERO,
            ratio: AspectRatio::Original,
            free_pan: false,
            overlay_visible: true,
            view_size: ViewSize::default(),
            image_loaded: false,
            last_pointer: None,
        }
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    /// Zoom as a whole percentage, for slider display.
    pub fn zoom_percent(&self) -> u32 {
        (self.zoom * 100.0).round() as u32
    }

    pub fn offset(&self) -> Vec2 {
        self.offset
    }

    pub fn ratio(&self) -> AspectRatio {
        self.ratio
    }

    pub fn free_pan(&self) -> bool {
        self.free_pan
    }

    pub fn overlay_visible(&self) -> bool {
        self.overlay_visible
    }

    pub fn view_size(&self) -> ViewSize {
        self.view_size
    }

    /// Record the display area size, border padding included.
    pub fn set_viewport(&mut self, width: u32, height: u32) {
        self.view_size = ViewSize::new(width, height);
    }

    /// Set zoom from a slider percentage, clamped to the configured range.
    pub fn set_zoom(&mut self, percent: u32) {
        let (min, max) = self.config.zoom_percent_range();
        self.zoom = percent.clamp(min, max) as f64 / 100.0;
    }

    /// One wheel step of zoom that keeps the image point under `cursor` fixed.
    ///
    /// The offset gets a first-order correction: with `v` the vector from the
    /// displayed image center to the cursor, the offset moves by
    /// `-v * (new_zoom / old_zoom - 1)`.
    ///
    /// Returns the new zoom percentage for the UI to mirror, or `None` when
    /// nothing changed (no image, or already at a zoom limit).
    pub fn zoom_at(&mut self, direction: ZoomDirection, cursor: Point) -> Option<u32> {
        if !self.image_loaded {
            return None;
        }

        let old_zoom = self.zoom;
        let step = match direction {
            ZoomDirection::In => self.config.zoom_step,
            ZoomDirection::Out => -self.config.zoom_step,
        };
        let new_zoom = (old_zoom + step).clamp(self.config.min_zoom, self.config.max_zoom);
        if new_zoom == old_zoom {
            return None;
        }

        let image_center = self.view_size.center() + self.offset;
        let to_cursor = cursor - image_center;
        self.offset -= to_cursor * (new_zoom / old_zoom - 1.0);
        self.zoom = new_zoom;

        debug!(
            old_zoom,
            new_zoom,
            offset_x = self.offset.x,
            offset_y = self.offset.y,
            "zoom at cursor"
        );
        Some(self.zoom_percent())
    }

    /// Add a screen-space drag delta to the offset. Ignored unless free-pan
    /// mode is on.
    pub fn set_pan_delta(&mut self, dx: f64, dy: f64) {
        if self.free_pan {
            self.offset += Vec2::new(dx, dy);
        }
    }

    /// Pointer pressed: start tracking a drag when free-pan mode is on.
    pub fn begin_pan(&mut self, pointer: Point) {
        if self.free_pan {
            self.last_pointer = Some(pointer);
        }
    }

    /// Pointer moved: pan by the movement since the previous position.
    pub fn drag_to(&mut self, pointer: Point) {
        if let Some(last) = self.last_pointer {
            let delta = pointer - last;
            self.set_pan_delta(delta.x, delta.y);
            self.last_pointer = Some(pointer);
        }
    }

    /// Pointer released.
    pub fn end_pan(&mut self) {
        self.last_pointer = None;
    }

    pub fn is_panning(&self) -> bool {
        self.last_pointer.is_some()
    }

    /// Switch free-pan mode. Turning it off recenters the image.
    pub fn set_free_pan(&mut self, enabled: bool) {
        self.free_pan = enabled;
        if !enabled {
            self.offset = Vec2::ZERO;
            self.last_pointer = None;
        }
    }

    /// Select a crop ratio and show the crop overlay.
    pub fn set_ratio(&mut self, ratio: AspectRatio) {
        self.ratio = ratio;
        self.overlay_visible = true;
    }

    pub fn set_overlay_visible(&mut self, visible: bool) {
        self.overlay_visible = visible;
    }

    /// A new image was loaded or the session was reset.
    pub fn reset(&mut self) {
        self.image_loaded = true;
        self.overlay_visible = true;
        self.reset_crop_controls();
    }

    /// A crop was applied: hide the frame and return the controls to their
    /// defaults for the next crop.
    pub fn crop_applied(&mut self) {
        self.overlay_visible = false;
        self.reset_crop_controls();
    }

    fn reset_crop_controls(&mut self) {
        self.zoom = self.config.min_zoom;
        self.offset = Vec2::ZERO;
        self.ratio = AspectRatio::Original;
        self.free_pan = false;
        self.last_pointer = None;
    }

    /// Snapshot for the crop mapper.
    pub fn parameters(&self) -> TransformParameters {
        TransformParameters {
            ratio: self.ratio.value(),
            zoom: self.zoom,
            offset: self.offset,
            view_size: self.view_size,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::viewport::source_to_display;
    use approx::assert_relative_eq;

    fn loaded_state() -> TransformState {
        let mut state = TransformState::default();
        state.set_viewport(840, 440);
        state.reset();
        state
    }

    #[test]
    fn test_defaults() {
        let state = TransformState::default();
        let params = state.parameters();
        assert_eq!(params.ratio, None);
        assert_relative_eq!(params.zoom, 1.0);
        assert_eq!(params.offset, Vec2::ZERO);
        assert!(state.overlay_visible());
    }

    #[test]
    fn test_set_zoom_clamps_percent() {
        let mut state = loaded_state();
        state.set_zoom(250);
        assert_relative_eq!(state.zoom(), 2.5);
        state.set_zoom(50);
        assert_relative_eq!(state.zoom(), 1.0);
        state.set_zoom(900);
        assert_relative_eq!(state.zoom(), 5.0);
    }

    #[test]
    fn test_zoom_at_reference_step() {
        let mut state = loaded_state();
        let cursor = state.view_size().center() + Vec2::new(50.0, 0.0);

        let percent = state.zoom_at(ZoomDirection::In, cursor);
        assert_eq!(percent, Some(110));
        assert_relative_eq!(state.zoom(), 1.1, epsilon = 1e-12);
        // offset -= (50, 0) * (1.1 - 1)
        assert_relative_eq!(state.offset().x, -5.0, epsilon = 1e-9);
        assert_relative_eq!(state.offset().y, 0.0);
    }

    #[test]
    fn test_zoom_at_keeps_cursor_point_stationary() {
        let mut state = loaded_state();
        state.set_free_pan(true);
        state.set_pan_delta(-30.0, 12.0);
        let cursor = Point::new(610.0, 95.0);
        let view = state.view_size();

        let before = source_to_display(1000, 500, view, 40, state.zoom(), state.offset()).unwrap();
        let source_point = before.inverse() * cursor;

        state.zoom_at(ZoomDirection::In, cursor).unwrap();

        let after = source_to_display(1000, 500, view, 40, state.zoom(), state.offset()).unwrap();
        let redrawn = after * source_point;
        assert_relative_eq!(redrawn.x, cursor.x, epsilon = 1e-9);
        assert_relative_eq!(redrawn.y, cursor.y, epsilon = 1e-9);
    }

    #[test]
    fn test_zoom_at_limits_is_noop() {
        let mut state = loaded_state();
        let cursor = Point::new(100.0, 100.0);
        assert_eq!(state.zoom_at(ZoomDirection::Out, cursor), None);
        assert_eq!(state.offset(), Vec2::ZERO);

        state.set_zoom(500);
        assert_eq!(state.zoom_at(ZoomDirection::In, cursor), None);
    }

    #[test]
    fn test_zoom_at_without_image_is_ignored() {
        let mut state = TransformState::default();
        state.set_viewport(840, 440);
        assert_eq!(state.zoom_at(ZoomDirection::In, Point::ORIGIN), None);
        assert_relative_eq!(state.zoom(), 1.0);
    }

    #[test]
    fn test_pan_requires_free_mode() {
        let mut state = loaded_state();
        state.set_pan_delta(10.0, 5.0);
        assert_eq!(state.offset(), Vec2::ZERO);

        state.set_free_pan(true);
        state.set_pan_delta(10.0, 5.0);
        state.set_pan_delta(-4.0, 1.0);
        assert_eq!(state.offset(), Vec2::new(6.0, 6.0));
    }

    #[test]
    fn test_disabling_free_pan_recenters() {
        let mut state = loaded_state();
        state.set_free_pan(true);
        state.set_pan_delta(10.0, 5.0);
        state.set_free_pan(false);
        assert_eq!(state.offset(), Vec2::ZERO);
    }

    #[test]
    fn test_drag_accumulates_pointer_movement() {
        let mut state = loaded_state();
        state.set_free_pan(true);
        state.begin_pan(Point::new(100.0, 100.0));
        state.drag_to(Point::new(110.0, 95.0));
        state.drag_to(Point::new(130.0, 90.0));
        state.end_pan();
        state.drag_to(Point::new(500.0, 500.0));

        assert_eq!(state.offset(), Vec2::new(30.0, -10.0));
        assert!(!state.is_panning());
    }

    #[test]
    fn test_drag_ignored_outside_free_mode() {
        let mut state = loaded_state();
        state.begin_pan(Point::new(0.0, 0.0));
        state.drag_to(Point::new(50.0, 50.0));
        assert_eq!(state.offset(), Vec2::ZERO);
    }

    #[test]
    fn test_set_ratio_reveals_overlay() {
        let mut state = loaded_state();
        state.set_overlay_visible(false);
        state.set_ratio(AspectRatio::Widescreen);
        assert!(state.overlay_visible());
        assert_relative_eq!(state.parameters().ratio.unwrap(), 16.0 / 9.0);
    }

    #[test]
    fn test_reset_restores_defaults() {
        let mut state = loaded_state();
        state.set_zoom(300);
        state.set_free_pan(true);
        state.set_pan_delta(40.0, 40.0);
        state.set_ratio(AspectRatio::Square);

        state.reset();
        assert_relative_eq!(state.zoom(), 1.0);
        assert_eq!(state.offset(), Vec2::ZERO);
        assert_eq!(state.ratio(), AspectRatio::Original);
        assert!(!state.free_pan());
    }

    #[test]
    fn test_crop_applied_hides_overlay() {
        let mut state = loaded_state();
        state.set_ratio(AspectRatio::Square);
        state.crop_applied();
        assert!(!state.overlay_visible());
        assert_eq!(state.parameters().ratio, None);
    }

    #[test]
    fn test_aspect_ratio_parsing() {
        assert_eq!(AspectRatio::from_name("Original"), AspectRatio::Original);
        assert_eq!(AspectRatio::from_name("4:3"), AspectRatio::Standard);
        assert_eq!(AspectRatio::from_name("3:2"), AspectRatio::Custom(1.5));
        assert_eq!(AspectRatio::from_name("nonsense"), AspectRatio::Original);
        assert!("0:5".parse::<AspectRatio>().is_err());
        assert!("-1:1".parse::<AspectRatio>().is_err());
        assert_eq!(AspectRatio::PRESETS[1].to_string(), "1:1");
    }

    #[test]
    fn test_custom_zoom_range() {
        let config = EditorConfig {
            max_zoom: 2.0,
            zoom_step: 0.5,
            ..Default::default()
        };
        let mut state = TransformState::new(config);
        state.set_viewport(400, 400);
        state.reset();
        assert_eq!(state.zoom_at(ZoomDirection::In, Point::ORIGIN), Some(150));
        assert_eq!(state.zoom_at(ZoomDirection::In, Point::ORIGIN), Some(200));
        assert_eq!(state.zoom_at(ZoomDirection::In, Point::ORIGIN), None);
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================
