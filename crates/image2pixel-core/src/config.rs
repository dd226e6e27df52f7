//! Editor configuration.
//!
//! Every field has a default matching the stock editor, and the struct
//! deserializes from partial input (`#[serde(default)]`), so a UI only needs
//! to send the values it wants to override.

use serde::{Deserialize, Serialize};

use crate::error::{EditError, Result};

/// Tunables shared by the transform state, the mapper and the session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Border padding in display pixels, subtracted from the view size
    /// before any geometry is computed.
    pub border_padding: u32,
    /// Lowest zoom factor (1.0 = 100%).
    pub min_zoom: f64,
    /// Highest zoom factor.
    pub max_zoom: f64,
    /// Zoom change per wheel step.
    pub zoom_step: f64,
    /// Largest accepted pixelation segment count.
    pub max_segments: u32,
    /// JPEG quality used on export (1-100).
    pub jpeg_quality: u8,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            border_padding: 40,
            min_zoom: 1.0,
            max_zoom: 5.0,
            zoom_step: 0.1,
            max_segments: 200,
            jpeg_quality: 90,
        }
    }
}

impl EditorConfig {
    /// Check that the values describe a usable editor.
    pub fn validate(&self) -> Result<()> {
        if !(self.min_zoom.is_finite() && self.min_zoom > 0.0) {
            return Err(EditError::invalid(format!(
                "min_zoom must be positive, got {}",
                self.min_zoom
            )));
        }
        if !(self.max_zoom.is_finite() && self.max_zoom >= self.min_zoom) {
            return Err(EditError::invalid(format!(
                "max_zoom must be at least min_zoom ({}), got {}",
                self.min_zoom, self.max_zoom
            )));
        }
        if !(self.zoom_step.is_finite() && self.zoom_step > 0.0) {
            return Err(EditError::invalid(format!(
                "zoom_step must be positive, got {}",
                self.zoom_step
            )));
        }
        if self.max_segments == 0 {
            return Err(EditError::invalid("max_segments must be positive"));
        }
        if !(1..=100).contains(&self.jpeg_quality) {
            return Err(EditError::invalid(format!(
                "jpeg_quality must be in 1..=100, got {}",
                self.jpeg_quality
            )));
        }
        Ok(())
    }

    /// Zoom range as whole percentages, e.g. `(100, 500)`.
    pub fn zoom_percent_range(&self) -> (u32, u32) {
        (
            (self.min_zoom * 100.0).round() as u32,
            (self.max_zoom * 100.0).round() as u32,
        )
    }
}
