//! Edit session: the source handle, the working images and the view state.
//!
//! A session holds two working-image slots:
//! - the *post-crop* image, the clean result of the latest crop
//! - the *displayed* image, the post-crop image with pixelation applied
//!
//! Every operation computes its result first and only then swaps it into
//! the slots, so a failed crop, pixelation or reload leaves the session
//! exactly as it was.

use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::config::EditorConfig;
use crate::decode::{DecodedImage, SourceImage};
use crate::encode::{encode_image, OutputFormat};
use crate::error::{EditError, Result};
use crate::pixelate::{apply_pixelation, recommended_segment_count, PixelationIntensity};
use crate::state::TransformState;
use crate::viewport::{crop_source, display_rect, overlay_rect, Rect};

#[derive(Debug, Clone)]
struct Loaded {
    source: SourceImage,
    post_crop: DecodedImage,
    displayed: DecodedImage,
    segments: u32,
}

/// One image being edited.
#[derive(Debug, Clone, Default)]
pub struct EditSession {
    state: TransformState,
    loaded: Option<Loaded>,
}

impl EditSession {
    /// Create a session with a validated configuration.
    pub fn new(config: EditorConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            state: TransformState::new(config),
            loaded: None,
        })
    }

    pub fn config(&self) -> &EditorConfig {
        self.state.config()
    }

    pub fn state(&self) -> &TransformState {
        &self.state
    }

    /// Mutable view state, for forwarding UI input.
    pub fn state_mut(&mut self) -> &mut TransformState {
        &mut self.state
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded.is_some()
    }

    /// The image to show: the post-crop image with any pixelation on top.
    pub fn displayed_image(&self) -> Option<&DecodedImage> {
        self.loaded.as_ref().map(|l| &l.displayed)
    }

    /// The clean result of the latest crop.
    pub fn post_crop_image(&self) -> Option<&DecodedImage> {
        self.loaded.as_ref().map(|l| &l.post_crop)
    }

    /// Current pixelation segment count, 0 when off.
    pub fn segments(&self) -> u32 {
        self.loaded.as_ref().map_or(0, |l| l.segments)
    }

    /// Decode `source` and make it the image being edited.
    ///
    /// # Errors
    ///
    /// `SourceUnavailable` if the source cannot be decoded; the previously
    /// loaded image, if any, stays in place.
    pub fn load(&mut self, source: SourceImage) -> Result<&DecodedImage> {
        let image = source.decode().map_err(|e| {
            warn!(source = %source.display_name(), error = %e, "load failed");
            EditError::from(e)
        })?;

        info!(
            source = %source.display_name(),
            width = image.width,
            height = image.height,
            "image loaded"
        );

        self.state.reset();
        let loaded = self.loaded.insert(Loaded {
            source,
            post_crop: image.clone(),
            displayed: image,
            segments: 0,
        });
        Ok(&loaded.displayed)
    }

    /// Load an image file from disk.
    pub fn load_path(&mut self, path: impl AsRef<Path>) -> Result<&DecodedImage> {
        self.load(SourceImage::from_path(path))
    }

    /// Crop the full-resolution source to the current crop frame.
    ///
    /// The source is decoded afresh, so the crop is always taken from the
    /// original pixels. On success the crop becomes both the post-crop and
    /// the displayed image and the crop controls return to their defaults.
    ///
    /// # Errors
    ///
    /// `NoImageLoaded`, `NoRatioSelected`, `SourceUnavailable`, or
    /// `InvalidParameter` from the crop mapper.
    pub fn crop(&mut self) -> Result<&DecodedImage> {
        let loaded = self.loaded.as_mut().ok_or(EditError::NoImageLoaded)?;
        let params = self.state.parameters();
        let padding = self.state.config().border_padding;

        let cropped = crop_source(&loaded.source, &params, padding).map_err(|e| {
            warn!(error = %e, "crop rejected");
            e
        })?;

        info!(
            width = cropped.width,
            height = cropped.height,
            zoom = params.zoom,
            "crop applied"
        );

        loaded.post_crop = cropped.clone();
        loaded.displayed = cropped;
        loaded.segments = 0;
        self.state.crop_applied();
        Ok(&loaded.displayed)
    }

    /// Pixelate the post-crop image with `segments` blocks across.
    ///
    /// Always starts from the clean post-crop image; `0` restores it.
    ///
    /// # Errors
    ///
    /// `NoImageLoaded`, or `InvalidParameter` for a count above the
    /// configured maximum.
    pub fn pixelate(&mut self, segments: u32) -> Result<&DecodedImage> {
        let max_segments = self.state.config().max_segments;
        let loaded = self.loaded.as_mut().ok_or(EditError::NoImageLoaded)?;

        let result = apply_pixelation(&loaded.post_crop, segments, max_segments).map_err(|e| {
            warn!(segments, error = %e, "pixelation rejected");
            e
        })?;

        info!(segments, "pixelation applied");
        loaded.displayed = result;
        loaded.segments = segments;
        Ok(&loaded.displayed)
    }

    /// Suggested segment count for the post-crop image.
    pub fn recommended_segments(&self, intensity: PixelationIntensity) -> Result<u32> {
        let post_crop = self.post_crop_image().ok_or(EditError::NoImageLoaded)?;
        Ok(recommended_segment_count(post_crop.width, intensity).min(self.config().max_segments))
    }

    /// Discard all edits and reload the source.
    ///
    /// # Errors
    ///
    /// `NoImageLoaded`, or `SourceUnavailable` if the source can no longer be
    /// decoded (the current edits are kept in that case).
    pub fn reset(&mut self) -> Result<&DecodedImage> {
        let loaded = self.loaded.as_mut().ok_or(EditError::NoImageLoaded)?;
        let image = loaded.source.decode()?;

        info!(source = %loaded.source.display_name(), "session reset");
        loaded.post_crop = image.clone();
        loaded.displayed = image;
        loaded.segments = 0;
        self.state.reset();
        Ok(&loaded.displayed)
    }

    /// Encode the displayed image.
    pub fn encode(&self, format: OutputFormat) -> Result<Vec<u8>> {
        let image = self.displayed_image().ok_or(EditError::NoImageLoaded)?;
        Ok(encode_image(
            &image.pixels,
            image.width,
            image.height,
            format,
            self.config().jpeg_quality,
        )?)
    }

    /// Encode the displayed image and write it to `path`, appending the
    /// format's extension when missing. Returns the path written.
    pub fn save(&self, path: impl AsRef<Path>, format: OutputFormat) -> Result<PathBuf> {
        let bytes = self.encode(format)?;
        let path = format.ensure_extension(path.as_ref());
        std::fs::write(&path, &bytes)?;
        info!(path = %path.display(), bytes = bytes.len(), %format, "image saved");
        Ok(path)
    }

    /// Status text such as `"photo.png | 1000 x 500 px"`.
    pub fn status_line(&self) -> Option<String> {
        self.loaded.as_ref().map(|l| {
            format!(
                "{} | {} x {} px",
                l.source.display_name(),
                l.displayed.width,
                l.displayed.height
            )
        })
    }

    /// Where the displayed image is drawn in the current view.
    pub fn display_rect(&self) -> Result<Rect> {
        let image = self.displayed_image().ok_or(EditError::NoImageLoaded)?;
        display_rect(
            image.width,
            image.height,
            self.state.view_size(),
            self.config().border_padding,
            self.state.zoom(),
            self.state.offset(),
        )
    }

    /// The crop frame to draw, if the overlay is visible and a ratio is set.
    pub fn overlay_rect(&self) -> Result<Option<Rect>> {
        match self.state.ratio().value() {
            Some(ratio) if self.state.overlay_visible() => Ok(Some(overlay_rect(
                self.state.view_size(),
                self.config().border_padding,
                ratio,
            )?)),
            _ => Ok(None),
        }
    }
}
