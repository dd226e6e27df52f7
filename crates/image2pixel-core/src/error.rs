//! Crate-level error type for crop, pixelation and session operations.

use thiserror::Error;

use crate::decode::DecodeError;
use crate::encode::EncodeError;

/// Errors surfaced to the UI collaborator.
///
/// Every variant is recoverable: the failing operation leaves the session's
/// working images exactly as they were.
#[derive(Debug, Error)]
pub enum EditError {
    /// A non-positive ratio, zoom, segment count or image dimension, or a
    /// crop box that collapsed to zero area after clamping.
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// The source image could not be read or decoded.
    #[error("Source image unavailable: {0}")]
    SourceUnavailable(#[from] DecodeError),

    /// An operation needed a loaded image.
    #[error("No image loaded")]
    NoImageLoaded,

    /// Crop was requested while no aspect ratio is selected.
    #[error("No aspect ratio selected")]
    NoRatioSelected,

    /// Encoding the working image failed.
    #[error("Export failed: {0}")]
    Encode(#[from] EncodeError),

    /// Writing the exported file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl EditError {
    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        EditError::InvalidParameter(message.into())
    }
}

pub type Result<T> = std::result::Result<T, EditError>;
