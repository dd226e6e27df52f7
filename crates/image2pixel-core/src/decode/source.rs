//! Source image loading with format sniffing and EXIF orientation handling.
//!
//! The source image is never held as a mutable original. A [`SourceImage`]
//! is only a handle (a path or an owned encoded buffer) that is decoded
//! afresh whenever the full-resolution pixels are needed, so cropping and
//! pixelation can never alter it.

use std::io::Cursor;
use std::path::{Path, PathBuf};

use exif::{In, Reader, Tag};
use image::{DynamicImage, ImageReader};

use super::{DecodeError, DecodedImage, Orientation};

/// Read-only handle to a full-resolution source image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceImage {
    /// An image file on disk, re-read on every decode.
    Path(PathBuf),
    /// An encoded image held in memory (e.g. bytes handed over from a browser).
    Bytes(Vec<u8>),
}

impl SourceImage {
    /// Handle for a file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> Self {
        SourceImage::Path(path.as_ref().to_path_buf())
    }

    /// Handle for an encoded in-memory buffer.
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        SourceImage::Bytes(bytes)
    }

    /// Short label for status displays: the file name, or `"<memory>"`.
    pub fn display_name(&self) -> String {
        match self {
            SourceImage::Path(path) => path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| path.display().to_string()),
            SourceImage::Bytes(_) => "<memory>".to_string(),
        }
    }

    /// Decode the full-resolution, upright RGB pixels.
    pub fn decode(&self) -> Result<DecodedImage, DecodeError> {
        match self {
            SourceImage::Path(path) => decode_image(&read_file(path)?),
            SourceImage::Bytes(bytes) => decode_image(bytes),
        }
    }
}

fn read_file(path: &Path) -> Result<Vec<u8>, DecodeError> {
    std::fs::read(path).map_err(|e| DecodeError::IoError(format!("{}: {}", path.display(), e)))
}

/// Decode an image from bytes, applying EXIF orientation correction.
///
/// The container format is sniffed from the leading bytes; any format enabled
/// on the `image` dependency is accepted. Decoding doubles as validation, so
/// there is no separate verify pass.
///
/// # Errors
///
/// Returns `DecodeError::InvalidFormat` if the format cannot be recognised,
/// `DecodeError::CorruptedFile` if decoding fails and
/// `DecodeError::InvalidDimensions` if the result has a zero-length side.
pub fn decode_image(bytes: &[u8]) -> Result<DecodedImage, DecodeError> {
    let orientation = extract_orientation(bytes);

    let reader = guessed_reader(bytes)?;
    let img = reader
        .decode()
        .map_err(|e| DecodeError::CorruptedFile(e.to_string()))?;

    let rgb_img = apply_orientation(img, orientation).into_rgb8();
    let (width, height) = rgb_img.dimensions();
    if width == 0 || height == 0 {
        return Err(DecodeError::InvalidDimensions { width, height });
    }

    Ok(DecodedImage::from_rgb_image(rgb_img))
}

fn guessed_reader(bytes: &[u8]) -> Result<ImageReader<Cursor<&[u8]>>, DecodeError> {
    let reader = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| DecodeError::IoError(e.to_string()))?;

    if reader.format().is_none() {
        return Err(DecodeError::InvalidFormat);
    }
    Ok(reader)
}

fn extract_orientation(bytes: &[u8]) -> Orientation {
    let mut cursor = Cursor::new(bytes);
    match Reader::new().read_from_container(&mut cursor) {
        Ok(exif) => exif
            .get_field(Tag::Orientation, In::PRIMARY)
            .and_then(|field| field.value.get_uint(0))
            .map(Orientation::from)
            .unwrap_or_default(),
        Err(_) => Orientation::Normal,
    }
}

fn apply_orientation(img: DynamicImage, orientation: Orientation) -> DynamicImage {
    match orientation {
        Orientation::Normal => img,
        Orientation::FlipHorizontal => img.fliph(),
        Orientation::Rotate180 => img.rotate180(),
        Orientation::FlipVertical => img.flipv(),
        Orientation::Transpose => img.rotate90().fliph(),
        Orientation::Rotate90CW => img.rotate90(),
        Orientation::Transverse => img.rotate270().fliph(),
        Orientation::Rotate270CW => img.rotate270(),
    }
}
