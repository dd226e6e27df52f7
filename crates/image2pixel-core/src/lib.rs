//! Image2Pixel Core - crop mapping and pixelation library
//!
//! This crate provides the image processing behind Image2Pixel: mapping an
//! aspect-locked crop frame drawn over a zoomed, panned preview back to exact
//! source pixels, block pixelation, and the interactive zoom/pan state that
//! drives both.
//!
//! A typical UI owns one [`EditSession`], forwards input into
//! [`EditSession::state_mut`], and calls [`EditSession::crop`] and
//! [`EditSession::pixelate`] when the user applies an edit.

pub mod config;
pub mod decode;
pub mod encode;
pub mod error;
pub mod pixelate;
pub mod session;
pub mod state;
pub mod transform;
pub mod viewport;

pub use config::EditorConfig;
pub use decode::{DecodeError, DecodedImage, SourceImage};
pub use encode::{encode_image, EncodeError, OutputFormat};
pub use error::{EditError, Result};
pub use pixelate::{
    apply_pixelation, pixelate, recommended_segment_count, PixelationIntensity,
};
pub use session::EditSession;
pub use state::{AspectRatio, TransformState, ZoomDirection};
pub use transform::{apply_crop, PixelRect};
pub use viewport::{
    compute_crop_box, crop_image, crop_source, CropBox, Point, Rect, TransformParameters, Vec2,
    ViewSize,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_crop_then_pixelate_pipeline() {
        let mut pixels = Vec::with_capacity(1000 * 500 * 3);
        for y in 0..500u32 {
            for x in 0..1000u32 {
                pixels.extend_from_slice(&[(x % 256) as u8, (y % 256) as u8, 64]);
            }
        }
        let image = DecodedImage::new(1000, 500, pixels);

        let params = TransformParameters {
            ratio: Some(1.0),
            zoom: 1.0,
            offset: Vec2::ZERO,
            view_size: ViewSize::new(840, 440),
        };
        let cropped = crop_image(&image, &params, EditorConfig::default().border_padding).unwrap();
        assert_eq!((cropped.width, cropped.height), (500, 500));

        let pixelated = apply_pixelation(&cropped, 10, 200).unwrap();
        assert_eq!((pixelated.width, pixelated.height), (500, 500));
        assert_eq!(pixelated.pixel(0, 0), pixelated.pixel(49, 49));
        assert_eq!(apply_pixelation(&cropped, 0, 200).unwrap(), cropped);
    }
}
