//! Exact resamplers used by the pixelation effect: an area-averaging
//! downsampler and an integer-mapped nearest-neighbor upsampler. Both return
//! new `DecodedImage` instances without modifying the input.

use super::{DecodeError, DecodedImage};

/// Downsample with an area (box) filter.
///
/// Each output pixel is the coverage-weighted mean of the source pixels that
/// fall inside its footprint, so flat regions stay flat and fine detail is
/// averaged instead of aliased.
///
/// # Errors
///
/// Returns `DecodeError::InvalidDimensions` if a target side is zero or
/// larger than the corresponding source side.
pub fn downsample_area(
    image: &DecodedImage,
    width: u32,
    height: u32,
) -> Result<DecodedImage, DecodeError> {
    if width == 0 || height == 0 || width > image.width || height > image.height {
        return Err(DecodeError::InvalidDimensions { width, height });
    }
    if width == image.width && height == image.height {
        return Ok(image.clone());
    }

    let x_spans = area_spans(image.width, width);
    let y_spans = area_spans(image.height, height);

    let mut pixels = Vec::with_capacity(width as usize * height as usize * 3);
    for y_span in &y_spans {
        for x_span in &x_spans {
            let mut acc = [0.0f64; 3];
            let mut total = 0.0f64;
            for &(sy, wy) in y_span {
                for &(sx, wx) in x_span {
                    let weight = wy * wx;
                    let px = image.pixel(sx, sy);
                    acc[0] += px[0] as f64 * weight;
                    acc[1] += px[1] as f64 * weight;
                    acc[2] += px[2] as f64 * weight;
                    total += weight;
                }
            }
            for channel in acc {
                pixels.push((channel / total).round().clamp(0.0, 255.0) as u8);
            }
        }
    }

    Ok(DecodedImage::new(width, height, pixels))
}

/// For each destination index, the source indices it covers with their
/// fractional coverage weights.
fn area_spans(src_len: u32, dst_len: u32) -> Vec<Vec<(u32, f64)>> {
    let scale = src_len as f64 / dst_len as f64;
    (0..dst_len)
        .map(|d| {
            let start = d as f64 * scale;
            let end = ((d + 1) as f64 * scale).min(src_len as f64);
            let first = start.floor() as u32;
            let last = (end.ceil() as u32).min(src_len);
            (first..last)
                .filter_map(|s| {
                    let lo = start.max(s as f64);
                    let hi = end.min((s + 1) as f64);
                    (hi > lo).then_some((s, hi - lo))
                })
                .collect()
        })
        .collect()
}

/// Upsample with nearest-neighbor sampling and no interpolation.
///
/// Destination pixel `(x, y)` copies source pixel
/// `(x * src_w / dst_w, y * src_h / dst_h)` using integer arithmetic, so each
/// source pixel becomes a solid rectangular block.
pub fn upsample_nearest(
    image: &DecodedImage,
    width: u32,
    height: u32,
) -> Result<DecodedImage, DecodeError> {
    if width == 0 || height == 0 {
        return Err(DecodeError::InvalidDimensions { width, height });
    }
    if image.is_empty() {
        return Err(DecodeError::InvalidDimensions {
            width: image.width,
            height: image.height,
        });
    }

    let src_x: Vec<u32> = (0..width)
        .map(|x| (x as u64 * image.width as u64 / width as u64) as u32)
        .collect();

    let mut pixels = Vec::with_capacity(width as usize * height as usize * 3);
    for y in 0..height {
        let sy = (y as u64 * image.height as u64 / height as u64) as u32;
        for &sx in &src_x {
            pixels.extend_from_slice(&image.pixel(sx, sy));
        }
    }

    Ok(DecodedImage::new(width, height, pixels))
}
