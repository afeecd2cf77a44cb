//! Per-pixel luminance rescaling.
//!
//! Each color channel becomes `clamp(trunc(c × scale), 0, max_pixel_brightness)`.
//! The upper bound is the image's own peak, not 255, so the transform can
//! compress brightness but never push a channel above the brightest pixel
//! average observed in the source.

use crate::config::DEFAULT_PARALLEL_THRESHOLD;
use crate::image::{Pixel, PixelBuffer};
use crate::parallel;

/// Scale one channel. Saturating `f64 → i64` conversion truncates toward
/// zero; NaN becomes 0 and infinities saturate before the clamp.
pub fn scale_channel(value: u8, scale: f64, max_pixel_brightness: u8) -> u8 {
    let scaled = (value as f64 * scale) as i64;
    scaled.clamp(0, max_pixel_brightness as i64) as u8
}

/// Scale R, G and B of one pixel; alpha is copied.
pub fn scale_pixel(px: Pixel, scale: f64, max_pixel_brightness: u8) -> Pixel {
    Pixel {
        a: px.a,
        r: scale_channel(px.r, scale, max_pixel_brightness),
        g: scale_channel(px.g, scale, max_pixel_brightness),
        b: scale_channel(px.b, scale, max_pixel_brightness),
    }
}

/// Apply the scale to every pixel, producing a new buffer of the same size.
pub fn apply(buffer: &PixelBuffer, scale: f64, max_pixel_brightness: u8) -> PixelBuffer {
    apply_with_threshold(buffer, scale, max_pixel_brightness, DEFAULT_PARALLEL_THRESHOLD)
}

/// [`apply`] with an explicit parallel dispatch threshold.
pub fn apply_with_threshold(
    buffer: &PixelBuffer,
    scale: f64,
    max_pixel_brightness: u8,
    parallel_threshold: usize,
) -> PixelBuffer {
    let pixels = parallel::map_collect(buffer.pixels(), parallel_threshold, |px| {
        scale_pixel(*px, scale, max_pixel_brightness)
    });
    PixelBuffer::from_parts(buffer.width(), buffer.height(), pixels)
}
