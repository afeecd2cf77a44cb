//! Peak brightness of an image.

use crate::config::DEFAULT_PARALLEL_THRESHOLD;
use crate::image::PixelBuffer;
use crate::parallel;

/// Largest per-pixel channel average `(R + G + B) / 3` in the buffer.
///
/// Returns 0 for an empty buffer.
pub fn max_brightness(buffer: &PixelBuffer) -> u8 {
    parallel::fold_reduce(
        buffer.pixels(),
        DEFAULT_PARALLEL_THRESHOLD,
        || 0u8,
        |max: u8, px| max.max(px.average()),
        u8::max,
    )
}
