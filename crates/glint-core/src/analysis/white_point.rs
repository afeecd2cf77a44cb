//! White point estimation by averaging near-white pixels.

use crate::config::{DEFAULT_PARALLEL_THRESHOLD, DEFAULT_WHITE_THRESHOLD};
use crate::image::PixelBuffer;
use crate::parallel;

/// White point reported when no pixel qualifies as near-white.
///
/// Assuming a bright white point keeps the downstream scale factor large
/// rather than collapsing dark images to black.
pub const NO_WHITE_PIXELS: u8 = 255;

/// White point using the default near-white threshold (50).
pub fn white_point(buffer: &PixelBuffer) -> u8 {
    white_point_with_threshold(buffer, DEFAULT_WHITE_THRESHOLD)
}

/// Mean channel average of pixels whose R, G and B all exceed
/// `255 - threshold`, or [`NO_WHITE_PIXELS`] if there are none.
pub fn white_point_with_threshold(buffer: &PixelBuffer, threshold: u8) -> u8 {
    let (sum, count) = parallel::fold_reduce(
        buffer.pixels(),
        DEFAULT_PARALLEL_THRESHOLD,
        || (0u64, 0u64),
        |(sum, count): (u64, u64), px| {
            if px.is_near_white(threshold) {
                (sum + px.average() as u64, count + 1)
            } else {
                (sum, count)
            }
        },
        |a, b| (a.0 + b.0, a.1 + b.1),
    );
    mean_or_default(sum, count)
}

pub(super) fn mean_or_default(sum: u64, count: u64) -> u8 {
    if count == 0 {
        return NO_WHITE_PIXELS;
    }
    // Mean of u8 values always fits in u8.
    (sum / count) as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image::Pixel;

    #[test]
    fn test_no_white_pixels_defaults_to_255() {
        let buf = PixelBuffer::filled(4, 4, Pixel::opaque(100, 100, 100)).unwrap();
        assert_eq!(white_point(&buf), 255);
        assert_eq!(white_point(&PixelBuffer::empty()), 255);
    }

    #[test]
    fn test_boundary_channel_205_excluded() {
        let buf = PixelBuffer::new(
            2,
            1,
            vec![Pixel::opaque(205, 250, 250), Pixel::opaque(206, 206, 206)],
        )
        .unwrap();
        assert_eq!(white_point(&buf), 206);
    }

    #[test]
    fn test_mean_truncates() {
        let buf = PixelBuffer::new(
            2,
            1,
            vec![Pixel::opaque(210, 210, 210), Pixel::opaque(211, 211, 211)],
        )
        .unwrap();
        assert_eq!(white_point(&buf), 210);
    }

    #[test]
    fn test_zero_threshold_matches_nothing() {
        let buf = PixelBuffer::filled(1, 1, Pixel::opaque(255, 255, 255)).unwrap();
        assert_eq!(white_point_with_threshold(&buf, 0), NO_WHITE_PIXELS);
    }
}
