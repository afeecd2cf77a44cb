//! Image statistics — peak brightness and white point estimation.
//!
//! Both statistics are computed from the per-pixel channel average
//! `(R + G + B) / 3` (truncated). Empty buffers produce the documented
//! defaults instead of an error: peak 0, white point 255.

pub mod brightness;
pub mod white_point;

use serde::{Deserialize, Serialize};

use crate::config::AnalysisConfig;
use crate::image::{Pixel, PixelBuffer};
use crate::parallel;

pub use brightness::max_brightness;
pub use white_point::{NO_WHITE_PIXELS, white_point, white_point_with_threshold};

/// Statistics of one image, recomputed for every image processed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrightnessProfile {
    /// Largest per-pixel channel average. Upper clamp for the transform.
    pub max_pixel_brightness: u8,
    /// Mean brightness of near-white pixels, or 255 when there are none.
    pub image_white_point: u8,
}

/// Running totals for the fused scan. `combine` is associative and
/// commutative, with `Accumulator::default()` as identity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct Accumulator {
    max: u8,
    white_sum: u64,
    white_count: u64,
}

impl Accumulator {
    fn push(mut self, px: Pixel, threshold: u8) -> Self {
        let avg = px.average();
        self.max = self.max.max(avg);
        if px.is_near_white(threshold) {
            self.white_sum += avg as u64;
            self.white_count += 1;
        }
        self
    }

    fn combine(self, other: Self) -> Self {
        Self {
            max: self.max.max(other.max),
            white_sum: self.white_sum + other.white_sum,
            white_count: self.white_count + other.white_count,
        }
    }

    fn white_point(&self) -> u8 {
        white_point::mean_or_default(self.white_sum, self.white_count)
    }
}

/// Compute both statistics in a single pass.
///
/// Gives the same result as calling [`max_brightness`] and
/// [`white_point_with_threshold`] separately.
pub fn analyze(buffer: &PixelBuffer, config: &AnalysisConfig) -> BrightnessProfile {
    let threshold = config.white_threshold;
    let acc = parallel::fold_reduce(
        buffer.pixels(),
        config.parallel_threshold,
        Accumulator::default,
        |acc: Accumulator, px| acc.push(*px, threshold),
        Accumulator::combine,
    );

    BrightnessProfile {
        max_pixel_brightness: acc.max,
        image_white_point: acc.white_point(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_image(pixels: Vec<Pixel>, width: u32) -> PixelBuffer {
        let height = pixels.len() as u32 / width;
        PixelBuffer::new(width, height, pixels).unwrap()
    }

    #[test]
    fn test_all_white_2x2() {
        let buf = PixelBuffer::filled(2, 2, Pixel::new(255, 255, 255, 255)).unwrap();
        let profile = analyze(&buf, &AnalysisConfig::default());
        assert_eq!(profile.max_pixel_brightness, 255);
        assert_eq!(profile.image_white_point, 255);
    }

    #[test]
    fn test_empty_buffer_defaults() {
        let profile = analyze(&PixelBuffer::empty(), &AnalysisConfig::default());
        assert_eq!(
            profile,
            BrightnessProfile { max_pixel_brightness: 0, image_white_point: NO_WHITE_PIXELS }
        );
    }

    #[test]
    fn test_fused_scan_matches_separate_scans() {
        let buf = make_image(
            vec![
                Pixel::opaque(10, 20, 30),
                Pixel::opaque(210, 220, 230),
                Pixel::opaque(250, 251, 252),
                Pixel::opaque(205, 255, 255),
                Pixel::opaque(128, 0, 255),
                Pixel::opaque(240, 207, 209),
            ],
            3,
        );
        let profile = analyze(&buf, &AnalysisConfig::default());
        assert_eq!(profile.max_pixel_brightness, max_brightness(&buf));
        assert_eq!(profile.image_white_point, white_point(&buf));
        // near-white: 220, 251, 218 → 689 / 3
        assert_eq!(profile.image_white_point, 229);
        assert_eq!(profile.max_pixel_brightness, 251);
    }

    #[test]
    fn test_parallel_path_matches_sequential() {
        let pixels: Vec<Pixel> = (0..40_000u32)
            .map(|i| Pixel::opaque((i % 256) as u8, (i * 7 % 256) as u8, (i * 13 % 256) as u8))
            .collect();
        let buf = make_image(pixels, 200);
        let sequential = AnalysisConfig {
            white_threshold: 50,
            parallel_threshold: usize::MAX,
        };
        let threaded = AnalysisConfig {
            white_threshold: 50,
            parallel_threshold: 0,
        };
        assert_eq!(analyze(&buf, &sequential), analyze(&buf, &threaded));
    }

    #[test]
    fn test_threshold_widens_white_set() {
        let buf = make_image(vec![Pixel::opaque(180, 180, 180), Pixel::opaque(250, 250, 250)], 2);
        let config = |white_threshold| AnalysisConfig {
            white_threshold,
            parallel_threshold: usize::MAX,
        };
        let narrow = analyze(&buf, &config(50));
        let wide = analyze(&buf, &config(100));
        assert_eq!(narrow.image_white_point, 250);
        assert_eq!(wide.image_white_point, 215);
    }
}
