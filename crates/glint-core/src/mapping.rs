//! Screen brightness → luminance scale factor.
//!
//! ```text
//! scale = (screen_brightness_percent / 100) × (image_white_point / screen_white_point)
//! ```
//!
//! The same scalar is applied to R, G and B. The percent is deliberately
//! not clamped here; the transform's clamp is the only bound on output.

use serde::{Deserialize, Serialize};

use crate::analysis::BrightnessProfile;
use crate::config::DEFAULT_SCREEN_WHITE_POINT;

/// Highest raw display-brightness setting.
pub const RAW_BRIGHTNESS_MAX: i32 = 255;

/// Display state supplied by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScreenContext {
    /// Display brightness in percent. Nominally `0..=100`.
    pub screen_brightness_percent: i32,
    /// Reference white level of the display.
    pub screen_white_point: u32,
}

impl ScreenContext {
    /// Context with the default screen white point (120).
    pub const fn new(screen_brightness_percent: i32) -> Self {
        Self {
            screen_brightness_percent,
            screen_white_point: DEFAULT_SCREEN_WHITE_POINT,
        }
    }

    pub const fn with_white_point(mut self, screen_white_point: u32) -> Self {
        self.screen_white_point = screen_white_point;
        self
    }

    /// Scale factor for an analyzed image.
    pub fn scale_for(&self, profile: &BrightnessProfile) -> f64 {
        scale_factor(
            self.screen_brightness_percent,
            profile.image_white_point,
            self.screen_white_point,
        )
    }
}

/// Per-channel multiplier for the given display and image white points.
pub fn scale_factor(
    screen_brightness_percent: i32,
    image_white_point: u8,
    screen_white_point: u32,
) -> f64 {
    (screen_brightness_percent as f64 / 100.0)
        * (image_white_point as f64 / screen_white_point as f64)
}

/// Convert a raw 8-bit display-brightness setting to a percentage.
///
/// Returns `round(raw × 100 / 255)` for `raw` in `0..=255`. A missing or
/// out-of-range reading yields `fallback_percent` so sentinels like `-1`
/// never reach the scale factor.
pub fn brightness_percent_from_raw(raw: Option<i32>, fallback_percent: i32) -> i32 {
    match raw {
        Some(raw) if (0..=RAW_BRIGHTNESS_MAX).contains(&raw) => {
            (raw as f64 * 100.0 / RAW_BRIGHTNESS_MAX as f64).round() as i32
        }
        Some(raw) => {
            tracing::warn!("display brightness {raw} outside 0..=255, using {fallback_percent}%");
            fallback_percent
        }
        None => {
            tracing::warn!("display brightness unavailable, using {fallback_percent}%");
            fallback_percent
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-12;

    #[test]
    fn test_reference_values() {
        let scale = scale_factor(50, 255, 120);
        assert!((scale - 1.0625).abs() < EPSILON, "scale {scale}");
        assert!((scale_factor(100, 120, 120) - 1.0).abs() < EPSILON);
        assert_eq!(scale_factor(0, 255, 120), 0.0);
    }

    #[test]
    fn test_monotonic_in_brightness() {
        let mut prev = f64::NEG_INFINITY;
        for percent in -20..=150 {
            let scale = scale_factor(percent, 200, 120);
            assert!(scale >= prev, "{percent}%: {scale} < {prev}");
            prev = scale;
        }
    }

    #[test]
    fn test_percent_is_not_clamped() {
        assert!(scale_factor(-1, 255, 120) < 0.0);
        assert!(scale_factor(200, 120, 120) > 1.9);
    }

    #[test]
    fn test_scale_for_uses_profile_white_point() {
        let profile = BrightnessProfile { max_pixel_brightness: 200, image_white_point: 240 };
        let ctx = ScreenContext::new(50);
        assert!((ctx.scale_for(&profile) - 1.0).abs() < EPSILON);
        let ctx = ctx.with_white_point(240);
        assert!((ctx.scale_for(&profile) - 0.5).abs() < EPSILON);
    }

    #[test]
    fn test_raw_brightness_conversion_rounds() {
        assert_eq!(brightness_percent_from_raw(Some(0), 50), 0);
        assert_eq!(brightness_percent_from_raw(Some(255), 50), 100);
        assert_eq!(brightness_percent_from_raw(Some(128), 50), 50);
        // 1 × 100 / 255 = 0.39 → 0, 2 → 0.78 → 1
        assert_eq!(brightness_percent_from_raw(Some(1), 50), 0);
        assert_eq!(brightness_percent_from_raw(Some(2), 50), 1);
    }

    #[test]
    fn test_raw_brightness_fallback() {
        assert_eq!(brightness_percent_from_raw(None, 50), 50);
        assert_eq!(brightness_percent_from_raw(Some(-1), 50), 50);
        assert_eq!(brightness_percent_from_raw(Some(256), 30), 30);
    }
}
