//! End-to-end adaptation: orient, analyze, map, transform.
//!
//! Statistics are always taken from the rotated buffer, so the result does
//! not depend on where the image came from.

use serde::Serialize;

use crate::analysis::{self, BrightnessProfile};
use crate::config::AdaptConfig;
use crate::image::PixelBuffer;
use crate::mapping::{self, ScreenContext};
use crate::orientation::{self, Orientation};
use crate::transform;

/// Output of one pipeline run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Adaptation {
    /// Upright, rescaled image ready for display.
    pub image: PixelBuffer,
    /// Statistics of the upright source image.
    pub profile: BrightnessProfile,
    /// Display state the scale was computed for.
    pub screen: ScreenContext,
    /// Scale factor applied to every color channel.
    pub scale: f64,
}

/// Adapt `buffer` for display at `screen_brightness_percent`.
///
/// `config` is the only source of the screen white point, the analysis
/// threshold and the parallel dispatch size. Never fails: an empty buffer
/// yields an empty image.
pub fn adapt(
    buffer: &PixelBuffer,
    orientation: Orientation,
    screen_brightness_percent: i32,
    config: &AdaptConfig,
) -> Adaptation {
    let screen = screen_context(screen_brightness_percent, config);
    let upright = orientation::normalize(buffer, orientation);
    let profile = analysis::analyze(&upright, &config.analysis());
    let scale = screen.scale_for(&profile);

    tracing::debug!(
        "adapting {}x{} ({orientation}): peak={} white={} brightness={}% scale={scale:.4}",
        upright.width(),
        upright.height(),
        profile.max_pixel_brightness,
        profile.image_white_point,
        screen.screen_brightness_percent,
    );

    let image = transform::apply_with_threshold(
        &upright,
        scale,
        profile.max_pixel_brightness,
        config.parallel_threshold,
    );

    Adaptation {
        image,
        profile,
        screen,
        scale,
    }
}

/// The [`ScreenContext`] `adapt` uses: the given percent and the config's
/// screen white point.
pub fn screen_context(screen_brightness_percent: i32, config: &AdaptConfig) -> ScreenContext {
    ScreenContext::new(screen_brightness_percent).with_white_point(config.screen_white_point)
}

/// Convert a raw 0–255 display reading to a percent, substituting the
/// config's fallback for a missing or out-of-range value.
pub fn brightness_percent(raw_brightness: Option<i32>, config: &AdaptConfig) -> i32 {
    mapping::brightness_percent_from_raw(raw_brightness, config.brightness_fallback_percent)
}
