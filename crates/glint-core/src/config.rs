//! Tunable constants for the adaptation pipeline.
//!
//! Every field has a serde default, so a partial JSON document (or `{}`)
//! yields a usable config.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Reference white level assumed for the display.
pub const DEFAULT_SCREEN_WHITE_POINT: u32 = 120;
/// A pixel is near-white when every channel exceeds `255 - threshold`.
pub const DEFAULT_WHITE_THRESHOLD: u8 = 50;
/// Screen brightness used when the display reading is missing or out of range.
pub const DEFAULT_BRIGHTNESS_FALLBACK_PERCENT: i32 = 50;
/// Pixel count at which scans switch to the rayon path.
pub const DEFAULT_PARALLEL_THRESHOLD: usize = 65_536;

/// Pipeline configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdaptConfig {
    /// Reference white level of the display. Must be non-zero.
    #[serde(default = "AdaptConfig::default_screen_white_point")]
    pub screen_white_point: u32,
    /// Near-white threshold for white point estimation.
    #[serde(default = "AdaptConfig::default_white_threshold")]
    pub white_threshold: u8,
    /// Brightness percent substituted for an unusable display reading.
    #[serde(default = "AdaptConfig::default_brightness_fallback_percent")]
    pub brightness_fallback_percent: i32,
    /// Buffers with at least this many pixels are scanned in parallel.
    #[serde(default = "AdaptConfig::default_parallel_threshold")]
    pub parallel_threshold: usize,
}

impl AdaptConfig {
    fn default_screen_white_point() -> u32 {
        DEFAULT_SCREEN_WHITE_POINT
    }

    fn default_white_threshold() -> u8 {
        DEFAULT_WHITE_THRESHOLD
    }

    fn default_brightness_fallback_percent() -> i32 {
        DEFAULT_BRIGHTNESS_FALLBACK_PERCENT
    }

    fn default_parallel_threshold() -> usize {
        DEFAULT_PARALLEL_THRESHOLD
    }

    /// Parse and validate a JSON config document.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON config file.
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.screen_white_point == 0 {
            return Err(ConfigError::Invalid("screen_white_point must be non-zero"));
        }
        if !(0..=100).contains(&self.brightness_fallback_percent) {
            return Err(ConfigError::Invalid(
                "brightness_fallback_percent must be within 0..=100",
            ));
        }
        Ok(())
    }

    /// Analysis settings derived from this config.
    pub fn analysis(&self) -> AnalysisConfig {
        AnalysisConfig {
            white_threshold: self.white_threshold,
            parallel_threshold: self.parallel_threshold,
        }
    }
}

impl Default for AdaptConfig {
    fn default() -> Self {
        Self {
            screen_white_point: DEFAULT_SCREEN_WHITE_POINT,
            white_threshold: DEFAULT_WHITE_THRESHOLD,
            brightness_fallback_percent: DEFAULT_BRIGHTNESS_FALLBACK_PERCENT,
            parallel_threshold: DEFAULT_PARALLEL_THRESHOLD,
        }
    }
}

/// The subset of [`AdaptConfig`] the statistics scan needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnalysisConfig {
    pub white_threshold: u8,
    pub parallel_threshold: usize,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        AdaptConfig::default().analysis()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_document_yields_defaults() {
        let config = AdaptConfig::from_json("{}").unwrap();
        assert_eq!(config, AdaptConfig::default());
        assert_eq!(config.screen_white_point, 120);
        assert_eq!(config.white_threshold, 50);
    }

    #[test]
    fn test_partial_document_overrides_one_field() {
        let config = AdaptConfig::from_json(r#"{ "screen_white_point": 200 }"#).unwrap();
        assert_eq!(config.screen_white_point, 200);
        assert_eq!(config.brightness_fallback_percent, 50);
    }

    #[test]
    fn test_zero_screen_white_point_rejected() {
        let err = AdaptConfig::from_json(r#"{ "screen_white_point": 0 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_fallback_percent_out_of_range_rejected() {
        let err = AdaptConfig::from_json(r#"{ "brightness_fallback_percent": -1 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_malformed_json_is_parse_error() {
        let err = AdaptConfig::from_json("{ screen").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = AdaptConfig::from_path(Path::new("/nonexistent/glint.json")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
