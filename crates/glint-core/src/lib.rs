//! Glint Core — screen-brightness-aware image adaptation.
//!
//! Rescales the luminance of an 8-bit ARGB image so its apparent brightness
//! tracks the display's brightness setting. Pure, in-memory transforms;
//! no I/O and no framework dependencies.

pub mod analysis;
pub mod config;
pub mod error;
pub mod image;
pub mod mapping;
pub mod orientation;
pub mod parallel;
pub mod pipeline;
pub mod transform;

// Re-exports for convenience.
pub use analysis::{BrightnessProfile, analyze, max_brightness, white_point};
pub use config::{AdaptConfig, AnalysisConfig};
pub use error::{BufferError, ConfigError};
pub use image::{Pixel, PixelBuffer};
pub use mapping::{ScreenContext, brightness_percent_from_raw, scale_factor};
pub use orientation::{Orientation, normalize};
pub use pipeline::{Adaptation, adapt, brightness_percent, screen_context};
