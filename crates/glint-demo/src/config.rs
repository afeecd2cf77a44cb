//! Runtime configuration for the demo.

use std::path::{Path, PathBuf};

use glint_core::config::AdaptConfig;
use glint_core::error::ConfigError;

/// Environment variable holding the raw 0–255 display brightness.
const ENV_SCREEN_BRIGHTNESS: &str = "GLINT_SCREEN_BRIGHTNESS";
/// Environment variable pointing at a JSON `AdaptConfig`.
const ENV_CONFIG: &str = "GLINT_CONFIG";
/// Suffix appended to the input stem for the default output name.
const OUTPUT_SUFFIX: &str = "_adapted";

/// Resolved settings for one run.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub input: PathBuf,
    pub output: PathBuf,
    /// Raw display brightness, if any source provided one.
    pub raw_brightness: Option<i32>,
    /// Explicit EXIF orientation code overriding the file's metadata.
    pub orientation_override: Option<u32>,
    pub adapt: AdaptConfig,
}

impl AppConfig {
    /// Merge command-line values with environment fallbacks and load the
    /// pipeline config file, if one is named.
    pub fn resolve(
        input: PathBuf,
        output: Option<PathBuf>,
        raw_brightness: Option<i32>,
        orientation_override: Option<u32>,
        config_path: Option<PathBuf>,
    ) -> Result<Self, ConfigError> {
        let raw_brightness = raw_brightness.or_else(|| {
            std::env::var(ENV_SCREEN_BRIGHTNESS)
                .ok()
                .and_then(|s| s.trim().parse().ok())
        });

        let config_path = config_path.or_else(|| std::env::var_os(ENV_CONFIG).map(PathBuf::from));
        let adapt = match config_path {
            Some(path) => {
                tracing::info!("loading config from {}", path.display());
                AdaptConfig::from_path(&path)?
            }
            None => AdaptConfig::default(),
        };

        let output = output.unwrap_or_else(|| default_output_path(&input));

        Ok(Self {
            input,
            output,
            raw_brightness,
            orientation_override,
            adapt,
        })
    }
}

/// `<dir>/<stem>_adapted.png` next to the input.
pub fn default_output_path(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "image".to_string());
    input.with_file_name(format!("{stem}{OUTPUT_SUFFIX}.png"))
}
