//! Glint Demo — adapt an image file for the current display brightness.
//!
//! Stands in for the platform glue: decodes the file, reads its EXIF
//! orientation, runs the glint-core pipeline and writes the result.

mod config;
mod image_loader;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use glint_core::error::ConfigError;
use glint_core::orientation::Orientation;
use glint_core::pipeline;
use tracing_subscriber::EnvFilter;

use crate::config::AppConfig;
use crate::image_loader::ImageLoadError;

#[derive(Parser)]
#[command(name = "glint-demo")]
#[command(version, about = "Adapt image brightness to the display setting", long_about = None)]
struct Cli {
    /// Image to adapt
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// Output file (defaults to <stem>_adapted.png next to the input)
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Raw display brightness, 0-255 (falls back to $GLINT_SCREEN_BRIGHTNESS)
    #[arg(short, long, value_name = "RAW", allow_negative_numbers = true)]
    brightness: Option<i32>,

    /// EXIF orientation code overriding the file's metadata
    #[arg(long, value_name = "CODE")]
    orientation: Option<u32>,

    /// Pipeline config JSON (falls back to $GLINT_CONFIG)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,
}

#[derive(Debug, thiserror::Error)]
enum DemoError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Image(#[from] ImageLoadError),
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), DemoError> {
    let app = AppConfig::resolve(
        cli.input,
        cli.output,
        cli.brightness,
        cli.orientation,
        cli.config,
    )?;

    let loaded = image_loader::load_image(&app.input)?;
    let orientation = app
        .orientation_override
        .map(Orientation::from_exif)
        .unwrap_or(loaded.orientation);
    let percent = pipeline::brightness_percent(app.raw_brightness, &app.adapt);

    tracing::info!(
        "adapting {} ({}x{}, {orientation}) at {}% screen brightness",
        app.input.display(),
        loaded.buffer.width(),
        loaded.buffer.height(),
        percent,
    );

    let result = pipeline::adapt(&loaded.buffer, orientation, percent, &app.adapt);

    tracing::info!(
        "peak {} white point {} scale {:.4}",
        result.profile.max_pixel_brightness,
        result.profile.image_white_point,
        result.scale,
    );

    image_loader::save_image(&result.image, &app.output)?;
    tracing::info!("wrote {}", app.output.display());
    Ok(())
}
