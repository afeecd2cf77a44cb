//! Errors for the fallible constructors and config loading.
//!
//! The adaptation stages themselves are total and never return these.

#[derive(Debug, thiserror::Error)]
pub enum BufferError {
    #[error("{width}x{height} buffer needs {expected} pixels, got {actual}")]
    SizeMismatch {
        width: u32,
        height: u32,
        expected: usize,
        actual: usize,
    },
    #[error("{width}x{height} buffer does not fit in memory")]
    TooLarge { width: u32, height: u32 },
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid config value: {0}")]
    Invalid(&'static str),
}
