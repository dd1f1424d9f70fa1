//! Error types for wheel configuration

use thiserror::Error;

/// Wheel error type
///
/// Only configuration loading fails loudly. Spin, tick and segment edits
/// resolve their edge cases inline and never return an error.
#[derive(Error, Debug)]
pub enum WheelError {
    #[error("JSON parse error: {0}")]
    Json(String),

    #[error("YAML parse error: {0}")]
    Yaml(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Unsupported config format: {0}")]
    UnsupportedFormat(String),

    #[error("Invalid config: {0}")]
    InvalidConfig(String),
}

/// Result type alias
pub type WheelResult<T> = Result<T, WheelError>;
