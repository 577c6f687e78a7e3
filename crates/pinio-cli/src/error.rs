//! Error types for pinioctl

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("Invalid hex byte '{0}'")]
    InvalidHex(String),

    #[error("Odd number of hex digits in '{0}'")]
    OddHexLength(String),

    #[error("No input frames given")]
    NoInput,

    #[error("Unsupported config format: {0} (expected .json, .yaml or .yml)")]
    UnsupportedConfigFormat(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(#[from] pinio_core::PinIoError),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}
