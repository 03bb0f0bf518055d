// file: src/error.rs
// description: Custom error types and result type aliases
// reference: https://docs.rs/thiserror

use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, TtpError>;

#[derive(Error, Debug)]
pub enum TtpError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Data format error: {0}")]
    DataFormat(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("File operation failed for {path}: {source}")]
    FileOperation {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl TtpError {
    /// Troubleshooting line shown next to the error by the CLI.
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            TtpError::Network(_) => Some("Check your internet connection and that the URL is reachable"),
            TtpError::DataFormat(_) => {
                Some("The ATT&CK dataset could not be parsed; try a different --attack-version")
            }
            TtpError::Configuration(_) => {
                Some("Supply exactly one of --url, --file or --text and at most one force-mode flag")
            }
            TtpError::Validation(_) => Some("Check the command line values; --score must be between 0 and 100"),
            _ => None,
        }
    }
}
