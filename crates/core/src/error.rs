use std::path::PathBuf;
use thiserror::Error;

use crate::config::ConfigError;

/// Result type alias for termfolio-core
pub type Result<T> = std::result::Result<T, Error>;

/// Core error types for the portfolio terminal
///
/// None of these come out of command dispatch: unknown commands, overlong input
/// and probe failures all degrade to visible text. These cover the ambient
/// surfaces (configuration, content files, logging setup).
#[derive(Debug, Error)]
pub enum Error {
    /// I/O error for file operations
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration values that fail validation
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Content store errors
    #[error("content error: {0}")]
    Content(#[from] ContentError),

    /// Config file is not valid TOML for the config schema
    #[error("parse error: {0}")]
    Parse(#[from] toml::de::Error),

    /// Logging setup errors
    #[error("logging error: {0}")]
    Logging(String),
}

/// Errors raised while loading an external portfolio file
#[derive(Debug, Error)]
pub enum ContentError {
    /// Portfolio file does not exist
    #[error("portfolio file not found: {0}")]
    NotFound(PathBuf),

    /// Portfolio file exists but could not be read
    #[error("failed to read portfolio file {path}: {source}")]
    Io { path: PathBuf, source: std::io::Error },

    /// Portfolio file is not valid TOML for the content schema
    #[error("invalid portfolio file {path}: {reason}")]
    Invalid { path: PathBuf, reason: String },

    /// A required section is empty
    #[error("portfolio field '{0}' must not be empty")]
    EmptyField(&'static str),
}
