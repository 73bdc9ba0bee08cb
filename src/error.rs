//! Domain error types for the report generator.
//!
//! Uses thiserror for ergonomic error handling with automatic Display implementations.

use crate::config::ConfigError;

/// Application-level errors. Any of these aborts report generation.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Invalid or missing report options
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Directory listing, folder creation or page writing failed
    #[error("File system error: {0}")]
    FileSystem(String),

    /// Environment configuration could not be loaded
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

/// Convenience type alias for Results with AppError.
pub type AppResult<T> = Result<T, AppError>;

/// Why a single result file could not be loaded.
///
/// Never fatal: the normalizer turns it into an empty feature list.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("could not read file: {0}")]
    Read(#[from] std::io::Error),

    #[error("invalid JSON: {0}")]
    Syntax(#[from] serde_json::Error),

    #[error("expected a JSON object or array, found {0}")]
    Shape(&'static str),
}
