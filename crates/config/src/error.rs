//! Error types for configuration operations.
//!
//! This module defines the error types that can occur while resolving
//! repository options and loading settings files.

use std::path::PathBuf;

/// Errors that can occur during configuration operations.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read a settings file.
    #[error("failed to read config file at {path}: {source}")]
    ReadFile {
        /// The path that could not be read.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse JSON5 settings.
    #[error("failed to parse config: {0}")]
    ParseJson5(#[from] serde_json5::Error),

    /// Invalid repository identifier.
    #[error("invalid repository format: {0}")]
    InvalidRepository(String),

    /// An option has a value that cannot be used, or contradicts another one.
    #[error("invalid value for {name}: {reason}")]
    InvalidOption {
        /// The option name.
        name: &'static str,
        /// Why the value was rejected.
        reason: String,
    },
}

/// A specialized Result type for configuration operations.
pub type Result<T> = std::result::Result<T, ConfigError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_invalid_option() {
        let err = ConfigError::InvalidOption {
            name: "max_pages",
            reason: "must be at least 1".to_string(),
        };
        assert_eq!(err.to_string(), "invalid value for max_pages: must be at least 1");
    }

    #[test]
    fn display_invalid_repository() {
        let err = ConfigError::InvalidRepository("expected 'owner/repo' format".to_string());
        assert!(err.to_string().starts_with("invalid repository format"));
    }
}
