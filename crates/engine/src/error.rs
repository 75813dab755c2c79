//! Error types for the sync engine.

use gitcms_config::ConfigError;

/// Errors that abort a full sync.
///
/// The store is left exactly as it was before the failed call.
#[derive(Debug, thiserror::Error)]
pub enum SyncError {
    /// The repository options could not be resolved.
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),

    /// A page of the crawl failed.
    #[error("crawl failed: {0}")]
    GitHub(#[from] gitcms_github::Error),
}

/// A specialized Result type for sync operations.
pub type Result<T> = std::result::Result<T, SyncError>;
