//! Error types for GitHub API operations.

/// Errors that can occur during GitHub API operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// GitHub answered with an error status.
    #[error("GitHub returned HTTP {status}: {message}")]
    Upstream {
        /// HTTP status code.
        status: u16,
        /// Message from the error body.
        message: String,
    },

    /// The request could not be made or its response could not be decoded.
    #[error("GitHub API error: {0}")]
    Api(#[source] octocrab::Error),
}

impl Error {
    /// Returns the HTTP status of an upstream error.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Upstream { status, .. } => Some(*status),
            Self::Api(_) => None,
        }
    }
}

impl From<octocrab::Error> for Error {
    fn from(err: octocrab::Error) -> Self {
        match err {
            octocrab::Error::GitHub { source, .. } => Self::Upstream {
                status: source.status_code.as_u16(),
                message: source.message,
            },
            other => Self::Api(other),
        }
    }
}

/// A specialized Result type for GitHub API operations.
pub type Result<T> = std::result::Result<T, Error>;
