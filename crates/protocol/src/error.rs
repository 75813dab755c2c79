//! Error types for the gitcms-protocol crate.

use thiserror::Error;

/// Errors that can occur while decoding protocol payloads.
#[derive(Debug, Error)]
pub enum ProtocolError {
    /// The payload is not JSON at all.
    #[error("failed to deserialize from JSON: {0}")]
    DeserializationFailed(#[source] serde_json::Error),

    /// The payload looks like a known event but lacks what that event needs.
    #[error("malformed webhook event: {reason}")]
    MalformedEvent {
        /// What was missing or unusable.
        reason: String,
    },
}

impl ProtocolError {
    pub(crate) fn malformed(reason: impl Into<String>) -> Self {
        Self::MalformedEvent {
            reason: reason.into(),
        }
    }
}

/// A specialized Result type for protocol operations.
pub type Result<T> = std::result::Result<T, ProtocolError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_messages() {
        let err = ProtocolError::malformed("issue payload has no user");
        assert_eq!(
            err.to_string(),
            "malformed webhook event: issue payload has no user"
        );
    }
}
