//! Error types for Aria.

use thiserror::Error;

/// Result type alias using Aria's Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for Aria.
#[derive(Error, Debug)]
pub enum Error {
    // Media resource errors
    #[error("failed to bind media resource: {0}")]
    ResourceLoad(String),

    #[error("media resource error: {0}")]
    Resource(String),

    // Persistence errors
    #[error("storage error: {0}")]
    Storage(String),

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // Serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    // Generic errors
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Returns true if the engine can recover from this error by
    /// binding a fresh resource on the next play command.
    pub const fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::ResourceLoad(_) | Self::Resource(_) | Self::Storage(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_recoverable() {
        assert!(Error::ResourceLoad("decode failed".into()).is_recoverable());
        assert!(Error::Storage("disk full".into()).is_recoverable());
        assert!(!Error::InvalidArgument("bad".into()).is_recoverable());
    }

    #[test]
    fn test_error_display() {
        let err = Error::ResourceLoad("missing file".into());
        assert_eq!(
            err.to_string(),
            "failed to bind media resource: missing file"
        );
    }
}
