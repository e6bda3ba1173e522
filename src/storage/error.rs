//! Failures of batch sources and summary sinks

use std::fmt;
use thiserror::Error;

pub type StorageResult<T> = Result<T, StorageError>;

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// No batch or summary exists at the location
    #[error("nothing stored at {0}")]
    NotFound(String),

    /// The store could not be reached; a later attempt may succeed
    #[error("store unavailable: {0}")]
    Unavailable(String),

    /// The location cannot be built from the configuration
    #[error("invalid storage configuration: {0}")]
    Configuration(String),

    /// The store answered, but with something unusable
    #[error("storage backend failure: {0}")]
    Backend(String),
}

impl StorageError {
    pub fn not_found(location: impl fmt::Display) -> Self {
        Self::NotFound(location.to_string())
    }

    pub fn unavailable(msg: impl fmt::Display) -> Self {
        Self::Unavailable(msg.to_string())
    }

    pub fn configuration(msg: impl fmt::Display) -> Self {
        Self::Configuration(msg.to_string())
    }

    pub fn backend(msg: impl fmt::Display) -> Self {
        Self::Backend(msg.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_classification() {
        assert!(matches!(
            StorageError::not_found("tweets.csv"),
            StorageError::NotFound(_)
        ));
        assert!(matches!(
            StorageError::unavailable("down"),
            StorageError::Unavailable(_)
        ));
        let io = StorageError::from(std::io::Error::new(
            std::io::ErrorKind::ConnectionReset,
            "reset",
        ));
        assert!(matches!(io, StorageError::Io(_)));
    }

    #[test]
    fn test_not_found_names_location() {
        let err = StorageError::not_found("s3://twitterdata-analytics/raw_data/tweets.csv");
        assert_eq!(
            err.to_string(),
            "nothing stored at s3://twitterdata-analytics/raw_data/tweets.csv"
        );
    }
}
