//! Error types for snapscrub.
//!
//! Only operations at the crate's edges (file I/O, configuration) can fail
//! with an [`Error`]. The detection and redaction pipeline itself degrades
//! instead of failing: invalid rules are dropped, recognizer failures become
//! an empty match list, and an unavailable redaction backend falls back to a
//! solid fill per region.

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for snapscrub operations.
#[derive(Error, Debug)]
pub enum Error {
    // === Configuration Errors ===
    /// Failed to load configuration.
    #[error("failed to load configuration: {0}")]
    ConfigLoad(Box<figment::Error>),

    /// Configuration validation failed.
    #[error("invalid configuration: {message}")]
    ConfigValidation {
        /// Description of the validation failure.
        message: String,
    },

    // === Image Errors ===
    /// Failed to open or decode an image file.
    #[error("failed to open image {path}: {source}")]
    ImageOpen {
        /// Path to the image file.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: image::ImageError,
    },

    /// Failed to encode or write an image file.
    #[error("failed to save image {path}: {source}")]
    ImageSave {
        /// Path to the output file.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: image::ImageError,
    },

    // === Recognizer Errors ===
    /// A text-block sidecar file could not be parsed.
    #[error("failed to parse text blocks from {path}: {source}")]
    SidecarParse {
        /// Path to the sidecar file.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: serde_json::Error,
    },

    // === I/O Errors ===
    /// File system operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    // === Serialization Errors ===
    /// JSON serialization/deserialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    // === Generic Errors ===
    /// An internal error occurred (bug).
    #[error("internal error: {0}")]
    Internal(String),
}

/// A specialized Result type for snapscrub operations.
pub type Result<T> = std::result::Result<T, Error>;

impl From<figment::Error> for Error {
    fn from(err: figment::Error) -> Self {
        Self::ConfigLoad(Box::new(err))
    }
}

impl Error {
    /// Create a configuration validation error.
    #[must_use]
    pub fn config_validation(message: impl Into<String>) -> Self {
        Self::ConfigValidation {
            message: message.into(),
        }
    }

    /// Create a new internal error.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::internal("something went wrong");
        assert_eq!(err.to_string(), "internal error: something went wrong");

        let err = Error::config_validation("min_confidence out of range");
        assert!(err.to_string().contains("min_confidence out of range"));
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(err.to_string().contains("file not found"));
    }

    #[test]
    fn test_from_json_error() {
        let json_result: std::result::Result<i32, serde_json::Error> =
            serde_json::from_str("not valid json");
        if let Err(json_err) = json_result {
            let err: Error = json_err.into();
            assert!(matches!(err, Error::Json(_)));
        }
    }

    #[test]
    fn test_sidecar_parse_error_display() {
        let source = serde_json::from_str::<i32>("oops").unwrap_err();
        let err = Error::SidecarParse {
            path: PathBuf::from("/tmp/blocks.json"),
            source,
        };
        assert!(err.to_string().contains("/tmp/blocks.json"));
    }

    #[test]
    fn test_image_open_error_display() {
        let source =
            image::ImageError::IoError(std::io::Error::new(std::io::ErrorKind::NotFound, "gone"));
        let err = Error::ImageOpen {
            path: PathBuf::from("/tmp/shot.png"),
            source,
        };
        let msg = err.to_string();
        assert!(msg.contains("/tmp/shot.png"));
    }
}
