//! Error types for gdoc2md library.
//!
//! Errors only surface at the ingestion boundary (reading and decoding the
//! document JSON). Conversion of an already-built [`DocumentTree`] never
//! fails; malformed pieces are skipped or rendered in a degraded form.
//!
//! [`DocumentTree`]: crate::model::DocumentTree

use std::io;
use thiserror::Error;

/// Result type alias for gdoc2md operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while loading a document.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading input.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The input is not valid JSON or does not match the expected shape.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The JSON is neither a Docs API response nor a serialized document tree.
    #[error("Unknown input format: expected a Google Docs API document or a document tree")]
    UnknownFormat,

    /// A Docs API response without a `body` object.
    #[error("Document has no body content")]
    MissingBody,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::MissingBody;
        assert_eq!(err.to_string(), "Document has no body content");

        let err = Error::UnknownFormat;
        assert!(err.to_string().starts_with("Unknown input format"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn test_json_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let err: Error = json_err.into();
        assert!(matches!(err, Error::Json(_)));
        assert!(err.to_string().starts_with("JSON error:"));
    }
}
