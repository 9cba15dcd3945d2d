//! Export file error types.

use crate::records::RecordError;
use thiserror::Error;

/// Errors reading or writing export documents.
#[derive(Debug, Error)]
pub enum ExportError {
    /// Failed to read or write a file.
    #[error("Failed to access export '{path}': {source}")]
    IoError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The document is not valid JSON or lacks the expected key.
    #[error("Failed to parse export '{path}': {source}")]
    JsonError {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    /// A record inside the document is malformed.
    #[error("Invalid record in '{path}': {source}")]
    RecordError {
        path: String,
        #[source]
        source: RecordError,
    },
}
