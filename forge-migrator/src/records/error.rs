//! Record conversion error types.

use thiserror::Error;

/// Errors raised while turning raw source records into typed ones.
#[derive(Debug, Error)]
pub enum RecordError {
    /// The creation timestamp was not a valid epoch value.
    #[error("Record #{id} has an invalid timestamp '{value}'")]
    InvalidTimestamp { id: u64, value: String },

    /// The status string is not one the source forge documents.
    #[error("Record #{id} has an unknown status '{value}'")]
    UnknownStatus { id: u64, value: String },
}
