//! Forge adapter error types.

use crate::records::RecordError;
use thiserror::Error;

/// Errors from the source forge.
#[derive(Debug, Error)]
pub enum SourceError {
    /// Transport-level failure.
    #[error("Source API request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered with a non-success status.
    #[error("Source API returned {status} for {endpoint}: {message}")]
    Api {
        endpoint: String,
        status: u16,
        message: String,
    },

    /// The response was not in the documented shape.
    #[error("Unexpected response from {endpoint}: {message}")]
    UnexpectedResponse { endpoint: String, message: String },

    /// A returned record could not be converted.
    #[error(transparent)]
    Record(#[from] RecordError),

    /// The access token cannot be sent as a header.
    #[error("Source token contains characters not allowed in an HTTP header")]
    InvalidToken,
}

/// Errors from the destination forge.
#[derive(Debug, Error)]
pub enum DestinationError {
    /// GitHub API error.
    #[error("GitHub API error: {0}")]
    GitHubError(#[from] octocrab::Error),

    /// The requested issue does not exist.
    #[error("Destination issue #{id} does not exist")]
    NotFound { id: u64 },
}
