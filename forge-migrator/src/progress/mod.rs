//! Progress reporting.
//!
//! Each completed mutating action is reported once as a [`ProgressEvent`] to a
//! [`ProgressSink`]. The file sink keeps the operator's append-only log,
//! which is how a failed transfer is resumed: the last `created` line names
//! the next start offset.

mod file;
mod recorder;

pub use file::FileProgressLog;
pub use recorder::RecordingProgress;

use crate::records::RecordKind;
use std::fmt;
use thiserror::Error;

/// Errors writing progress.
#[derive(Debug, Error)]
pub enum ProgressError {
    /// Failed to append to the log file.
    #[error("Failed to append to progress log '{path}': {source}")]
    IoError {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// One completed action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProgressEvent {
    /// A destination issue was created from a source record.
    Created { id: u64, kind: RecordKind },

    /// A destination issue was created only to reserve its number.
    Placeholder { id: u64 },

    /// Labels were copied onto a destination issue.
    Labeled { id: u64, labels: Vec<String> },

    /// Description and comments were merged into a destination body.
    Merged { id: u64 },

    /// A source issue was commented on and closed as migrated.
    ClosedOnSource { id: u64 },
}

impl ProgressEvent {
    /// Identifier the action applied to.
    #[must_use]
    pub fn id(&self) -> u64 {
        match self {
            Self::Created { id, .. }
            | Self::Placeholder { id }
            | Self::Labeled { id, .. }
            | Self::Merged { id }
            | Self::ClosedOnSource { id } => *id,
        }
    }

    /// Leading verb of the log line.
    #[must_use]
    pub fn action(&self) -> &'static str {
        match self {
            Self::Created { .. } | Self::Placeholder { .. } => "created",
            Self::Labeled { .. } => "labeled",
            Self::Merged { .. } => "merged",
            Self::ClosedOnSource { .. } => "closed",
        }
    }
}

/// Renders the log line: `<action> <detail>; id <id>`.
impl fmt::Display for ProgressEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Created { id, kind } => {
                write!(f, "created issue from {}; id {id}", kind.as_str())
            }
            Self::Placeholder { id } => write!(f, "created placeholder issue; id {id}"),
            Self::Labeled { id, labels } => {
                write!(f, "labeled issue with {}; id {id}", labels.join(", "))
            }
            Self::Merged { id } => write!(f, "merged description and comments; id {id}"),
            Self::ClosedOnSource { id } => write!(f, "closed source issue as MIGRATED; id {id}"),
        }
    }
}

/// Receives one event per completed action.
pub trait ProgressSink: Send + Sync {
    /// Records a completed action.
    ///
    /// # Errors
    ///
    /// Returns [`ProgressError`] if the event cannot be persisted.
    fn record(&self, event: &ProgressEvent) -> Result<(), ProgressError>;
}
