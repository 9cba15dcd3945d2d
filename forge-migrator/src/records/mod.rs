//! Typed source records.
//!
//! Issues and pull requests are read from raw Pagure JSON (either live from
//! the API or from an export on disk) and converted into the types below.

mod comment;
mod error;
mod issue;
mod project;
mod pull_request;
pub mod raw;
mod record;

pub use comment::SourceComment;
pub use error::RecordError;
pub use issue::{SourceIssue, SourceStatus, MIGRATED_CLOSE_STATUS};
pub use project::SourceProject;
pub use pull_request::{PullRequestStatus, SourcePullRequest};
pub use record::{RecordKind, SourceRecord};

use chrono::{DateTime, Utc};

/// Formats a timestamp the way it appears in migrated bodies.
#[must_use]
pub fn display_timestamp(timestamp: &DateTime<Utc>) -> String {
    timestamp.format("%Y-%m-%d %H:%M:%S UTC").to_string()
}
