//! Source pull requests.

use chrono::{DateTime, Utc};

use super::raw::RawPullRequest;
use super::{RecordError, SourceProject};

/// Lifecycle state of a source pull request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PullRequestStatus {
    Open,
    Merged,
    Closed,
}

impl PullRequestStatus {
    fn parse(value: &str, id: u64) -> Result<Self, RecordError> {
        match value.to_ascii_lowercase().as_str() {
            "open" => Ok(Self::Open),
            "merged" => Ok(Self::Merged),
            "closed" => Ok(Self::Closed),
            _ => Err(RecordError::UnknownStatus {
                id,
                value: value.to_string(),
            }),
        }
    }
}

/// A pull request from the source project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourcePullRequest {
    pub id: u64,
    pub title: String,
    pub author: String,
    pub created: DateTime<Utc>,
    pub status: PullRequestStatus,
    pub description: String,
    pub url: String,
}

impl SourcePullRequest {
    /// Builds a typed pull request from its raw API shape.
    ///
    /// # Errors
    ///
    /// Returns [`RecordError`] if the status or timestamp is malformed.
    pub fn from_raw(raw: RawPullRequest, project: &SourceProject) -> Result<Self, RecordError> {
        let id = raw.id;
        Ok(Self {
            id,
            status: PullRequestStatus::parse(&raw.status, id)?,
            created: raw.date_created.to_utc(id)?,
            title: raw.title,
            author: raw.user.name,
            description: raw.initial_comment.unwrap_or_default(),
            url: project.pull_request_url(id),
        })
    }
}
