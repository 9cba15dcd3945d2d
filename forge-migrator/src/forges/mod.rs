//! Forge adapters.
//!
//! The stages only see the [`SourceTracker`] and [`DestinationTracker`]
//! traits. [`PagureSource`] and [`GithubDestination`] implement them against
//! the real services.

mod error;
mod github;
mod pagure;

pub use error::{DestinationError, SourceError};
pub use github::GithubDestination;
pub use pagure::PagureSource;

use crate::records::{SourceIssue, SourcePullRequest, MIGRATED_CLOSE_STATUS};
use async_trait::async_trait;

/// Which issues to list from the source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusFilter {
    Open,
    Closed,
    All,
}

impl StatusFilter {
    /// Value of Pagure's `status` query parameter.
    #[must_use]
    pub fn as_query(self) -> &'static str {
        match self {
            Self::Open => "Open",
            Self::Closed => "Closed",
            Self::All => "all",
        }
    }
}

/// Payload of the low-level issue status call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusTransition {
    pub status: String,
    pub close_status: Option<String>,
}

impl StatusTransition {
    /// Closes an issue with the `MIGRATED` close status.
    #[must_use]
    pub fn migrated() -> Self {
        Self {
            status: "Closed".to_string(),
            close_status: Some(MIGRATED_CLOSE_STATUS.to_string()),
        }
    }
}

/// Open/closed state of a destination issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DestinationState {
    Open,
    Closed,
}

/// A destination issue as the stages see it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DestinationIssue {
    /// Number assigned by the destination.
    pub id: u64,
    pub title: String,
    pub body: String,
    pub state: DestinationState,
    pub labels: Vec<String>,
}

/// Read and close-out access to the project records come from.
#[async_trait]
pub trait SourceTracker: Send + Sync {
    /// Lists issues with the given status, ordered by id.
    async fn list_issues(&self, filter: StatusFilter) -> Result<Vec<SourceIssue>, SourceError>;

    /// Lists pull requests of any status, ordered by id.
    async fn list_pull_requests(&self) -> Result<Vec<SourcePullRequest>, SourceError>;

    /// Posts a comment on an issue.
    async fn comment(&self, issue_id: u64, body: &str) -> Result<(), SourceError>;

    /// Sets an issue's status directly, including a custom close status.
    async fn set_status(
        &self,
        issue_id: u64,
        transition: &StatusTransition,
    ) -> Result<(), SourceError>;
}

/// Write access to the repository records are copied into.
#[async_trait]
pub trait DestinationTracker: Send + Sync {
    /// Creates an open issue; the destination picks its number.
    async fn create_issue(&self, title: &str, body: &str)
        -> Result<DestinationIssue, DestinationError>;

    async fn get_issue(&self, id: u64) -> Result<DestinationIssue, DestinationError>;

    async fn close_issue(&self, id: u64) -> Result<(), DestinationError>;

    /// Adds all `labels` in a single call.
    async fn add_labels(&self, id: u64, labels: &[String]) -> Result<(), DestinationError>;

    /// Replaces an issue's body.
    async fn set_body(&self, id: u64, body: &str) -> Result<(), DestinationError>;
}
