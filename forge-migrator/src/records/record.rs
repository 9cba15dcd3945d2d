//! Kind-agnostic view over issues and pull requests.

use chrono::{DateTime, Utc};

use super::{SourceIssue, SourcePullRequest, SourceStatus};

/// Which kind of source record a [`SourceRecord`] wraps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordKind {
    Issue,
    PullRequest,
}

impl RecordKind {
    /// Short name used in migrated bodies and progress lines.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Issue => "issue",
            Self::PullRequest => "PR",
        }
    }
}

/// A borrowed source record of either kind.
#[derive(Debug, Clone, Copy)]
pub enum SourceRecord<'a> {
    Issue(&'a SourceIssue),
    PullRequest(&'a SourcePullRequest),
}

impl<'a> SourceRecord<'a> {
    #[must_use]
    pub fn kind(&self) -> RecordKind {
        match self {
            Self::Issue(_) => RecordKind::Issue,
            Self::PullRequest(_) => RecordKind::PullRequest,
        }
    }

    #[must_use]
    pub fn id(&self) -> u64 {
        match self {
            Self::Issue(issue) => issue.id,
            Self::PullRequest(pr) => pr.id,
        }
    }

    #[must_use]
    pub fn title(&self) -> &'a str {
        match self {
            Self::Issue(issue) => &issue.title,
            Self::PullRequest(pr) => &pr.title,
        }
    }

    #[must_use]
    pub fn author(&self) -> &'a str {
        match self {
            Self::Issue(issue) => &issue.author,
            Self::PullRequest(pr) => &pr.author,
        }
    }

    #[must_use]
    pub fn created(&self) -> DateTime<Utc> {
        match self {
            Self::Issue(issue) => issue.created,
            Self::PullRequest(pr) => pr.created,
        }
    }

    #[must_use]
    pub fn url(&self) -> &'a str {
        match self {
            Self::Issue(issue) => &issue.url,
            Self::PullRequest(pr) => &pr.url,
        }
    }

    /// Whether the destination copy should be closed right after creation.
    ///
    /// Pull requests cannot be reopened as issues, so their copies are always
    /// closed; issues follow their source status.
    #[must_use]
    pub fn closes_on_transfer(&self) -> bool {
        match self {
            Self::Issue(issue) => issue.status == SourceStatus::Closed,
            Self::PullRequest(_) => true,
        }
    }
}
