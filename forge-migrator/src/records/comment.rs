//! Issue comments.

use chrono::{DateTime, Utc};

use super::raw::RawComment;
use super::RecordError;

/// A single comment from a source issue's discussion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceComment {
    /// Login of the commenter.
    pub author: String,

    /// When the comment was posted.
    pub created: DateTime<Utc>,

    /// Markdown body.
    pub body: String,
}

impl SourceComment {
    pub(crate) fn from_raw(raw: RawComment, issue_id: u64) -> Result<Self, RecordError> {
        Ok(Self {
            created: raw.date_created.to_utc(issue_id)?,
            author: raw.user.name,
            body: raw.comment.unwrap_or_default(),
        })
    }
}
