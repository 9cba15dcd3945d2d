//! Source issues.

use chrono::{DateTime, Utc};

use super::raw::RawIssue;
use super::{RecordError, SourceComment, SourceProject};

/// Close status written by close-out once an issue has been moved.
pub const MIGRATED_CLOSE_STATUS: &str = "MIGRATED";

/// Open/closed state of a source issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceStatus {
    Open,
    Closed,
}

impl SourceStatus {
    fn parse(value: &str, id: u64) -> Result<Self, RecordError> {
        if value.eq_ignore_ascii_case("open") {
            Ok(Self::Open)
        } else if value.eq_ignore_ascii_case("closed") {
            Ok(Self::Closed)
        } else {
            Err(RecordError::UnknownStatus {
                id,
                value: value.to_string(),
            })
        }
    }
}

/// An issue from the source project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceIssue {
    pub id: u64,
    pub title: String,
    pub author: String,
    pub created: DateTime<Utc>,
    pub status: SourceStatus,
    /// Custom close reason, if the issue was closed with one.
    pub close_status: Option<String>,
    pub description: String,
    /// Labels in source order, without duplicates.
    pub labels: Vec<String>,
    /// Discussion in posting order.
    pub comments: Vec<SourceComment>,
    pub url: String,
}

impl SourceIssue {
    /// Builds a typed issue from its raw API shape.
    ///
    /// # Errors
    ///
    /// Returns [`RecordError`] if the status or a timestamp is malformed.
    pub fn from_raw(raw: RawIssue, project: &SourceProject) -> Result<Self, RecordError> {
        let id = raw.id;
        let status = SourceStatus::parse(&raw.status, id)?;
        let created = raw.date_created.to_utc(id)?;
        let comments = raw
            .comments
            .into_iter()
            .map(|comment| SourceComment::from_raw(comment, id))
            .collect::<Result<Vec<_>, _>>()?;

        let mut labels: Vec<String> = Vec::with_capacity(raw.tags.len());
        for tag in raw.tags {
            if !labels.contains(&tag) {
                labels.push(tag);
            }
        }

        Ok(Self {
            id,
            title: raw.title,
            author: raw.user.name,
            created,
            status,
            close_status: raw.close_status.filter(|status| !status.is_empty()),
            description: raw.content.unwrap_or_default(),
            labels,
            comments,
            url: project.issue_url(id),
        })
    }

    /// Whether close-out has already marked this issue as moved.
    #[must_use]
    pub fn is_migrated(&self) -> bool {
        self.close_status
            .as_deref()
            .is_some_and(|status| status.eq_ignore_ascii_case(MIGRATED_CLOSE_STATUS))
    }

    #[must_use]
    pub fn is_open(&self) -> bool {
        self.status == SourceStatus::Open
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::raw::RawIssue;

    fn project() -> SourceProject {
        SourceProject::new("https://pagure.io", Some("copr"), "copr").unwrap()
    }

    fn raw(json: &str) -> RawIssue {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn converts_raw_issue() {
        let issue = SourceIssue::from_raw(
            raw(r#"{
                "id": 12,
                "title": "Builds hang",
                "content": "They hang forever.",
                "status": "Closed",
                "close_status": "Fixed",
                "date_created": "1600000000",
                "user": {"name": "alice"},
                "tags": ["bug", "backend", "bug"],
                "comments": [
                    {"comment": "Seen it too", "date_created": "1600003600", "user": {"name": "bob"}}
                ]
            }"#),
            &project(),
        )
        .unwrap();

        assert_eq!(issue.id, 12);
        assert_eq!(issue.status, SourceStatus::Closed);
        assert_eq!(issue.close_status.as_deref(), Some("Fixed"));
        assert_eq!(issue.labels, vec!["bug", "backend"]);
        assert_eq!(issue.comments.len(), 1);
        assert_eq!(issue.comments[0].author, "bob");
        assert_eq!(issue.url, "https://pagure.io/copr/copr/issue/12");
        assert!(!issue.is_migrated());
    }

    #[test]
    fn migrated_check_ignores_case() {
        let mut issue = SourceIssue::from_raw(
            raw(r#"{"id": 1, "title": "t", "status": "Open", "date_created": 1600000000, "user": {"name": "a"}}"#),
            &project(),
        )
        .unwrap();

        issue.close_status = Some("migrated".to_string());
        assert!(issue.is_migrated());

        issue.close_status = Some("Duplicate".to_string());
        assert!(!issue.is_migrated());
    }

    #[test]
    fn rejects_unknown_status() {
        let result = SourceIssue::from_raw(
            raw(r#"{"id": 5, "title": "t", "status": "Pending", "date_created": "1", "user": {"name": "a"}}"#),
            &project(),
        );

        assert!(matches!(
            result,
            Err(RecordError::UnknownStatus { id: 5, .. })
        ));
    }
}
