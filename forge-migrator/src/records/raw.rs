//! Raw record shapes as returned by the Pagure API and stored in exports.

use chrono::{DateTime, Utc};
use serde::Deserialize;

use super::RecordError;

/// Epoch seconds, which Pagure serializes as either a string or a number.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RawTimestamp {
    Text(String),
    Number(i64),
}

impl RawTimestamp {
    /// Converts the raw value to a UTC timestamp.
    ///
    /// # Errors
    ///
    /// Returns [`RecordError::InvalidTimestamp`] when the value is not a
    /// representable epoch.
    pub fn to_utc(&self, id: u64) -> Result<DateTime<Utc>, RecordError> {
        let invalid = || RecordError::InvalidTimestamp {
            id,
            value: self.to_string(),
        };
        let secs = match self {
            Self::Text(text) => text.trim().parse::<i64>().map_err(|_| invalid())?,
            Self::Number(secs) => *secs,
        };
        DateTime::from_timestamp(secs, 0).ok_or_else(invalid)
    }
}

impl std::fmt::Display for RawTimestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Text(text) => f.write_str(text),
            Self::Number(secs) => write!(f, "{secs}"),
        }
    }
}

/// The `user` object attached to issues, requests and comments.
#[derive(Debug, Clone, Deserialize)]
pub struct RawUser {
    pub name: String,
}

/// A comment on an issue.
#[derive(Debug, Clone, Deserialize)]
pub struct RawComment {
    #[serde(default)]
    pub comment: Option<String>,
    pub date_created: RawTimestamp,
    pub user: RawUser,
}

/// An issue as listed by `GET /api/0/<project>/issues`.
#[derive(Debug, Clone, Deserialize)]
pub struct RawIssue {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub content: Option<String>,
    pub status: String,
    #[serde(default)]
    pub close_status: Option<String>,
    pub date_created: RawTimestamp,
    pub user: RawUser,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub comments: Vec<RawComment>,
}

/// A pull request as listed by `GET /api/0/<project>/pull-requests`.
#[derive(Debug, Clone, Deserialize)]
pub struct RawPullRequest {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub initial_comment: Option<String>,
    pub status: String,
    pub date_created: RawTimestamp,
    pub user: RawUser,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_string_and_numeric_timestamps() {
        let text = RawTimestamp::Text("1431414800".to_string());
        let number = RawTimestamp::Number(1431414800);

        assert_eq!(text.to_utc(1).unwrap(), number.to_utc(1).unwrap());
        assert_eq!(
            text.to_utc(1).unwrap().to_rfc3339(),
            "2015-05-12T07:13:20+00:00"
        );
    }

    #[test]
    fn rejects_garbage_timestamp() {
        let raw = RawTimestamp::Text("yesterday".to_string());
        let result = raw.to_utc(7);

        assert!(matches!(
            result,
            Err(RecordError::InvalidTimestamp { id: 7, .. })
        ));
    }

    #[test]
    fn deserializes_issue_with_missing_optional_fields() {
        let raw: RawIssue = serde_json::from_str(
            r#"{
                "id": 4,
                "title": "Crash on start",
                "status": "Open",
                "date_created": "1600000000",
                "user": {"name": "alice", "fullname": "Alice"}
            }"#,
        )
        .unwrap();

        assert_eq!(raw.id, 4);
        assert!(raw.content.is_none());
        assert!(raw.tags.is_empty());
        assert!(raw.comments.is_empty());
    }
}
