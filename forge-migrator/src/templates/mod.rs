//! Text rendering using Handlebars.
//!
//! Every string the migration writes to either forge goes through a format
//! from [`TemplateFormats`](crate::config::TemplateFormats), rendered here.

mod error;
mod renderer;

pub use error::TemplateError;
pub use renderer::{create_handlebars_registry, TemplateRenderer};

use crate::records::SourceRecord;

/// Title of the destination issue created for `record`.
///
/// Pull requests get `pr_prefix` in front of their title; issues keep theirs.
#[must_use]
pub fn transfer_title(record: &SourceRecord<'_>, pr_prefix: &str) -> String {
    match record {
        SourceRecord::Issue(issue) => issue.title.clone(),
        SourceRecord::PullRequest(pr) => format!("{pr_prefix}{}", pr.title),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::{PullRequestStatus, SourcePullRequest};
    use chrono::DateTime;

    #[test]
    fn prefixes_pull_request_titles() {
        let pr = SourcePullRequest {
            id: 2,
            title: "Fix typo".to_string(),
            author: "carol".to_string(),
            created: DateTime::from_timestamp(1_600_000_000, 0).unwrap(),
            status: PullRequestStatus::Open,
            description: String::new(),
            url: "https://pagure.io/copr/copr/pull-request/2".to_string(),
        };

        let title = transfer_title(&SourceRecord::PullRequest(&pr), "[PR] ");
        assert_eq!(title, "[PR] Fix typo");
    }
}
