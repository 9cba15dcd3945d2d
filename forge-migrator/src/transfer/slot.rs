//! Identifier lookup for the transfer walk.

use crate::error::MigrationError;
use crate::forges::{SourceError, SourceTracker, StatusFilter};
use crate::records::{SourceIssue, SourcePullRequest, SourceRecord};
use std::collections::BTreeMap;
use std::ops::RangeInclusive;

/// What occupies a single identifier in the source.
#[derive(Debug, Clone, Copy)]
pub enum Slot<'a> {
    /// An issue or pull request carries this identifier.
    Record(SourceRecord<'a>),

    /// Nothing does; a placeholder must consume the number.
    Gap,
}

/// All source records keyed by identifier, one map per kind.
#[derive(Debug, Clone, Default)]
pub struct SourceIndex {
    issues: BTreeMap<u64, SourceIssue>,
    pull_requests: BTreeMap<u64, SourcePullRequest>,
}

impl SourceIndex {
    /// Indexes the records. A later duplicate id within a kind replaces the
    /// earlier one.
    #[must_use]
    pub fn new(issues: Vec<SourceIssue>, pull_requests: Vec<SourcePullRequest>) -> Self {
        Self {
            issues: issues.into_iter().map(|issue| (issue.id, issue)).collect(),
            pull_requests: pull_requests.into_iter().map(|pr| (pr.id, pr)).collect(),
        }
    }

    /// Indexes every issue and pull request the source currently lists.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError`] if either listing fails.
    pub async fn fetch(source: &dyn SourceTracker) -> Result<Self, SourceError> {
        let issues = source.list_issues(StatusFilter::All).await?;
        let pull_requests = source.list_pull_requests().await?;
        Ok(Self::new(issues, pull_requests))
    }

    /// Resolves an identifier, preferring the issue when both kinds use it.
    #[must_use]
    pub fn resolve(&self, id: u64) -> Slot<'_> {
        if let Some(issue) = self.issues.get(&id) {
            return Slot::Record(SourceRecord::Issue(issue));
        }
        match self.pull_requests.get(&id) {
            Some(pr) => Slot::Record(SourceRecord::PullRequest(pr)),
            None => Slot::Gap,
        }
    }

    /// Highest identifier of either kind.
    #[must_use]
    pub fn last_id(&self) -> Option<u64> {
        let last_issue = self.issues.keys().next_back().copied();
        let last_pr = self.pull_requests.keys().next_back().copied();
        last_issue.max(last_pr)
    }

    /// Pull request ids hidden behind an issue with the same id.
    #[must_use]
    pub fn shadowed_pull_requests(&self) -> Vec<u64> {
        self.pull_requests
            .keys()
            .filter(|id| self.issues.contains_key(id))
            .copied()
            .collect()
    }

    /// Every slot in `(start, last_id]`, ascending, resolved as it is
    /// consumed.
    ///
    /// # Errors
    ///
    /// Returns [`MigrationError::EmptySource`] when there are no records.
    pub fn plan(&self, start: u64) -> Result<Plan<'_>, MigrationError> {
        let last = self.last_id().ok_or(MigrationError::EmptySource)?;
        Ok(Plan {
            index: self,
            ids: start.saturating_add(1)..=last,
        })
    }
}

/// Lazy walk over the identifiers a transfer consumes.
#[derive(Debug, Clone)]
pub struct Plan<'a> {
    index: &'a SourceIndex,
    ids: RangeInclusive<u64>,
}

impl Plan<'_> {
    /// Identifiers not yet yielded.
    #[must_use]
    pub fn remaining(&self) -> u64 {
        if self.ids.is_empty() {
            0
        } else {
            (self.ids.end() - self.ids.start()).saturating_add(1)
        }
    }
}

impl<'a> Iterator for Plan<'a> {
    type Item = (u64, Slot<'a>);

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.ids.next()?;
        Some((id, self.index.resolve(id)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::{PullRequestStatus, RecordKind, SourceStatus};
    use chrono::DateTime;

    fn issue(id: u64) -> SourceIssue {
        SourceIssue {
            id,
            title: format!("issue {id}"),
            author: "alice".to_string(),
            created: DateTime::from_timestamp(1_600_000_000, 0).unwrap(),
            status: SourceStatus::Open,
            close_status: None,
            description: String::new(),
            labels: Vec::new(),
            comments: Vec::new(),
            url: format!("https://pagure.io/p/issue/{id}"),
        }
    }

    fn pr(id: u64) -> SourcePullRequest {
        SourcePullRequest {
            id,
            title: format!("pr {id}"),
            author: "bob".to_string(),
            created: DateTime::from_timestamp(1_600_000_000, 0).unwrap(),
            status: PullRequestStatus::Merged,
            description: String::new(),
            url: format!("https://pagure.io/p/pull-request/{id}"),
        }
    }

    fn kinds(index: &SourceIndex, start: u64) -> Vec<(u64, Option<RecordKind>)> {
        index
            .plan(start)
            .unwrap()
            .map(|(id, slot)| match slot {
                Slot::Record(record) => (id, Some(record.kind())),
                Slot::Gap => (id, None),
            })
            .collect()
    }

    #[test]
    fn plan_covers_range_with_gaps() {
        let index = SourceIndex::new(vec![issue(1), issue(4)], vec![pr(2)]);

        assert_eq!(
            kinds(&index, 0),
            vec![
                (1, Some(RecordKind::Issue)),
                (2, Some(RecordKind::PullRequest)),
                (3, None),
                (4, Some(RecordKind::Issue)),
            ]
        );
    }

    #[test]
    fn plan_starts_after_offset() {
        let index = SourceIndex::new(vec![issue(1), issue(5)], vec![pr(7)]);

        let plan = kinds(&index, 4);
        assert_eq!(plan.first().map(|(id, _)| *id), Some(5));
        assert_eq!(plan.len(), 3);
    }

    #[test]
    fn plan_is_empty_when_offset_reaches_last() {
        let index = SourceIndex::new(vec![issue(3)], Vec::new());

        assert_eq!(index.plan(3).unwrap().remaining(), 0);
        assert!(index.plan(10).unwrap().next().is_none());
    }

    #[test]
    fn plan_resolves_lazily_up_to_huge_ids() {
        let index = SourceIndex::new(vec![issue(1)], vec![pr(u64::MAX)]);

        let mut plan = index.plan(0).unwrap();
        assert_eq!(plan.remaining(), u64::MAX);

        let first: Vec<u64> = plan.by_ref().take(2).map(|(id, _)| id).collect();
        assert_eq!(first, vec![1, 2]);
        assert_eq!(plan.remaining(), u64::MAX - 2);
    }

    #[test]
    fn plan_ends_on_last_id() {
        let index = SourceIndex::new(Vec::new(), vec![pr(u64::MAX)]);

        let mut plan = index.plan(u64::MAX - 1).unwrap();
        assert_eq!(plan.remaining(), 1);
        assert_eq!(plan.next().map(|(id, _)| id), Some(u64::MAX));
        assert!(plan.next().is_none());
        assert_eq!(plan.remaining(), 0);
    }

    #[test]
    fn issue_wins_shared_id() {
        let index = SourceIndex::new(vec![issue(2)], vec![pr(2), pr(3)]);

        match index.resolve(2) {
            Slot::Record(record) => assert_eq!(record.title(), "issue 2"),
            Slot::Gap => panic!("expected a record"),
        }
        assert_eq!(index.shadowed_pull_requests(), vec![2]);
    }

    #[test]
    fn last_id_spans_both_kinds() {
        let index = SourceIndex::new(vec![issue(3)], vec![pr(9)]);
        assert_eq!(index.last_id(), Some(9));

        let only_prs = SourceIndex::new(Vec::new(), vec![pr(4)]);
        assert_eq!(only_prs.last_id(), Some(4));
    }

    #[test]
    fn empty_index_cannot_plan() {
        let index = SourceIndex::default();

        assert!(matches!(index.plan(0), Err(MigrationError::EmptySource)));
    }
}
