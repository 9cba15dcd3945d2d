//! Run summary types.

/// Counters for a complete run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Destination issues created from source records.
    pub created: usize,

    /// Destination issues created to fill identifier gaps.
    pub placeholders: usize,

    /// Transferred issues closed right after creation.
    pub closed_on_destination: usize,

    /// Destination issues that received labels.
    pub labeled: usize,

    /// Destination issues skipped because they were already labeled.
    pub labels_skipped: usize,

    /// Destination bodies extended with description and comments.
    pub merged: usize,

    /// Destination bodies skipped because they already held the content.
    pub merges_skipped: usize,

    /// Source issues commented on and closed as migrated.
    pub closed_on_source: usize,

    /// Source issues skipped during close-out.
    pub close_outs_skipped: usize,

    /// Issues written to an export.
    pub exported_issues: usize,

    /// Pull requests written to an export.
    pub exported_requests: usize,

    /// Identifiers a dry-run transfer would consume.
    pub planned: usize,

    /// Whether this was a dry run.
    pub dry_run: bool,
}

impl RunSummary {
    /// Creates a new empty summary.
    #[must_use]
    pub fn new(dry_run: bool) -> Self {
        Self {
            dry_run,
            ..Default::default()
        }
    }

    /// Destination issues created, placeholders included.
    #[must_use]
    pub fn issues_created(&self) -> usize {
        self.created + self.placeholders
    }

    /// Number of remote mutations this run performed.
    #[must_use]
    pub fn mutations(&self) -> usize {
        self.issues_created()
            + self.closed_on_destination
            + self.labeled
            + self.merged
            + self.closed_on_source
    }
}
