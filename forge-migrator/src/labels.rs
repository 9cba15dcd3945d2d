//! Label back-fill.
//!
//! Copies each source issue's labels onto its destination copy. An issue
//! that already carries labels on the destination is left alone, so the
//! stage can be rerun after a crash.

use crate::context::MigrationContext;
use crate::error::MigrationError;
use crate::forges::DestinationTracker;
use crate::progress::ProgressEvent;
use crate::records::SourceIssue;
use crate::summary::RunSummary;
use tracing::{debug, info, info_span, Instrument};

/// Order in which issues are back-filled: already migrated issues first,
/// then the rest, each group by ascending id.
#[must_use]
pub fn backfill_order(issues: &[SourceIssue]) -> Vec<&SourceIssue> {
    let (mut migrated, mut pending): (Vec<&SourceIssue>, Vec<&SourceIssue>) =
        issues.iter().partition(|issue| issue.is_migrated());
    migrated.sort_by_key(|issue| issue.id);
    pending.sort_by_key(|issue| issue.id);
    migrated.extend(pending);
    migrated
}

/// Adds every source issue's labels to the matching destination issue once.
///
/// # Errors
///
/// Stops at the first failed call.
pub async fn backfill_labels(
    destination: &dyn DestinationTracker,
    ctx: &MigrationContext<'_>,
    issues: &[SourceIssue],
    summary: &mut RunSummary,
) -> Result<(), MigrationError> {
    let span = info_span!("backfill_labels", issues = issues.len());

    async {
        for issue in backfill_order(issues) {
            if issue.labels.is_empty() {
                continue;
            }

            let current = destination.get_issue(issue.id).await?;
            if !current.labels.is_empty() {
                debug!(id = issue.id, "Destination already labeled, skipping");
                summary.labels_skipped += 1;
                continue;
            }

            destination.add_labels(issue.id, &issue.labels).await?;
            ctx.report(ProgressEvent::Labeled {
                id: issue.id,
                labels: issue.labels.clone(),
            })?;
            summary.labeled += 1;
            ctx.pacer.pause().await;
        }

        info!(
            labeled = summary.labeled,
            skipped = summary.labels_skipped,
            "Label back-fill complete"
        );
        Ok(())
    }
    .instrument(span)
    .await
}
