//! Description and comment merge.
//!
//! Transferred issues only carry a short header. This stage appends the
//! source description and discussion to every destination issue at or above
//! `first-migrated-issue`. The rendered payload is compared against the
//! current body first, so rerunning the stage never duplicates content.

mod payload;

pub use payload::{build_payload, is_ignored_comment, link_opened_by, OPENED_BY_PREFIX};

use crate::context::MigrationContext;
use crate::error::{ensure_aligned, MigrationError};
use crate::forges::DestinationTracker;
use crate::progress::ProgressEvent;
use crate::records::SourceIssue;
use crate::summary::RunSummary;
use tracing::{debug, info, info_span, Instrument};

/// Appends each eligible issue's description and comments to its
/// destination body, once.
///
/// # Errors
///
/// Stops at the first failed call or [`MigrationError::Desync`].
pub async fn merge_content(
    destination: &dyn DestinationTracker,
    ctx: &MigrationContext<'_>,
    issues: &[SourceIssue],
    summary: &mut RunSummary,
) -> Result<(), MigrationError> {
    let threshold = ctx.settings.migration.first_migrated_issue;
    let span = info_span!("merge_content", threshold);

    async {
        for issue in issues.iter().filter(|issue| issue.id >= threshold) {
            let payload = build_payload(ctx, issue)?;

            let current = destination.get_issue(issue.id).await?;
            ensure_aligned(issue.id, current.id)?;

            if current.body.contains(&payload) {
                debug!(id = issue.id, "Content already merged, skipping");
                summary.merges_skipped += 1;
                continue;
            }

            let mut body = link_opened_by(ctx, &current.body)?;
            body.push_str(&payload);
            destination.set_body(issue.id, &body).await?;

            ctx.report(ProgressEvent::Merged { id: issue.id })?;
            summary.merged += 1;
            ctx.pacer.pause().await;
        }

        info!(
            merged = summary.merged,
            skipped = summary.merges_skipped,
            "Content merge complete"
        );
        Ok(())
    }
    .instrument(span)
    .await
}
