//! Source close-out.
//!
//! Leaves a pointer to the new location on every open source issue and
//! closes it with the `MIGRATED` close status. The generic close call cannot
//! set a custom close status, so the status endpoint is used directly.

use crate::context::MigrationContext;
use crate::error::MigrationError;
use crate::forges::{SourceTracker, StatusFilter, StatusTransition};
use crate::progress::ProgressEvent;
use crate::summary::RunSummary;
use tracing::{debug, info, info_span, Instrument};

/// Comments on and closes every open source issue.
///
/// Issues that are already closed, or already carry the `MIGRATED` close
/// status, are skipped, so a second invocation posts nothing.
///
/// # Errors
///
/// Stops at the first failed call.
pub async fn close_out(
    source: &dyn SourceTracker,
    ctx: &MigrationContext<'_>,
    summary: &mut RunSummary,
) -> Result<(), MigrationError> {
    let span = info_span!("close_out", project = %ctx.project.full_name());

    async {
        let issues = source.list_issues(StatusFilter::Open).await?;
        info!(count = issues.len(), "Found open source issues");

        let templates = ctx.templates();
        let destination = &ctx.settings.destination;
        let transition = StatusTransition::migrated();

        for issue in &issues {
            if !issue.is_open() || issue.is_migrated() {
                debug!(id = issue.id, "Already closed, skipping");
                summary.close_outs_skipped += 1;
                continue;
            }

            let url = ctx.renderer.render_destination_url(
                &templates.destination_issue_url_format,
                &destination.owner,
                &destination.repo,
                issue.id,
            )?;
            let notice = ctx.renderer.render_close_out_notice(
                &templates.close_out_notice_format,
                &url,
                issue.id,
            )?;

            source.comment(issue.id, &notice).await?;
            source.set_status(issue.id, &transition).await?;

            ctx.report(ProgressEvent::ClosedOnSource { id: issue.id })?;
            summary.closed_on_source += 1;

            if ctx.settings.migration.pause_after_close_out {
                ctx.pacer.pause().await;
            }
        }

        Ok(())
    }
    .instrument(span)
    .await
}
