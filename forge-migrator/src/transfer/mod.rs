//! Sequential, identifier-preserving transfer.
//!
//! The destination assigns issue numbers itself, one after another. To keep
//! `source #k == destination #k`, every identifier in `(start, last]` is
//! consumed in ascending order: by the issue with that id, else by the pull
//! request with that id, else by a placeholder.
//!
//! A transfer is not safe to rerun from the same offset; it would create
//! every issue a second time. Resume from the last id in the progress log.

mod slot;

pub use slot::{Plan, SourceIndex, Slot};

use crate::context::MigrationContext;
use crate::error::{ensure_aligned, MigrationError};
use crate::forges::DestinationTracker;
use crate::progress::ProgressEvent;
use crate::records::SourceRecord;
use crate::summary::RunSummary;
use crate::templates::transfer_title;
use tracing::{debug, info, info_span, warn, Instrument};

/// Creates one destination issue per identifier after `start`.
///
/// # Errors
///
/// Stops at the first failed call or [`MigrationError::Desync`]; nothing after
/// the failing identifier is touched.
pub async fn transfer(
    destination: &dyn DestinationTracker,
    ctx: &MigrationContext<'_>,
    index: &SourceIndex,
    start: u64,
    summary: &mut RunSummary,
) -> Result<(), MigrationError> {
    let plan = index.plan(start)?;
    let span = info_span!("transfer", start, count = plan.remaining());

    async {
        for id in index.shadowed_pull_requests() {
            if id > start {
                warn!(id, "Issue and pull request share an id; only the issue is transferred");
            }
        }

        if plan.remaining() == 0 {
            warn!("Start offset is at or past the last source id, nothing to transfer");
            return Ok(());
        }

        info!("Starting transfer");
        for (id, slot) in plan {
            match slot {
                Slot::Record(record) => {
                    transfer_record(destination, ctx, id, &record, summary).await?;
                }
                Slot::Gap => create_placeholder(destination, ctx, id, summary).await?,
            }
            ctx.pacer.pause().await;
        }

        info!(
            created = summary.created,
            placeholders = summary.placeholders,
            "Transfer complete"
        );
        Ok(())
    }
    .instrument(span)
    .await
}

async fn transfer_record(
    destination: &dyn DestinationTracker,
    ctx: &MigrationContext<'_>,
    id: u64,
    record: &SourceRecord<'_>,
    summary: &mut RunSummary,
) -> Result<(), MigrationError> {
    let templates = ctx.templates();
    let title = transfer_title(record, &templates.pull_request_title_prefix);
    let body = ctx
        .renderer
        .render_transfer_body(&templates.transfer_body_format, record)?;

    let created = destination.create_issue(&title, &body).await?;
    ensure_aligned(id, created.id)?;

    if record.closes_on_transfer() {
        destination.close_issue(created.id).await?;
        summary.closed_on_destination += 1;
        debug!(id, "Closed destination copy");
    }

    ctx.report(ProgressEvent::Created {
        id,
        kind: record.kind(),
    })?;
    summary.created += 1;
    Ok(())
}

async fn create_placeholder(
    destination: &dyn DestinationTracker,
    ctx: &MigrationContext<'_>,
    id: u64,
    summary: &mut RunSummary,
) -> Result<(), MigrationError> {
    let templates = ctx.templates();
    let created = destination
        .create_issue(&templates.placeholder_title, &templates.placeholder_body)
        .await?;
    ensure_aligned(id, created.id)?;

    ctx.report(ProgressEvent::Placeholder { id })?;
    summary.placeholders += 1;
    Ok(())
}
