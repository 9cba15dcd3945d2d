//! Merge payload construction.

use crate::context::MigrationContext;
use crate::error::MigrationError;
use crate::records::SourceIssue;

/// Start of the author line written by the transfer body.
pub const OPENED_BY_PREFIX: &str = "Opened by: ";

/// Whether a comment is tooling or platform noise rather than discussion.
#[must_use]
pub fn is_ignored_comment(body: &str, markers: &[String]) -> bool {
    markers.iter().any(|marker| body.contains(marker.as_str()))
}

/// Renders the text appended to a destination body: the description block
/// followed by one block per kept comment, in posting order.
///
/// # Errors
///
/// Returns [`MigrationError::Template`] if a format fails to render.
pub fn build_payload(
    ctx: &MigrationContext<'_>,
    issue: &SourceIssue,
) -> Result<String, MigrationError> {
    let templates = ctx.templates();
    let markers = &ctx.settings.migration.ignored_comment_markers;

    let mut payload = ctx
        .renderer
        .render_description(&templates.description_format, &issue.description)?;

    for comment in issue
        .comments
        .iter()
        .filter(|comment| !is_ignored_comment(&comment.body, markers))
    {
        let profile_url = ctx.profile_url(&comment.author)?;
        payload.push_str(&ctx.renderer.render_comment(
            &templates.comment_format,
            comment,
            &profile_url,
        )?);
    }

    Ok(payload)
}

/// Turns the first plain `Opened by: <user>` line into a profile link.
///
/// Lines that are already links are left untouched, as is everything else in
/// the body.
///
/// # Errors
///
/// Returns [`MigrationError::Template`] if a format fails to render.
pub fn link_opened_by(ctx: &MigrationContext<'_>, body: &str) -> Result<String, MigrationError> {
    let mut linked = false;
    let mut lines = Vec::new();

    for line in body.split('\n') {
        let author = line
            .strip_prefix(OPENED_BY_PREFIX)
            .map(str::trim)
            .filter(|author| !author.is_empty() && !author.starts_with('['));

        match author {
            Some(author) if !linked => {
                let profile_url = ctx.profile_url(author)?;
                lines.push(ctx.renderer.render_opened_by(
                    &ctx.templates().opened_by_format,
                    author,
                    &profile_url,
                )?);
                linked = true;
            }
            _ => lines.push(line.to_string()),
        }
    }

    Ok(lines.join("\n"))
}
