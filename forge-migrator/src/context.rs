//! Shared collaborators handed to every stage.

use crate::config::{MigrationSettings, TemplateFormats};
use crate::error::MigrationError;
use crate::progress::{ProgressEvent, ProgressSink};
use crate::rate_limit::Pacer;
use crate::records::SourceProject;
use crate::templates::TemplateRenderer;
use tracing::info;

/// Settings and injected services for one run.
pub struct MigrationContext<'a> {
    pub settings: &'a MigrationSettings,
    pub project: &'a SourceProject,
    pub renderer: &'a TemplateRenderer,
    pub pacer: &'a dyn Pacer,
    pub progress: &'a dyn ProgressSink,
}

impl MigrationContext<'_> {
    #[must_use]
    pub fn templates(&self) -> &TemplateFormats {
        &self.settings.templates
    }

    /// Reports a completed action to the progress sink and the trace.
    ///
    /// # Errors
    ///
    /// Returns [`MigrationError::Progress`] if the sink fails.
    pub fn report(&self, event: ProgressEvent) -> Result<(), MigrationError> {
        self.progress.record(&event)?;
        info!(action = event.action(), id = event.id(), "{event}");
        Ok(())
    }

    /// Profile link for a source user.
    ///
    /// # Errors
    ///
    /// Returns [`MigrationError::Template`] if the format fails to render.
    pub fn profile_url(&self, user: &str) -> Result<String, MigrationError> {
        Ok(self
            .renderer
            .render_profile_url(&self.templates().profile_url_format, self.project, user)?)
    }
}
