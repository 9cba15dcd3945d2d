//! Migration settings deserialization and validation.

use super::{ConfigError, TemplateFormats};
use crate::records::SourceProject;
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;
use tracing::debug;

/// Everything a run needs apart from credentials.
///
/// Loaded once from a TOML file and handed to each stage explicitly.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct MigrationSettings {
    /// Project the records come from.
    pub source: SourceSettings,

    /// Repository the records are copied into.
    pub destination: DestinationSettings,

    /// Stage tuning.
    #[serde(default)]
    pub migration: StageSettings,

    /// Output formats.
    #[serde(default)]
    pub templates: TemplateFormats,
}

/// `[source]` table.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct SourceSettings {
    /// Pagure instance root (e.g. `https://pagure.io`).
    #[serde(default = "default_instance_url")]
    pub instance_url: String,

    /// Project namespace, if any.
    pub namespace: Option<String>,

    /// Project name.
    pub repo: String,
}

/// `[destination]` table.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct DestinationSettings {
    /// Owning user or organization.
    pub owner: String,

    /// Repository name.
    pub repo: String,
}

/// `[migration]` table.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct StageSettings {
    /// Last identifier already present on the destination.
    pub start_offset: u64,

    /// Lowest identifier whose content is merged into the destination body.
    pub first_migrated_issue: u64,

    /// Courtesy pause after each mutating call, in seconds.
    pub courtesy_interval_secs: u64,

    /// Whether close-out also pauses after each issue.
    pub pause_after_close_out: bool,

    /// Append-only progress log.
    pub progress_log: String,

    /// Comments containing any of these strings are left out of merged bodies.
    pub ignored_comment_markers: Vec<String>,
}

impl Default for StageSettings {
    fn default() -> Self {
        Self {
            start_offset: 0,
            first_migrated_issue: 1,
            courtesy_interval_secs: default_courtesy_interval_secs(),
            pause_after_close_out: false,
            progress_log: default_progress_log(),
            ignored_comment_markers: default_ignored_comment_markers(),
        }
    }
}

impl StageSettings {
    /// The courtesy pause as a [`Duration`].
    #[must_use]
    pub fn courtesy_interval(&self) -> Duration {
        Duration::from_secs(self.courtesy_interval_secs)
    }
}

pub(crate) fn default_instance_url() -> String {
    "https://pagure.io".to_string()
}

pub(crate) fn default_courtesy_interval_secs() -> u64 {
    120
}

pub(crate) fn default_progress_log() -> String {
    "migration-progress.log".to_string()
}

pub(crate) fn default_ignored_comment_markers() -> Vec<String> {
    vec!["migrated to".to_string(), "Metadata Update from".to_string()]
}

impl MigrationSettings {
    /// Loads and validates settings from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file is missing, unparseable, or fails
    /// validation.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        debug!(path = %path.display(), "Loading migration settings");

        if !path.exists() {
            return Err(ConfigError::MissingFile {
                path: path.display().to_string(),
            });
        }

        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::IoError {
            path: path.display().to_string(),
            source: e,
        })?;

        let settings = Self::parse(&content, path)?;
        settings.validate(path)?;
        Ok(settings)
    }

    /// Parses settings from TOML text without validating them.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::TomlError`] on malformed input.
    pub fn parse(content: &str, path: &Path) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::TomlError {
            path: path.display().to_string(),
            source: e,
        })
    }

    /// Checks values serde cannot.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ValidationError`] describing the first problem.
    pub fn validate(&self, path: &Path) -> Result<(), ConfigError> {
        let fail = |message: &str| ConfigError::ValidationError {
            path: path.display().to_string(),
            message: message.to_string(),
        };

        if self.source.repo.trim().is_empty() {
            return Err(fail("source.repo must not be empty"));
        }
        if self.destination.owner.trim().is_empty() || self.destination.repo.trim().is_empty() {
            return Err(fail("destination.owner and destination.repo must not be empty"));
        }
        if self.migration.first_migrated_issue == 0 {
            return Err(fail("migration.first-migrated-issue must be at least 1"));
        }
        if self.migration.progress_log.trim().is_empty() {
            return Err(fail("migration.progress-log must not be empty"));
        }
        if self
            .migration
            .ignored_comment_markers
            .iter()
            .any(|marker| marker.is_empty())
        {
            return Err(fail(
                "migration.ignored-comment-markers must not contain empty strings",
            ));
        }

        self.source_project().map(|_| ()).map_err(|e| match e {
            ConfigError::ValidationError { message, .. } => fail(&message),
            other => other,
        })
    }

    /// Resolves the `[source]` table into a [`SourceProject`].
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ValidationError`] if the instance URL is invalid.
    pub fn source_project(&self) -> Result<SourceProject, ConfigError> {
        SourceProject::new(
            &self.source.instance_url,
            self.source.namespace.as_deref(),
            &self.source.repo,
        )
        .map_err(|e| ConfigError::ValidationError {
            path: "[source]".to_string(),
            message: format!("invalid instance-url '{}': {e}", self.source.instance_url),
        })
    }
}
