//! Configuration loading.
//!
//! A run is described by one TOML file (`migration.toml` by default):
//! ```text
//! [source]
//! instance-url = "https://pagure.io"
//! namespace = "copr"
//! repo = "copr"
//!
//! [destination]
//! owner = "fedora-copr"
//! repo = "copr"
//!
//! [migration]
//! start-offset = 30
//! first-migrated-issue = 31
//! ```
//! Credentials are never read from this file.

mod error;
mod settings;
mod templates;

pub use error::ConfigError;
pub use settings::{DestinationSettings, MigrationSettings, SourceSettings, StageSettings};
pub use templates::{
    default_comment_format, default_description_format, default_transfer_body_format,
    TemplateFormats,
};

use std::path::Path;
use tracing::info;

/// Loads the settings for a run, logging where they came from.
///
/// # Errors
///
/// Returns [`ConfigError`] if the file is missing, malformed or invalid.
pub fn load_settings(path: &Path) -> Result<MigrationSettings, ConfigError> {
    let settings = MigrationSettings::load(path)?;
    info!(
        path = %path.display(),
        source = %settings.source.repo,
        destination = %format!("{}/{}", settings.destination.owner, settings.destination.repo),
        "Loaded migration settings"
    );
    Ok(settings)
}
