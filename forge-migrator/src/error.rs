//! Stage error types.

use crate::forges::{DestinationError, SourceError};
use crate::progress::ProgressError;
use crate::templates::TemplateError;
use thiserror::Error;

/// Errors that stop a migration stage.
#[derive(Debug, Error)]
pub enum MigrationError {
    /// The destination numbered an issue differently than its source.
    ///
    /// Every later identifier would be off as well, so the run stops here and
    /// the destination needs manual inspection before any rerun.
    #[error("Destination issue #{actual} was expected to be #{expected}; identifier sequence is out of sync")]
    Desync { expected: u64, actual: u64 },

    /// There are no source identifiers to transfer.
    #[error("Source has no issues or pull requests")]
    EmptySource,

    /// Source forge call failed.
    #[error(transparent)]
    Source(#[from] SourceError),

    /// Destination forge call failed.
    #[error(transparent)]
    Destination(#[from] DestinationError),

    /// A configured format failed to render.
    #[error(transparent)]
    Template(#[from] TemplateError),

    /// The progress log could not be written.
    #[error(transparent)]
    Progress(#[from] ProgressError),
}

/// Fails with [`MigrationError::Desync`] unless both identifiers match.
pub(crate) fn ensure_aligned(expected: u64, actual: u64) -> Result<(), MigrationError> {
    if expected == actual {
        Ok(())
    } else {
        Err(MigrationError::Desync { expected, actual })
    }
}
