//! Runner error types.

/// Errors that can occur while running a migration mode.
#[derive(Debug, thiserror::Error)]
pub enum RunnerError {
    /// Settings loading errors.
    #[error(transparent)]
    Config(#[from] crate::config::ConfigError),

    /// Export reading or writing errors.
    #[error(transparent)]
    Export(#[from] crate::export::ExportError),

    /// A stage stopped.
    #[error(transparent)]
    Migration(#[from] crate::error::MigrationError),

    /// Source client initialization or listing errors.
    #[error(transparent)]
    Source(#[from] crate::forges::SourceError),

    /// Destination client initialization errors.
    #[error(transparent)]
    Destination(#[from] crate::forges::DestinationError),

    /// The mode needs a credential that was not provided.
    #[error("Missing credential: set {name}")]
    MissingToken { name: &'static str },
}
