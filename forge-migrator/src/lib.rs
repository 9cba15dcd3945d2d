#![doc = include_str!(concat!("../", env!("CARGO_PKG_README")))]

pub mod close_out;
pub mod config;
pub mod context;
pub mod error;
pub mod export;
pub mod forges;
pub mod labels;
pub mod merge;
pub mod progress;
pub mod rate_limit;
pub mod records;
pub mod runner;
pub mod summary;
pub mod templates;
pub mod transfer;

pub use close_out::close_out;
pub use config::{load_settings, ConfigError, MigrationSettings, TemplateFormats};
pub use context::MigrationContext;
pub use error::MigrationError;
pub use export::ExportError;
pub use forges::{
    DestinationError, DestinationIssue, DestinationTracker, GithubDestination, PagureSource,
    SourceError, SourceTracker,
};
pub use labels::backfill_labels;
pub use merge::merge_content;
pub use progress::{FileProgressLog, ProgressEvent, ProgressSink};
pub use rate_limit::{
    check_core_rate_limit, ensure_core_rate_limit, wait_if_needed, FixedIntervalPacer, Pacer,
    RateLimitInfo,
};
pub use records::{SourceIssue, SourceProject, SourcePullRequest, SourceRecord};
pub use runner::{RunMode, Runner, RunnerConfig, RunnerError, TransferInput};
pub use summary::RunSummary;
pub use templates::{create_handlebars_registry, TemplateError, TemplateRenderer};
pub use transfer::{transfer, SourceIndex};
