//! Orchestrates the operator-facing run modes.

mod config;
mod error;

pub use config::RunnerConfig;
pub use error::RunnerError;

use crate::close_out::close_out;
use crate::config::{load_settings, MigrationSettings};
use crate::context::MigrationContext;
use crate::export::{self, ExportError};
use crate::forges::{GithubDestination, PagureSource, StatusFilter};
use crate::labels::backfill_labels;
use crate::merge::merge_content;
use crate::progress::FileProgressLog;
use crate::rate_limit::FixedIntervalPacer;
use crate::records::SourceProject;
use crate::summary::RunSummary;
use crate::templates::{transfer_title, TemplateRenderer};
use crate::transfer::{transfer, Plan, Slot, SourceIndex};
use std::path::{Path, PathBuf};
use tracing::info;

/// What a single invocation does.
#[derive(Debug, Clone)]
pub enum RunMode {
    /// Snapshot every source issue and pull request into `output_dir`.
    Export { output_dir: PathBuf },

    /// Create destination issues for every id after the start offset.
    Transfer {
        input: TransferInput,
        /// Only print which record (or placeholder) each id would get.
        dry_run: bool,
    },

    /// Copy source labels onto destination issues.
    Labels { issues: PathBuf },

    /// Append descriptions and comments to destination bodies.
    Merge { issues: PathBuf },

    /// Comment on and close every open source issue.
    CloseOut,
}

/// Where a transfer reads its records from.
#[derive(Debug, Clone)]
pub enum TransferInput {
    /// Snapshot files written by [`RunMode::Export`].
    Export { issues: PathBuf, requests: PathBuf },

    /// The source project's current listings.
    Live,
}

impl RunMode {
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Export { .. } => "export",
            Self::Transfer { .. } => "transfer",
            Self::Labels { .. } => "labels",
            Self::Merge { .. } => "merge",
            Self::CloseOut => "close-out",
        }
    }
}

/// Loads settings once and runs any mode against them.
pub struct Runner {
    config: RunnerConfig,
    settings: MigrationSettings,
    project: SourceProject,
    renderer: TemplateRenderer,
}

impl Runner {
    /// Builds a runner, loading settings and applying command-line overrides.
    ///
    /// # Errors
    ///
    /// Returns [`RunnerError::Config`] if the settings are missing or invalid.
    pub fn new(config: RunnerConfig) -> Result<Self, RunnerError> {
        let mut settings = load_settings(config.settings_path())?;
        if let Some(start_offset) = config.start_offset() {
            settings.migration.start_offset = start_offset;
        }
        if let Some(first_migrated_issue) = config.first_migrated_issue() {
            settings.migration.first_migrated_issue = first_migrated_issue;
        }
        settings.validate(config.settings_path())?;

        let project = settings.source_project()?;
        Ok(Self {
            config,
            settings,
            project,
            renderer: TemplateRenderer::new(),
        })
    }

    #[must_use]
    pub fn settings(&self) -> &MigrationSettings {
        &self.settings
    }

    /// Executes one mode to completion.
    ///
    /// # Errors
    ///
    /// Returns the first error; nothing after it is attempted.
    pub async fn run(&self, mode: &RunMode) -> Result<RunSummary, RunnerError> {
        info!(mode = mode.name(), "Starting run");
        match mode {
            RunMode::Export { output_dir } => self.export(output_dir).await,
            RunMode::Transfer {
                input,
                dry_run: true,
            } => self.plan_transfer(input).await,
            RunMode::Transfer { input, .. } => self.transfer(input).await,
            RunMode::Labels { issues } => self.labels(issues).await,
            RunMode::Merge { issues } => self.merge(issues).await,
            RunMode::CloseOut => self.close_out().await,
        }
    }

    async fn export(&self, output_dir: &Path) -> Result<RunSummary, RunnerError> {
        let mut summary = RunSummary::new(false);
        let source = PagureSource::new(self.config.pagure_token(), self.project.clone())?;

        std::fs::create_dir_all(output_dir).map_err(|e| ExportError::IoError {
            path: output_dir.display().to_string(),
            source: e,
        })?;

        let issues = source.raw_issues(StatusFilter::All).await?;
        summary.exported_issues = issues.len();
        export::write_issues(&output_dir.join(export::ISSUES_FILE), issues)?;

        let requests = source.raw_pull_requests().await?;
        summary.exported_requests = requests.len();
        export::write_pull_requests(&output_dir.join(export::REQUESTS_FILE), requests)?;

        info!(
            issues = summary.exported_issues,
            requests = summary.exported_requests,
            dir = %output_dir.display(),
            "Export written"
        );
        Ok(summary)
    }

    async fn load_index(&self, input: &TransferInput) -> Result<SourceIndex, RunnerError> {
        match input {
            TransferInput::Export { issues, requests } => {
                let issues = export::load_issues(issues, &self.project)?;
                let requests = export::load_pull_requests(requests, &self.project)?;
                Ok(SourceIndex::new(issues, requests))
            }
            TransferInput::Live => {
                let source = PagureSource::new(self.config.pagure_token(), self.project.clone())?;
                let index = SourceIndex::fetch(&source).await?;
                info!(project = %self.project.full_name(), "Indexed live source records");
                Ok(index)
            }
        }
    }

    async fn plan_transfer(&self, input: &TransferInput) -> Result<RunSummary, RunnerError> {
        let mut summary = RunSummary::new(true);
        let index = self.load_index(input).await?;
        let start = self.settings.migration.start_offset;
        let plan = index.plan(start)?;
        summary.planned = usize::try_from(plan.remaining()).unwrap_or(usize::MAX);

        print_transfer_preview(start, plan, &self.settings.templates.pull_request_title_prefix);
        Ok(summary)
    }

    async fn transfer(&self, input: &TransferInput) -> Result<RunSummary, RunnerError> {
        let mut summary = RunSummary::new(false);
        let index = self.load_index(input).await?;
        let destination = self.destination()?;
        let (pacer, progress) = self.services();
        let ctx = self.context(&pacer, &progress);

        transfer(
            &destination,
            &ctx,
            &index,
            self.settings.migration.start_offset,
            &mut summary,
        )
        .await?;
        Ok(summary)
    }

    async fn labels(&self, issues: &Path) -> Result<RunSummary, RunnerError> {
        let mut summary = RunSummary::new(false);
        let issues = export::load_issues(issues, &self.project)?;
        let destination = self.destination()?;
        let (pacer, progress) = self.services();
        let ctx = self.context(&pacer, &progress);

        backfill_labels(&destination, &ctx, &issues, &mut summary).await?;
        Ok(summary)
    }

    async fn merge(&self, issues: &Path) -> Result<RunSummary, RunnerError> {
        let mut summary = RunSummary::new(false);
        let issues = export::load_issues(issues, &self.project)?;
        let destination = self.destination()?;
        let (pacer, progress) = self.services();
        let ctx = self.context(&pacer, &progress);

        merge_content(&destination, &ctx, &issues, &mut summary).await?;
        Ok(summary)
    }

    async fn close_out(&self) -> Result<RunSummary, RunnerError> {
        let mut summary = RunSummary::new(false);
        let token = self
            .config
            .pagure_token()
            .ok_or(RunnerError::MissingToken {
                name: "PAGURE_TOKEN",
            })?;
        let source = PagureSource::new(Some(token), self.project.clone())?;
        let (pacer, progress) = self.services();
        let ctx = self.context(&pacer, &progress);

        close_out(&source, &ctx, &mut summary).await?;
        Ok(summary)
    }

    fn destination(&self) -> Result<GithubDestination, RunnerError> {
        let token = self
            .config
            .github_token()
            .ok_or(RunnerError::MissingToken {
                name: "GITHUB_TOKEN",
            })?;
        let destination = &self.settings.destination;
        Ok(GithubDestination::new(
            token,
            &destination.owner,
            &destination.repo,
        )?)
    }

    fn services(&self) -> (FixedIntervalPacer, FileProgressLog) {
        let migration = &self.settings.migration;
        (
            FixedIntervalPacer::new(migration.courtesy_interval()),
            FileProgressLog::new(&migration.progress_log),
        )
    }

    fn context<'a>(
        &'a self,
        pacer: &'a FixedIntervalPacer,
        progress: &'a FileProgressLog,
    ) -> MigrationContext<'a> {
        MigrationContext {
            settings: &self.settings,
            project: &self.project,
            renderer: &self.renderer,
            pacer,
            progress,
        }
    }
}

fn print_transfer_preview(start: u64, plan: Plan<'_>, pr_prefix: &str) {
    println!("\n[DRY RUN] Transfer after #{start}");
    println!("  Would create {} destination issues:\n", plan.remaining());

    for (id, slot) in plan {
        println!("  {}", preview_line(id, &slot, pr_prefix));
    }

    println!();
}

fn preview_line(id: u64, slot: &Slot<'_>, pr_prefix: &str) -> String {
    let record = match slot {
        Slot::Record(record) => record,
        Slot::Gap => return format!("#{id} placeholder"),
    };

    let title = transfer_title(record, pr_prefix);
    let kind = record.kind().as_str();
    if record.closes_on_transfer() {
        format!("#{id} {kind}: {title} (closed)")
    } else {
        format!("#{id} {kind}: {title}")
    }
}
