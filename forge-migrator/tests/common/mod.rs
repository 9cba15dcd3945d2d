//! In-memory forges and a ready-made stage context for integration tests.

#![allow(dead_code)]

use async_trait::async_trait;
use forge_migrator::config::MigrationSettings;
use forge_migrator::context::MigrationContext;
use forge_migrator::export;
use forge_migrator::forges::{
    DestinationError, DestinationIssue, DestinationState, DestinationTracker, SourceError,
    SourceTracker, StatusFilter, StatusTransition,
};
use forge_migrator::progress::RecordingProgress;
use forge_migrator::rate_limit::Pacer;
use forge_migrator::records::{
    PullRequestStatus, SourceIssue, SourceProject, SourcePullRequest, SourceStatus,
};
use forge_migrator::templates::TemplateRenderer;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

pub fn fixtures_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

/// Counts pauses instead of sleeping.
#[derive(Debug, Default)]
pub struct CountingPacer {
    pauses: AtomicUsize,
}

impl CountingPacer {
    pub fn count(&self) -> usize {
        self.pauses.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Pacer for CountingPacer {
    async fn pause(&self) {
        self.pauses.fetch_add(1, Ordering::SeqCst);
    }
}

#[derive(Debug, Default)]
struct Ledger {
    issues: Vec<DestinationIssue>,
    skew: u64,
    lookup_skew: u64,
    add_labels_calls: usize,
    set_body_calls: usize,
}

/// Numbers issues the way GitHub does: one after another.
#[derive(Debug, Default)]
pub struct FakeDestination {
    state: Mutex<Ledger>,
}

impl FakeDestination {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts with `count` existing open issues numbered `1..=count`.
    pub fn with_existing(count: u64) -> Self {
        let destination = Self::new();
        {
            let mut state = destination.state.lock().unwrap();
            for id in 1..=count {
                state.issues.push(open_issue(id, "existing", ""));
            }
        }
        destination
    }

    /// Starts with the given issues already present.
    pub fn seeded(issues: Vec<DestinationIssue>) -> Self {
        let destination = Self::new();
        destination.state.lock().unwrap().issues = issues;
        destination
    }

    /// Makes every following number `skew` higher than expected, as if
    /// someone else created issues concurrently.
    pub fn skew_numbers_by(self, skew: u64) -> Self {
        self.state.lock().unwrap().skew = skew;
        self
    }

    /// Makes lookups report a number `skew` higher than the one requested.
    pub fn misnumber_lookups_by(self, skew: u64) -> Self {
        self.state.lock().unwrap().lookup_skew = skew;
        self
    }

    pub fn issues(&self) -> Vec<DestinationIssue> {
        self.state.lock().unwrap().issues.clone()
    }

    pub fn issue(&self, id: u64) -> DestinationIssue {
        self.issues()
            .into_iter()
            .find(|issue| issue.id == id)
            .unwrap_or_else(|| panic!("no destination issue #{id}"))
    }

    pub fn add_labels_calls(&self) -> usize {
        self.state.lock().unwrap().add_labels_calls
    }

    pub fn set_body_calls(&self) -> usize {
        self.state.lock().unwrap().set_body_calls
    }
}

pub fn open_issue(id: u64, title: &str, body: &str) -> DestinationIssue {
    DestinationIssue {
        id,
        title: title.to_string(),
        body: body.to_string(),
        state: DestinationState::Open,
        labels: Vec::new(),
    }
}

#[async_trait]
impl DestinationTracker for FakeDestination {
    async fn create_issue(
        &self,
        title: &str,
        body: &str,
    ) -> Result<DestinationIssue, DestinationError> {
        let mut state = self.state.lock().unwrap();
        let last = state.issues.iter().map(|issue| issue.id).max().unwrap_or(0);
        let issue = open_issue(last + 1 + state.skew, title, body);
        state.issues.push(issue.clone());
        Ok(issue)
    }

    async fn get_issue(&self, id: u64) -> Result<DestinationIssue, DestinationError> {
        let state = self.state.lock().unwrap();
        let mut issue = state
            .issues
            .iter()
            .find(|issue| issue.id == id)
            .cloned()
            .ok_or(DestinationError::NotFound { id })?;
        issue.id += state.lookup_skew;
        Ok(issue)
    }

    async fn close_issue(&self, id: u64) -> Result<(), DestinationError> {
        let mut state = self.state.lock().unwrap();
        let issue = state
            .issues
            .iter_mut()
            .find(|issue| issue.id == id)
            .ok_or(DestinationError::NotFound { id })?;
        issue.state = DestinationState::Closed;
        Ok(())
    }

    async fn add_labels(&self, id: u64, labels: &[String]) -> Result<(), DestinationError> {
        let mut state = self.state.lock().unwrap();
        state.add_labels_calls += 1;
        let issue = state
            .issues
            .iter_mut()
            .find(|issue| issue.id == id)
            .ok_or(DestinationError::NotFound { id })?;
        for label in labels {
            if !issue.labels.contains(label) {
                issue.labels.push(label.clone());
            }
        }
        Ok(())
    }

    async fn set_body(&self, id: u64, body: &str) -> Result<(), DestinationError> {
        let mut state = self.state.lock().unwrap();
        state.set_body_calls += 1;
        let issue = state
            .issues
            .iter_mut()
            .find(|issue| issue.id == id)
            .ok_or(DestinationError::NotFound { id })?;
        issue.body = body.to_string();
        Ok(())
    }
}

/// A source project whose issues close-out can mutate.
#[derive(Debug, Default)]
pub struct FakeSource {
    issues: Mutex<Vec<SourceIssue>>,
    pull_requests: Vec<SourcePullRequest>,
    comments: Mutex<Vec<(u64, String)>>,
}

impl FakeSource {
    pub fn new(issues: Vec<SourceIssue>) -> Self {
        Self {
            issues: Mutex::new(issues),
            pull_requests: Vec::new(),
            comments: Mutex::new(Vec::new()),
        }
    }

    pub fn with_pull_requests(mut self, pull_requests: Vec<SourcePullRequest>) -> Self {
        self.pull_requests = pull_requests;
        self
    }

    pub fn comments(&self) -> Vec<(u64, String)> {
        self.comments.lock().unwrap().clone()
    }

    pub fn issue(&self, id: u64) -> SourceIssue {
        self.issues
            .lock()
            .unwrap()
            .iter()
            .find(|issue| issue.id == id)
            .cloned()
            .unwrap_or_else(|| panic!("no source issue #{id}"))
    }
}

#[async_trait]
impl SourceTracker for FakeSource {
    async fn list_issues(&self, filter: StatusFilter) -> Result<Vec<SourceIssue>, SourceError> {
        let issues = self.issues.lock().unwrap();
        Ok(issues
            .iter()
            .filter(|issue| match filter {
                StatusFilter::Open => issue.status == SourceStatus::Open,
                StatusFilter::Closed => issue.status == SourceStatus::Closed,
                StatusFilter::All => true,
            })
            .cloned()
            .collect())
    }

    async fn list_pull_requests(&self) -> Result<Vec<SourcePullRequest>, SourceError> {
        Ok(self.pull_requests.clone())
    }

    async fn comment(&self, issue_id: u64, body: &str) -> Result<(), SourceError> {
        self.comments
            .lock()
            .unwrap()
            .push((issue_id, body.to_string()));
        Ok(())
    }

    async fn set_status(
        &self,
        issue_id: u64,
        transition: &StatusTransition,
    ) -> Result<(), SourceError> {
        let mut issues = self.issues.lock().unwrap();
        if let Some(issue) = issues.iter_mut().find(|issue| issue.id == issue_id) {
            issue.status = if transition.status == "Closed" {
                SourceStatus::Closed
            } else {
                SourceStatus::Open
            };
            issue.close_status = transition.close_status.clone();
        }
        Ok(())
    }
}

/// Settings, renderer, pacer and progress sink for one test.
pub struct Harness {
    pub settings: MigrationSettings,
    pub project: SourceProject,
    pub renderer: TemplateRenderer,
    pub pacer: CountingPacer,
    pub progress: RecordingProgress,
}

impl Harness {
    pub fn new() -> Self {
        let settings = MigrationSettings::load(&fixtures_root().join("migration.toml")).unwrap();
        let project = settings.source_project().unwrap();
        Self {
            settings,
            project,
            renderer: TemplateRenderer::new(),
            pacer: CountingPacer::default(),
            progress: RecordingProgress::new(),
        }
    }

    pub fn ctx(&self) -> MigrationContext<'_> {
        MigrationContext {
            settings: &self.settings,
            project: &self.project,
            renderer: &self.renderer,
            pacer: &self.pacer,
            progress: &self.progress,
        }
    }

    pub fn fixture_issues(&self) -> Vec<SourceIssue> {
        export::load_issues(&fixtures_root().join("issues.json"), &self.project).unwrap()
    }

    pub fn fixture_pull_requests(&self) -> Vec<SourcePullRequest> {
        export::load_pull_requests(&fixtures_root().join("requests.json"), &self.project)
            .unwrap()
    }

    /// A bare open issue with no labels, description or comments.
    pub fn issue(&self, id: u64, title: &str) -> SourceIssue {
        SourceIssue {
            id,
            title: title.to_string(),
            author: "alice".to_string(),
            created: chrono::DateTime::from_timestamp(1_600_000_000, 0).unwrap(),
            status: SourceStatus::Open,
            close_status: None,
            description: String::new(),
            labels: Vec::new(),
            comments: Vec::new(),
            url: self.project.issue_url(id),
        }
    }

    pub fn pull_request(&self, id: u64, title: &str) -> SourcePullRequest {
        SourcePullRequest {
            id,
            title: title.to_string(),
            author: "dave".to_string(),
            created: chrono::DateTime::from_timestamp(1_600_000_000, 0).unwrap(),
            status: PullRequestStatus::Merged,
            description: String::new(),
            url: self.project.pull_request_url(id),
        }
    }
}
