//! Runner configuration.

use std::path::{Path, PathBuf};

/// Per-invocation inputs that do not belong in the settings file.
#[derive(Debug, Clone)]
pub struct RunnerConfig {
    /// Path to the TOML settings file.
    settings_path: PathBuf,
    /// GitHub token for the destination.
    github_token: Option<String>,
    /// Pagure token for the source.
    pagure_token: Option<String>,
    /// Overrides `migration.start-offset`.
    start_offset: Option<u64>,
    /// Overrides `migration.first-migrated-issue`.
    first_migrated_issue: Option<u64>,
}

impl RunnerConfig {
    /// Creates a new configuration for a run.
    pub fn new(settings_path: PathBuf) -> Self {
        Self {
            settings_path,
            github_token: None,
            pagure_token: None,
            start_offset: None,
            first_migrated_issue: None,
        }
    }

    /// Sets the destination token.
    pub fn with_github_token(mut self, token: Option<String>) -> Self {
        self.github_token = token.filter(|token| !token.trim().is_empty());
        self
    }

    /// Sets the source token.
    pub fn with_pagure_token(mut self, token: Option<String>) -> Self {
        self.pagure_token = token.filter(|token| !token.trim().is_empty());
        self
    }

    /// Overrides the transfer start offset.
    pub fn with_start_offset(mut self, start_offset: Option<u64>) -> Self {
        self.start_offset = start_offset;
        self
    }

    /// Overrides the content merge threshold.
    pub fn with_first_migrated_issue(mut self, first_migrated_issue: Option<u64>) -> Self {
        self.first_migrated_issue = first_migrated_issue;
        self
    }

    /// Returns the settings file path.
    pub fn settings_path(&self) -> &Path {
        &self.settings_path
    }

    /// Returns the destination token, if any.
    pub fn github_token(&self) -> Option<&str> {
        self.github_token.as_deref()
    }

    /// Returns the source token, if any.
    pub fn pagure_token(&self) -> Option<&str> {
        self.pagure_token.as_deref()
    }

    pub fn start_offset(&self) -> Option<u64> {
        self.start_offset
    }

    pub fn first_migrated_issue(&self) -> Option<u64> {
        self.first_migrated_issue
    }
}
