//! Export documents on disk.
//!
//! A source snapshot is two JSON files: `{"issues": [...]}` and
//! `{"requests": [...]}`, each element in the raw Pagure record shape. The
//! transfer and merge stages read these instead of the live API so that every
//! run works from the same fixed data.

mod error;

pub use error::ExportError;

use crate::records::raw::{RawIssue, RawPullRequest};
use crate::records::{SourceIssue, SourceProject, SourcePullRequest};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;
use tracing::info;

/// Default file name of the issues export.
pub const ISSUES_FILE: &str = "issues.json";

/// Default file name of the pull requests export.
pub const REQUESTS_FILE: &str = "requests.json";

#[derive(Serialize, Deserialize)]
struct IssuesDocument<T> {
    issues: Vec<T>,
}

#[derive(Serialize, Deserialize)]
struct RequestsDocument<T> {
    requests: Vec<T>,
}

/// Loads an issues export, ordered by id.
///
/// # Errors
///
/// Returns [`ExportError`] if the file is unreadable, not an issues document,
/// or contains a malformed record.
pub fn load_issues(path: &Path, project: &SourceProject) -> Result<Vec<SourceIssue>, ExportError> {
    let document: IssuesDocument<RawIssue> = read_json(path)?;
    let mut issues = document
        .issues
        .into_iter()
        .map(|raw| SourceIssue::from_raw(raw, project))
        .collect::<Result<Vec<_>, _>>()
        .map_err(|source| ExportError::RecordError {
            path: path.display().to_string(),
            source,
        })?;
    issues.sort_by_key(|issue| issue.id);

    info!(path = %path.display(), count = issues.len(), "Loaded issues export");
    Ok(issues)
}

/// Loads a pull requests export, ordered by id.
///
/// # Errors
///
/// Returns [`ExportError`] if the file is unreadable, not a requests
/// document, or contains a malformed record.
pub fn load_pull_requests(
    path: &Path,
    project: &SourceProject,
) -> Result<Vec<SourcePullRequest>, ExportError> {
    let document: RequestsDocument<RawPullRequest> = read_json(path)?;
    let mut requests = document
        .requests
        .into_iter()
        .map(|raw| SourcePullRequest::from_raw(raw, project))
        .collect::<Result<Vec<_>, _>>()
        .map_err(|source| ExportError::RecordError {
            path: path.display().to_string(),
            source,
        })?;
    requests.sort_by_key(|request| request.id);

    info!(path = %path.display(), count = requests.len(), "Loaded pull requests export");
    Ok(requests)
}

/// Writes raw issues as an issues document.
///
/// # Errors
///
/// Returns [`ExportError::IoError`] if the file cannot be written.
pub fn write_issues(path: &Path, issues: Vec<Value>) -> Result<(), ExportError> {
    write_json(path, &IssuesDocument { issues })
}

/// Writes raw pull requests as a requests document.
///
/// # Errors
///
/// Returns [`ExportError::IoError`] if the file cannot be written.
pub fn write_pull_requests(path: &Path, requests: Vec<Value>) -> Result<(), ExportError> {
    write_json(path, &RequestsDocument { requests })
}

fn read_json<T: for<'de> Deserialize<'de>>(path: &Path) -> Result<T, ExportError> {
    let file = File::open(path).map_err(|e| ExportError::IoError {
        path: path.display().to_string(),
        source: e,
    })?;
    serde_json::from_reader(BufReader::new(file)).map_err(|e| ExportError::JsonError {
        path: path.display().to_string(),
        source: e,
    })
}

fn write_json<T: Serialize>(path: &Path, document: &T) -> Result<(), ExportError> {
    let io_error = |e: std::io::Error| ExportError::IoError {
        path: path.display().to_string(),
        source: e,
    };

    let file = File::create(path).map_err(io_error)?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, document).map_err(|e| ExportError::JsonError {
        path: path.display().to_string(),
        source: e,
    })?;
    writer.write_all(b"\n").map_err(io_error)?;
    writer.flush().map_err(io_error)
}
