//! Append-only text log.

use super::{ProgressError, ProgressEvent, ProgressSink};
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Appends one line per event to a UTF-8 text file.
///
/// The file is opened for every event so that a crash never loses a line
/// that was already reported.
#[derive(Debug, Clone)]
pub struct FileProgressLog {
    path: PathBuf,
}

impl FileProgressLog {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ProgressSink for FileProgressLog {
    fn record(&self, event: &ProgressEvent) -> Result<(), ProgressError> {
        let io_error = |e: std::io::Error| ProgressError::IoError {
            path: self.path.display().to_string(),
            source: e,
        };

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(io_error)?;
        writeln!(file, "{event}").map_err(io_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::RecordKind;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn appends_across_instances() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("progress.log");

        FileProgressLog::new(&path)
            .record(&ProgressEvent::Created {
                id: 1,
                kind: RecordKind::Issue,
            })
            .unwrap();
        FileProgressLog::new(&path)
            .record(&ProgressEvent::Placeholder { id: 2 })
            .unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(
            content,
            "created issue from issue; id 1\ncreated placeholder issue; id 2\n"
        );
    }

    #[test]
    fn reports_unwritable_path() {
        let temp = TempDir::new().unwrap();
        let log = FileProgressLog::new(temp.path().join("missing-dir/progress.log"));

        let result = log.record(&ProgressEvent::Merged { id: 3 });
        assert!(matches!(result, Err(ProgressError::IoError { .. })));
    }
}
