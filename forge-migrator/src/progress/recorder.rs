//! In-memory progress capture.

use super::{ProgressError, ProgressEvent, ProgressSink};
use std::sync::{Mutex, PoisonError};

/// Keeps every event in memory, in order.
///
/// Lets callers inspect exactly what a stage reported.
#[derive(Debug, Default)]
pub struct RecordingProgress {
    events: Mutex<Vec<ProgressEvent>>,
}

impl RecordingProgress {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the events recorded so far.
    #[must_use]
    pub fn events(&self) -> Vec<ProgressEvent> {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl ProgressSink for RecordingProgress {
    fn record(&self, event: &ProgressEvent) -> Result<(), ProgressError> {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(event.clone());
        Ok(())
    }
}
