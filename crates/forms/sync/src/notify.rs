use forms_types::{Outcome, SubmissionResult};
use parking_lot::Mutex;
use tracing::{info, warn};

use crate::NotificationSink;

/// Sink that writes outcomes to the log.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingNotifier;

impl NotificationSink for TracingNotifier {
    fn notify(&self, result: &SubmissionResult) {
        match result.outcome {
            Outcome::Success => info!(message = %result.message, "Submission succeeded"),
            Outcome::ValidationFailure => warn!(
                message = %result.message,
                issues = result.issues.len(),
                "Submission rejected"
            ),
            Outcome::RemoteFailure => warn!(
                message = %result.display_message(),
                committed = ?result.completed_phases,
                "Submission failed"
            ),
        }
    }
}

/// Sink that keeps every outcome it receives.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    received: Mutex<Vec<SubmissionResult>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn results(&self) -> Vec<SubmissionResult> {
        self.received.lock().clone()
    }

    pub fn count(&self) -> usize {
        self.received.lock().len()
    }

    pub fn last(&self) -> Option<SubmissionResult> {
        self.received.lock().last().cloned()
    }
}

impl NotificationSink for RecordingNotifier {
    fn notify(&self, result: &SubmissionResult) {
        self.received.lock().push(result.clone());
    }
}
