use serde::{Deserialize, Serialize};

/// Terminal classification of a submission attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Success,
    /// Rejected locally; no remote call was made.
    ValidationFailure,
    /// A phase's remote call failed; later phases did not run.
    RemoteFailure,
}

/// Reference to a phase for error attribution.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhaseRef {
    pub order: u32,
    pub label: String,
}

impl PhaseRef {
    pub fn new(order: u32, label: impl Into<String>) -> Self {
        Self {
            order,
            label: label.into(),
        }
    }
}

/// One local validation problem.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationIssue {
    pub field: String,
    pub message: String,
}

impl ValidationIssue {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Result of one submission attempt. Created once, consumed by the caller,
/// never persisted.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SubmissionResult {
    pub outcome: Outcome,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failed_phase: Option<PhaseRef>,
    pub message: String,
    /// Populated on `ValidationFailure`.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub issues: Vec<ValidationIssue>,
    /// Labels of phases that ran or were skipped before the attempt ended.
    ///
    /// On a `RemoteFailure` these phases have already taken effect
    /// server-side and are not undone.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub completed_phases: Vec<String>,
}

impl SubmissionResult {
    pub fn success(message: impl Into<String>, completed_phases: Vec<String>) -> Self {
        Self {
            outcome: Outcome::Success,
            failed_phase: None,
            message: message.into(),
            issues: Vec::new(),
            completed_phases,
        }
    }

    /// Build a validation failure. The message is the first issue's text.
    pub fn validation(issues: Vec<ValidationIssue>, failed_phase: Option<PhaseRef>) -> Self {
        let message = issues
            .first()
            .map(|i| i.message.clone())
            .unwrap_or_else(|| "Formulaire invalide".to_string());
        Self {
            outcome: Outcome::ValidationFailure,
            failed_phase,
            message,
            issues,
            completed_phases: Vec::new(),
        }
    }

    pub fn remote(
        phase: PhaseRef,
        message: impl Into<String>,
        completed_phases: Vec<String>,
    ) -> Self {
        Self {
            outcome: Outcome::RemoteFailure,
            failed_phase: Some(phase),
            message: message.into(),
            issues: Vec::new(),
            completed_phases,
        }
    }

    pub fn is_success(&self) -> bool {
        self.outcome == Outcome::Success
    }

    /// True when an earlier phase committed before a later one failed.
    pub fn is_partial(&self) -> bool {
        self.outcome == Outcome::RemoteFailure && !self.completed_phases.is_empty()
    }

    /// User-facing line that names the failing phase, if any.
    pub fn display_message(&self) -> String {
        match &self.failed_phase {
            Some(phase) if self.outcome == Outcome::RemoteFailure => {
                format!("{} : {}", phase.label, self.message)
            }
            _ => self.message.clone(),
        }
    }
}
