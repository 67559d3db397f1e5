use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use forms_fields::{FieldDependencyGraph, FieldState};
use forms_gate::{MutationTarget, PermissionGate};
use forms_types::{Capability, SubmissionResult};
use serde::Serialize;
use tracing::{debug, info, info_span, warn, Instrument};
use uuid::Uuid;

use crate::error::{Result, SubmissionError};
use crate::validation::collect_issues;
use crate::SubmissionPlan;

/// Fallback shown when a failed call carries no server message.
pub const DEFAULT_FAILURE_MESSAGE: &str = "Une erreur est survenue, veuillez réessayer";

/// Everything a finished run hands back.
#[derive(Clone, Debug, Serialize)]
pub struct SubmissionReport {
    /// Correlates log lines of one attempt.
    pub id: Uuid,
    pub result: SubmissionResult,
    /// State after the phases that completed, including their updates.
    pub state: FieldState,
    /// Raw responses of the phases that returned one, by phase label.
    pub payloads: Vec<(String, serde_json::Value)>,
}

impl SubmissionReport {
    pub fn payload(&self, label: &str) -> Option<&serde_json::Value> {
        self.payloads
            .iter()
            .find(|(l, _)| l == label)
            .map(|(_, payload)| payload)
    }
}

/// Runs submission plans for one form.
///
/// Holds the caller's permission gate and the form's dependency graph, both
/// fixed at construction, and the in-flight flag that keeps runs on the
/// same form from overlapping.
pub struct SubmissionOrchestrator {
    gate: PermissionGate,
    graph: Arc<FieldDependencyGraph>,
    failure_message: String,
    in_flight: Arc<AtomicBool>,
}

impl SubmissionOrchestrator {
    pub fn new(gate: PermissionGate, graph: Arc<FieldDependencyGraph>) -> Self {
        Self {
            gate,
            graph,
            failure_message: DEFAULT_FAILURE_MESSAGE.to_string(),
            in_flight: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn with_failure_message(mut self, message: impl Into<String>) -> Self {
        self.failure_message = message.into();
        self
    }

    pub fn capability(&self) -> Capability {
        self.gate.capability()
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight.load(Ordering::SeqCst)
    }

    /// Run `plan` against `state`.
    ///
    /// Returns `Err` only when the attempt is refused (no permission, or
    /// another run pending). Validation and remote failures are reported in
    /// the report's result.
    pub async fn run(&self, plan: &SubmissionPlan, state: FieldState) -> Result<SubmissionReport> {
        let slot = self.reserve(plan)?;
        Ok(self.run_reserved(slot, plan, state).await)
    }

    /// Check permission for `plan` and take the in-flight slot right away.
    ///
    /// Lets a caller refuse a second attempt before it spawns the first. The
    /// slot is released when dropped, or when the run it is handed to ends.
    pub fn reserve(&self, plan: &SubmissionPlan) -> Result<SubmissionSlot> {
        self.gate
            .check(&MutationTarget::Submission(plan.name().to_string()))?;
        SubmissionSlot::acquire(&self.in_flight)
    }

    /// Run `plan` under a slot taken earlier with [`Self::reserve`] on this
    /// orchestrator.
    pub async fn run_reserved(
        &self,
        slot: SubmissionSlot,
        plan: &SubmissionPlan,
        state: FieldState,
    ) -> SubmissionReport {
        debug_assert!(Arc::ptr_eq(&slot.flag, &self.in_flight));
        let _slot = slot;

        let id = Uuid::new_v4();
        let span = info_span!("submission", %id, plan = plan.name());
        self.execute(id, plan, state).instrument(span).await
    }

    async fn execute(&self, id: Uuid, plan: &SubmissionPlan, state: FieldState) -> SubmissionReport {
        let report = |result: SubmissionResult,
                      state: FieldState,
                      payloads: Vec<(String, serde_json::Value)>| SubmissionReport {
            id,
            result,
            state,
            payloads,
        };

        let mut issues = collect_issues(plan.rules(), &state);
        for phase in plan.phases() {
            if phase.guard_holds(&state) {
                issues.extend(phase.precondition_issues(&state));
            }
        }
        if !issues.is_empty() {
            info!(issues = issues.len(), "Submission rejected by validation");
            return report(SubmissionResult::validation(issues, None), state, Vec::new());
        }

        let mut state = state;
        let mut completed = Vec::new();
        let mut payloads = Vec::new();

        for phase in plan.phases() {
            if !phase.guard_holds(&state) {
                debug!(phase = phase.label(), "Guard false, phase skipped");
                completed.push(phase.label().to_string());
                continue;
            }

            // Earlier phases may have changed state so that this guard now
            // holds; its preconditions still have to pass before the call.
            let late_issues = phase.precondition_issues(&state);
            if !late_issues.is_empty() {
                warn!(phase = phase.label(), "Phase preconditions failed after earlier phases");
                let mut result = SubmissionResult::validation(late_issues, Some(phase.phase_ref()));
                result.completed_phases = completed;
                return report(result, state, payloads);
            }

            debug!(phase = phase.label(), order = phase.order(), "Invoking phase");
            match phase.invoke(&state).await {
                Ok(output) => {
                    if let Some(payload) = output.payload {
                        payloads.push((phase.label().to_string(), payload));
                    }
                    state = self.graph.apply_all(&state, output.updates);
                    completed.push(phase.label().to_string());
                }
                Err(err) => {
                    let message = err.message_or(&self.failure_message);
                    warn!(
                        phase = phase.label(),
                        order = phase.order(),
                        committed = completed.len(),
                        error = %message,
                        "Phase failed, submission stopped"
                    );
                    let result = SubmissionResult::remote(phase.phase_ref(), message, completed);
                    return report(result, state, payloads);
                }
            }
        }

        info!(phases = completed.len(), "Submission succeeded");
        let result = SubmissionResult::success(plan.message_on_success(), completed);
        report(result, state, payloads)
    }
}

/// Exclusive right to one run on a [`SubmissionOrchestrator`].
///
/// Owned, so it can move into a spawned task. Dropping it frees the
/// orchestrator for the next run.
#[derive(Debug)]
pub struct SubmissionSlot {
    flag: Arc<AtomicBool>,
}

impl SubmissionSlot {
    fn acquire(flag: &Arc<AtomicBool>) -> Result<Self> {
        flag.compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .map(|_| SubmissionSlot { flag: flag.clone() })
            .map_err(|_| {
                warn!("Submission rejected, another one is in flight");
                SubmissionError::InFlight
            })
    }
}

impl Drop for SubmissionSlot {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::SeqCst);
    }
}
