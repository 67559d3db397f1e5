//! Multi-phase form submission.
//!
//! A screen declares a [`SubmissionPlan`]: validation rules plus an ordered
//! list of [`SubmissionPhase`]s, each an optionally guarded remote call.
//! [`SubmissionOrchestrator::run`] executes a plan against a form state:
//!
//! 1. **Permission**: the caller's gate is checked before anything else.
//! 2. **Validation**: plan rules and the preconditions of every phase whose
//!    guard holds. Any issue ends the attempt with no remote call.
//! 3. **Phases**: in ascending order; a false guard skips the phase, a
//!    failed call stops the run. Phases that already succeeded are not undone.
//!
//! Only one run may be pending per orchestrator; a second is rejected.
//! [`SubmissionOrchestrator::reserve`] takes that slot synchronously for
//! callers that run the plan on a spawned task.

#![deny(unsafe_code)]

mod error;
pub mod mocks;
mod orchestrator;
mod phase;
mod plan;
mod validation;

pub use error::{Result, SubmissionError};
pub use orchestrator::{
    SubmissionOrchestrator, SubmissionReport, SubmissionSlot, DEFAULT_FAILURE_MESSAGE,
};
pub use phase::{call_fn, guards, FnCall, Guard, PhaseOutput, RemoteCall, SubmissionPhase};
pub use plan::SubmissionPlan;
pub use validation::ValidationRule;
