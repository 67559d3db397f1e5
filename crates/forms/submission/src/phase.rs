use std::future::Future;
use std::sync::Arc;

use async_trait::async_trait;
use forms_fields::FieldState;
use forms_types::{FieldValue, PhaseRef, RemoteError, ValidationIssue};

use crate::validation::{collect_issues, ValidationRule};

/// What a successful remote call hands back to the orchestrator.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PhaseOutput {
    /// Raw server response, kept on the report.
    pub payload: Option<serde_json::Value>,
    /// Field changes folded into state (through the dependency graph) before
    /// the next phase runs.
    pub updates: Vec<(String, FieldValue)>,
}

impl PhaseOutput {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn with_payload(mut self, payload: serde_json::Value) -> Self {
        self.payload = Some(payload);
        self
    }

    pub fn with_update(mut self, field: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.updates.push((field.into(), value.into()));
        self
    }
}

/// The remote effect of one phase.
#[async_trait]
pub trait RemoteCall: Send + Sync {
    async fn call(&self, input: &FieldState) -> Result<PhaseOutput, RemoteError>;
}

/// Adapter turning an async closure into a [`RemoteCall`].
pub struct FnCall<F>(F);

#[async_trait]
impl<F, Fut> RemoteCall for FnCall<F>
where
    F: Fn(FieldState) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<PhaseOutput, RemoteError>> + Send + 'static,
{
    async fn call(&self, input: &FieldState) -> Result<PhaseOutput, RemoteError> {
        (self.0)(input.clone()).await
    }
}

/// Wrap an async closure as a shareable [`RemoteCall`].
pub fn call_fn<F, Fut>(f: F) -> Arc<dyn RemoteCall>
where
    F: Fn(FieldState) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<PhaseOutput, RemoteError>> + Send + 'static,
{
    Arc::new(FnCall(f))
}

/// Predicate deciding whether a phase runs at all.
pub type Guard = Arc<dyn Fn(&FieldState) -> bool + Send + Sync>;

pub mod guards {
    //! Common phase guards.

    use super::Guard;
    use forms_fields::FieldState;
    use std::sync::Arc;

    /// Run only when `field` holds a non-blank value.
    pub fn filled(field: impl Into<String>) -> Guard {
        let field = field.into();
        Arc::new(move |state: &FieldState| !state.is_blank(&field))
    }
}

/// One ordered, optionally guarded remote operation of a submission.
#[derive(Clone)]
pub struct SubmissionPhase {
    order: u32,
    label: String,
    guard: Option<Guard>,
    preconditions: Vec<ValidationRule>,
    fields: Option<Vec<String>>,
    call: Arc<dyn RemoteCall>,
}

impl SubmissionPhase {
    /// `label` names the phase in failure messages.
    pub fn new(order: u32, label: impl Into<String>, call: Arc<dyn RemoteCall>) -> Self {
        Self {
            order,
            label: label.into(),
            guard: None,
            preconditions: Vec::new(),
            fields: None,
            call,
        }
    }

    pub fn guarded_by(mut self, guard: Guard) -> Self {
        self.guard = Some(guard);
        self
    }

    /// Validation that must pass before this phase may run. Only evaluated
    /// when the guard holds.
    pub fn precondition(mut self, rule: ValidationRule) -> Self {
        self.preconditions.push(rule);
        self
    }

    /// Pass only these fields to the call.
    pub fn with_fields<S: Into<String>>(mut self, fields: impl IntoIterator<Item = S>) -> Self {
        self.fields = Some(fields.into_iter().map(Into::into).collect());
        self
    }

    pub fn order(&self) -> u32 {
        self.order
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn phase_ref(&self) -> PhaseRef {
        PhaseRef::new(self.order, self.label.clone())
    }

    pub fn is_guarded(&self) -> bool {
        self.guard.is_some()
    }

    /// Unguarded phases always run.
    pub fn guard_holds(&self, state: &FieldState) -> bool {
        self.guard.as_ref().map_or(true, |g| g(state))
    }

    pub(crate) fn precondition_issues(&self, state: &FieldState) -> Vec<ValidationIssue> {
        collect_issues(&self.preconditions, state)
    }

    pub(crate) fn input(&self, state: &FieldState) -> FieldState {
        match &self.fields {
            Some(fields) => state.subset(fields.as_slice()),
            None => state.clone(),
        }
    }

    pub(crate) async fn invoke(&self, state: &FieldState) -> Result<PhaseOutput, RemoteError> {
        self.call.call(&self.input(state)).await
    }
}

impl std::fmt::Debug for SubmissionPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SubmissionPhase")
            .field("order", &self.order)
            .field("label", &self.label)
            .field("guarded", &self.guard.is_some())
            .field("preconditions", &self.preconditions.len())
            .field("fields", &self.fields)
            .finish()
    }
}
