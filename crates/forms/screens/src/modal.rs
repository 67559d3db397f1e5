use std::sync::Arc;

use forms_fields::{FieldDependencyGraph, FieldState};
use forms_gate::{MutationTarget, PermissionGate, RoleClassifier};
use forms_submission::{SubmissionOrchestrator, SubmissionPlan, SubmissionReport, SubmissionSlot};
use forms_sync::{CacheSyncBridge, NotificationSink, SyncReport};
use forms_types::{Capability, FieldValue, IdentityPatch};
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::error::{Result, ScreenError};
use crate::{AdminApi, FormsConfig, ReferenceDataProvider, ReferenceRecord, Screen};

/// Which record a modal is editing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ModalTarget {
    Create,
    Edit { id: String },
}

impl ModalTarget {
    pub fn edit(id: impl Into<String>) -> Self {
        ModalTarget::Edit { id: id.into() }
    }

    pub fn id(&self) -> Option<&str> {
        match self {
            ModalTarget::Create => None,
            ModalTarget::Edit { id } => Some(id),
        }
    }
}

/// Everything a modal needs to know about how it was opened.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ModalContext {
    pub target: ModalTarget,
    pub capability: Capability,
}

impl ModalContext {
    pub fn new(target: ModalTarget, capability: Capability) -> Self {
        Self { target, capability }
    }

    /// Context for a caller whose role is `role`.
    pub fn for_role(target: ModalTarget, classifier: &RoleClassifier, role: &str) -> Self {
        Self::new(target, classifier.classify(role))
    }
}

/// Shared collaborators of every modal.
#[derive(Clone)]
pub struct FormsServices {
    pub config: FormsConfig,
    pub api: Arc<dyn AdminApi>,
    pub bridge: Arc<CacheSyncBridge>,
    pub notifier: Arc<dyn NotificationSink>,
    pub reference: Arc<dyn ReferenceDataProvider>,
}

/// What a finished background submission produced.
#[derive(Clone, Debug)]
pub struct ModalOutcome {
    pub report: SubmissionReport,
    pub sync: SyncReport,
}

/// Handle on a submission running in the background.
///
/// Dropping the handle (e.g. because the modal was closed) does not cancel
/// the submission: its cache sync and notification still happen.
#[derive(Debug)]
pub struct SubmissionHandle {
    task: JoinHandle<Result<ModalOutcome>>,
}

impl SubmissionHandle {
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }

    /// Wait for the submission and its follow-up to complete.
    pub async fn outcome(self) -> Result<ModalOutcome> {
        self.task
            .await
            .map_err(|e| ScreenError::Task(e.to_string()))?
    }
}

/// One open modal bound to one screen.
///
/// Owns the modal's field state. Local edits go through the screen's
/// dependency graph; saves run on the tokio runtime, at most one at a time.
pub struct ModalSession {
    screen: Arc<dyn Screen>,
    context: ModalContext,
    services: FormsServices,
    graph: Arc<FieldDependencyGraph>,
    plan: Option<Arc<SubmissionPlan>>,
    orchestrator: Arc<SubmissionOrchestrator>,
    state: FieldState,
}

impl ModalSession {
    /// Open `screen` with `initial` values (empty for a new record).
    pub fn open(
        screen: Arc<dyn Screen>,
        context: ModalContext,
        services: FormsServices,
        initial: FieldState,
    ) -> Self {
        let graph = Arc::new(screen.graph(&services.config));
        let plan = screen.plan(services.api.clone(), &context.target).map(Arc::new);
        let orchestrator = Arc::new(
            SubmissionOrchestrator::new(PermissionGate::new(context.capability), graph.clone())
                .with_failure_message(services.config.generic_failure_message.clone()),
        );
        info!(
            screen = screen.name(),
            target = ?context.target,
            capability = %context.capability,
            "Modal opened"
        );

        Self {
            screen,
            context,
            services,
            graph,
            plan,
            orchestrator,
            state: initial,
        }
    }

    pub fn state(&self) -> &FieldState {
        &self.state
    }

    pub fn context(&self) -> &ModalContext {
        &self.context
    }

    pub fn is_read_only(&self) -> bool {
        !PermissionGate::can_mutate(self.context.capability)
    }

    pub fn is_submitting(&self) -> bool {
        self.orchestrator.is_in_flight()
    }

    /// Local edit. Dependent fields are reset or recomputed; nothing is sent.
    pub fn set_field(&mut self, field: &str, value: impl Into<FieldValue>) {
        self.state = self.graph.apply(&self.state, field, value.into());
        debug!(screen = self.screen.name(), field, "Field edited");
    }

    /// Options for the select bound to `field`, filtered by its parent
    /// field's current value. A parent with no value yields no options.
    pub fn options(&self, field: &str) -> Vec<ReferenceRecord> {
        let Some(choice) = self.screen.choices().into_iter().find(|c| c.field == field) else {
            return Vec::new();
        };
        match choice.parent_field {
            None => self.services.reference.list(choice.kind, None),
            Some(parent) if self.state.is_blank(parent) => Vec::new(),
            Some(parent) => {
                let parent_value = self.state.text(parent);
                self.services.reference.list(choice.kind, Some(&parent_value))
            }
        }
    }

    /// Start saving the whole form in the background.
    ///
    /// Read-only callers, and calls while a save is still pending, are
    /// refused here before anything is spawned: the in-flight slot is taken
    /// before this returns. Must be called from within a tokio runtime.
    pub fn submit(&self) -> Result<SubmissionHandle> {
        PermissionGate::new(self.context.capability)
            .check(&MutationTarget::Submission(self.screen.name().to_string()))?;
        let plan = self.plan.clone().ok_or_else(|| ScreenError::NotSubmittable {
            screen: self.screen.name(),
            target: self.context.target.clone(),
        })?;
        let slot = self.orchestrator.reserve(&plan)?;
        Ok(self.spawn(slot, plan, self.state.clone()))
    }

    /// Change `field` and save it on its own, for screens that allow inline
    /// edits. The permission check comes first: a refused edit leaves the
    /// state untouched.
    pub fn commit_field(
        &mut self,
        field: &str,
        value: impl Into<FieldValue>,
    ) -> Result<SubmissionHandle> {
        PermissionGate::new(self.context.capability)
            .check(&MutationTarget::Field(field.to_string()))?;
        let plan = self
            .screen
            .inline_plan(self.services.api.clone(), &self.context.target, field)
            .ok_or_else(|| ScreenError::NotCommittable(field.to_string()))?;
        let slot = self.orchestrator.reserve(&plan)?;

        self.set_field(field, value);
        Ok(self.spawn(slot, Arc::new(plan), self.state.clone()))
    }

    /// Take over the state a finished submission ended with (server-side
    /// updates and cleared password fields).
    pub fn adopt(&mut self, outcome: &ModalOutcome) {
        self.state = outcome.report.state.clone();
    }

    fn spawn(
        &self,
        slot: SubmissionSlot,
        plan: Arc<SubmissionPlan>,
        state: FieldState,
    ) -> SubmissionHandle {
        let orchestrator = self.orchestrator.clone();
        let bridge = self.services.bridge.clone();
        let notifier = self.services.notifier.clone();
        let keys = self.screen.affected_keys();
        let identity_fields = self.screen.identity_fields();
        let target_id = self.context.target.id().map(String::from);

        let task = tokio::spawn(async move {
            let report = orchestrator.run_reserved(slot, &plan, state).await;

            let patch = target_id
                .filter(|id| bridge.is_self(id))
                .map(|_| identity_patch(&report.state, identity_fields))
                .filter(|patch| !patch.is_empty());
            let sync = bridge.on_success(&report.result, &keys, patch.as_ref());
            notifier.notify(&report.result);

            Ok::<_, ScreenError>(ModalOutcome { report, sync })
        });

        SubmissionHandle { task }
    }
}

impl std::fmt::Debug for ModalSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModalSession")
            .field("screen", &self.screen.name())
            .field("context", &self.context)
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

fn identity_patch(state: &FieldState, fields: &[&str]) -> IdentityPatch {
    fields
        .iter()
        .filter_map(|f| state.get(f).map(|v| (*f, v.to_json())))
        .fold(IdentityPatch::new(), |patch, (k, v)| patch.with(k, v))
}
