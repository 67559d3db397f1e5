//! Declarative screen tables.
//!
//! Every screen module exposes the same three functions: `graph` (field
//! dependencies), `plan` (validation and phases against an [`AdminApi`]) and
//! `affected_keys` (caches made stale by a successful save). The [`Screen`]
//! trait lets a [`ModalSession`](crate::ModalSession) drive any of them.

use std::sync::Arc;

use forms_fields::FieldDependencyGraph;
use forms_submission::SubmissionPlan;
use forms_types::QueryKey;

use crate::{AdminApi, FormsConfig, ModalTarget, ReferenceKind};

pub mod equipment;
pub mod equipment_tests;
pub mod instruments;
pub mod nonconformity;
pub mod profile;
pub mod users;

/// A select input fed by reference data.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Choice {
    pub field: &'static str,
    pub kind: ReferenceKind,
    /// Field whose value filters the list, if any.
    pub parent_field: Option<&'static str>,
}

impl Choice {
    pub const fn of(field: &'static str, kind: ReferenceKind) -> Self {
        Self {
            field,
            kind,
            parent_field: None,
        }
    }

    pub const fn under(mut self, parent_field: &'static str) -> Self {
        self.parent_field = Some(parent_field);
        self
    }
}

pub trait Screen: Send + Sync {
    fn name(&self) -> &'static str;

    fn graph(&self, config: &FormsConfig) -> FieldDependencyGraph;

    /// Plan saving the whole form, or `None` when the screen cannot save
    /// `target` (the profile only ever edits an existing record).
    fn plan(&self, api: Arc<dyn AdminApi>, target: &ModalTarget) -> Option<SubmissionPlan>;

    fn affected_keys(&self) -> Vec<QueryKey>;

    fn choices(&self) -> Vec<Choice> {
        Vec::new()
    }

    /// Fields merged into the session record when the saved record is the
    /// signed-in user's own.
    fn identity_fields(&self) -> &'static [&'static str] {
        &[]
    }

    /// Plan saving `field` alone, for screens with inline edits.
    fn inline_plan(
        &self,
        _api: Arc<dyn AdminApi>,
        _target: &ModalTarget,
        _field: &str,
    ) -> Option<SubmissionPlan> {
        None
    }
}

/// Every screen, in menu order.
pub fn all() -> Vec<Arc<dyn Screen>> {
    vec![
        Arc::new(users::Users),
        Arc::new(profile::Profile),
        Arc::new(equipment::Equipment),
        Arc::new(instruments::Instruments),
        Arc::new(equipment_tests::EquipmentTests),
        Arc::new(nonconformity::NonConformity),
    ]
}

pub(crate) fn keys(names: &[&str]) -> Vec<QueryKey> {
    names.iter().map(|n| QueryKey::from(*n)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mocks::MockAdminApi;

    #[test]
    fn every_screen_declares_keys_and_phases() {
        let config = FormsConfig::default();
        let api: Arc<dyn AdminApi> = Arc::new(MockAdminApi::new());
        for screen in all() {
            assert!(!screen.affected_keys().is_empty(), "{}", screen.name());
            assert!(!screen.graph(&config).rules().is_empty(), "{}", screen.name());
            let plan = screen.plan(api.clone(), &ModalTarget::edit("x")).unwrap();
            assert!(!plan.phases().is_empty(), "{}", screen.name());
        }
    }
}
