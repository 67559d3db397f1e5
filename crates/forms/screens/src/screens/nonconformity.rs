//! Non-conformity reports.
//!
//! Besides the full form, the list view lets full-access users change a
//! report's `statut` in place; that edit is saved on its own.

use std::sync::Arc;

use forms_fields::{DependencyRule, FieldDependencyGraph};
use forms_submission::{SubmissionPhase, SubmissionPlan, ValidationRule};
use forms_types::QueryKey;

use super::{keys, Choice, Screen};
use crate::api::save_record;
use crate::{AdminApi, FormsConfig, ModalTarget, ReferenceKind, Resource};

pub const SAVE: &str = "Enregistrement de la non-conformité";
pub const UPDATE_STATUS: &str = "Mise à jour du statut";

pub fn graph(_config: &FormsConfig) -> FieldDependencyGraph {
    FieldDependencyGraph::new(vec![
        DependencyRule::on("gravite").resets("action_corrective"),
        DependencyRule::on("equipement").resets("instrument"),
    ])
}

pub fn plan(api: Arc<dyn AdminApi>, target: &ModalTarget) -> SubmissionPlan {
    SubmissionPlan::new("Non-conformité")
        .validate(ValidationRule::required("titre", "Le titre est obligatoire"))
        .validate(ValidationRule::required("gravite", "La gravité est obligatoire"))
        .validate(ValidationRule::required("equipement", "L'équipement est obligatoire"))
        .phase(SubmissionPhase::new(
            1,
            SAVE,
            save_record(api, Resource::NonConformities, target.id().map(String::from)),
        ))
}

/// Only `statut` of an existing report can be saved inline.
pub fn status_plan(api: Arc<dyn AdminApi>, target: &ModalTarget) -> Option<SubmissionPlan> {
    let id = target.id()?;
    Some(
        SubmissionPlan::new("Statut")
            .success_message("Statut mis à jour")
            .validate(ValidationRule::required("statut", "Le statut est obligatoire"))
            .phase(
                SubmissionPhase::new(
                    1,
                    UPDATE_STATUS,
                    save_record(api, Resource::NonConformities, Some(id.to_string())),
                )
                .with_fields(["statut"]),
            ),
    )
}

pub fn affected_keys() -> Vec<QueryKey> {
    keys(&["non_conformites"])
}

pub struct NonConformity;

impl Screen for NonConformity {
    fn name(&self) -> &'static str {
        "nonconformity"
    }

    fn graph(&self, config: &FormsConfig) -> FieldDependencyGraph {
        graph(config)
    }

    fn plan(&self, api: Arc<dyn AdminApi>, target: &ModalTarget) -> Option<SubmissionPlan> {
        Some(plan(api, target))
    }

    fn affected_keys(&self) -> Vec<QueryKey> {
        affected_keys()
    }

    fn choices(&self) -> Vec<Choice> {
        vec![
            Choice::of("equipement", ReferenceKind::Equipements),
            Choice::of("instrument", ReferenceKind::Instruments).under("equipement"),
        ]
    }

    fn inline_plan(
        &self,
        api: Arc<dyn AdminApi>,
        target: &ModalTarget,
        field: &str,
    ) -> Option<SubmissionPlan> {
        match field {
            "statut" => status_plan(api, target),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mocks::MockAdminApi;

    #[test]
    fn status_needs_an_existing_record() {
        let api: Arc<dyn AdminApi> = Arc::new(MockAdminApi::new());
        assert!(status_plan(api.clone(), &ModalTarget::Create).is_none());
        let plan = status_plan(api, &ModalTarget::edit("nc-4")).unwrap();
        assert_eq!(plan.phases()[0].label(), UPDATE_STATUS);
    }

    #[test]
    fn only_statut_is_inline() {
        let api: Arc<dyn AdminApi> = Arc::new(MockAdminApi::new());
        let target = ModalTarget::edit("nc-4");
        assert!(NonConformity.inline_plan(api.clone(), &target, "statut").is_some());
        assert!(NonConformity.inline_plan(api, &target, "gravite").is_none());
    }
}
