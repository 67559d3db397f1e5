//! Test runs recorded against equipment.

use std::sync::Arc;

use forms_fields::{DependencyRule, FieldDependencyGraph};
use forms_submission::{SubmissionPhase, SubmissionPlan, ValidationRule};
use forms_types::QueryKey;

use super::{keys, Choice, Screen};
use crate::api::save_record;
use crate::{AdminApi, FormsConfig, ModalTarget, ReferenceKind, Resource};

pub const SAVE: &str = "Enregistrement du test";

pub fn graph(_config: &FormsConfig) -> FieldDependencyGraph {
    FieldDependencyGraph::new(vec![
        DependencyRule::on("equipement").resets("instrument"),
        DependencyRule::on("resultat").resets("commentaire_echec"),
    ])
}

pub fn plan(api: Arc<dyn AdminApi>, target: &ModalTarget) -> SubmissionPlan {
    SubmissionPlan::new("Test")
        .validate(ValidationRule::required("equipement", "L'équipement est obligatoire"))
        .validate(ValidationRule::required("date_test", "La date du test est obligatoire"))
        .validate(ValidationRule::required("resultat", "Le résultat est obligatoire"))
        .phase(SubmissionPhase::new(
            1,
            SAVE,
            save_record(api, Resource::Tests, target.id().map(String::from)),
        ))
}

/// A test changes the equipment's status as well as the test list.
pub fn affected_keys() -> Vec<QueryKey> {
    keys(&["tests", "equipements"])
}

pub struct EquipmentTests;

impl Screen for EquipmentTests {
    fn name(&self) -> &'static str {
        "tests"
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
}
