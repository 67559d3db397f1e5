//! Equipment inventory.

use std::sync::Arc;

use forms_fields::{DependencyRule, FieldDependencyGraph};
use forms_submission::{SubmissionPhase, SubmissionPlan, ValidationRule};
use forms_types::QueryKey;

use super::{keys, Choice, Screen};
use crate::api::save_record;
use crate::{AdminApi, FormsConfig, ModalTarget, ReferenceKind, Resource};

pub const SAVE: &str = "Enregistrement de l'équipement";

pub fn graph(_config: &FormsConfig) -> FieldDependencyGraph {
    FieldDependencyGraph::new(vec![
        DependencyRule::on("famille").resets("sous_famille"),
        DependencyRule::on("site").resets("zone"),
    ])
}

pub fn plan(api: Arc<dyn AdminApi>, target: &ModalTarget) -> SubmissionPlan {
    SubmissionPlan::new("Équipement")
        .validate(ValidationRule::required("code", "Le code est obligatoire"))
        .validate(ValidationRule::required("designation", "La désignation est obligatoire"))
        .validate(ValidationRule::required("famille", "La famille est obligatoire"))
        .phase(SubmissionPhase::new(
            1,
            SAVE,
            save_record(api, Resource::Equipment, target.id().map(String::from)),
        ))
}

pub fn affected_keys() -> Vec<QueryKey> {
    keys(&["equipements"])
}

pub struct Equipment;

impl Screen for Equipment {
    fn name(&self) -> &'static str {
        "equipment"
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
            Choice::of("famille", ReferenceKind::Familles),
            Choice::of("sous_famille", ReferenceKind::SousFamilles).under("famille"),
            Choice::of("site", ReferenceKind::Sites),
            Choice::of("zone", ReferenceKind::Zones).under("site"),
        ]
    }
}
