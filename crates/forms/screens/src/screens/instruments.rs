//! Measuring instruments and their calibration schedule.

use std::sync::Arc;

use forms_fields::{derive, DependencyRule, FieldDependencyGraph};
use forms_submission::{SubmissionPhase, SubmissionPlan, ValidationRule};
use forms_types::QueryKey;

use super::{keys, Screen};
use crate::api::save_record;
use crate::{AdminApi, FormsConfig, ModalTarget, Resource};

pub const SAVE: &str = "Enregistrement de l'instrument";

/// `prochaine_calibration` follows both the last calibration date and the
/// period in months.
pub fn graph(_config: &FormsConfig) -> FieldDependencyGraph {
    let next_due = || {
        derive::due_date(
            "prochaine_calibration",
            "derniere_calibration",
            "periodicite_mois",
        )
    };
    FieldDependencyGraph::new(vec![
        DependencyRule::on("derniere_calibration").derive(next_due()),
        DependencyRule::on("periodicite_mois").derive(next_due()),
    ])
}

pub fn plan(api: Arc<dyn AdminApi>, target: &ModalTarget) -> SubmissionPlan {
    SubmissionPlan::new("Instrument")
        .validate(ValidationRule::required("reference", "La référence est obligatoire"))
        .validate(ValidationRule::required("designation", "La désignation est obligatoire"))
        .phase(SubmissionPhase::new(
            1,
            SAVE,
            save_record(api, Resource::Instruments, target.id().map(String::from)),
        ))
}

pub fn affected_keys() -> Vec<QueryKey> {
    keys(&["instruments"])
}

pub struct Instruments;

impl Screen for Instruments {
    fn name(&self) -> &'static str {
        "instruments"
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
}
