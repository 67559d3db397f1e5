//! Personnel management: create and edit user accounts.

use std::sync::Arc;

use forms_fields::{derive, DependencyRule, FieldDependencyGraph};
use forms_submission::{SubmissionPhase, SubmissionPlan, ValidationRule};
use forms_types::QueryKey;

use super::{keys, Choice, Screen};
use crate::api::save_record;
use crate::{AdminApi, FormsConfig, ModalTarget, ReferenceKind, Resource};

pub const SAVE: &str = "Enregistrement de l'utilisateur";

pub(crate) const IDENTITY_FIELDS: &[&str] = &["nom", "prenom", "cin", "email", "telephone"];

const RECORD_FIELDS: &[&str] = &[
    "nom",
    "prenom",
    "cin",
    "email",
    "telephone",
    "role",
    "poste",
    "departement",
];

pub fn graph(config: &FormsConfig) -> FieldDependencyGraph {
    FieldDependencyGraph::new(vec![
        DependencyRule::on("cin").derive(derive::lowercase_with_domain(
            "email",
            config.email_domain.trim(),
        )),
        DependencyRule::on("role").resets("poste").resets("departement"),
        DependencyRule::on("poste").resets("departement"),
    ])
}

/// Creating an account also sets its password; editing never touches it.
pub fn plan(api: Arc<dyn AdminApi>, target: &ModalTarget) -> SubmissionPlan {
    let plan = SubmissionPlan::new("Utilisateur")
        .validate(ValidationRule::required("nom", "Le nom est obligatoire"))
        .validate(ValidationRule::required("prenom", "Le prénom est obligatoire"))
        .validate(ValidationRule::required("cin", "Le CIN est obligatoire"))
        .validate(ValidationRule::required("role", "Le rôle est obligatoire"));

    match target.id() {
        Some(id) => plan.phase(
            SubmissionPhase::new(1, SAVE, save_record(api, Resource::Users, Some(id.to_string())))
                .with_fields(RECORD_FIELDS.iter().copied()),
        ),
        None => plan
            .validate(ValidationRule::required("password", "Le mot de passe est obligatoire"))
            .validate(ValidationRule::matches(
                "password",
                "confirm_password",
                "Les mots de passe ne correspondent pas",
            ))
            .phase(
                SubmissionPhase::new(1, SAVE, save_record(api, Resource::Users, None))
                    .with_fields(RECORD_FIELDS.iter().copied().chain(["password"])),
            ),
    }
}

pub fn affected_keys() -> Vec<QueryKey> {
    keys(&["users"])
}

pub struct Users;

impl Screen for Users {
    fn name(&self) -> &'static str {
        "users"
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
            Choice::of("role", ReferenceKind::Roles),
            Choice::of("poste", ReferenceKind::Postes).under("role"),
            Choice::of("departement", ReferenceKind::Departements).under("poste"),
        ]
    }

    fn identity_fields(&self) -> &'static [&'static str] {
        IDENTITY_FIELDS
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use forms_fields::FieldState;

    #[test]
    fn role_change_clears_poste_and_departement() {
        let graph = graph(&FormsConfig::default());
        let state = FieldState::from_pairs([
            ("role", "technicien"),
            ("poste", "metrologue"),
            ("departement", "qualite"),
        ]);

        let state = graph.apply(&state, "role", "responsable".into());

        assert_eq!(state.text("poste"), "");
        assert_eq!(state.text("departement"), "");

        let state = graph.apply(&state, "poste", "chef_atelier".into());
        let state = graph.apply(&state, "departement", "production".into());
        let state = graph.apply(&state, "poste", "chef_atelier".into());

        assert_eq!(state.text("role"), "responsable");
        assert_eq!(state.text("poste"), "chef_atelier");
        assert_eq!(state.text("departement"), "");
    }

    #[test]
    fn create_requires_matching_password() {
        let api: Arc<dyn AdminApi> = Arc::new(crate::mocks::MockAdminApi::new());
        assert_eq!(plan(api.clone(), &ModalTarget::Create).rules().len(), 6);
        assert_eq!(plan(api, &ModalTarget::edit("u1")).rules().len(), 4);
    }
}
