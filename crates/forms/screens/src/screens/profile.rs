//! The signed-in user's own profile.
//!
//! Saving runs two phases against two endpoints: the identity update, then,
//! only when a new password was typed, the credential change. If the second
//! fails the first stays applied and the failure names the credential phase.

use std::sync::Arc;

use forms_fields::{derive, DependencyRule, FieldDependencyGraph};
use forms_submission::{guards, SubmissionPhase, SubmissionPlan, ValidationRule};
use forms_types::QueryKey;

use super::users::IDENTITY_FIELDS;
use super::{keys, Screen};
use crate::api::{change_credential, save_record};
use crate::{AdminApi, FormsConfig, ModalTarget, Resource};

pub const UPDATE_PROFILE: &str = "Mise à jour du profil";
pub const CHANGE_CREDENTIAL: &str = "Changement du mot de passe";

pub fn graph(config: &FormsConfig) -> FieldDependencyGraph {
    FieldDependencyGraph::new(vec![DependencyRule::on("cin").derive(
        derive::lowercase_with_domain("email", config.email_domain.trim()),
    )])
}

/// `target` is the signed-in user's own record. There is nothing to save
/// for [`ModalTarget::Create`].
pub fn plan(api: Arc<dyn AdminApi>, target: &ModalTarget) -> Option<SubmissionPlan> {
    let id = target.id()?.to_string();

    let plan = SubmissionPlan::new("Profil")
        .success_message("Profil mis à jour")
        .validate(ValidationRule::required("nom", "Le nom est obligatoire"))
        .validate(ValidationRule::required("prenom", "Le prénom est obligatoire"))
        .phase(
            SubmissionPhase::new(1, UPDATE_PROFILE, save_record(api.clone(), Resource::Users, Some(id.clone())))
                .with_fields(IDENTITY_FIELDS.iter().copied()),
        )
        .phase(
            SubmissionPhase::new(2, CHANGE_CREDENTIAL, change_credential(api, id))
                .guarded_by(guards::filled("new_password"))
                .precondition(ValidationRule::required(
                    "current_password",
                    "Le mot de passe actuel est obligatoire",
                ))
                .precondition(ValidationRule::matches(
                    "new_password",
                    "confirm_password",
                    "Les mots de passe ne correspondent pas",
                ))
                .with_fields(["current_password", "new_password"]),
        );
    Some(plan)
}

pub fn affected_keys() -> Vec<QueryKey> {
    keys(&["users", "profile"])
}

pub struct Profile;

impl Screen for Profile {
    fn name(&self) -> &'static str {
        "profile"
    }

    fn graph(&self, config: &FormsConfig) -> FieldDependencyGraph {
        graph(config)
    }

    fn plan(&self, api: Arc<dyn AdminApi>, target: &ModalTarget) -> Option<SubmissionPlan> {
        plan(api, target)
    }

    fn affected_keys(&self) -> Vec<QueryKey> {
        affected_keys()
    }

    fn identity_fields(&self) -> &'static [&'static str] {
        IDENTITY_FIELDS
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mocks::MockAdminApi;

    #[test]
    fn credential_phase_is_second_and_guarded() {
        let plan = plan(Arc::new(MockAdminApi::new()), &ModalTarget::edit("u1")).unwrap();
        let phases = plan.phases();

        assert_eq!(phases.len(), 2);
        assert_eq!(phases[0].label(), UPDATE_PROFILE);
        assert!(!phases[0].is_guarded());
        assert_eq!(phases[1].label(), CHANGE_CREDENTIAL);
        assert!(phases[1].is_guarded());
    }

    #[test]
    fn create_target_has_no_plan() {
        assert!(plan(Arc::new(MockAdminApi::new()), &ModalTarget::Create).is_none());
    }
}
