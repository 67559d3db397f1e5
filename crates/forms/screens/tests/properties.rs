mod common;

use std::sync::Arc;

use common::harness;
use forms_fields::FieldState;
use forms_screens::mocks::MockAdminApi;
use forms_screens::screens::{self, profile, users};
use forms_screens::{FormsConfig, ModalContext, ModalSession, ModalTarget, ScreenError};
use forms_types::Capability;
use proptest::prelude::*;

fn config_with_domain(domain: &str) -> FormsConfig {
    FormsConfig {
        email_domain: domain.to_string(),
        ..FormsConfig::default()
    }
}

proptest! {
    #[test]
    fn email_is_lowercased_cin_at_domain(cin in "\\PC{1,12}", domain in "[a-z]{2,10}\\.(tn|com)") {
        let config = config_with_domain(&domain);
        for graph in [users::graph(&config), profile::graph(&config)] {
            let state = graph.apply(&FieldState::new(), "cin", cin.as_str().into());
            prop_assert_eq!(state.text("email"), format!("{}@{}", cin.to_lowercase(), domain));

            let cleared = graph.apply(&state, "cin", "".into());
            prop_assert_eq!(cleared.text("email"), "");
        }
    }

    #[test]
    fn role_change_resets_dependents(role in "[a-z]{1,10}", poste in "[a-z]{1,10}", dept in "[a-z]{1,10}") {
        let graph = users::graph(&FormsConfig::default());
        let state = FieldState::from_pairs([
            ("role", "admin"),
            ("poste", poste.as_str()),
            ("departement", dept.as_str()),
        ]);

        let after_role = graph.apply(&state, "role", role.as_str().into());
        prop_assert_eq!(after_role.text("role"), role.clone());
        prop_assert!(after_role.is_blank("poste"));
        prop_assert!(after_role.is_blank("departement"));

        let after_poste = graph.apply(&state, "poste", poste.as_str().into());
        prop_assert_eq!(after_poste.text("role"), "admin");
        prop_assert_eq!(after_poste.text("poste"), poste.clone());
        prop_assert!(after_poste.is_blank("departement"));
    }

    #[test]
    fn read_only_inline_edit_is_always_refused(field in "[a-z_]{1,16}", value in ".{0,12}", screen_index in 0usize..6) {
        let h = harness(MockAdminApi::new(), FormsConfig::default());
        let screen = screens::all().swap_remove(screen_index);
        let initial = FieldState::from_pairs([("statut", "ouverte")]);
        let mut modal = ModalSession::open(
            screen,
            ModalContext::new(ModalTarget::edit("x"), Capability::ReadOnly),
            h.services.clone(),
            initial.clone(),
        );

        let result = modal.commit_field(&field, value.as_str());

        prop_assert!(matches!(result, Err(ScreenError::Permission(_))));
        prop_assert_eq!(modal.state(), &initial);
        prop_assert_eq!(h.api.call_count(), 0);
    }
}

#[test]
fn every_screen_opens_with_its_own_graph() {
    let h = harness(MockAdminApi::new(), FormsConfig::default());
    for screen in screens::all() {
        let name = screen.name();
        let modal = ModalSession::open(
            Arc::clone(&screen),
            ModalContext::new(ModalTarget::Create, Capability::FullAccess),
            h.services.clone(),
            FieldState::new(),
        );
        assert!(modal.state().is_empty(), "{}", name);
        assert!(!modal.is_submitting(), "{}", name);
    }
}
