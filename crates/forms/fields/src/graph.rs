use forms_types::FieldValue;
use tracing::{debug, trace};

use crate::{DependencyRule, FieldState};

/// Ordered, immutable set of dependency rules for one screen.
#[derive(Clone, Debug, Default)]
pub struct FieldDependencyGraph {
    rules: Vec<DependencyRule>,
}

impl FieldDependencyGraph {
    pub fn new(rules: Vec<DependencyRule>) -> Self {
        debug!(
            rules = rules.len(),
            derivations = rules.iter().filter(|r| r.has_derivation()).count(),
            "Dependency graph declared"
        );
        Self { rules }
    }

    pub fn rules(&self) -> &[DependencyRule] {
        &self.rules
    }

    /// Rules fired by a change to `field`, in declaration order.
    pub fn rules_for<'a>(&'a self, field: &'a str) -> impl Iterator<Item = &'a DependencyRule> + 'a {
        self.rules.iter().filter(move |r| r.trigger() == field)
    }

    /// Set `field` to `value` and run every rule it triggers.
    ///
    /// For each matching rule, in declaration order, the rule's resets are
    /// applied and then its derivation runs against the state after those
    /// resets; derived values overwrite resets of the same key. Resets do not
    /// cascade: clearing `poste` here does not fire rules triggered by
    /// `poste`. Derivations run even when `value` is empty so derived fields
    /// are cleared along with their source.
    pub fn apply(&self, state: &FieldState, field: &str, value: FieldValue) -> FieldState {
        let mut next = state.clone();
        next.set(field, value.clone());

        for rule in self.rules_for(field) {
            for reset in rule.reset_fields() {
                next.set(&reset.field, reset.empty.clone());
            }

            if let Some(derive) = rule.derivation() {
                for (derived_field, derived_value) in derive(&value, &next) {
                    next.set(&derived_field, derived_value);
                }
            }
        }

        trace!(field, "Field change applied");
        next
    }

    /// Fold [`apply`](Self::apply) over several changes in order.
    pub fn apply_all<I>(&self, state: &FieldState, changes: I) -> FieldState
    where
        I: IntoIterator<Item = (String, FieldValue)>,
    {
        changes
            .into_iter()
            .fold(state.clone(), |acc, (field, value)| self.apply(&acc, &field, value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::derive;

    fn personnel_graph() -> FieldDependencyGraph {
        FieldDependencyGraph::new(vec![
            DependencyRule::on("cin").derive(derive::lowercase_with_domain(
                "email",
                "testindustrielle.com",
            )),
            DependencyRule::on("role").resets("poste").resets("departement"),
            DependencyRule::on("poste").resets("departement"),
        ])
    }

    fn filled() -> FieldState {
        FieldState::from_pairs([
            ("role", "technicien"),
            ("poste", "controleur"),
            ("departement", "qualite"),
            ("cin", "A1"),
            ("email", "a1@testindustrielle.com"),
        ])
    }

    #[test]
    fn identifier_derives_email() {
        let graph = personnel_graph();
        let state = graph.apply(&FieldState::new(), "cin", "Z1234".into());
        assert_eq!(state.text("email"), "z1234@testindustrielle.com");

        let cleared = graph.apply(&state, "cin", "".into());
        assert_eq!(cleared.text("cin"), "");
        assert_eq!(cleared.text("email"), "");
    }

    #[test]
    fn role_change_resets_poste_and_departement() {
        let state = personnel_graph().apply(&filled(), "role", "admin".into());
        assert_eq!(state.text("role"), "admin");
        assert_eq!(state.text("poste"), "");
        assert_eq!(state.text("departement"), "");
        assert_eq!(state.text("cin"), "A1");
    }

    #[test]
    fn poste_change_resets_only_departement() {
        let state = personnel_graph().apply(&filled(), "poste", "magasinier".into());
        assert_eq!(state.text("role"), "technicien");
        assert_eq!(state.text("poste"), "magasinier");
        assert_eq!(state.text("departement"), "");
    }

    #[test]
    fn unrelated_field_touches_nothing_else() {
        let before = filled();
        let after = personnel_graph().apply(&before, "nom", "Ben Ali".into());
        assert_eq!(after.text("nom"), "Ben Ali");
        assert_eq!(after.subset(&["role", "poste", "departement", "cin", "email"]), before);
    }

    #[test]
    fn derivation_overwrites_reset_of_same_key() {
        let graph = FieldDependencyGraph::new(vec![DependencyRule::on("code")
            .resets("libelle")
            .derive(|value, _| vec![("libelle".to_string(), format!("EQ-{}", value).into())])]);

        let state = graph.apply(&FieldState::from_pairs([("libelle", "ancien")]), "code", "7".into());
        assert_eq!(state.text("libelle"), "EQ-7");
    }

    #[test]
    fn later_rule_sees_earlier_rule_resets() {
        let graph = FieldDependencyGraph::new(vec![
            DependencyRule::on("site").resets("zone"),
            DependencyRule::on("site").derive(|_, state| {
                vec![("zone_vide".to_string(), state.is_blank("zone").into())]
            }),
        ]);

        let state = graph.apply(&FieldState::from_pairs([("zone", "Z2")]), "site", "Sfax".into());
        assert_eq!(state.get("zone_vide"), Some(&FieldValue::Flag(true)));
    }

    #[test]
    fn apply_is_pure() {
        let graph = personnel_graph();
        let input = filled();
        let a = graph.apply(&input, "role", "admin".into());
        let b = graph.apply(&input, "role", "admin".into());
        assert_eq!(a, b);
        assert_eq!(input, filled());
    }

    #[test]
    fn apply_all_folds_in_order() {
        let graph = personnel_graph();
        let state = graph.apply_all(
            &filled(),
            vec![
                ("poste".to_string(), "magasinier".into()),
                ("role".to_string(), "admin".into()),
            ],
        );
        assert_eq!(state.text("poste"), "");
        assert_eq!(state.text("role"), "admin");
    }
}
