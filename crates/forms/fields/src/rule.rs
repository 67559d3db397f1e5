use std::sync::Arc;

use forms_types::FieldValue;

use crate::FieldState;

/// Pure function from (trigger value, state after resets) to the derived
/// field/value pairs it produces.
pub type Derivation = Arc<dyn Fn(&FieldValue, &FieldState) -> Vec<(String, FieldValue)> + Send + Sync>;

/// A field to clear and the value it is cleared to.
#[derive(Clone, Debug, PartialEq)]
pub struct Reset {
    pub field: String,
    pub empty: FieldValue,
}

/// Declarative dependency of other fields on one trigger field.
///
/// ```ignore
/// DependencyRule::on("role").resets("poste").resets("departement");
/// DependencyRule::on("cin").derive(derive::lowercase_with_domain("email", "testindustrielle.com"));
/// ```
#[derive(Clone)]
pub struct DependencyRule {
    trigger: String,
    resets: Vec<Reset>,
    derive: Option<Derivation>,
}

impl DependencyRule {
    pub fn on(trigger: impl Into<String>) -> Self {
        Self {
            trigger: trigger.into(),
            resets: Vec::new(),
            derive: None,
        }
    }

    /// Clear `field` to empty text when the trigger changes.
    pub fn resets(self, field: impl Into<String>) -> Self {
        self.resets_to(field, FieldValue::empty())
    }

    /// Clear `field` to a specific empty value (e.g. `Flag(false)`).
    pub fn resets_to(mut self, field: impl Into<String>, empty: FieldValue) -> Self {
        self.resets.push(Reset {
            field: field.into(),
            empty,
        });
        self
    }

    pub fn derive<F>(mut self, f: F) -> Self
    where
        F: Fn(&FieldValue, &FieldState) -> Vec<(String, FieldValue)> + Send + Sync + 'static,
    {
        self.derive = Some(Arc::new(f));
        self
    }

    pub fn trigger(&self) -> &str {
        &self.trigger
    }

    pub fn reset_fields(&self) -> &[Reset] {
        &self.resets
    }

    pub fn has_derivation(&self) -> bool {
        self.derive.is_some()
    }

    pub(crate) fn derivation(&self) -> Option<&Derivation> {
        self.derive.as_ref()
    }
}

impl std::fmt::Debug for DependencyRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DependencyRule")
            .field("trigger", &self.trigger)
            .field("resets", &self.resets)
            .field("derive", &self.derive.is_some())
            .finish()
    }
}
