use std::collections::BTreeMap;

use forms_types::FieldValue;
use serde::{Deserialize, Serialize};

/// Flat mapping from field name to value for one open form.
///
/// Writes after construction go through [`crate::FieldDependencyGraph`] so
/// cascades and derivations are never bypassed.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldState {
    values: BTreeMap<String, FieldValue>,
}

impl FieldState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Initial state for a form, e.g. loaded from the record being edited.
    pub fn from_pairs<K, V, I>(pairs: I) -> Self
    where
        K: Into<String>,
        V: Into<FieldValue>,
        I: IntoIterator<Item = (K, V)>,
    {
        Self {
            values: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    pub fn get(&self, field: &str) -> Option<&FieldValue> {
        self.values.get(field)
    }

    /// Text view of a field; missing and non-text fields read as `""`
    /// unless they render to text.
    pub fn text(&self, field: &str) -> String {
        self.values
            .get(field)
            .map(|v| v.to_string())
            .unwrap_or_default()
    }

    /// Missing or blank.
    pub fn is_blank(&self, field: &str) -> bool {
        self.values.get(field).map_or(true, FieldValue::is_empty)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.values.contains_key(field)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Copy of the named fields only. Unknown names are ignored.
    pub fn subset<S: AsRef<str>>(&self, fields: &[S]) -> FieldState {
        let values = fields
            .iter()
            .filter_map(|f| {
                let f = f.as_ref();
                self.values.get(f).map(|v| (f.to_string(), v.clone()))
            })
            .collect();
        FieldState { values }
    }

    /// JSON object payload for a remote call.
    pub fn to_json(&self) -> serde_json::Value {
        let map = self
            .values
            .iter()
            .map(|(k, v)| (k.clone(), v.to_json()))
            .collect();
        serde_json::Value::Object(map)
    }

    pub(crate) fn set(&mut self, field: &str, value: FieldValue) {
        self.values.insert(field.to_string(), value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> FieldState {
        FieldState::from_pairs([("nom", "Ben Ali"), ("cin", "Z1234"), ("poste", "")])
    }

    #[test]
    fn blank_and_missing_fields() {
        let state = sample();
        assert!(!state.is_blank("nom"));
        assert!(state.is_blank("poste"));
        assert!(state.is_blank("absent"));
        assert_eq!(state.text("absent"), "");
    }

    #[test]
    fn subset_keeps_only_named_fields() {
        let subset = sample().subset(&["nom", "inconnu"]);
        assert_eq!(subset.len(), 1);
        assert_eq!(subset.text("nom"), "Ben Ali");
    }

    #[test]
    fn json_payload_is_flat_object() {
        let json = sample().to_json();
        assert_eq!(json["cin"], "Z1234");
        assert_eq!(json["poste"], "");
    }
}
