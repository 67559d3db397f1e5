use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Key of a read cache entry (one list or lookup the UI fetches).
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct QueryKey(pub String);

impl QueryKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for QueryKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for QueryKey {
    fn from(key: &str) -> Self {
        Self(key.to_string())
    }
}

/// The process-wide session record describing the signed-in user.
///
/// Kept as a JSON object because the shape comes from the server and the
/// core only ever merges into it.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IdentityRecord(pub Map<String, Value>);

impl IdentityRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_value(value: Value) -> Self {
        match value {
            Value::Object(map) => Self(map),
            _ => Self::default(),
        }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn as_value(&self) -> Value {
        Value::Object(self.0.clone())
    }

    /// Shallow merge: keys present in `patch` overwrite, others are kept.
    pub fn merge(&mut self, patch: &IdentityPatch) {
        for (key, value) in &patch.0 {
            self.0.insert(key.clone(), value.clone());
        }
    }
}

/// Flat set of identity fields to merge into the session record after a
/// successful self-update.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IdentityPatch(pub Map<String, Value>);

impl IdentityPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn merge_overwrites_and_keeps_other_keys() {
        let mut record = IdentityRecord::from_value(json!({
            "_id": "u1",
            "nom": "Ben Ali",
            "role": "admin"
        }));
        let patch = IdentityPatch::new().with("nom", "Trabelsi").with("prenom", "Sami");

        record.merge(&patch);

        assert_eq!(record.get("_id"), Some(&json!("u1")));
        assert_eq!(record.get("nom"), Some(&json!("Trabelsi")));
        assert_eq!(record.get("prenom"), Some(&json!("Sami")));
        assert_eq!(record.get("role"), Some(&json!("admin")));
    }

    #[test]
    fn non_object_value_gives_empty_record() {
        let record = IdentityRecord::from_value(json!("nope"));
        assert_eq!(record, IdentityRecord::new());
    }
}
