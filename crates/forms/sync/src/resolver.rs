use std::sync::Arc;

use serde_json::Value;

/// Pulls a candidate identifier out of a JSON record.
pub type Extractor = Arc<dyn Fn(&Value) -> Option<String> + Send + Sync>;

/// Prioritized identifier lookup.
///
/// Records from different endpoints carry the user id in different places
/// (`_id`, `id`, or nested under `user`). Extractors are tried in order and
/// the first non-empty result wins.
#[derive(Clone)]
pub struct IdentityResolver {
    extractors: Vec<Extractor>,
}

impl IdentityResolver {
    /// A resolver with no extractors; resolves nothing.
    pub fn empty() -> Self {
        Self {
            extractors: Vec::new(),
        }
    }

    pub fn with(mut self, extractor: Extractor) -> Self {
        self.extractors.push(extractor);
        self
    }

    /// Add an extractor reading the value at `path` (object keys, outermost
    /// first). Strings and numbers are accepted.
    pub fn with_path(self, path: &[&str]) -> Self {
        let path: Vec<String> = path.iter().map(|s| s.to_string()).collect();
        self.with(Arc::new(move |record: &Value| {
            let value = path.iter().try_fold(record, |v, key| v.get(key))?;
            id_text(value)
        }))
    }

    pub fn len(&self) -> usize {
        self.extractors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.extractors.is_empty()
    }

    pub fn resolve(&self, record: &Value) -> Option<String> {
        self.extractors.iter().find_map(|extract| {
            extract(record)
                .map(|id| id.trim().to_string())
                .filter(|id| !id.is_empty())
        })
    }

    /// True when `target_id` is the id resolved from `record`.
    pub fn is_same(&self, record: &Value, target_id: &str) -> bool {
        let target = target_id.trim();
        !target.is_empty() && self.resolve(record).as_deref() == Some(target)
    }
}

impl Default for IdentityResolver {
    fn default() -> Self {
        Self::empty()
            .with_path(&["_id"])
            .with_path(&["id"])
            .with_path(&["user", "_id"])
            .with_path(&["user", "id"])
    }
}

impl std::fmt::Debug for IdentityResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IdentityResolver")
            .field("extractors", &self.extractors.len())
            .finish()
    }
}

fn id_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn default_chain_order() {
        let resolver = IdentityResolver::default();
        assert_eq!(resolver.resolve(&json!({ "_id": "a", "id": "b" })), Some("a".into()));
        assert_eq!(resolver.resolve(&json!({ "id": 7 })), Some("7".into()));
        assert_eq!(
            resolver.resolve(&json!({ "user": { "id": "c" } })),
            Some("c".into())
        );
        assert_eq!(resolver.resolve(&json!({ "nom": "x" })), None);
    }

    #[test]
    fn empty_values_fall_through() {
        let resolver = IdentityResolver::default();
        let record = json!({ "_id": "", "id": null, "user": { "_id": "u9" } });
        assert_eq!(resolver.resolve(&record), Some("u9".into()));
    }

    #[test]
    fn is_same_requires_non_empty_target() {
        let resolver = IdentityResolver::default();
        let record = json!({ "_id": "u1" });
        assert!(resolver.is_same(&record, "u1"));
        assert!(!resolver.is_same(&record, "u2"));
        assert!(!resolver.is_same(&json!({}), ""));
    }

    #[test]
    fn custom_extractor_takes_priority() {
        let resolver = IdentityResolver::empty()
            .with(Arc::new(|r: &Value| r.get("matricule").and_then(Value::as_str).map(String::from)))
            .with_path(&["_id"]);
        let record = json!({ "_id": "u1", "matricule": "M-7" });
        assert_eq!(resolver.resolve(&record), Some("M-7".into()));
    }
}
