//! Reference data behind select inputs.
//!
//! Providers only list records. Which field's value filters which list is
//! declared by each screen's [`Choice`](crate::Choice)s, and clearing
//! dependent selections is the dependency graph's job.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReferenceKind {
    Roles,
    Postes,
    Departements,
    Familles,
    SousFamilles,
    Sites,
    Zones,
    Equipements,
    Instruments,
}

/// One selectable option.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferenceRecord {
    pub id: String,
    pub label: String,
    /// Id of the record in the governing list (e.g. the role of a poste).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<String>,
}

impl ReferenceRecord {
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            parent: None,
        }
    }

    pub fn child_of(mut self, parent: impl Into<String>) -> Self {
        self.parent = Some(parent.into());
        self
    }
}

pub trait ReferenceDataProvider: Send + Sync {
    /// Records of `kind` in display order, restricted to children of
    /// `parent` when given.
    fn list(&self, kind: ReferenceKind, parent: Option<&str>) -> Vec<ReferenceRecord>;
}

/// Fixed in-memory reference lists.
#[derive(Clone, Debug, Default)]
pub struct StaticReferenceData {
    lists: BTreeMap<ReferenceKind, Vec<ReferenceRecord>>,
}

impl StaticReferenceData {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `record` to the `kind` list. Insertion order is display order.
    pub fn with(mut self, kind: ReferenceKind, record: ReferenceRecord) -> Self {
        self.lists.entry(kind).or_default().push(record);
        self
    }

    /// Roles, postes and departements of the personnel screen.
    pub fn personnel() -> Self {
        use ReferenceKind::*;
        Self::new()
            .with(Roles, ReferenceRecord::new("admin", "Administrateur"))
            .with(Roles, ReferenceRecord::new("responsable", "Responsable"))
            .with(Roles, ReferenceRecord::new("technicien", "Technicien"))
            .with(Postes, ReferenceRecord::new("chef_atelier", "Chef d'atelier").child_of("responsable"))
            .with(Postes, ReferenceRecord::new("metrologue", "Métrologue").child_of("technicien"))
            .with(Postes, ReferenceRecord::new("operateur", "Opérateur").child_of("technicien"))
            .with(Departements, ReferenceRecord::new("production", "Production").child_of("chef_atelier"))
            .with(Departements, ReferenceRecord::new("qualite", "Qualité").child_of("metrologue"))
            .with(Departements, ReferenceRecord::new("maintenance", "Maintenance").child_of("operateur"))
    }
}

impl ReferenceDataProvider for StaticReferenceData {
    fn list(&self, kind: ReferenceKind, parent: Option<&str>) -> Vec<ReferenceRecord> {
        self.lists
            .get(&kind)
            .map(|records| {
                records
                    .iter()
                    .filter(|r| parent.map_or(true, |p| r.parent.as_deref() == Some(p)))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn list_filters_by_parent() {
        let data = StaticReferenceData::personnel();
        let postes: Vec<_> = data
            .list(ReferenceKind::Postes, Some("technicien"))
            .into_iter()
            .map(|r| r.id)
            .collect();
        assert_eq!(postes, vec!["metrologue", "operateur"]);
        assert_eq!(data.list(ReferenceKind::Postes, None).len(), 3);
    }

    #[test]
    fn unknown_kind_is_empty() {
        let data = StaticReferenceData::personnel();
        assert!(data.list(ReferenceKind::Zones, None).is_empty());
        assert!(data.list(ReferenceKind::Postes, Some("admin")).is_empty());
    }
}
