use std::collections::BTreeSet;

use forms_types::Capability;
use tracing::debug;

/// Maps role names to capabilities.
///
/// Only roles listed as full-access may write; every other role, including
/// unknown and empty ones, is read-only.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RoleClassifier {
    full_access: BTreeSet<String>,
}

impl RoleClassifier {
    pub fn new<I, S>(full_access_roles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            full_access: full_access_roles
                .into_iter()
                .map(|r| normalize(r.as_ref()))
                .filter(|r| !r.is_empty())
                .collect(),
        }
    }

    pub fn classify(&self, role: &str) -> Capability {
        let capability = if self.full_access.contains(&normalize(role)) {
            Capability::FullAccess
        } else {
            Capability::ReadOnly
        };
        debug!(role, capability = %capability, "Role classified");
        capability
    }
}

impl Default for RoleClassifier {
    fn default() -> Self {
        Self::new(["admin", "responsable"])
    }
}

fn normalize(role: &str) -> String {
    role.trim().to_lowercase()
}
