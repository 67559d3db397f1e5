use serde::{Deserialize, Serialize};

/// Coarse permission classification of a caller.
///
/// The set is closed: a role that is not explicitly full-access is read-only.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Capability {
    /// May observe and navigate, never write.
    ReadOnly,
    /// May submit and commit field edits.
    FullAccess,
}

impl Capability {
    pub fn allows_mutation(&self) -> bool {
        matches!(self, Capability::FullAccess)
    }
}

impl std::fmt::Display for Capability {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Capability::ReadOnly => f.write_str("read-only"),
            Capability::FullAccess => f.write_str("full-access"),
        }
    }
}
