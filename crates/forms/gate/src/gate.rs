use forms_types::{Capability, PermissionError};
use tracing::warn;

/// What a write attempt was aimed at. Only used for logging: the verdict and
/// the error never depend on it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MutationTarget {
    Field(String),
    Submission(String),
}

impl std::fmt::Display for MutationTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MutationTarget::Field(name) => write!(f, "field {}", name),
            MutationTarget::Submission(label) => write!(f, "submission {}", label),
        }
    }
}

/// Capability check bound to one caller.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PermissionGate {
    capability: Capability,
}

impl PermissionGate {
    pub fn new(capability: Capability) -> Self {
        Self { capability }
    }

    pub fn capability(&self) -> Capability {
        self.capability
    }

    /// Pure predicate over a capability.
    pub fn can_mutate(capability: Capability) -> bool {
        capability.allows_mutation()
    }

    /// Fails with [`PermissionError`] unless `capability` may mutate.
    pub fn assert_mutable(capability: Capability) -> Result<(), PermissionError> {
        if Self::can_mutate(capability) {
            Ok(())
        } else {
            Err(PermissionError { capability })
        }
    }

    /// Check the bound caller before a write to `target`.
    pub fn check(&self, target: &MutationTarget) -> Result<(), PermissionError> {
        Self::assert_mutable(self.capability).inspect_err(|_| {
            warn!(
                capability = %self.capability,
                target = %target,
                "Write rejected by permission gate"
            );
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn any_target() -> impl Strategy<Value = MutationTarget> {
        prop_oneof![
            "[a-z_]{1,16}".prop_map(MutationTarget::Field),
            "[A-Za-z ]{1,24}".prop_map(MutationTarget::Submission),
        ]
    }

    #[test]
    fn predicate_matches_capability() {
        assert!(PermissionGate::can_mutate(Capability::FullAccess));
        assert!(!PermissionGate::can_mutate(Capability::ReadOnly));
    }

    #[test]
    fn read_only_error_carries_capability() {
        let err = PermissionGate::assert_mutable(Capability::ReadOnly).unwrap_err();
        assert_eq!(err.capability, Capability::ReadOnly);
    }

    proptest! {
        #[test]
        fn read_only_is_rejected_identically(a in any_target(), b in any_target()) {
            let gate = PermissionGate::new(Capability::ReadOnly);
            let first = gate.check(&a).unwrap_err();
            let second = gate.check(&b).unwrap_err();
            prop_assert_eq!(first, second);
        }

        #[test]
        fn full_access_always_passes(target in any_target()) {
            let gate = PermissionGate::new(Capability::FullAccess);
            prop_assert!(gate.check(&target).is_ok());
        }
    }
}
