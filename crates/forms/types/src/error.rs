use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::Capability;

/// Failure reported by a remote call.
///
/// The transport cause is deliberately erased: a timeout, a 500 and a
/// rejected payload all surface the same way to the orchestrator.
#[derive(Error, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[error("remote call failed: {}", .message.as_deref().unwrap_or("no server message"))]
pub struct RemoteError {
    /// Message provided by the server, if any.
    pub message: Option<String>,
}

impl RemoteError {
    pub fn new(message: impl Into<String>) -> Self {
        let message = message.into();
        Self {
            message: if message.trim().is_empty() {
                None
            } else {
                Some(message)
            },
        }
    }

    /// A failure that carries no server message.
    pub fn silent() -> Self {
        Self { message: None }
    }

    /// Server message when present, `fallback` otherwise.
    pub fn message_or(&self, fallback: &str) -> String {
        self.message
            .clone()
            .unwrap_or_else(|| fallback.to_string())
    }
}

/// A mutation was attempted without the capability to perform it.
///
/// The error carries only the capability so that every rejected write path
/// reads the same, whichever field or phase triggered it.
#[derive(Error, Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[error("permission denied: {capability} callers cannot modify records")]
pub struct PermissionError {
    pub capability: Capability,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_server_message_is_dropped() {
        assert_eq!(RemoteError::new("  "), RemoteError::silent());
        assert_eq!(RemoteError::new("").message_or("Erreur"), "Erreur");
    }

    #[test]
    fn server_message_is_preferred() {
        let err = RemoteError::new("CIN déjà utilisé");
        assert_eq!(err.message_or("Erreur"), "CIN déjà utilisé");
    }

    #[test]
    fn permission_error_message_is_target_independent() {
        let err = PermissionError {
            capability: Capability::ReadOnly,
        };
        assert_eq!(
            err.to_string(),
            "permission denied: read-only callers cannot modify records"
        );
    }
}
