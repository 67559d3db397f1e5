//! Permission gate for every write path of a form.
//!
//! The gate is built once per modal with the caller's [`Capability`] and is
//! consulted before any remote effect: submissions and field edits that reach
//! the server. Read-only callers may still open forms and edit local state.
//!
//! [`Capability`]: forms_types::Capability

#![deny(unsafe_code)]

mod classifier;
mod gate;

pub use classifier::RoleClassifier;
pub use gate::{MutationTarget, PermissionGate};
