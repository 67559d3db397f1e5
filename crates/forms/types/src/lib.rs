//! Shared vocabulary for the EquipDesk form core.
//!
//! Every other `forms-*` crate speaks in these types: field values held in
//! form state, the caller's capability, the terminal result of a submission
//! attempt, and the records exchanged with the cache and session stores.

#![deny(unsafe_code)]

mod capability;
mod error;
mod identity;
mod result;
mod value;

pub use capability::Capability;
pub use error::{PermissionError, RemoteError};
pub use identity::{IdentityPatch, IdentityRecord, QueryKey};
pub use result::{Outcome, PhaseRef, SubmissionResult, ValidationIssue};
pub use value::FieldValue;
