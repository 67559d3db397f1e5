//! Errors that stop a submission before it produces a result.

use forms_types::PermissionError;
use thiserror::Error;

/// Reasons a run is refused outright.
///
/// Validation and remote failures are not errors here: they are terminal
/// outcomes carried in [`forms_types::SubmissionResult`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SubmissionError {
    /// The caller may not write.
    #[error(transparent)]
    Permission(#[from] PermissionError),

    /// Another submission on the same form has not finished yet.
    #[error("a submission is already in progress for this form")]
    InFlight,
}

/// Result type for submission operations.
pub type Result<T> = std::result::Result<T, SubmissionError>;
