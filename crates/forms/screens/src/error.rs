//! Error types for screens and configuration.

use forms_submission::SubmissionError;
use forms_types::PermissionError;
use thiserror::Error;

/// Errors loading or validating [`crate::FormsConfig`].
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("cannot read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Errors from a modal session.
#[derive(Error, Debug)]
pub enum ScreenError {
    #[error(transparent)]
    Submission(#[from] SubmissionError),

    #[error(transparent)]
    Permission(#[from] PermissionError),

    #[error("screen {screen} cannot save target {target:?}")]
    NotSubmittable {
        screen: &'static str,
        target: crate::ModalTarget,
    },

    #[error("field {0} cannot be saved on its own on this screen")]
    NotCommittable(String),

    #[error("submission task failed: {0}")]
    Task(String),
}

/// Result type for screen operations.
pub type Result<T> = std::result::Result<T, ScreenError>;
