//! EquipDesk administration forms.
//!
//! Each screen (personnel, own profile, equipment, instruments, tests,
//! non-conformities) is a table: dependency rules for its fields, a
//! submission plan built against the [`AdminApi`], and the cache keys a
//! successful save makes stale. A [`ModalSession`] binds one screen to one
//! open modal and runs its submissions in the background.

#![deny(unsafe_code)]

pub mod api;
pub mod config;
mod error;
pub mod logging;
pub mod mocks;
mod modal;
pub mod reference;
pub mod screens;

pub use api::{AdminApi, Resource};
pub use config::FormsConfig;
pub use error::{ConfigError, Result, ScreenError};
pub use modal::{FormsServices, ModalContext, ModalOutcome, ModalSession, ModalTarget, SubmissionHandle};
pub use reference::{ReferenceDataProvider, ReferenceKind, ReferenceRecord, StaticReferenceData};
pub use screens::{Choice, Screen};
