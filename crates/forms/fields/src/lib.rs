//! Field state and the dependency graph that keeps it consistent.
//!
//! A screen declares its [`DependencyRule`]s once. Every edit then goes
//! through [`FieldDependencyGraph::apply`], which sets the edited field,
//! clears the fields that depend on it and recomputes derived fields.
//! `apply` is pure: it takes a state and returns a new one.

#![deny(unsafe_code)]

pub mod derive;
mod graph;
mod rule;
mod state;

pub use graph::FieldDependencyGraph;
pub use rule::{Derivation, DependencyRule, Reset};
pub use state::FieldState;
