//! # Registry Errors
//!
//! Registration itself never fails: duplicates and absent removals are no-ops.
//! The only failure is naming an extension point that does not exist.

/// Errors raised when addressing the [`Environment`](crate::Environment) by name.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum EnvironmentError {
    #[error("Unknown preference set: {path}")]
    UnknownSet { path: String },
}
