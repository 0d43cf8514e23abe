//! Error types for the SES stack compiler.
//!
//! Compilation has exactly two failure classes: the input violates its own
//! schema (aggregated [`ValidationError`]), or a feature was requested that
//! needs an external reference the caller did not supply. There is no partial
//! success and no retry; the caller receives either a complete graph or a
//! complete list of reasons.

use thiserror::Error;

pub use crate::config::{ValidationError, ValidationIssue};

/// Top-level error for a compilation run.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CompileError {
    /// The raw configuration violated one or more constraints.
    ///
    /// All violations are collected before reporting; see
    /// [`ValidationError::issues`].
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// A required external reference is missing for a requested feature.
    ///
    /// Raised when `manage_dns_records` is set but no hosted-zone identifier
    /// was supplied by the outer scaffold.
    #[error("Configuration error: {message}")]
    Configuration {
        /// Description of the missing reference.
        message: String,
    },
}

impl CompileError {
    /// Returns the collected validation issues, if this is a validation error.
    pub fn validation_issues(&self) -> Option<&[ValidationIssue]> {
        match self {
            CompileError::Validation(err) => Some(&err.issues),
            _ => None,
        }
    }
}
