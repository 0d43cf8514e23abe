//! Validation error types for configuration normalization.

use thiserror::Error;

/// A single violated input constraint.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{field}: {message}")]
pub struct ValidationIssue {
    /// Dotted path of the offending field, e.g. `event_destinations[1].topic_arn`.
    pub field: String,
    /// Description of the violation.
    pub message: String,
}

impl ValidationIssue {
    /// Create a new issue.
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Aggregate of every constraint violated by a raw configuration.
///
/// Normalization collects all violations before reporting, so a caller sees
/// the complete list in one pass rather than fixing errors one at a time.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("configuration validation failed: {}", self.join())]
pub struct ValidationError {
    /// Every violated constraint, in discovery order.
    pub issues: Vec<ValidationIssue>,
}

impl ValidationError {
    /// Create a validation error from collected issues.
    pub fn new(issues: Vec<ValidationIssue>) -> Self {
        Self { issues }
    }

    /// True if any issue concerns the given field path.
    pub fn mentions(&self, field: &str) -> bool {
        self.issues.iter().any(|issue| issue.field == field)
    }

    fn join(&self) -> String {
        self.issues
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("; ")
    }
}
