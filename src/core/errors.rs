//! Shared error types for the application

use thiserror::Error;

/// Fatal errors surfaced to the caller.
///
/// Only pattern and configuration problems abort a filtering run, and both
/// are raised while the rule set is being normalized, before any pass has
/// touched the registry.
#[derive(Debug, Error)]
pub enum FilterError {
    /// A raw configuration value could not be parsed into a type pattern
    #[error("malformed type pattern `{pattern}`: {reason}")]
    MalformedPattern { pattern: String, reason: String },

    /// Configuration file errors
    #[error("configuration error: {0}")]
    Config(String),

    /// IO errors
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// JSON errors
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl FilterError {
    /// Create a malformed-pattern error, rendering the offending value.
    pub fn malformed(pattern: impl ToString, reason: impl Into<String>) -> Self {
        Self::MalformedPattern {
            pattern: pattern.to_string(),
            reason: reason.into(),
        }
    }
}

/// Recoverable signal from a canonicalizer: the type cannot be resolved.
///
/// Consumed by the auto-skip pass to decide removals; never propagated as a
/// hard failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown type `{0}`")]
pub struct UnknownType(pub String);
