//! Errors raised while resolving and checking state transitions.

use std::fmt;
use thiserror::Error;

/// Which side of a transition a state was supplied for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StateRole {
    Current,
    Proposed,
}

impl fmt::Display for StateRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StateRole::Current => f.write_str("Current"),
            StateRole::Proposed => f.write_str("New"),
        }
    }
}

/// Errors that can occur when a state change is attempted.
///
/// None of these are transient: a denied transition is a business-rule
/// outcome and must be surfaced to the caller as-is.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum TransitionError {
    /// A token does not name any member of the enumeration.
    #[error("Unknown state '{token}'")]
    UnknownState { token: String },

    /// A state value reached the checker without being a member.
    #[error("{role} state '{state}' is not in the state enumeration")]
    InvalidState { role: StateRole, state: String },

    /// A well-formed transition was rejected by policy.
    #[error("State <{to}> cannot be assigned to field \"{field}\" after state <{from}>")]
    TransitionDenied {
        field: String,
        from: String,
        to: String,
    },
}

impl TransitionError {
    /// Stable code the owning entity can put into its own error responses.
    pub fn error_code(&self) -> &'static str {
        match self {
            TransitionError::UnknownState { .. } => "UNKNOWN_STATE",
            TransitionError::InvalidState { .. } => "INVALID_STATE",
            TransitionError::TransitionDenied { .. } => "TRANSITION_DENIED",
        }
    }

    /// Returns the rejected `(from, to)` pair for policy denials.
    pub fn rejected_pair(&self) -> Option<(&str, &str)> {
        match self {
            TransitionError::TransitionDenied { from, to, .. } => Some((from, to)),
            _ => None,
        }
    }
}
