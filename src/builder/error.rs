//! Configuration errors for state enumerations and state fields.

use crate::rules::RuleError;
use thiserror::Error;

/// Errors that can occur when building a state field.
///
/// These are configuration mistakes: they should stop registration of the
/// owning entity rather than be deferred to the first assignment.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum BuildError {
    #[error("State enumeration not specified. Call .states(..) or .choices() before .build()")]
    MissingEnumeration,

    #[error("Default state not specified. Call .default(state) before .build()")]
    MissingDefault,

    #[error("State enumeration must contain at least one state")]
    EmptyEnumeration,

    #[error("Duplicate state name '{name}' in enumeration")]
    DuplicateState { name: String },

    #[error("Default state '{default}' is not in the state enumeration")]
    DefaultNotMember { default: String },

    #[error("max_length (== {max_length}) must be >= the longest state name length (== {required})")]
    MaxLengthTooShort { max_length: usize, required: usize },

    #[error("{} invalid transition rule(s): {}", .errors.len(), join_rule_errors(.errors))]
    InvalidRules { errors: Vec<RuleError> },
}

fn join_rule_errors(errors: &[RuleError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
