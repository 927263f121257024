//! Rule normalization errors.

use thiserror::Error;

/// One problem found while normalizing a rule list.
///
/// `rule` is the zero-based position of the offending rule in the input.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum RuleError {
    #[error("rule #{rule}: unknown state '{token}'")]
    UnknownState { rule: usize, token: String },

    #[error("rule #{rule}: state '{state}' is not in the state enumeration")]
    ForeignState { rule: usize, state: String },

    #[error("rule #{rule}: wildcard must be the only target of '{start}'")]
    MixedWildcard { rule: usize, start: String },
}

impl RuleError {
    pub fn rule(&self) -> usize {
        match self {
            RuleError::UnknownState { rule, .. }
            | RuleError::ForeignState { rule, .. }
            | RuleError::MixedWildcard { rule, .. } => *rule,
        }
    }
}
