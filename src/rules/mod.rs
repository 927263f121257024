//! Rule declaration shorthands and their normalization.
//!
//! Owning entities may declare rules as canonical [`TransitionRule`]s or as
//! `(start, targets)` shorthands whose tokens are typed states or raw names.
//! [`normalize`] turns any mix of these into one canonical [`RuleSet`],
//! validating every token against the enumeration on the way.
//!
//! Normalization failures are configuration errors: they surface when a
//! field is built, never during an assignment.
//!
//! [`TransitionRule`]: crate::core::TransitionRule
//! [`RuleSet`]: crate::core::RuleSet

pub mod error;
pub mod normalizer;
pub mod raw;

pub use error::RuleError;
pub use normalizer::{normalize, RuleNormalizer};
pub use raw::{RawRule, RawTarget, Token, WILDCARD_MARKERS};
