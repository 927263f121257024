//! Core transition validation types and logic.
//!
//! This module contains the pure part of the engine:
//! - States and their closed, ordered enumerations
//! - Canonical transition rules and rule sets
//! - The transition checker and its ordinal fallback
//! - Audit records of committed transitions
//!
//! Nothing here performs I/O or holds interior mutability.

mod checker;
mod enumeration;
mod error;
mod history;
mod rule;
mod state;

pub use checker::{is_allowed, OrdinalChecker, TransitionChecker};
pub use enumeration::StateEnumeration;
pub use error::{StateRole, TransitionError};
pub use history::{StateHistory, StateTransition};
pub use rule::{RuleSet, TargetSpec, TransitionRule};
pub use state::{Choices, State, StateToken};
