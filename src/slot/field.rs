//! Per-entity-type declaration of a guarded state attribute.

use super::guarded::GuardedStateSlot;
use crate::builder::StateFieldBuilder;
use crate::core::{
    OrdinalChecker, RuleSet, State, StateEnumeration, TransitionChecker, TransitionError,
};
use std::sync::Arc;

/// Configuration of one state attribute, shared by every entity instance.
///
/// Holds the enumeration, the mandatory default, the optional rule set and
/// the checker. Built once through [`StateField::builder`] and usually kept
/// in an `Arc` so each instance's [`GuardedStateSlot`] can point at it.
#[derive(Debug)]
pub struct StateField<S: State, C = OrdinalChecker> {
    name: String,
    enumeration: StateEnumeration<S>,
    default: S,
    rules: Option<RuleSet<S>>,
    max_length: usize,
    checker: C,
}

impl<S: State> StateField<S> {
    /// Start building a field called `name`.
    pub fn builder(name: impl Into<String>) -> StateFieldBuilder<S> {
        StateFieldBuilder::new(name)
    }
}

impl<S: State, C> StateField<S, C> {
    pub(crate) fn new(
        name: String,
        enumeration: StateEnumeration<S>,
        default: S,
        rules: Option<RuleSet<S>>,
        max_length: usize,
        checker: C,
    ) -> Self {
        Self {
            name,
            enumeration,
            default,
            rules,
            max_length,
            checker,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn enumeration(&self) -> &StateEnumeration<S> {
        &self.enumeration
    }

    pub fn default_value(&self) -> &S {
        &self.default
    }

    pub fn rules(&self) -> Option<&RuleSet<S>> {
        self.rules.as_ref()
    }

    pub fn max_length(&self) -> usize {
        self.max_length
    }

    pub fn checker(&self) -> &C {
        &self.checker
    }

    /// Resolve a raw token against this field's enumeration.
    pub fn resolve(&self, name: &str) -> Result<&S, TransitionError> {
        self.enumeration.resolve(name)
    }
}

impl<S: State, C: TransitionChecker<S>> StateField<S, C> {
    /// Ask the checker about a change from `current` to `proposed`.
    pub fn check(&self, current: &S, proposed: &S) -> Result<bool, TransitionError> {
        self.checker
            .is_allowed(current, proposed, self.rules.as_ref(), &self.enumeration)
    }

    /// New slot holding the default value.
    pub fn slot(self: &Arc<Self>) -> GuardedStateSlot<S, C> {
        GuardedStateSlot::new(Arc::clone(self))
    }

    /// New slot whose first write is accepted unconditionally.
    pub fn unassigned_slot(self: &Arc<Self>) -> GuardedStateSlot<S, C> {
        GuardedStateSlot::unassigned(Arc::clone(self))
    }
}
