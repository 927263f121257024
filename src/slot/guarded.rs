//! The interception point: every write to a state attribute goes through
//! [`GuardedStateSlot::assign`].

use super::field::StateField;
use crate::core::{
    OrdinalChecker, State, StateRole, StateTransition, TransitionChecker, TransitionError,
};
use std::fmt;
use std::sync::Arc;

/// What an approved assignment committed.
#[derive(Clone, Debug, PartialEq)]
pub enum Assignment<S: State> {
    /// First write of an unassigned slot, accepted without a rule check
    Initialized(S),

    /// Same-state write; nothing changed
    Unchanged(S),

    /// Approved change from one state to another
    Transitioned(StateTransition<S>),
}

impl<S: State> Assignment<S> {
    /// State held by the slot after the assignment.
    pub fn state(&self) -> &S {
        match self {
            Assignment::Initialized(state) | Assignment::Unchanged(state) => state,
            Assignment::Transitioned(transition) => &transition.to,
        }
    }

    pub fn is_transition(&self) -> bool {
        matches!(self, Assignment::Transitioned(_))
    }

    /// Audit record of the change, if the state actually moved.
    pub fn into_transition(self) -> Option<StateTransition<S>> {
        match self {
            Assignment::Transitioned(transition) => Some(transition),
            _ => None,
        }
    }
}

/// Mutable holder of one entity's current state.
///
/// Assignments are validated against the bound [`StateField`] before they
/// are committed; a denied assignment leaves the slot untouched. The slot
/// does no locking: an owner that shares it across threads must serialize
/// access itself.
///
/// # Example
///
/// ```rust
/// use statefield::core::{StateToken, TransitionError};
/// use statefield::rules::RawRule;
/// use statefield::slot::StateField;
/// use std::sync::Arc;
///
/// let field = Arc::new(
///     StateField::builder("state")
///         .states(["start", "middle", "end"].into_iter().map(StateToken::new).collect())
///         .default_name("start")
///         .rules(vec![
///             RawRule::to("start", ["middle"]),
///             RawRule::to("middle", ["end"]),
///             RawRule::terminal("end"),
///         ])
///         .build()
///         .unwrap(),
/// );
///
/// let mut slot = field.slot();
/// slot.assign_name("middle").unwrap();
/// slot.assign_name("end").unwrap();
///
/// let err = slot.assign_name("start").unwrap_err();
/// assert!(matches!(err, TransitionError::TransitionDenied { .. }));
/// assert_eq!(slot.value().as_str(), "end");
/// ```
pub struct GuardedStateSlot<S: State, C = OrdinalChecker> {
    field: Arc<StateField<S, C>>,
    current: Option<S>,
}

impl<S: State, C: TransitionChecker<S>> GuardedStateSlot<S, C> {
    /// Slot initialized with the field's default.
    pub fn new(field: Arc<StateField<S, C>>) -> Self {
        let current = Some(field.default_value().clone());
        Self { field, current }
    }

    /// Slot that has not been written yet.
    ///
    /// Reads return the field default until the first write, which is
    /// committed without consulting the checker (hydration from storage).
    pub fn unassigned(field: Arc<StateField<S, C>>) -> Self {
        Self {
            field,
            current: None,
        }
    }

    /// Current state, or the default while unassigned.
    pub fn value(&self) -> &S {
        self.current
            .as_ref()
            .unwrap_or_else(|| self.field.default_value())
    }

    pub fn is_assigned(&self) -> bool {
        self.current.is_some()
    }

    pub fn field(&self) -> &StateField<S, C> {
        &self.field
    }

    /// Assign a typed state.
    ///
    /// Fails with [`TransitionError::InvalidState`] when `value` is not a
    /// member of the field's enumeration.
    pub fn assign(&mut self, value: S) -> Result<Assignment<S>, TransitionError> {
        self.ensure_member(&value)?;
        self.commit(value)
    }

    /// Assign by raw name.
    ///
    /// Fails with [`TransitionError::UnknownState`] when no member carries
    /// `name`.
    pub fn assign_name(&mut self, name: &str) -> Result<Assignment<S>, TransitionError> {
        let value = self.field.resolve(name)?.clone();
        self.commit(value)
    }

    /// Whether `assign(value)` would succeed, without committing.
    pub fn can_assign(&self, value: &S) -> Result<bool, TransitionError> {
        self.ensure_member(value)?;
        match &self.current {
            Some(current) if current != value => self.field.check(current, value),
            _ => Ok(true),
        }
    }

    fn commit(&mut self, value: S) -> Result<Assignment<S>, TransitionError> {
        let Some(current) = self.current.as_ref() else {
            tracing::debug!(
                field = self.field.name(),
                to = value.name(),
                "state initialized"
            );
            self.current = Some(value.clone());
            return Ok(Assignment::Initialized(value));
        };

        if *current == value {
            tracing::trace!(field = self.field.name(), state = value.name(), "state unchanged");
            return Ok(Assignment::Unchanged(value));
        }

        if !self.field.check(current, &value)? {
            tracing::debug!(
                field = self.field.name(),
                from = current.name(),
                to = value.name(),
                "state transition denied"
            );
            return Err(TransitionError::TransitionDenied {
                field: self.field.name().to_string(),
                from: current.name().to_string(),
                to: value.name().to_string(),
            });
        }

        tracing::debug!(
            field = self.field.name(),
            from = current.name(),
            to = value.name(),
            "state transition committed"
        );
        let from = current.clone();
        self.current = Some(value.clone());
        Ok(Assignment::Transitioned(StateTransition::new(from, value)))
    }

    fn ensure_member(&self, value: &S) -> Result<(), TransitionError> {
        if self.field.enumeration().contains(value) {
            Ok(())
        } else {
            Err(TransitionError::InvalidState {
                role: StateRole::Proposed,
                state: value.name().to_string(),
            })
        }
    }
}

impl<S: State, C> Clone for GuardedStateSlot<S, C> {
    fn clone(&self) -> Self {
        Self {
            field: Arc::clone(&self.field),
            current: self.current.clone(),
        }
    }
}

impl<S: State, C> fmt::Debug for GuardedStateSlot<S, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GuardedStateSlot")
            .field("field", &self.field.name())
            .field("current", &self.current)
            .finish()
    }
}
