//! Transition checking.
//!
//! A checker answers one question: may a field move from `current` to
//! `proposed`? It is a pure function of its inputs. Same-state writes never
//! reach it; the slot exempts them, since a checker call always represents
//! an attempted change.

use super::enumeration::StateEnumeration;
use super::error::{StateRole, TransitionError};
use super::rule::RuleSet;
use super::state::State;

/// Decides whether a proposed transition is legal.
///
/// The provided [`is_allowed`](TransitionChecker::is_allowed) validates both
/// states, then consults the rule set when one is configured and the
/// [`fallback`](TransitionChecker::fallback) policy otherwise. Custom
/// checkers usually override only `fallback`.
///
/// # Example
///
/// ```rust
/// use statefield::core::{StateEnumeration, StateToken, TransitionChecker};
///
/// /// Allows skipping ahead, never moving back.
/// struct ForwardOnly;
///
/// impl TransitionChecker<StateToken> for ForwardOnly {
///     fn fallback(
///         &self,
///         current: usize,
///         proposed: usize,
///         _enumeration: &StateEnumeration<StateToken>,
///     ) -> bool {
///         proposed > current
///     }
/// }
///
/// let states = StateEnumeration::new(
///     ["a", "b", "c"].into_iter().map(StateToken::new).collect(),
/// )
/// .unwrap();
/// let (a, c) = (StateToken::new("a"), StateToken::new("c"));
///
/// assert!(ForwardOnly.is_allowed(&a, &c, None, &states).unwrap());
/// assert!(!ForwardOnly.is_allowed(&c, &a, None, &states).unwrap());
/// ```
pub trait TransitionChecker<S: State>: Send + Sync {
    /// Check a transition.
    ///
    /// Fails with [`TransitionError::InvalidState`] before evaluating any
    /// rule if either state is not a member of `enumeration`.
    fn is_allowed(
        &self,
        current: &S,
        proposed: &S,
        rules: Option<&RuleSet<S>>,
        enumeration: &StateEnumeration<S>,
    ) -> Result<bool, TransitionError> {
        let from = member_position(enumeration, current, StateRole::Current)?;
        let to = member_position(enumeration, proposed, StateRole::Proposed)?;

        Ok(match rules {
            Some(rules) => rules.permits(current, proposed),
            None => self.fallback(from, to, enumeration),
        })
    }

    /// Policy used when the field has no rule set.
    ///
    /// Default: ordinal adjacency, the proposed state must be exactly the
    /// next member in declared order.
    fn fallback(
        &self,
        current: usize,
        proposed: usize,
        _enumeration: &StateEnumeration<S>,
    ) -> bool {
        proposed.checked_sub(current) == Some(1)
    }
}

/// Stock checker: rule sets when configured, ordinal adjacency otherwise.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct OrdinalChecker;

impl<S: State> TransitionChecker<S> for OrdinalChecker {}

/// Check a transition with [`OrdinalChecker`].
pub fn is_allowed<S: State>(
    current: &S,
    proposed: &S,
    rules: Option<&RuleSet<S>>,
    enumeration: &StateEnumeration<S>,
) -> Result<bool, TransitionError> {
    OrdinalChecker.is_allowed(current, proposed, rules, enumeration)
}

fn member_position<S: State>(
    enumeration: &StateEnumeration<S>,
    state: &S,
    role: StateRole,
) -> Result<usize, TransitionError> {
    enumeration
        .position(state)
        .ok_or_else(|| TransitionError::InvalidState {
            role,
            state: state.name().to_string(),
        })
}
