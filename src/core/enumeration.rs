//! Closed, ordered sets of states.
//!
//! The enumeration is the single validity gate of the crate: every rule,
//! check and assignment resolves its states here first.

use super::error::TransitionError;
use super::state::{Choices, State};
use crate::builder::BuildError;
use std::collections::HashMap;

/// Ordered, finite set of distinct states.
///
/// Built once at configuration time and immutable afterwards. The ordinal
/// table is computed on construction so lookups never scan the members.
///
/// # Example
///
/// ```rust
/// use statefield::core::{StateEnumeration, StateToken};
///
/// let states = StateEnumeration::new(vec![
///     StateToken::new("draft"),
///     StateToken::new("review"),
///     StateToken::new("published"),
/// ])
/// .unwrap();
///
/// assert_eq!(states.len(), 3);
/// assert_eq!(states.index_of(&StateToken::new("review")).unwrap(), 1);
/// assert!(states.resolve("archived").is_err());
/// ```
#[derive(Clone, Debug)]
pub struct StateEnumeration<S: State> {
    members: Vec<S>,
    ordinals: HashMap<String, usize>,
}

impl<S: State> StateEnumeration<S> {
    /// Build an enumeration from members in their meaningful order.
    ///
    /// Fails if the list is empty or two members share a name.
    pub fn new(members: Vec<S>) -> Result<Self, BuildError> {
        if members.is_empty() {
            return Err(BuildError::EmptyEnumeration);
        }

        let mut ordinals = HashMap::with_capacity(members.len());
        for (index, member) in members.iter().enumerate() {
            if ordinals.insert(member.name().to_string(), index).is_some() {
                return Err(BuildError::DuplicateState {
                    name: member.name().to_string(),
                });
            }
        }

        Ok(Self { members, ordinals })
    }

    /// Ordinal position of `state`, or `None` if it is not a member.
    pub fn position(&self, state: &S) -> Option<usize> {
        let index = *self.ordinals.get(state.name())?;
        (self.members[index] == *state).then_some(index)
    }

    pub fn contains(&self, state: &S) -> bool {
        self.position(state).is_some()
    }

    /// Ordinal position of `state`.
    pub fn index_of(&self, state: &S) -> Result<usize, TransitionError> {
        self.position(state).ok_or_else(|| TransitionError::UnknownState {
            token: state.name().to_string(),
        })
    }

    /// Resolve a raw token to its member.
    pub fn resolve(&self, name: &str) -> Result<&S, TransitionError> {
        self.ordinals
            .get(name)
            .map(|&index| &self.members[index])
            .ok_or_else(|| TransitionError::UnknownState {
                token: name.to_string(),
            })
    }

    pub fn get(&self, index: usize) -> Option<&S> {
        self.members.get(index)
    }

    /// Member that directly follows `state` in declared order.
    pub fn next_after(&self, state: &S) -> Option<&S> {
        self.position(state).and_then(|index| self.get(index + 1))
    }

    pub fn members_in_order(&self) -> &[S] {
        &self.members
    }

    pub fn iter(&self) -> impl Iterator<Item = &S> {
        self.members.iter()
    }

    /// `(name, label)` pairs in declared order.
    pub fn choices(&self) -> Vec<(&str, Option<&str>)> {
        self.members.iter().map(|s| (s.name(), s.label())).collect()
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Character length of the longest member name.
    pub fn longest_name(&self) -> usize {
        self.members
            .iter()
            .map(|s| s.name().chars().count())
            .max()
            .unwrap_or(0)
    }
}

impl<S: Choices> StateEnumeration<S> {
    /// Build the enumeration from every member of a [`Choices`] type.
    pub fn of() -> Result<Self, BuildError> {
        Self::new(S::members())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::StateToken;
    use serde::{Deserialize, Serialize};

    #[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
    enum TestState {
        Start,
        Middle,
        End,
        Any,
    }

    impl State for TestState {
        fn name(&self) -> &str {
            match self {
                Self::Start => "start",
                Self::Middle => "middle",
                Self::End => "end",
                Self::Any => "any",
            }
        }
    }

    impl Choices for TestState {
        fn members() -> Vec<Self> {
            vec![Self::Start, Self::Middle, Self::End, Self::Any]
        }
    }

    fn partial() -> StateEnumeration<TestState> {
        StateEnumeration::new(vec![TestState::Start, TestState::Middle, TestState::End]).unwrap()
    }

    #[test]
    fn of_uses_declaration_order() {
        let states = StateEnumeration::<TestState>::of().unwrap();

        assert_eq!(states.len(), 4);
        assert_eq!(states.index_of(&TestState::Start).unwrap(), 0);
        assert_eq!(states.index_of(&TestState::Any).unwrap(), 3);
    }

    #[test]
    fn empty_enumeration_is_rejected() {
        let result = StateEnumeration::<StateToken>::new(Vec::new());
        assert!(matches!(result, Err(BuildError::EmptyEnumeration)));
    }

    #[test]
    fn duplicate_names_are_rejected() {
        let result = StateEnumeration::new(vec![
            StateToken::new("a"),
            StateToken::labeled("a", "Again"),
        ]);

        match result {
            Err(BuildError::DuplicateState { name }) => assert_eq!(name, "a"),
            other => panic!("expected duplicate error, got {other:?}"),
        }
    }

    #[test]
    fn non_member_is_unknown() {
        let states = partial();

        assert!(!states.contains(&TestState::Any));
        assert_eq!(states.position(&TestState::Any), None);
        assert_eq!(
            states.index_of(&TestState::Any),
            Err(TransitionError::UnknownState {
                token: "any".to_string()
            })
        );
    }

    #[test]
    fn resolve_finds_member_by_name() {
        let states = partial();

        assert_eq!(states.resolve("middle").unwrap(), &TestState::Middle);
        assert!(matches!(
            states.resolve("MIDDLE"),
            Err(TransitionError::UnknownState { .. })
        ));
    }

    #[test]
    fn next_after_follows_order() {
        let states = partial();

        assert_eq!(states.next_after(&TestState::Start), Some(&TestState::Middle));
        assert_eq!(states.next_after(&TestState::End), None);
        assert_eq!(states.next_after(&TestState::Any), None);
    }

    #[test]
    fn choices_and_longest_name() {
        let states = StateEnumeration::new(vec![
            StateToken::labeled("start", "Payment started"),
            StateToken::new("qr_code_received"),
        ])
        .unwrap();

        assert_eq!(
            states.choices(),
            vec![("start", Some("Payment started")), ("qr_code_received", None)]
        );
        assert_eq!(states.longest_name(), 16);
    }
}
