//! Audit records of committed state changes.
//!
//! A slot never keeps history itself; it hands a [`StateTransition`] back
//! to the owning entity, which may collect them in a [`StateHistory`].

use super::state::State;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// One approved and committed state change.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct StateTransition<S: State> {
    /// The state the field held before the change
    pub from: S,
    /// The state the field holds after the change
    pub to: S,
    /// When the change was committed
    pub timestamp: DateTime<Utc>,
}

impl<S: State> StateTransition<S> {
    pub fn new(from: S, to: S) -> Self {
        Self {
            from,
            to,
            timestamp: Utc::now(),
        }
    }
}

/// Ordered, immutable log of committed transitions.
///
/// `record` returns a new history and leaves the receiver untouched.
///
/// # Example
///
/// ```rust
/// use statefield::core::{StateHistory, StateToken, StateTransition};
///
/// let (draft, review, done) = (
///     StateToken::new("draft"),
///     StateToken::new("review"),
///     StateToken::new("done"),
/// );
///
/// let history = StateHistory::new()
///     .record(StateTransition::new(draft.clone(), review.clone()))
///     .record(StateTransition::new(review.clone(), done.clone()));
///
/// assert_eq!(history.get_path(), vec![&draft, &review, &done]);
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct StateHistory<S: State> {
    transitions: Vec<StateTransition<S>>,
}

impl<S: State> Default for StateHistory<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: State> StateHistory<S> {
    pub fn new() -> Self {
        Self {
            transitions: Vec::new(),
        }
    }

    /// Record a transition, returning a new history.
    pub fn record(&self, transition: StateTransition<S>) -> Self {
        let mut transitions = self.transitions.clone();
        transitions.push(transition);
        Self { transitions }
    }

    /// States traversed: the first `from`, then every `to` in order.
    pub fn get_path(&self) -> Vec<&S> {
        let mut path = Vec::with_capacity(self.transitions.len() + 1);
        if let Some(first) = self.transitions.first() {
            path.push(&first.from);
        }
        path.extend(self.transitions.iter().map(|t| &t.to));
        path
    }

    /// Time between the first and the last recorded transition.
    ///
    /// `None` when empty or when timestamps run backwards.
    pub fn duration(&self) -> Option<Duration> {
        let first = self.transitions.first()?;
        let last = self.transitions.last()?;
        last.timestamp
            .signed_duration_since(first.timestamp)
            .to_std()
            .ok()
    }

    pub fn transitions(&self) -> &[StateTransition<S>] {
        &self.transitions
    }

    pub fn last(&self) -> Option<&StateTransition<S>> {
        self.transitions.last()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
    enum TestState {
        Start,
        Middle,
        End,
    }

    impl State for TestState {
        fn name(&self) -> &str {
            match self {
                Self::Start => "start",
                Self::Middle => "middle",
                Self::End => "end",
            }
        }
    }

    #[test]
    fn new_history_is_empty() {
        let history: StateHistory<TestState> = StateHistory::new();
        assert!(history.transitions().is_empty());
        assert!(history.get_path().is_empty());
        assert!(history.duration().is_none());
        assert!(history.last().is_none());
    }

    #[test]
    fn record_is_immutable() {
        let history = StateHistory::new();
        let new_history =
            history.record(StateTransition::new(TestState::Start, TestState::Middle));

        assert_eq!(history.transitions().len(), 0);
        assert_eq!(new_history.transitions().len(), 1);
    }

    #[test]
    fn get_path_returns_state_sequence() {
        let history = StateHistory::new()
            .record(StateTransition::new(TestState::Start, TestState::Middle))
            .record(StateTransition::new(TestState::Middle, TestState::End));

        assert_eq!(
            history.get_path(),
            vec![&TestState::Start, &TestState::Middle, &TestState::End]
        );
        assert_eq!(history.last().map(|t| &t.to), Some(&TestState::End));
    }

    #[test]
    fn duration_spans_first_to_last() {
        let start = Utc::now();
        let history = StateHistory::new()
            .record(StateTransition {
                from: TestState::Start,
                to: TestState::Middle,
                timestamp: start,
            })
            .record(StateTransition {
                from: TestState::Middle,
                to: TestState::End,
                timestamp: start + chrono::Duration::milliseconds(250),
            });

        assert_eq!(history.duration(), Some(Duration::from_millis(250)));
    }

    #[test]
    fn single_transition_has_zero_duration() {
        let history =
            StateHistory::new().record(StateTransition::new(TestState::Start, TestState::Middle));
        assert_eq!(history.duration(), Some(Duration::ZERO));
    }

    #[test]
    fn history_serializes_correctly() {
        let history =
            StateHistory::new().record(StateTransition::new(TestState::Start, TestState::Middle));

        let json = serde_json::to_string(&history).unwrap();
        let deserialized: StateHistory<TestState> = serde_json::from_str(&json).unwrap();

        assert_eq!(history.transitions(), deserialized.transitions());
    }
}
