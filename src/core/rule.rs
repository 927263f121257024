//! Transition rules: which targets are reachable from a start state.
//!
//! Rules are immutable values. Shorthand notations are converted into
//! these canonical forms by [`crate::rules::normalize`] before any check
//! runs, so checking code never branches on input shape.

use super::state::State;
use serde::{Deserialize, Serialize};

/// Allowed targets of a rule.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(bound = "")]
pub enum TargetSpec<S: State> {
    /// Only these states are legal targets.
    Explicit(Vec<S>),

    /// Every member of the enumeration is a legal target.
    Any,

    /// No transition out of the start state is legal.
    Terminal,
}

/// One rule: a start state and the targets reachable from it.
///
/// # Example
///
/// ```rust
/// use statefield::core::{StateToken, TransitionRule};
///
/// let start = StateToken::new("start");
/// let rule = TransitionRule::explicit(
///     start.clone(),
///     [StateToken::new("middle"), StateToken::new("end")],
/// );
///
/// assert!(rule.allowed(&StateToken::new("middle")));
/// assert!(!rule.allowed(&start));
///
/// assert!(TransitionRule::any(start.clone()).allowed(&start));
/// assert!(!TransitionRule::terminal(start).allowed(&StateToken::new("end")));
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct TransitionRule<S: State> {
    start: S,
    targets: TargetSpec<S>,
}

impl<S: State> TransitionRule<S> {
    pub fn new(start: S, targets: TargetSpec<S>) -> Self {
        Self { start, targets }
    }

    /// Rule allowing only the listed targets.
    pub fn explicit(start: S, targets: impl IntoIterator<Item = S>) -> Self {
        Self::new(start, TargetSpec::Explicit(targets.into_iter().collect()))
    }

    /// Wildcard rule: any member is a legal target.
    pub fn any(start: S) -> Self {
        Self::new(start, TargetSpec::Any)
    }

    /// Terminal rule: nothing is reachable from `start`.
    pub fn terminal(start: S) -> Self {
        Self::new(start, TargetSpec::Terminal)
    }

    pub fn start(&self) -> &S {
        &self.start
    }

    pub fn targets(&self) -> &TargetSpec<S> {
        &self.targets
    }

    /// Check if `target` is a legal destination under this rule (pure).
    pub fn allowed(&self, target: &S) -> bool {
        match &self.targets {
            TargetSpec::Terminal => false,
            TargetSpec::Any => true,
            TargetSpec::Explicit(states) => states.contains(target),
        }
    }

    /// Every state the rule mentions, start first.
    pub fn states(&self) -> impl Iterator<Item = &S> {
        let targets: &[S] = match &self.targets {
            TargetSpec::Explicit(states) => states,
            TargetSpec::Any | TargetSpec::Terminal => &[],
        };
        std::iter::once(&self.start).chain(targets.iter())
    }
}

/// Ordered sequence of rules.
///
/// Several rules may share a start state; a transition is approved when
/// any one of them allows it. A start state with no rules at all is
/// unrestricted.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(bound = "")]
pub struct RuleSet<S: State> {
    rules: Vec<TransitionRule<S>>,
}

impl<S: State> RuleSet<S> {
    /// Wrap rules that were already validated against an enumeration.
    pub(crate) fn new(rules: Vec<TransitionRule<S>>) -> Self {
        Self { rules }
    }

    /// Rules whose start state is `current`, in declaration order.
    pub fn matching<'a>(&'a self, current: &'a S) -> impl Iterator<Item = &'a TransitionRule<S>> {
        self.rules.iter().filter(move |rule| rule.start() == current)
    }

    /// Whether any rule constrains transitions out of `current`.
    pub fn constrains(&self, current: &S) -> bool {
        self.matching(current).next().is_some()
    }

    /// Permissive by omission: with no matching rule the move is approved,
    /// otherwise at least one matching rule must allow it.
    pub fn permits(&self, current: &S, proposed: &S) -> bool {
        let mut matching = self.matching(current).peekable();
        if matching.peek().is_none() {
            return true;
        }
        matching.any(|rule| rule.allowed(proposed))
    }

    pub fn rules(&self) -> &[TransitionRule<S>] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}
