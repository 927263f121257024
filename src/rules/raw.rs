//! Shorthand rule notations accepted before normalization.

use crate::core::{State, TransitionRule};

/// Strings recognised as the "any target" marker.
pub const WILDCARD_MARKERS: [&str; 2] = ["*", "..."];

/// A state given either as a typed member or as its raw name.
#[derive(Clone, Debug, PartialEq)]
pub enum Token<S> {
    State(S),
    Name(String),
}

impl<S: State> Token<S> {
    pub fn as_str(&self) -> &str {
        match self {
            Token::State(state) => state.name(),
            Token::Name(name) => name,
        }
    }
}

impl<S> From<&str> for Token<S> {
    fn from(name: &str) -> Self {
        Token::Name(name.to_string())
    }
}

impl<S> From<String> for Token<S> {
    fn from(name: String) -> Self {
        Token::Name(name)
    }
}

/// One entry of a shorthand target list.
#[derive(Clone, Debug, PartialEq)]
pub enum RawTarget<S> {
    State(S),
    Name(String),
    Wildcard,
}

impl<S> RawTarget<S> {
    pub fn is_wildcard(&self) -> bool {
        matches!(self, RawTarget::Wildcard)
    }
}

impl<S> From<&str> for RawTarget<S> {
    fn from(name: &str) -> Self {
        if WILDCARD_MARKERS.contains(&name) {
            RawTarget::Wildcard
        } else {
            RawTarget::Name(name.to_string())
        }
    }
}

impl<S> From<String> for RawTarget<S> {
    fn from(name: String) -> Self {
        if WILDCARD_MARKERS.contains(&name.as_str()) {
            RawTarget::Wildcard
        } else {
            RawTarget::Name(name)
        }
    }
}

impl<S> From<Token<S>> for RawTarget<S> {
    fn from(token: Token<S>) -> Self {
        match token {
            Token::State(state) => RawTarget::State(state),
            Token::Name(name) => RawTarget::from(name),
        }
    }
}

/// A rule as the owning entity declares it.
///
/// Canonical rules pass through normalization unchanged. Shorthand rules
/// pair a start token with an optional target list:
///
/// - `None` or an empty list: terminal state
/// - a list holding only [`RawTarget::Wildcard`]: any target
/// - anything else: explicit targets
///
/// # Example
///
/// ```rust
/// use statefield::core::{StateToken, TransitionRule};
/// use statefield::rules::{RawRule, RawTarget};
///
/// let rules: Vec<RawRule<StateToken>> = vec![
///     TransitionRule::explicit(StateToken::new("start"), [StateToken::new("init")]).into(),
///     RawRule::to("init", ["saved", "qr_code"]),
///     RawRule::new("saved", Some(vec![RawTarget::Wildcard])),
///     RawRule::terminal("qr_code"),
/// ];
/// assert_eq!(rules.len(), 4);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub enum RawRule<S: State> {
    Canonical(TransitionRule<S>),
    Shorthand {
        start: Token<S>,
        targets: Option<Vec<RawTarget<S>>>,
    },
}

impl<S: State> RawRule<S> {
    pub fn new(start: impl Into<Token<S>>, targets: Option<Vec<RawTarget<S>>>) -> Self {
        RawRule::Shorthand {
            start: start.into(),
            targets,
        }
    }

    /// Shorthand rule with an explicit target list.
    pub fn to<T>(start: impl Into<Token<S>>, targets: impl IntoIterator<Item = T>) -> Self
    where
        T: Into<RawTarget<S>>,
    {
        Self::new(start, Some(targets.into_iter().map(Into::into).collect()))
    }

    /// Shorthand wildcard rule.
    pub fn any(start: impl Into<Token<S>>) -> Self {
        Self::new(start, Some(vec![RawTarget::Wildcard]))
    }

    /// Shorthand terminal rule.
    pub fn terminal(start: impl Into<Token<S>>) -> Self {
        Self::new(start, None)
    }
}

impl<S: State> From<TransitionRule<S>> for RawRule<S> {
    fn from(rule: TransitionRule<S>) -> Self {
        RawRule::Canonical(rule)
    }
}
