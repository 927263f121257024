//! Builder for constructing state fields.

use crate::builder::error::BuildError;
use crate::core::{Choices, OrdinalChecker, State, StateEnumeration, TransitionChecker};
use crate::rules::{normalize, RawRule, Token};
use crate::slot::StateField;

/// Builder for [`StateField`] with a fluent API.
///
/// Nothing is validated until [`build`](Self::build), which reports the
/// first configuration mistake (or every bad rule at once).
pub struct StateFieldBuilder<S: State, C = OrdinalChecker> {
    name: String,
    enumeration: Option<Result<StateEnumeration<S>, BuildError>>,
    default: Option<Token<S>>,
    rules: Option<Vec<RawRule<S>>>,
    max_length: Option<usize>,
    checker: C,
}

impl<S: State> StateFieldBuilder<S> {
    /// Create a new builder for the field called `name`.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            enumeration: None,
            default: None,
            rules: None,
            max_length: None,
            checker: OrdinalChecker,
        }
    }
}

impl<S: State, C: TransitionChecker<S>> StateFieldBuilder<S, C> {
    /// Use an already built enumeration.
    pub fn enumeration(mut self, enumeration: StateEnumeration<S>) -> Self {
        self.enumeration = Some(Ok(enumeration));
        self
    }

    /// Build the enumeration from members in their meaningful order.
    pub fn states(mut self, members: Vec<S>) -> Self {
        self.enumeration = Some(StateEnumeration::new(members));
        self
    }

    /// Build the enumeration from every member of the state type.
    pub fn choices(mut self) -> Self
    where
        S: Choices,
    {
        self.enumeration = Some(StateEnumeration::of());
        self
    }

    /// Set the default state (required).
    pub fn default(mut self, state: S) -> Self {
        self.default = Some(Token::State(state));
        self
    }

    /// Set the default state by its raw name (required).
    pub fn default_name(mut self, name: impl Into<String>) -> Self {
        self.default = Some(Token::Name(name.into()));
        self
    }

    /// Replace the rule list. Without rules, or with an empty list, the
    /// checker's fallback applies.
    pub fn rules(mut self, rules: Vec<RawRule<S>>) -> Self {
        self.rules = Some(rules);
        self
    }

    /// Append one rule.
    pub fn rule(mut self, rule: impl Into<RawRule<S>>) -> Self {
        self.rules.get_or_insert_with(Vec::new).push(rule.into());
        self
    }

    /// Storage width of the serialized state name.
    pub fn max_length(mut self, max_length: usize) -> Self {
        self.max_length = Some(max_length);
        self
    }

    /// Swap the transition checker.
    pub fn checker<C2: TransitionChecker<S>>(self, checker: C2) -> StateFieldBuilder<S, C2> {
        StateFieldBuilder {
            name: self.name,
            enumeration: self.enumeration,
            default: self.default,
            rules: self.rules,
            max_length: self.max_length,
            checker,
        }
    }

    /// Build the field.
    pub fn build(self) -> Result<StateField<S, C>, BuildError> {
        let enumeration = self.enumeration.ok_or(BuildError::MissingEnumeration)??;
        let default = self.default.ok_or(BuildError::MissingDefault)?;
        let default = resolve_default(&enumeration, default)?;

        let required = enumeration.longest_name();
        let max_length = match self.max_length {
            Some(max_length) if max_length < required => {
                return Err(BuildError::MaxLengthTooShort {
                    max_length,
                    required,
                })
            }
            Some(max_length) => max_length,
            None => required,
        };

        // An empty rule list counts as no rules at all.
        let rules = self
            .rules
            .filter(|rules| !rules.is_empty())
            .map(|rules| normalize(rules, &enumeration))
            .transpose()?;

        tracing::debug!(
            field = %self.name,
            states = enumeration.len(),
            rules = rules.as_ref().map(|r| r.len()),
            default = default.name(),
            "state field configured"
        );

        Ok(StateField::new(
            self.name,
            enumeration,
            default,
            rules,
            max_length,
            self.checker,
        ))
    }
}

fn resolve_default<S: State>(
    enumeration: &StateEnumeration<S>,
    default: Token<S>,
) -> Result<S, BuildError> {
    let resolved = match &default {
        Token::State(state) => enumeration.contains(state).then(|| state.clone()),
        Token::Name(name) => enumeration.resolve(name).ok().cloned(),
    };
    resolved.ok_or_else(|| BuildError::DefaultNotMember {
        default: default.as_str().to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{StateToken, TargetSpec};
    use crate::rules::RuleError;
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

    #[test]
    fn builder_validates_required_fields() {
        let result = StateFieldBuilder::<TestState>::new("state")
            .default(TestState::Start)
            .build();
        assert!(matches!(result, Err(BuildError::MissingEnumeration)));

        let result = StateFieldBuilder::<TestState>::new("state").choices().build();
        assert!(matches!(result, Err(BuildError::MissingDefault)));
    }

    #[test]
    fn default_must_be_member() {
        let result = StateFieldBuilder::new("state")
            .states(vec![TestState::Start, TestState::Middle])
            .default(TestState::End)
            .build();
        assert_eq!(
            result.err(),
            Some(BuildError::DefaultNotMember {
                default: "end".to_string()
            })
        );

        let result = StateFieldBuilder::<TestState>::new("state")
            .choices()
            .default_name("begin")
            .build();
        assert!(matches!(result, Err(BuildError::DefaultNotMember { .. })));
    }

    #[test]
    fn default_name_resolves() {
        let field = StateFieldBuilder::<TestState>::new("state")
            .choices()
            .default_name("middle")
            .build()
            .unwrap();
        assert_eq!(field.default_value(), &TestState::Middle);
    }

    #[test]
    fn enumeration_errors_surface_at_build() {
        let result = StateFieldBuilder::new("state")
            .states(vec![StateToken::new("a"), StateToken::new("a")])
            .default_name("a")
            .build();
        assert!(matches!(result, Err(BuildError::DuplicateState { .. })));
    }

    #[test]
    fn max_length_defaults_to_longest_name() {
        let field = StateFieldBuilder::<TestState>::new("state")
            .choices()
            .default(TestState::Start)
            .build()
            .unwrap();
        assert_eq!(field.max_length(), 6);
    }

    #[test]
    fn max_length_too_short_is_rejected() {
        let result = StateFieldBuilder::<TestState>::new("state")
            .choices()
            .default(TestState::Start)
            .max_length(4)
            .build();
        assert_eq!(
            result.err(),
            Some(BuildError::MaxLengthTooShort {
                max_length: 4,
                required: 6,
            })
        );

        let field = StateFieldBuilder::<TestState>::new("state")
            .choices()
            .default(TestState::Start)
            .max_length(32)
            .build()
            .unwrap();
        assert_eq!(field.max_length(), 32);
    }

    #[test]
    fn rules_are_normalized_at_build() {
        let field = StateFieldBuilder::<TestState>::new("state")
            .choices()
            .default(TestState::Start)
            .rule(RawRule::to("start", ["middle"]))
            .rule(RawRule::any("middle"))
            .build()
            .unwrap();

        let rules = field.rules().unwrap();
        assert_eq!(rules.len(), 2);
        assert_eq!(rules.rules()[1].targets(), &TargetSpec::Any);
    }

    #[test]
    fn bad_rules_fail_the_build() {
        let result = StateFieldBuilder::<TestState>::new("state")
            .choices()
            .default(TestState::Start)
            .rules(vec![RawRule::to("start", ["nowhere"])])
            .build();

        assert_eq!(
            result.err(),
            Some(BuildError::InvalidRules {
                errors: vec![RuleError::UnknownState {
                    rule: 0,
                    token: "nowhere".to_string(),
                }],
            })
        );
    }

    #[test]
    fn no_rules_means_no_rule_set() {
        let field = StateFieldBuilder::<TestState>::new("state")
            .choices()
            .default(TestState::Start)
            .build()
            .unwrap();
        assert!(field.rules().is_none());

        let field = StateFieldBuilder::<TestState>::new("state")
            .choices()
            .default(TestState::Start)
            .rules(Vec::new())
            .build()
            .unwrap();
        assert!(field.rules().is_none());
    }

    #[test]
    fn empty_rule_list_falls_back_to_ordinal_policy() {
        let field = StateFieldBuilder::<TestState>::new("state")
            .choices()
            .default(TestState::Start)
            .rules(Vec::new())
            .build()
            .unwrap();

        assert_eq!(field.check(&TestState::Start, &TestState::End), Ok(false));
        assert_eq!(field.check(&TestState::Start, &TestState::Middle), Ok(true));
    }
}
