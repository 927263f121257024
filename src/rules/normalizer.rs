//! Conversion of shorthand rules into canonical rule sets.

use crate::builder::BuildError;
use crate::core::{RuleSet, State, StateEnumeration, TransitionRule};
use crate::rules::error::RuleError;
use crate::rules::raw::{RawRule, RawTarget, Token};
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;

type Checked<T> = Validation<T, NonEmptyVec<RuleError>>;

/// Resolves raw rules against one enumeration.
///
/// Uses Validation so that a bad configuration reports every offending
/// token at once instead of only the first.
pub struct RuleNormalizer<'a, S: State> {
    enumeration: &'a StateEnumeration<S>,
}

impl<'a, S: State> RuleNormalizer<'a, S> {
    pub fn new(enumeration: &'a StateEnumeration<S>) -> Self {
        Self { enumeration }
    }

    /// Normalize every rule, accumulating ALL errors.
    ///
    /// Input order is preserved; rules sharing a start state are kept side
    /// by side, later ones never replace earlier ones.
    pub fn validate(&self, raw_rules: Vec<RawRule<S>>) -> Checked<Vec<TransitionRule<S>>> {
        let checks: Vec<Checked<TransitionRule<S>>> = raw_rules
            .into_iter()
            .enumerate()
            .map(|(index, raw)| self.normalize_rule(index, raw))
            .collect();

        Validation::all_vec(checks)
    }

    /// Normalize into a [`RuleSet`], or fail with every problem found.
    pub fn normalize(&self, raw_rules: Vec<RawRule<S>>) -> Result<RuleSet<S>, BuildError> {
        match self.validate(raw_rules) {
            Validation::Success(rules) => Ok(RuleSet::new(rules)),
            Validation::Failure(errors) => Err(BuildError::InvalidRules {
                errors: errors.iter().cloned().collect(),
            }),
        }
    }

    fn normalize_rule(&self, index: usize, raw: RawRule<S>) -> Checked<TransitionRule<S>> {
        match raw {
            RawRule::Canonical(rule) => {
                let checks: Vec<Checked<S>> =
                    rule.states().map(|state| self.member(index, state)).collect();
                Validation::all_vec(checks).map(move |_| rule)
            }
            RawRule::Shorthand {
                start,
                targets: None,
            } => self.resolve(index, start).map(TransitionRule::terminal),
            RawRule::Shorthand {
                start,
                targets: Some(targets),
            } => self.normalize_targets(index, start, targets),
        }
    }

    fn normalize_targets(
        &self,
        index: usize,
        start: Token<S>,
        targets: Vec<RawTarget<S>>,
    ) -> Checked<TransitionRule<S>> {
        if targets.is_empty() {
            return self.resolve(index, start).map(TransitionRule::terminal);
        }

        let start_name = start.as_str().to_string();
        if targets.iter().any(RawTarget::is_wildcard) {
            if targets.len() == 1 {
                return self.resolve(index, start).map(TransitionRule::any);
            }
            return Validation::fail(RuleError::MixedWildcard {
                rule: index,
                start: start_name,
            });
        }

        // The start state rides along as the first element so a single
        // all_vec reports start and target problems together.
        let mut checks = Vec::with_capacity(targets.len() + 1);
        checks.push(self.resolve(index, start));
        checks.extend(
            targets
                .into_iter()
                .map(|target| self.resolve_target(index, &start_name, target)),
        );

        Validation::all_vec(checks).map(|mut states| {
            let start = states.remove(0);
            TransitionRule::explicit(start, states)
        })
    }

    fn resolve(&self, index: usize, token: Token<S>) -> Checked<S> {
        match token {
            Token::State(state) => self.member(index, &state),
            Token::Name(name) => self.resolve_name(index, name),
        }
    }

    fn resolve_target(&self, index: usize, start: &str, target: RawTarget<S>) -> Checked<S> {
        match target {
            RawTarget::State(state) => self.member(index, &state),
            RawTarget::Name(name) => self.resolve_name(index, name),
            RawTarget::Wildcard => Validation::fail(RuleError::MixedWildcard {
                rule: index,
                start: start.to_string(),
            }),
        }
    }

    fn resolve_name(&self, index: usize, name: String) -> Checked<S> {
        match self.enumeration.resolve(&name) {
            Ok(state) => Validation::success(state.clone()),
            Err(_) => Validation::fail(RuleError::UnknownState {
                rule: index,
                token: name,
            }),
        }
    }

    fn member(&self, index: usize, state: &S) -> Checked<S> {
        if self.enumeration.contains(state) {
            Validation::success(state.clone())
        } else {
            Validation::fail(RuleError::ForeignState {
                rule: index,
                state: state.name().to_string(),
            })
        }
    }
}

/// Normalize `raw_rules` against `enumeration`.
///
/// # Example
///
/// ```rust
/// use statefield::core::{StateEnumeration, StateToken};
/// use statefield::rules::{normalize, RawRule};
///
/// let states = StateEnumeration::new(
///     ["start", "middle", "end"].into_iter().map(StateToken::new).collect(),
/// )
/// .unwrap();
///
/// let rules = normalize(
///     vec![
///         RawRule::to("start", ["middle"]),
///         RawRule::to("middle", ["end"]),
///         RawRule::terminal("end"),
///     ],
///     &states,
/// )
/// .unwrap();
///
/// assert_eq!(rules.len(), 3);
/// assert!(normalize(vec![RawRule::terminal("archived")], &states).is_err());
/// ```
pub fn normalize<S: State>(
    raw_rules: Vec<RawRule<S>>,
    enumeration: &StateEnumeration<S>,
) -> Result<RuleSet<S>, BuildError> {
    RuleNormalizer::new(enumeration).normalize(raw_rules)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::TargetSpec;
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

    fn enumeration() -> StateEnumeration<TestState> {
        StateEnumeration::new(vec![TestState::Start, TestState::Middle, TestState::End]).unwrap()
    }

    fn rule_errors(result: Result<RuleSet<TestState>, BuildError>) -> Vec<RuleError> {
        match result {
            Err(BuildError::InvalidRules { errors }) => errors,
            other => panic!("expected invalid rules, got {other:?}"),
        }
    }

    #[test]
    fn mixed_rules_are_normalized_in_order() {
        let raw = vec![
            RawRule::to(Token::State(TestState::Start), [RawTarget::State(TestState::Middle)]),
            TransitionRule::explicit(TestState::Middle, [TestState::End]).into(),
            RawRule::terminal("end"),
        ];

        let rules = normalize(raw, &enumeration()).unwrap();

        assert_eq!(rules.len(), 3);
        assert_eq!(rules.rules()[0].start(), &TestState::Start);
        assert_eq!(rules.rules()[1].start(), &TestState::Middle);
        assert_eq!(rules.rules()[2].targets(), &TargetSpec::Terminal);
    }

    #[test]
    fn canonical_rule_passes_through_unchanged() {
        let canonical = TransitionRule::explicit(TestState::Start, [TestState::End]);
        let rules = normalize(vec![canonical.clone().into()], &enumeration()).unwrap();
        assert_eq!(rules.rules(), &[canonical]);
    }

    #[test]
    fn string_tokens_resolve_against_enumeration() {
        let raw = vec![RawRule::to("start", ["middle", "end"])];
        let rules = normalize(raw, &enumeration()).unwrap();

        assert_eq!(
            rules.rules()[0],
            TransitionRule::explicit(TestState::Start, [TestState::Middle, TestState::End])
        );
    }

    #[test]
    fn lone_wildcard_is_any() {
        let rules = normalize(
            vec![RawRule::to("middle", ["*"]), RawRule::any("end")],
            &enumeration(),
        )
        .unwrap();

        assert_eq!(rules.rules()[0].targets(), &TargetSpec::Any);
        assert_eq!(rules.rules()[1].targets(), &TargetSpec::Any);
    }

    #[test]
    fn none_and_empty_lists_are_terminal() {
        let rules = normalize(
            vec![
                RawRule::new("end", None),
                RawRule::new("middle", Some(Vec::new())),
            ],
            &enumeration(),
        )
        .unwrap();

        assert_eq!(rules.rules()[0].targets(), &TargetSpec::Terminal);
        assert_eq!(rules.rules()[1].targets(), &TargetSpec::Terminal);
    }

    #[test]
    fn wildcard_mixed_with_states_is_rejected() {
        let errors = rule_errors(normalize(
            vec![RawRule::to("start", ["*", "end"])],
            &enumeration(),
        ));

        assert_eq!(
            errors,
            vec![RuleError::MixedWildcard {
                rule: 0,
                start: "start".to_string(),
            }]
        );
    }

    #[test]
    fn every_unknown_token_is_reported() {
        let errors = rule_errors(normalize(
            vec![
                RawRule::to("start", ["middle"]),
                RawRule::to("begin", ["middle", "finish"]),
                RawRule::terminal("done"),
            ],
            &enumeration(),
        ));

        assert_eq!(errors.len(), 3);
        assert!(errors.contains(&RuleError::UnknownState {
            rule: 1,
            token: "begin".to_string(),
        }));
        assert!(errors.contains(&RuleError::UnknownState {
            rule: 1,
            token: "finish".to_string(),
        }));
        assert!(errors.iter().any(|e| e.rule() == 2));
    }

    #[test]
    fn canonical_rule_with_foreign_state_is_rejected() {
        let errors = rule_errors(normalize(
            vec![TransitionRule::explicit(TestState::Start, [TestState::Any]).into()],
            &enumeration(),
        ));

        assert_eq!(
            errors,
            vec![RuleError::ForeignState {
                rule: 0,
                state: "any".to_string(),
            }]
        );
    }

    #[test]
    fn validate_reports_success() {
        let states = enumeration();
        let normalizer = RuleNormalizer::new(&states);
        assert!(normalizer
            .validate(vec![RawRule::any("start")])
            .is_success());
        assert!(normalizer
            .validate(vec![RawRule::any("nowhere")])
            .is_failure());
    }

    #[test]
    fn empty_rule_list_normalizes_to_empty_set() {
        let rules = normalize(Vec::new(), &enumeration()).unwrap();
        assert!(rules.is_empty());
    }
}
