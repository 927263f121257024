//! State fields declared in JSON.
//!
//! A document describes one field whose members are only known at runtime,
//! producing a `StateField<StateToken>`:
//!
//! ```json
//! {
//!   "name": "state",
//!   "states": [{"name": "start", "label": "Payment started"}, "done"],
//!   "default": "start",
//!   "rules": [["start", ["done"]], {"from": "done", "to": null}]
//! }
//! ```
//!
//! A rule target may be `null` (terminal), a wildcard marker, a single name
//! or a list of names. Leaving `rules` out, or leaving it empty, selects the
//! ordinal default.

mod error;

pub use error::ConfigError;

use crate::core::StateToken;
use crate::rules::{RawRule, RawTarget, Token};
use crate::slot::StateField;
use serde::{Deserialize, Serialize};

/// Parsed field declaration, before validation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FieldConfig {
    #[serde(default = "default_field_name")]
    pub name: String,
    pub states: Vec<StateSpec>,
    pub default: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_length: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rules: Option<Vec<RuleSpec>>,
}

/// A member given as a bare name or as `{name, label}`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StateSpec {
    Name(String),
    Labeled {
        name: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        label: Option<String>,
    },
}

/// A rule given as a `[from, targets]` pair or a `{from, to}` table.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RuleSpec {
    Pair(String, Option<Targets>),
    Table {
        from: String,
        #[serde(default)]
        to: Option<Targets>,
    },
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Targets {
    One(String),
    Many(Vec<String>),
}

fn default_field_name() -> String {
    "state".to_string()
}

impl From<StateSpec> for StateToken {
    fn from(spec: StateSpec) -> Self {
        match spec {
            StateSpec::Name(name) => StateToken::new(name),
            StateSpec::Labeled {
                name,
                label: Some(label),
            } => StateToken::labeled(name, label),
            StateSpec::Labeled { name, label: None } => StateToken::new(name),
        }
    }
}

impl From<RuleSpec> for RawRule<StateToken> {
    fn from(spec: RuleSpec) -> Self {
        let (from, to) = match spec {
            RuleSpec::Pair(from, to) => (from, to),
            RuleSpec::Table { from, to } => (from, to),
        };
        let targets = to.map(|targets| match targets {
            Targets::One(name) => vec![RawTarget::from(name)],
            Targets::Many(names) => names.into_iter().map(RawTarget::from).collect(),
        });
        RawRule::new(Token::Name(from), targets)
    }
}

impl FieldConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_value(value: serde_json::Value) -> Result<Self, ConfigError> {
        Ok(serde_json::from_value(value)?)
    }

    /// Validate the declaration and build the field.
    pub fn build(self) -> Result<StateField<StateToken>, ConfigError> {
        let mut builder = StateField::builder(self.name)
            .states(self.states.into_iter().map(StateToken::from).collect())
            .default_name(self.default);

        if let Some(max_length) = self.max_length {
            builder = builder.max_length(max_length);
        }
        if let Some(rules) = self.rules {
            builder = builder.rules(rules.into_iter().map(RawRule::from).collect());
        }

        Ok(builder.build()?)
    }
}

/// Parse and build a field from a JSON document in one step.
pub fn load_json(json: &str) -> Result<StateField<StateToken>, ConfigError> {
    FieldConfig::from_json(json)?.build()
}
