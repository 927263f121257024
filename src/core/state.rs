//! State traits for the members of a state enumeration.
//!
//! A state is one named member of a closed set. Typed enums implement
//! [`State`] (usually through [`state_enum!`](crate::state_enum)), while
//! sets that are only known at runtime use [`StateToken`].

use serde::{Deserialize, Serialize};
use std::fmt::{self, Debug};
use std::hash::{Hash, Hasher};

/// Trait for members of a state enumeration.
///
/// All methods are pure. The name is the token raw strings resolve
/// against, so it must be unique within one enumeration.
///
/// # Required Traits
///
/// - `Clone`: States are copied into rules and audit records
/// - `PartialEq`: States must be comparable for rule matching
/// - `Debug`: States must be debuggable for diagnostics
/// - `Serialize` + `Deserialize`: States travel in transition records
///
/// # Example
///
/// ```rust
/// use statefield::core::State;
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
/// enum OrderState {
///     Created,
///     Paid,
///     Shipped,
/// }
///
/// impl State for OrderState {
///     fn name(&self) -> &str {
///         match self {
///             Self::Created => "created",
///             Self::Paid => "paid",
///             Self::Shipped => "shipped",
///         }
///     }
///
///     fn label(&self) -> Option<&str> {
///         match self {
///             Self::Paid => Some("Payment received"),
///             _ => None,
///         }
///     }
/// }
///
/// assert_eq!(OrderState::Paid.name(), "paid");
/// assert_eq!(OrderState::Paid.label(), Some("Payment received"));
/// assert_eq!(OrderState::Created.label(), None);
/// ```
pub trait State:
    Clone + PartialEq + Debug + Serialize + for<'de> Deserialize<'de> + Send + Sync
{
    /// Token identifying this state inside its enumeration.
    fn name(&self) -> &str;

    /// Optional human-readable label.
    ///
    /// Default implementation returns `None`.
    fn label(&self) -> Option<&str> {
        None
    }
}

/// A [`State`] type that can list every member in declaration order.
///
/// Declaration order is meaningful: it is the ordinal order used by the
/// adjacency fallback when a field has no rule set.
pub trait Choices: State {
    /// All members, in declaration order.
    fn members() -> Vec<Self>;
}

/// String-backed state for enumerations built at runtime.
///
/// Equality and hashing only consider the name; the label is display
/// metadata.
#[derive(Clone, Serialize, Deserialize)]
pub struct StateToken {
    name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    label: Option<String>,
}

impl StateToken {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            label: None,
        }
    }

    pub fn labeled(name: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            label: Some(label.into()),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.name
    }
}

impl State for StateToken {
    fn name(&self) -> &str {
        &self.name
    }

    fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }
}

impl PartialEq for StateToken {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for StateToken {}

impl Hash for StateToken {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}

impl Debug for StateToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StateToken({:?})", self.name)
    }
}

impl fmt::Display for StateToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

impl From<&str> for StateToken {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for StateToken {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}
