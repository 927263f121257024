//! Statefield: declarative transition rules for guarded state attributes
//!
//! An entity declares a state attribute once, as a [`StateField`]: the
//! ordered enumeration of states it may hold, a mandatory default, and an
//! optional set of transition rules. Every write then goes through a
//! [`GuardedStateSlot`], which commits the new state only if the transition
//! from the current one is allowed.
//!
//! # Core Concepts
//!
//! - **State**: Type-safe state representation via the `State` trait, or
//!   `StateToken` when the states are only known at runtime
//! - **Rules**: `start -> [targets]`, `start -> *` or `start -> terminal`,
//!   with several rules per start state combined by OR
//! - **Omission**: a state that no rule starts from is unconstrained
//! - **Fallback**: without any rules, only a move to the next state in
//!   enumeration order is allowed
//!
//! # Example
//!
//! ```rust
//! use statefield::rules::RawRule;
//! use statefield::slot::StateField;
//! use statefield::state_enum;
//! use statefield::TransitionError;
//! use std::sync::Arc;
//!
//! state_enum! {
//!     pub enum OrderState {
//!         New = "new",
//!         Paid = "paid",
//!         Shipped = "shipped",
//!         Cancelled = "cancelled",
//!     }
//! }
//!
//! let field = Arc::new(
//!     StateField::builder("status")
//!         .choices()
//!         .default(OrderState::New)
//!         .rule(RawRule::to("new", ["paid", "cancelled"]))
//!         .rule(RawRule::to("paid", ["shipped"]))
//!         .rule(RawRule::terminal("shipped"))
//!         .rule(RawRule::terminal("cancelled"))
//!         .build()?,
//! );
//!
//! let mut order = field.slot();
//! order.assign(OrderState::Paid)?;
//!
//! let err = order.assign(OrderState::Cancelled).unwrap_err();
//! assert_eq!(err.error_code(), "TRANSITION_DENIED");
//! assert_eq!(order.value(), &OrderState::Paid);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod builder;
pub mod config;
pub mod core;
pub mod rules;
pub mod slot;

// Re-export commonly used types
pub use builder::{BuildError, StateFieldBuilder};
pub use config::{load_json, ConfigError};
pub use core::{
    Choices, OrdinalChecker, State, StateHistory, StateToken, StateTransition, TransitionChecker,
    TransitionError,
};
pub use slot::{Assignment, GuardedStateSlot, StateField};
