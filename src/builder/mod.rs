//! Builder API for declaring state fields.
//!
//! This module provides the fluent [`StateFieldBuilder`] and the
//! `state_enum!` macro for declaring enumerations with minimal boilerplate.

pub mod error;
pub mod field;
pub mod macros;

pub use error::BuildError;
pub use field::StateFieldBuilder;
