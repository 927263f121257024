//! Guarded state attributes.
//!
//! An owning entity declares its state attribute once as a [`StateField`]
//! and embeds one [`GuardedStateSlot`] per instance. Every external write
//! goes through [`GuardedStateSlot::assign`] (or `assign_name` for raw
//! tokens), which consults the field's checker before committing:
//!
//! - the first write of an unassigned slot is committed unconditionally
//! - writing the current value again is an idempotent no-op
//! - any other change is committed only if the checker approves it
//!
//! Writes that bypass the slot are outside what this crate can prevent.

mod field;
mod guarded;

pub use field::StateField;
pub use guarded::{Assignment, GuardedStateSlot};
