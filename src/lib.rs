//! # lambars-partial
//!
//! Partial function application where a placeholder may stand anywhere in
//! the positional argument list, not only at the end.
//!
//! ## Overview
//!
//! Conventional partial application binds a prefix of the arguments. Here
//! the placeholder `__` marks where the arguments supplied later go, so
//! arguments can be bound from the left, from the right, or from both ends:
//!
//! - **Applied calls**: [`Applied`] binds a [`Function`] to left arguments,
//!   right arguments and keywords
//! - **Further application**: calling an [`Applied`] with `__` among the new
//!   arguments yields another, flattened [`Applied`]
//! - **Persistence**: [`Applied::reduce`] and [`Applied::restore_state`]
//!   export and import the state of a call
//! - **Serde**: the [`persist`] module snapshots values through any serde
//!   format
//!
//! ## Feature Flags
//!
//! - `serde`: the [`persist`] module (enabled by default)
//! - `full`: Enable all features
//!
//! ## Example
//!
//! ```rust
//! use lambars_partial::prelude::*;
//!
//! let digits = Function::new("digits", |arguments| {
//!     let hundreds = arguments.require_int(0)?;
//!     let tens = arguments.require_int(1)?;
//!     let ones = arguments.require_int(2)?;
//!     Ok(Value::Int(hundreds * 100 + tens * 10 + ones))
//! });
//!
//! let both_ends = partial!(digits, 1, __, 3).unwrap();
//! assert_eq!(call!(both_ends, 2).unwrap(), Value::Int(123));
//! assert_eq!(
//!     both_ends.to_string(),
//!     "partial(<function digits>, 1, ..., 3)"
//! );
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
// Note: Disabling redundant_closure_for_method_calls due to clippy 0.1.92 panic bug
#![allow(clippy::redundant_closure_for_method_calls)]

/// Prelude module for convenient imports.
///
/// Re-exports commonly used types and macros.
///
/// # Usage
///
/// ```rust
/// use lambars_partial::prelude::*;
/// ```
pub mod prelude {
    pub use crate::apply::*;

    #[cfg(feature = "serde")]
    pub use crate::persist::*;
}

pub mod apply;

#[cfg(feature = "serde")]
pub mod persist;

pub use apply::{
    __, Applied, ApplyError, Arguments, Constructor, Function, Keywords, Placeholder, Reduction,
    Slot, TargetError, Value, WeakApplied,
};
