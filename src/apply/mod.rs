//! Partial application with a placeholder.
//!
//! This module provides [`Applied`], a partially applied call whose bound
//! positional arguments may sit on either side of a placeholder, not only as
//! a prefix.
//!
//! # Overview
//!
//! - [`Applied`]: a target bound to left arguments, right arguments and
//!   keywords
//! - [`Value`]: the dynamic argument value, including [`Value::Placeholder`]
//! - [`Function`]: a named callable taking an [`Arguments`] bundle
//! - [`Reduction`]: the export recipe used to persist and rebuild a call
//! - [`arguments!`], [`partial!`], [`call!`]: argument-list macros where `__`
//!   stands for the placeholder
//!
//! # Examples
//!
//! ## Binding from both ends
//!
//! ```
//! use lambars_partial::{Function, Value, call};
//!
//! let digits = Function::new("digits", |arguments| {
//!     let hundreds = arguments.require_int(0)?;
//!     let tens = arguments.require_int(1)?;
//!     let ones = arguments.require_int(2)?;
//!     Ok(Value::Int(hundreds * 100 + tens * 10 + ones))
//! })
//! .partial();
//!
//! let first = call!(digits, 1, __).unwrap();
//! assert_eq!(call!(first, 2, 3).unwrap(), Value::Int(123));
//!
//! let first_two = call!(first, 2, __).unwrap();
//! assert_eq!(call!(first_two, 3).unwrap(), Value::Int(123));
//!
//! let last = call!(digits, __, 3).unwrap();
//! assert_eq!(call!(last, 1, 2).unwrap(), Value::Int(123));
//!
//! let outer = call!(digits, 1, __, 3).unwrap();
//! assert_eq!(call!(outer, 2).unwrap(), Value::Int(123));
//! ```
//!
//! # Laws
//!
//! - **Left binding**: without a placeholder, `partial!(f, a..)(b..) == f(a.., b..)`
//! - **Splicing**: `partial!(f, l.., __, r..)(m..) == f(l.., m.., r..)`
//! - **Flattening**: applying an applied call again never nests; the result
//!   wraps the original target
//! - **Keyword override**: call-time keywords replace bound keywords of the
//!   same name

mod applied;
mod arguments_macro;
mod error;
mod function;
pub(crate) mod guard;
mod placeholder;
mod repr;
mod state;
mod value;

pub use applied::{Applied, WeakApplied};
pub use error::{ApplyError, TargetError};
pub use function::{Arguments, Function};
pub use placeholder::{__, Placeholder};
pub use state::{Constructor, Reduction};
pub use value::{Keywords, Slot, Value};

pub use crate::arguments;
pub use crate::call;
pub use crate::partial;

static_assertions::assert_impl_all!(Applied: Send, Sync, Clone);
static_assertions::assert_impl_all!(Value: Send, Sync, Clone);
static_assertions::assert_impl_all!(ApplyError: Send, Sync, std::error::Error);
