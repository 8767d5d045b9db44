//! The placeholder marker.
//!
//! A placeholder stands for "argument(s) not yet supplied" inside a
//! positional argument list. Only one may appear in a single list; the
//! values before it bind from the left, the values after it bind from the
//! right.

use super::value::Value;

/// Placeholder marker type for partial application.
///
/// Inside the [`arguments!`](crate::arguments), [`partial!`](crate::partial)
/// and [`call!`](crate::call) macros, write `__` directly as a literal token.
/// Outside of the macros, convert the marker into a [`Value`] explicitly.
///
/// # Examples
///
/// ```
/// use lambars_partial::{Placeholder, Value};
///
/// let marker = Value::from(Placeholder);
/// assert!(marker.is_placeholder());
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Placeholder;

/// The placeholder constant for partial application.
///
/// The macros match `__` as a literal identifier token, so importing this
/// constant is never needed for them; it exists for building argument lists
/// programmatically.
///
/// Note: This is named `__` (double underscore) because Rust's `macro_rules!`
/// cannot match a single underscore `_` as a literal token.
///
/// # Examples
///
/// ```
/// use lambars_partial::{Arguments, Value, __};
///
/// let arguments = Arguments::positional(vec![Value::from(1), Value::from(__)]);
/// assert_eq!(arguments.placeholder_position().unwrap(), Some(1));
/// ```
#[allow(non_upper_case_globals)]
pub const __: Placeholder = Placeholder;

impl From<Placeholder> for Value {
    fn from(_: Placeholder) -> Self {
        Self::Placeholder
    }
}

impl std::fmt::Display for Placeholder {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter.write_str("...")
    }
}
