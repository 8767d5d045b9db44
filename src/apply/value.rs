//! Dynamic argument values.
//!
//! Partial application splices heterogeneous argument lists, so arguments
//! are carried as [`Value`]s: plain data, the placeholder marker, callables,
//! other applied calls and shared [`Slot`]s.
//!
//! Data variants compare structurally. Callables, applied calls and slots
//! compare by identity, the way reference types do.

use std::sync::Arc;

use indexmap::IndexMap;
use parking_lot::RwLock;

use super::applied::Applied;
use super::error::ApplyError;
use super::function::{Arguments, Function};

/// Insertion-ordered mapping of parameter names to values.
///
/// Used for keyword arguments and for the auxiliary attribute storage of an
/// [`Applied`] call. Merging is a right-biased union: `extend` overwrites the
/// values of existing keys and keeps their original position.
pub type Keywords = IndexMap<String, Value>;

/// A dynamically typed argument value.
///
/// # Examples
///
/// ```rust
/// use lambars_partial::Value;
///
/// assert_eq!(Value::from(3), Value::Int(3));
/// assert_eq!(Value::from("abc").as_str(), Some("abc"));
/// assert_eq!(Value::tuple([1, 2]).as_sequence().map(<[Value]>::len), Some(2));
/// ```
#[derive(Clone, Default)]
pub enum Value {
    /// The absent value.
    #[default]
    None,
    /// A boolean.
    Bool(bool),
    /// A signed integer.
    Int(i64),
    /// A floating point number.
    Float(f64),
    /// An immutable string.
    Str(Arc<str>),
    /// An immutable ordered sequence.
    Tuple(Arc<[Value]>),
    /// An ordered sequence.
    List(Vec<Value>),
    /// An ordered string-keyed mapping.
    Map(Keywords),
    /// The placeholder marker: "argument(s) supplied later".
    Placeholder,
    /// A plain callable.
    Function(Function),
    /// A partially applied call.
    Applied(Applied),
    /// A shared mutable cell.
    Slot(Slot),
}

impl Value {
    /// Builds a [`Value::Tuple`] from any sequence of convertible items.
    pub fn tuple<I, T>(items: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Self>,
    {
        Self::Tuple(items.into_iter().map(Into::into).collect())
    }

    /// Builds a [`Value::List`] from any sequence of convertible items.
    pub fn list<I, T>(items: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Self>,
    {
        Self::List(items.into_iter().map(Into::into).collect())
    }

    /// Short type name used in error messages.
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Bool(_) => "bool",
            Self::Int(_) => "int",
            Self::Float(_) => "float",
            Self::Str(_) => "str",
            Self::Tuple(_) => "tuple",
            Self::List(_) => "list",
            Self::Map(_) => "map",
            Self::Placeholder => "placeholder",
            Self::Function(_) => "function",
            Self::Applied(_) => "partial",
            Self::Slot(_) => "slot",
        }
    }

    /// Returns `true` for the placeholder marker.
    #[must_use]
    pub const fn is_placeholder(&self) -> bool {
        matches!(self, Self::Placeholder)
    }

    /// Returns `true` for [`Value::None`].
    #[must_use]
    pub const fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }

    /// Invokes a callable value.
    ///
    /// # Errors
    ///
    /// Returns [`ApplyError::NotCallable`] when the value is neither a
    /// [`Function`] nor an [`Applied`] call, and otherwise whatever the
    /// callable itself returns.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lambars_partial::{ApplyError, Value, arguments};
    ///
    /// let error = Value::from("text").call(arguments!(1)).unwrap_err();
    /// assert!(matches!(error, ApplyError::NotCallable { type_name: "str" }));
    /// ```
    pub fn call(&self, arguments: Arguments) -> Result<Self, ApplyError> {
        match self {
            Self::Function(function) => function.call(arguments),
            Self::Applied(applied) => applied.call(arguments),
            other => Err(ApplyError::NotCallable {
                type_name: other.type_name(),
            }),
        }
    }

    /// Returns the boolean, if this is one.
    #[must_use]
    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(value) => Some(*value),
            _ => None,
        }
    }

    /// Returns the integer, if this is one.
    #[must_use]
    pub const fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(value) => Some(*value),
            _ => None,
        }
    }

    /// Returns the number as a float, widening integers.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub const fn as_float(&self) -> Option<f64> {
        match self {
            Self::Float(value) => Some(*value),
            Self::Int(value) => Some(*value as f64),
            _ => None,
        }
    }

    /// Returns the string slice, if this is a string.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(value) => Some(value),
            _ => None,
        }
    }

    /// Returns the items of a tuple or a list.
    #[must_use]
    pub fn as_sequence(&self) -> Option<&[Self]> {
        match self {
            Self::Tuple(items) => Some(items),
            Self::List(items) => Some(items),
            _ => None,
        }
    }

    /// Returns the mapping, if this is one.
    #[must_use]
    pub const fn as_map(&self) -> Option<&Keywords> {
        match self {
            Self::Map(map) => Some(map),
            _ => None,
        }
    }

    /// Returns the function, if this is one.
    #[must_use]
    pub const fn as_function(&self) -> Option<&Function> {
        match self {
            Self::Function(function) => Some(function),
            _ => None,
        }
    }

    /// Returns the applied call, if this is one.
    #[must_use]
    pub const fn as_applied(&self) -> Option<&Applied> {
        match self {
            Self::Applied(applied) => Some(applied),
            _ => None,
        }
    }

    /// Returns the slot, if this is one.
    #[must_use]
    pub const fn as_slot(&self) -> Option<&Slot> {
        match self {
            Self::Slot(slot) => Some(slot),
            _ => None,
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::None, Self::None) | (Self::Placeholder, Self::Placeholder) => true,
            (Self::Bool(left), Self::Bool(right)) => left == right,
            (Self::Int(left), Self::Int(right)) => left == right,
            #[allow(clippy::float_cmp)]
            (Self::Float(left), Self::Float(right)) => left == right,
            (Self::Str(left), Self::Str(right)) => left == right,
            (Self::Tuple(left), Self::Tuple(right)) => left == right,
            (Self::List(left), Self::List(right)) => left == right,
            (Self::Map(left), Self::Map(right)) => left == right,
            (Self::Function(left), Self::Function(right)) => left.ptr_eq(right),
            (Self::Applied(left), Self::Applied(right)) => left.ptr_eq(right),
            (Self::Slot(left), Self::Slot(right)) => left.ptr_eq(right),
            _ => false,
        }
    }
}

/// A shared, mutable cell holding a [`Value`].
///
/// Every other value is immutable once built; slots are the one way to tie
/// a knot, e.g. an applied call that holds itself as a bound argument.
///
/// # Examples
///
/// ```rust
/// use lambars_partial::{Slot, Value};
///
/// let slot = Slot::new(Value::Int(1));
/// let alias = slot.clone();
/// slot.set(Value::Int(2));
/// assert_eq!(alias.get(), Value::Int(2));
/// ```
#[derive(Clone, Default)]
pub struct Slot {
    cell: Arc<RwLock<Value>>,
}

impl Slot {
    /// Creates a slot holding `value`.
    pub fn new(value: impl Into<Value>) -> Self {
        Self {
            cell: Arc::new(RwLock::new(value.into())),
        }
    }

    /// Returns a clone of the held value.
    #[must_use]
    pub fn get(&self) -> Value {
        self.cell.read().clone()
    }

    /// Replaces the held value, returning the previous one.
    pub fn set(&self, value: impl Into<Value>) -> Value {
        std::mem::replace(&mut *self.cell.write(), value.into())
    }

    /// Returns `true` if both handles refer to the same cell.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.cell, &other.cell)
    }

    pub(crate) fn identity(&self) -> usize {
        Arc::as_ptr(&self.cell).addr()
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::Str(Arc::from(value))
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::Str(Arc::from(value))
    }
}

impl From<()> for Value {
    fn from((): ()) -> Self {
        Self::None
    }
}

impl From<Vec<Self>> for Value {
    fn from(items: Vec<Self>) -> Self {
        Self::List(items)
    }
}

impl From<Keywords> for Value {
    fn from(map: Keywords) -> Self {
        Self::Map(map)
    }
}

impl From<Function> for Value {
    fn from(function: Function) -> Self {
        Self::Function(function)
    }
}

impl From<Applied> for Value {
    fn from(applied: Applied) -> Self {
        Self::Applied(applied)
    }
}

impl From<Slot> for Value {
    fn from(slot: Slot) -> Self {
        Self::Slot(slot)
    }
}

impl<T: Into<Self>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::None, Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_values_compare_structurally() {
        assert_eq!(Value::tuple([1, 2]), Value::tuple([1, 2]));
        assert_eq!(Value::list(["a"]), Value::list(["a"]));
        assert_ne!(Value::tuple([1, 2]), Value::list([1, 2]));
        assert_ne!(Value::Int(1), Value::Float(1.0));
    }

    #[test]
    fn test_placeholder_is_singleton() {
        assert_eq!(Value::Placeholder, Value::Placeholder);
        assert!(Value::Placeholder.is_placeholder());
        assert!(!Value::None.is_placeholder());
    }

    #[test]
    fn test_slots_compare_by_identity() {
        let slot = Slot::new(1);
        assert_eq!(Value::from(slot.clone()), Value::from(slot));
        assert_ne!(Value::from(Slot::new(1)), Value::from(Slot::new(1)));
    }

    #[test]
    fn test_slot_set_returns_previous_value() {
        let slot = Slot::new("before");
        assert_eq!(slot.set("after"), Value::from("before"));
        assert_eq!(slot.get(), Value::from("after"));
    }

    #[test]
    fn test_as_float_widens_integers() {
        assert_eq!(Value::Int(2).as_float(), Some(2.0));
        assert_eq!(Value::from("2").as_float(), None);
    }

    #[test]
    fn test_as_bool() {
        assert_eq!(Value::from(true).as_bool(), Some(true));
        assert_eq!(Value::Int(1).as_bool(), None);
    }

    #[test]
    fn test_as_function_keeps_identity() {
        let function = Function::new("noop", |_| Ok(Value::None));
        let value = Value::from(function.clone());
        assert_eq!(value.as_function(), Some(&function));
        assert_eq!(Value::from(function.partial()).as_function(), None);
    }

    #[test]
    fn test_option_conversion() {
        assert_eq!(Value::from(None::<i64>), Value::None);
        assert_eq!(Value::from(Some(4)), Value::Int(4));
    }

    #[test]
    fn test_non_callable_value_cannot_be_called() {
        let error = Value::Int(3).call(Arguments::new()).unwrap_err();
        assert!(matches!(error, ApplyError::NotCallable { type_name: "int" }));
    }
}
