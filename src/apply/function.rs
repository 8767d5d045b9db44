//! Callables and argument bundles.
//!
//! A [`Function`] is an opaque unit of behaviour invoked with an
//! [`Arguments`] bundle. No arity or keyword-name validation happens here;
//! a target that receives the wrong arguments reports that itself.

use std::fmt;
use std::sync::Arc;

use super::applied::Applied;
use super::error::ApplyError;
use super::value::{Keywords, Value};

type Body = dyn Fn(Arguments) -> Result<Value, ApplyError> + Send + Sync;

/// A named, shareable callable.
///
/// Cloning a `Function` is cheap and yields a handle to the same callable;
/// equality is identity.
///
/// # Examples
///
/// ```rust
/// use lambars_partial::{Function, Value, arguments};
///
/// let negate = Function::new("negate", |arguments| {
///     let value = arguments.require_int(0)?;
///     Ok(Value::Int(-value))
/// });
///
/// assert_eq!(negate.call(arguments!(5)).unwrap(), Value::Int(-5));
/// assert_eq!(negate.name(), "negate");
/// ```
#[derive(Clone)]
pub struct Function {
    name: Arc<str>,
    body: Arc<Body>,
}

impl Function {
    /// Wraps a closure as a callable.
    pub fn new<F>(name: impl Into<Arc<str>>, body: F) -> Self
    where
        F: Fn(Arguments) -> Result<Value, ApplyError> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            body: Arc::new(body),
        }
    }

    /// The name shown by the textual representation.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Invokes the callable.
    ///
    /// # Errors
    ///
    /// Returns whatever error the callable raises.
    #[inline]
    pub fn call(&self, arguments: Arguments) -> Result<Value, ApplyError> {
        (self.body)(arguments)
    }

    /// Wraps this function in an [`Applied`] call with nothing bound.
    ///
    /// This is the decorator form: the result accepts placeholder calls for
    /// further partial application.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lambars_partial::{Function, Value, call};
    ///
    /// let digits = Function::new("digits", |arguments| {
    ///     let hundreds = arguments.require_int(0)?;
    ///     let tens = arguments.require_int(1)?;
    ///     let ones = arguments.require_int(2)?;
    ///     Ok(Value::Int(hundreds * 100 + tens * 10 + ones))
    /// })
    /// .partial();
    ///
    /// let first_bound = call!(digits, 1, __).unwrap();
    /// assert_eq!(call!(first_bound, 2, 3).unwrap(), Value::Int(123));
    /// ```
    #[must_use]
    pub fn partial(&self) -> Applied {
        Applied::wrap(self.clone())
    }

    /// Returns `true` if both handles refer to the same callable.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        self.identity() == other.identity()
    }

    fn identity(&self) -> usize {
        Arc::as_ptr(&self.body).cast::<()>().addr()
    }
}

impl PartialEq for Function {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl Eq for Function {}

/// A positional and keyword argument bundle.
///
/// # Examples
///
/// ```rust
/// use lambars_partial::{Arguments, Value};
///
/// let arguments = Arguments::positional(vec![Value::Int(1)]).with_keyword("scale", 2);
/// assert_eq!(arguments.get(0), Some(&Value::Int(1)));
/// assert_eq!(arguments.keyword("scale"), Some(&Value::Int(2)));
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Arguments {
    /// Positional arguments, in call order.
    pub positional: Vec<Value>,
    /// Keyword arguments.
    pub keywords: Keywords,
}

impl Arguments {
    /// Creates an empty bundle.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a bundle of positional arguments only.
    #[must_use]
    pub fn positional(positional: Vec<Value>) -> Self {
        Self {
            positional,
            keywords: Keywords::new(),
        }
    }

    /// Adds (or overrides) a keyword argument.
    #[must_use]
    pub fn with_keyword(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.keywords.insert(name.into(), value.into());
        self
    }

    /// Number of positional arguments.
    #[must_use]
    pub fn positional_len(&self) -> usize {
        self.positional.len()
    }

    /// Returns `true` if there are neither positional nor keyword arguments.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.positional.is_empty() && self.keywords.is_empty()
    }

    /// The positional argument at `index`.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Value> {
        self.positional.get(index)
    }

    /// The keyword argument called `name`.
    #[must_use]
    pub fn keyword(&self, name: &str) -> Option<&Value> {
        self.keywords.get(name)
    }

    /// The positional argument at `index`, or a target error naming it.
    ///
    /// # Errors
    ///
    /// Returns [`ApplyError::Target`] if the argument is missing.
    pub fn require(&self, index: usize) -> Result<&Value, ApplyError> {
        self.get(index).ok_or_else(|| {
            ApplyError::target(format!(
                "missing positional argument {index} (got {})",
                self.positional_len()
            ))
        })
    }

    /// The positional integer at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`ApplyError::Target`] if the argument is missing or not an
    /// integer.
    pub fn require_int(&self, index: usize) -> Result<i64, ApplyError> {
        let value = self.require(index)?;
        value.as_int().ok_or_else(|| {
            ApplyError::target(format!(
                "positional argument {index} must be int, not {}",
                value.type_name()
            ))
        })
    }

    /// The keyword argument called `name`, or a target error naming it.
    ///
    /// # Errors
    ///
    /// Returns [`ApplyError::Target`] if the keyword is missing.
    pub fn require_keyword(&self, name: &str) -> Result<&Value, ApplyError> {
        self.keyword(name)
            .ok_or_else(|| ApplyError::target(format!("missing keyword argument '{name}'")))
    }

    /// Position of the single placeholder among the positional arguments.
    ///
    /// # Errors
    ///
    /// Returns [`ApplyError::MultiplePlaceholders`] if more than one
    /// placeholder is present.
    pub fn placeholder_position(&self) -> Result<Option<usize>, ApplyError> {
        find_placeholder(&self.positional)
    }

    /// Returns `true` if any positional argument is the placeholder.
    #[must_use]
    pub fn contains_placeholder(&self) -> bool {
        self.positional.iter().any(Value::is_placeholder)
    }
}

/// Position of the single placeholder in `values`.
pub(super) fn find_placeholder(values: &[Value]) -> Result<Option<usize>, ApplyError> {
    let mut found = None;
    for (index, value) in values.iter().enumerate() {
        if !value.is_placeholder() {
            continue;
        }
        if let Some(first) = found {
            return Err(ApplyError::MultiplePlaceholders {
                first,
                second: index,
            });
        }
        found = Some(index);
    }
    Ok(found)
}

impl fmt::Debug for Function {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, formatter)
    }
}

impl fmt::Display for Function {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "<function {}>", self.name)
    }
}
