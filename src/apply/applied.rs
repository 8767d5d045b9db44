//! The applied call: a target bound to left arguments, right arguments and
//! keywords.
//!
//! # Splicing
//!
//! ```text
//! construct(f, l1, .., lN, ..., r1, .., rM)(a1, .., aK)
//!     = f(l1, .., lN, a1, .., aK, r1, .., rM)
//! ```
//!
//! Keywords are merged as a right-biased union, call-time keywords winning.
//!
//! # Flattening
//!
//! Constructing from another applied call never nests: the inner call's
//! arguments are merged into the new one and the inner target is reused.
//!
//! ```text
//! construct(construct(f, L1, ..., R1), L2, ..., R2)
//!     = construct(f, L1 ++ L2, ..., R2 ++ R1)
//! ```

use std::sync::{Arc, Weak};

use super::error::ApplyError;
use super::function::{Arguments, Function, find_placeholder};
use super::value::{Keywords, Value};

#[derive(Clone)]
pub(super) struct AppliedState {
    pub(super) target: Function,
    pub(super) left: Arc<[Value]>,
    pub(super) right: Arc<[Value]>,
    pub(super) keywords: Keywords,
    pub(super) attributes: Keywords,
}

/// A callable with some of its arguments already supplied.
///
/// Arguments before the placeholder are prepended to every call, arguments
/// after it are appended. Without a placeholder every bound argument binds
/// from the left, as in conventional partial application.
///
/// Calling an `Applied` with a placeholder among the new arguments does not
/// run the target; it returns a further `Applied` instead.
///
/// Cloning is cheap and yields a handle to the same instance. Equality is
/// identity.
///
/// # Examples
///
/// ```rust
/// use lambars_partial::{Function, Value, call, partial};
///
/// let digits = Function::new("digits", |arguments| {
///     let hundreds = arguments.require_int(0)?;
///     let tens = arguments.require_int(1)?;
///     let ones = arguments.require_int(2)?;
///     Ok(Value::Int(hundreds * 100 + tens * 10 + ones))
/// });
///
/// let first_and_last = partial!(digits.clone(), 1, __, 3).unwrap();
/// assert_eq!(call!(first_and_last, 2).unwrap(), Value::Int(123));
///
/// let last_only = partial!(digits, __, 3).unwrap();
/// assert_eq!(call!(last_only, 1, 2).unwrap(), Value::Int(123));
/// ```
#[derive(Clone)]
pub struct Applied {
    pub(super) state: Arc<AppliedState>,
}

/// A weak handle to an [`Applied`] call.
///
/// Does not keep the call alive; [`WeakApplied::upgrade`] returns `None`
/// once every strong handle is gone.
#[derive(Clone, Debug, Default)]
pub struct WeakApplied {
    state: Weak<AppliedState>,
}

impl WeakApplied {
    /// Returns a strong handle if the call is still alive.
    #[must_use]
    pub fn upgrade(&self) -> Option<Applied> {
        self.state.upgrade().map(|state| Applied { state })
    }
}

impl Applied {
    /// Binds `arguments` to `target`.
    ///
    /// A placeholder among the positional arguments splits them into left
    /// and right arguments. When `target` is itself an applied call the
    /// result is flattened onto its target.
    ///
    /// # Errors
    ///
    /// - [`ApplyError::NotCallable`] if `target` is not callable.
    /// - [`ApplyError::MultiplePlaceholders`] if more than one placeholder is
    ///   present.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lambars_partial::{Applied, ApplyError, Value, arguments};
    ///
    /// let error = Applied::construct(Value::Int(1), arguments!(2)).unwrap_err();
    /// assert!(matches!(error, ApplyError::NotCallable { .. }));
    /// ```
    pub fn construct(target: impl Into<Value>, arguments: Arguments) -> Result<Self, ApplyError> {
        let callee = Callee::classify(target.into())?;
        let Arguments {
            positional,
            keywords,
        } = arguments;
        let (left, right) = split_at_placeholder(positional)?;

        match callee {
            Callee::Function(target) => {
                log::trace!(
                    "binding {} left and {} right arguments to {target}",
                    left.len(),
                    right.len()
                );
                Ok(Self::from_parts(
                    target,
                    left.into(),
                    right.into(),
                    keywords,
                    Keywords::new(),
                ))
            }
            Callee::Applied(inner) => Ok(inner.flatten(left, right, keywords)),
        }
    }

    /// Wraps a function with nothing bound.
    ///
    /// This is the decorator form: it never fails because a [`Function`] is
    /// always callable.
    #[must_use]
    pub fn wrap(target: Function) -> Self {
        Self::from_parts(
            target,
            Arc::from([]),
            Arc::from([]),
            Keywords::new(),
            Keywords::new(),
        )
    }

    pub(super) fn from_parts(
        target: Function,
        left: Arc<[Value]>,
        right: Arc<[Value]>,
        keywords: Keywords,
        attributes: Keywords,
    ) -> Self {
        Self {
            state: Arc::new(AppliedState {
                target,
                left,
                right,
                keywords,
                attributes,
            }),
        }
    }

    /// Merges further arguments into a new call on the same target.
    pub(super) fn flatten(&self, left: Vec<Value>, right: Vec<Value>, keywords: Keywords) -> Self {
        let inner = &self.state;
        log::trace!(
            "flattening partial of {}: {} + {} left, {} + {} right",
            inner.target,
            inner.left.len(),
            left.len(),
            right.len(),
            inner.right.len()
        );

        let merged_left: Arc<[Value]> = inner.left.iter().cloned().chain(left).collect();
        let merged_right: Arc<[Value]> = right
            .into_iter()
            .chain(inner.right.iter().cloned())
            .collect();
        let mut merged_keywords = inner.keywords.clone();
        merged_keywords.extend(keywords);

        Self::from_parts(
            inner.target.clone(),
            merged_left,
            merged_right,
            merged_keywords,
            Keywords::new(),
        )
    }

    /// Calls the target, or applies further if a placeholder is present.
    ///
    /// Without a placeholder the target receives
    /// `left ++ arguments.positional ++ right` and the bound keywords
    /// overridden by the call-time keywords; its result, or its error, is
    /// returned unchanged.
    ///
    /// With a placeholder the result is a [`Value::Applied`] built as by
    /// [`Applied::construct`] with `self` as the target.
    ///
    /// # Errors
    ///
    /// - [`ApplyError::MultiplePlaceholders`] if more than one placeholder is
    ///   present.
    /// - Any error raised by the target.
    pub fn call(&self, arguments: Arguments) -> Result<Value, ApplyError> {
        if arguments.contains_placeholder() {
            log::trace!("placeholder in call arguments, applying {self} further");
            return self.apply(arguments).map(Value::Applied);
        }

        let Arguments {
            positional,
            keywords,
        } = arguments;
        let state = &self.state;

        let mut merged_keywords = state.keywords.clone();
        merged_keywords.extend(keywords);

        let mut merged_positional =
            Vec::with_capacity(state.left.len() + positional.len() + state.right.len());
        merged_positional.extend(state.left.iter().cloned());
        merged_positional.extend(positional);
        merged_positional.extend(state.right.iter().cloned());

        log::trace!(
            "calling {} with {} positional and {} keyword arguments",
            state.target,
            merged_positional.len(),
            merged_keywords.len()
        );
        state.target.call(Arguments {
            positional: merged_positional,
            keywords: merged_keywords,
        })
    }

    /// Binds further arguments, always producing a new call.
    ///
    /// Equivalent to [`Applied::construct`] with `self` as the target.
    ///
    /// # Errors
    ///
    /// Returns [`ApplyError::MultiplePlaceholders`] if more than one
    /// placeholder is present.
    pub fn apply(&self, arguments: Arguments) -> Result<Self, ApplyError> {
        Self::construct(self.clone(), arguments)
    }

    /// The wrapped target. Never an applied call.
    #[must_use]
    pub fn target(&self) -> &Function {
        &self.state.target
    }

    /// Arguments prepended to every call.
    #[must_use]
    pub fn left_args(&self) -> &[Value] {
        &self.state.left
    }

    /// Arguments appended to every call.
    #[must_use]
    pub fn right_args(&self) -> &[Value] {
        &self.state.right
    }

    /// Bound keyword arguments.
    #[must_use]
    pub fn keywords(&self) -> &Keywords {
        &self.state.keywords
    }

    /// Auxiliary attribute storage.
    #[must_use]
    pub fn attributes(&self) -> &Keywords {
        &self.state.attributes
    }

    /// The attribute called `name`.
    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<&Value> {
        self.state.attributes.get(name)
    }

    /// Sets an attribute on this handle.
    ///
    /// Copy-on-write: if other handles share this call, this handle is
    /// detached onto a fresh copy first, so they never observe the change.
    pub fn set_attribute(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        Arc::make_mut(&mut self.state)
            .attributes
            .insert(name.into(), value.into());
    }

    /// Returns `true` if both handles refer to the same call.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.state, &other.state)
    }

    /// Creates a weak handle to this call.
    #[must_use]
    pub fn downgrade(&self) -> WeakApplied {
        WeakApplied {
            state: Arc::downgrade(&self.state),
        }
    }

    pub(crate) fn identity(&self) -> usize {
        Arc::as_ptr(&self.state).addr()
    }
}

impl PartialEq for Applied {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl Eq for Applied {}

/// A value known to be callable.
pub(super) enum Callee {
    Function(Function),
    Applied(Applied),
}

impl Callee {
    pub(super) fn classify(value: Value) -> Result<Self, ApplyError> {
        match value {
            Value::Function(function) => Ok(Self::Function(function)),
            Value::Applied(applied) => Ok(Self::Applied(applied)),
            other => Err(ApplyError::NotCallable {
                type_name: other.type_name(),
            }),
        }
    }
}

/// Splits `values` around its single placeholder.
///
/// Without a placeholder every value binds from the left.
fn split_at_placeholder(mut values: Vec<Value>) -> Result<(Vec<Value>, Vec<Value>), ApplyError> {
    Ok(match find_placeholder(&values)? {
        None => (values, Vec::new()),
        Some(index) => {
            let right = values.split_off(index + 1);
            values.truncate(index);
            (values, right)
        }
    })
}
