//! Error types for partial application.
//!
//! Every failure in this crate is an immediate usage error: nothing is
//! retried and nothing is transient. Errors raised by a wrapped target are
//! carried in [`ApplyError::Target`] and pass through every layer of
//! partial application untouched.

use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

/// A failure raised by a wrapped target while it runs.
///
/// Targets build these through [`ApplyError::target`] or
/// [`ApplyError::from_source`]. The partial-application layer never creates
/// one on its own; it only forwards them.
///
/// # Examples
///
/// ```rust
/// use lambars_partial::ApplyError;
///
/// let error = ApplyError::target("division by zero");
/// assert_eq!(format!("{error}"), "target failed: division by zero");
/// ```
#[derive(Debug, Clone)]
pub struct TargetError {
    /// Human readable description of the failure.
    pub message: String,
    /// The underlying error, when the target wrapped one.
    pub source: Option<Arc<dyn std::error::Error + Send + Sync>>,
}

impl fmt::Display for TargetError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "target failed: {}", self.message)
    }
}

impl std::error::Error for TargetError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_deref()
            .map(|source| source as &(dyn std::error::Error + 'static))
    }
}

/// Errors produced while constructing, invoking or restoring an
/// [`Applied`](crate::Applied) call.
///
/// # Examples
///
/// ```rust
/// use lambars_partial::{ApplyError, Applied, Value, arguments};
///
/// let error = Applied::construct(Value::Int(3), arguments!()).unwrap_err();
/// assert!(matches!(error, ApplyError::NotCallable { type_name: "int" }));
/// ```
#[derive(Debug, Clone)]
pub enum ApplyError {
    /// The value to be invoked, or the target supplied at construction or
    /// restoration time, is not callable.
    NotCallable {
        /// Type name of the offending value.
        type_name: &'static str,
    },
    /// A single argument list contained more than one placeholder.
    MultiplePlaceholders {
        /// Position of the first placeholder.
        first: usize,
        /// Position of the second placeholder.
        second: usize,
    },
    /// A restore state (or a persisted snapshot) has the wrong shape.
    MalformedState {
        /// What was wrong with the state.
        reason: Cow<'static, str>,
    },
    /// The wrapped target failed.
    Target(TargetError),
}

impl ApplyError {
    /// Creates a target failure carrying only a message.
    #[must_use]
    pub fn target(message: impl Into<String>) -> Self {
        Self::Target(TargetError {
            message: message.into(),
            source: None,
        })
    }

    /// Creates a target failure wrapping an underlying error.
    ///
    /// The error's `Display` output becomes the message.
    #[must_use]
    pub fn from_source<E>(source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Target(TargetError {
            message: source.to_string(),
            source: Some(Arc::new(source)),
        })
    }

    pub(crate) fn malformed(reason: impl Into<Cow<'static, str>>) -> Self {
        Self::MalformedState {
            reason: reason.into(),
        }
    }
}

impl fmt::Display for ApplyError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotCallable { type_name } => {
                write!(formatter, "'{type_name}' object is not callable")
            }
            Self::MultiplePlaceholders { first, second } => write!(
                formatter,
                "cannot use more than one ... in arguments (found at positions {first} and {second})"
            ),
            Self::MalformedState { reason } => {
                write!(formatter, "invalid partial state: {reason}")
            }
            Self::Target(error) => write!(formatter, "{error}"),
        }
    }
}

impl std::error::Error for ApplyError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Target(error) => std::error::Error::source(error),
            _ => None,
        }
    }
}

impl From<TargetError> for ApplyError {
    fn from(error: TargetError) -> Self {
        Self::Target(error)
    }
}
