//! State export and import.
//!
//! Persistence layers snapshot an [`Applied`] call through
//! [`Applied::reduce`] and rebuild it by running the bare constructor and
//! then [`Applied::restore_state`]. The state is a five item tuple:
//!
//! ```text
//! (target, left_args, right_args, keywords | None, attributes | None)
//! ```
//!
//! Empty keyword and attribute maps are exported as `None` to keep the
//! state compact.

use std::sync::Arc;

use super::applied::{Applied, Callee};
use super::error::ApplyError;
use super::function::Arguments;
use super::value::{Keywords, Value};

/// Builds a bare applied call around a target.
pub type Constructor = fn(Value) -> Result<Applied, ApplyError>;

/// The reconstruction recipe produced by [`Applied::reduce`].
///
/// # Examples
///
/// ```rust
/// use lambars_partial::{Function, Value, partial};
///
/// let join = Function::new("join", |arguments| Ok(Value::List(arguments.positional)));
/// let applied = partial!(join, 1, __, 3; sep = ",").unwrap();
///
/// let rebuilt = applied.reduce().reconstruct().unwrap();
/// assert_eq!(rebuilt.left_args(), applied.left_args());
/// assert_eq!(rebuilt.right_args(), applied.right_args());
/// assert_eq!(rebuilt.keywords(), applied.keywords());
/// ```
#[derive(Clone, Debug)]
pub struct Reduction {
    /// Builds a bare call around the first constructor argument.
    pub constructor: Constructor,
    /// Arguments for `constructor`: the target alone.
    pub arguments: (Value,),
    /// The five item state tuple passed to [`Applied::restore_state`].
    pub state: Value,
}

impl Reduction {
    /// Runs the constructor, then restores the state onto the result.
    ///
    /// # Errors
    ///
    /// Returns any error raised by the constructor or by
    /// [`Applied::restore_state`].
    pub fn reconstruct(&self) -> Result<Applied, ApplyError> {
        let mut applied = (self.constructor)(self.arguments.0.clone())?;
        applied.restore_state(&self.state)?;
        Ok(applied)
    }
}

fn map_or_none(map: &Keywords) -> Value {
    if map.is_empty() {
        Value::None
    } else {
        Value::Map(map.clone())
    }
}

fn optional_map(value: &Value, field: &'static str) -> Result<Keywords, ApplyError> {
    match value {
        Value::None => Ok(Keywords::new()),
        Value::Map(map) => Ok(map.clone()),
        other => Err(ApplyError::malformed(format!(
            "{field} must be a map or None, not {}",
            other.type_name()
        ))),
    }
}

fn sequence(value: &Value, field: &'static str) -> Result<Arc<[Value]>, ApplyError> {
    value.as_sequence().map(Arc::from).ok_or_else(|| {
        ApplyError::malformed(format!(
            "{field} must be a tuple or list, not {}",
            value.type_name()
        ))
    })
}

impl Applied {
    /// Builds a bare call around `target`, with nothing bound.
    ///
    /// # Errors
    ///
    /// Returns [`ApplyError::NotCallable`] if `target` is not callable.
    pub fn bare(target: Value) -> Result<Self, ApplyError> {
        Self::construct(target, Arguments::new())
    }

    /// Exports the reconstruction recipe for this call.
    #[must_use]
    pub fn reduce(&self) -> Reduction {
        let state = &self.state;
        let target = Value::Function(state.target.clone());
        Reduction {
            constructor: Self::bare,
            arguments: (target.clone(),),
            state: Value::tuple([
                target,
                Value::Tuple(Arc::clone(&state.left)),
                Value::Tuple(Arc::clone(&state.right)),
                map_or_none(&state.keywords),
                map_or_none(&state.attributes),
            ]),
        }
    }

    /// Overwrites this handle with a previously exported state.
    ///
    /// Intended for a freshly built, not yet shared instance. Other handles
    /// cloned from this one before the call keep the old state.
    ///
    /// Argument sequences may be tuples or lists and are copied into
    /// immutable tuples. A restored target that is itself an applied call is
    /// flattened onto its own target.
    ///
    /// # Errors
    ///
    /// - [`ApplyError::MalformedState`] if `state` is not a five item tuple,
    ///   if either argument sequence is not a tuple or list, or if either map
    ///   field is neither a map nor `None`.
    /// - [`ApplyError::NotCallable`] if the target is not callable.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lambars_partial::{Applied, ApplyError, Function, Value};
    ///
    /// let target = Value::from(Function::new("noop", |_| Ok(Value::None)));
    /// let mut applied = Applied::bare(target.clone()).unwrap();
    ///
    /// let error = applied.restore_state(&Value::tuple([target])).unwrap_err();
    /// assert!(matches!(error, ApplyError::MalformedState { .. }));
    /// ```
    pub fn restore_state(&mut self, state: &Value) -> Result<(), ApplyError> {
        let Value::Tuple(items) = state else {
            return Err(ApplyError::malformed(format!(
                "state must be a tuple, not {}",
                state.type_name()
            )));
        };
        let [target, left, right, keywords, attributes] = &items[..] else {
            return Err(ApplyError::malformed(format!(
                "expected 5 items in state, got {}",
                items.len()
            )));
        };

        let callee = Callee::classify(target.clone())?;
        let left = sequence(left, "left arguments")?;
        let right = sequence(right, "right arguments")?;
        let keywords = optional_map(keywords, "keywords")?;
        let attributes = optional_map(attributes, "attributes")?;

        let restored = match callee {
            Callee::Function(function) => {
                Self::from_parts(function, left, right, keywords, attributes)
            }
            Callee::Applied(inner) => {
                log::trace!("restoring state with a partial target, flattening {inner}");
                let mut flattened = inner.flatten(left.to_vec(), right.to_vec(), keywords);
                Arc::make_mut(&mut flattened.state).attributes = attributes;
                flattened
            }
        };
        log::trace!("restored state: {restored}");
        *self = restored;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arguments;
    use crate::apply::function::Function;

    fn noop() -> Value {
        Value::from(Function::new("noop", |_| Ok(Value::None)))
    }

    fn state_of(items: Vec<Value>) -> Value {
        Value::Tuple(items.into())
    }

    #[test]
    fn test_reduce_exports_none_for_empty_maps() {
        let applied = Applied::bare(noop()).unwrap();
        let reduction = applied.reduce();
        let items = reduction.state.as_sequence().unwrap();

        assert_eq!(items.len(), 5);
        assert!(items[3].is_none());
        assert!(items[4].is_none());
        assert_eq!(reduction.arguments.0, items[0]);
    }

    #[test]
    fn test_reduce_exports_populated_maps() {
        let mut applied = Applied::construct(noop(), arguments!(1; key = 2)).unwrap();
        applied.set_attribute("doc", "bound");
        let reduction = applied.reduce();
        let items = reduction.state.as_sequence().unwrap();

        assert_eq!(items[3].as_map().unwrap()["key"], Value::Int(2));
        assert_eq!(items[4].as_map().unwrap()["doc"], Value::from("bound"));
    }

    #[test]
    fn test_restore_rejects_non_tuple() {
        let mut applied = Applied::bare(noop()).unwrap();
        let error = applied.restore_state(&Value::list([1])).unwrap_err();
        assert_eq!(
            error.to_string(),
            "invalid partial state: state must be a tuple, not list"
        );
    }

    #[test]
    fn test_restore_rejects_wrong_length() {
        let mut applied = Applied::bare(noop()).unwrap();
        let error = applied
            .restore_state(&state_of(vec![noop(), Value::tuple([0; 0])]))
            .unwrap_err();
        assert_eq!(
            error.to_string(),
            "invalid partial state: expected 5 items in state, got 2"
        );
    }

    #[test]
    fn test_restore_rejects_non_callable_target() {
        let mut applied = Applied::bare(noop()).unwrap();
        let state = state_of(vec![
            Value::Int(1),
            Value::tuple([0; 0]),
            Value::tuple([0; 0]),
            Value::None,
            Value::None,
        ]);
        assert!(matches!(
            applied.restore_state(&state),
            Err(ApplyError::NotCallable { type_name: "int" })
        ));
    }

    #[test]
    fn test_restore_rejects_non_sequence_arguments() {
        let mut applied = Applied::bare(noop()).unwrap();
        let state = state_of(vec![
            noop(),
            Value::Int(1),
            Value::tuple([0; 0]),
            Value::None,
            Value::None,
        ]);
        assert!(matches!(
            applied.restore_state(&state),
            Err(ApplyError::MalformedState { .. })
        ));
    }

    #[test]
    fn test_restore_rejects_non_map_keywords() {
        let mut applied = Applied::bare(noop()).unwrap();
        let state = state_of(vec![
            noop(),
            Value::tuple([0; 0]),
            Value::tuple([0; 0]),
            Value::list([1]),
            Value::None,
        ]);
        let error = applied.restore_state(&state).unwrap_err();
        assert_eq!(
            error.to_string(),
            "invalid partial state: keywords must be a map or None, not list"
        );
    }

    #[test]
    fn test_restore_rejects_non_sequence_right_arguments() {
        let mut applied = Applied::bare(noop()).unwrap();
        let state = state_of(vec![
            noop(),
            Value::tuple([0; 0]),
            Value::Int(3),
            Value::None,
            Value::None,
        ]);
        let error = applied.restore_state(&state).unwrap_err();
        assert_eq!(
            error.to_string(),
            "invalid partial state: right arguments must be a tuple or list, not int"
        );
    }

    #[test]
    fn test_restore_rejects_non_map_attributes() {
        let mut applied = Applied::bare(noop()).unwrap();
        let state = state_of(vec![
            noop(),
            Value::tuple([0; 0]),
            Value::tuple([0; 0]),
            Value::None,
            Value::Int(1),
        ]);
        let error = applied.restore_state(&state).unwrap_err();
        assert_eq!(
            error.to_string(),
            "invalid partial state: attributes must be a map or None, not int"
        );
    }

    #[test]
    fn test_restore_populates_attributes() {
        let target = noop();
        let mut source = Applied::construct(target.clone(), arguments!(1, __; key = 2)).unwrap();
        source.set_attribute("doc", "bound");
        source.set_attribute("level", 3);

        let mut applied = Applied::bare(target).unwrap();
        applied.restore_state(&source.reduce().state).unwrap();

        assert_eq!(applied.attributes(), source.attributes());
        assert_eq!(applied.attribute("level"), Some(&Value::Int(3)));
        assert_eq!(applied.keywords(), source.keywords());
        assert_eq!(applied.left_args(), &[Value::Int(1)]);
    }

    #[test]
    fn test_restore_accepts_lists_as_sequences() {
        let mut applied = Applied::bare(noop()).unwrap();
        let state = state_of(vec![
            noop(),
            Value::list([1, 2]),
            Value::list([3]),
            Value::None,
            Value::None,
        ]);
        applied.restore_state(&state).unwrap();
        assert_eq!(applied.left_args(), &[Value::Int(1), Value::Int(2)]);
        assert_eq!(applied.right_args(), &[Value::Int(3)]);
        assert!(applied.keywords().is_empty());
    }

    #[test]
    fn test_restore_flattens_applied_target() {
        let inner = Applied::construct(noop(), arguments!(1, __, 9; a = 1)).unwrap();
        let mut applied = Applied::bare(noop()).unwrap();
        let mut keywords = Keywords::new();
        keywords.insert("b".to_string(), Value::Int(2));
        let state = state_of(vec![
            Value::from(inner.clone()),
            Value::tuple([2]),
            Value::tuple([8]),
            Value::Map(keywords),
            Value::None,
        ]);

        applied.restore_state(&state).unwrap();

        assert_eq!(applied.target(), inner.target());
        assert_eq!(applied.left_args(), &[Value::Int(1), Value::Int(2)]);
        assert_eq!(applied.right_args(), &[Value::Int(8), Value::Int(9)]);
        assert_eq!(applied.keywords().len(), 2);
    }

    #[test]
    fn test_restore_leaves_earlier_clones_untouched() {
        let mut applied = Applied::bare(noop()).unwrap();
        let earlier = applied.clone();
        let state = state_of(vec![
            noop(),
            Value::tuple([1]),
            Value::tuple([0; 0]),
            Value::None,
            Value::None,
        ]);
        applied.restore_state(&state).unwrap();
        assert!(earlier.left_args().is_empty());
        assert_eq!(applied.left_args(), &[Value::Int(1)]);
    }
}
