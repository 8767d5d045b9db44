//! Function lookup for restoring snapshots.

use std::sync::Arc;

use indexmap::IndexMap;

use super::snapshot::Snapshot;
use crate::apply::{Applied, ApplyError, Function, Keywords, Slot, Value};

/// Maps function names back to callables when restoring a [`Snapshot`].
///
/// Snapshots record functions by name only, so every function that may be
/// restored needs a unique name. A snapshot resolves against whichever
/// function the registry holds under that name.
///
/// # Examples
///
/// ```rust
/// use lambars_partial::persist::{Registry, Snapshot};
/// use lambars_partial::{Function, Value, call, partial};
///
/// let add = Function::new("add", |arguments| {
///     Ok(Value::Int(arguments.require_int(0)? + arguments.require_int(1)?))
/// });
/// let registry = Registry::new().with(add.clone());
///
/// let add_ten = partial!(add, __, 10).unwrap();
/// let json = serde_json::to_string(&Snapshot::capture(&Value::from(add_ten)).unwrap()).unwrap();
///
/// let snapshot: Snapshot = serde_json::from_str(&json).unwrap();
/// let restored = registry.resolve(&snapshot).unwrap();
/// assert_eq!(call!(restored, 5).unwrap(), Value::Int(15));
/// ```
#[derive(Clone, Debug, Default)]
pub struct Registry {
    functions: IndexMap<String, Function>,
}

impl Registry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `function` under its name, returning the function it
    /// replaced.
    pub fn register(&mut self, function: Function) -> Option<Function> {
        self.functions.insert(function.name().to_string(), function)
    }

    /// Builder form of [`Registry::register`].
    #[must_use]
    pub fn with(mut self, function: Function) -> Self {
        self.register(function);
        self
    }

    /// The function registered as `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Function> {
        self.functions.get(name)
    }

    /// Rebuilds the value captured in `snapshot`.
    ///
    /// Applied calls are rebuilt by constructing a bare call around the
    /// recorded target and restoring the recorded state onto it.
    ///
    /// # Errors
    ///
    /// - [`ApplyError::MalformedState`] if a function name is not registered
    ///   or an applied call's recorded state is malformed.
    /// - [`ApplyError::NotCallable`] if an applied call's recorded target is
    ///   not callable.
    pub fn resolve(&self, snapshot: &Snapshot) -> Result<Value, ApplyError> {
        Ok(match snapshot {
            Snapshot::None => Value::None,
            Snapshot::Bool(value) => Value::Bool(*value),
            Snapshot::Int(value) => Value::Int(*value),
            Snapshot::Float(value) => Value::Float(*value),
            Snapshot::Str(value) => Value::Str(Arc::from(value.as_str())),
            Snapshot::Tuple(items) => Value::Tuple(self.resolve_all(items)?.into()),
            Snapshot::List(items) => Value::List(self.resolve_all(items)?),
            Snapshot::Map(map) => Value::Map(
                map.iter()
                    .map(|(key, value)| Ok((key.clone(), self.resolve(value)?)))
                    .collect::<Result<Keywords, ApplyError>>()?,
            ),
            Snapshot::Placeholder => Value::Placeholder,
            Snapshot::Function(name) => Value::Function(
                self.get(name)
                    .cloned()
                    .ok_or_else(|| ApplyError::malformed(format!("unknown function '{name}'")))?,
            ),
            Snapshot::Applied(state) => Value::Applied(self.resolve_applied(state)?),
            Snapshot::Slot(content) => Value::Slot(Slot::new(self.resolve(content)?)),
        })
    }

    fn resolve_all(&self, items: &[Snapshot]) -> Result<Vec<Value>, ApplyError> {
        items.iter().map(|item| self.resolve(item)).collect()
    }

    fn resolve_applied(&self, state: &Snapshot) -> Result<Applied, ApplyError> {
        let state = self.resolve(state)?;
        let target = state
            .as_sequence()
            .and_then(<[Value]>::first)
            .cloned()
            .ok_or_else(|| ApplyError::malformed("applied snapshot has no target"))?;
        log::trace!("restoring partial of {target} from snapshot");

        let mut applied = Applied::bare(target)?;
        applied.restore_state(&state)?;
        Ok(applied)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Arguments;

    #[test]
    fn test_register_replaces_by_name() {
        let mut registry = Registry::new();
        let first = Function::new("f", |_| Ok(Value::Int(1)));
        let second = Function::new("f", |_| Ok(Value::Int(2)));

        assert!(registry.register(first.clone()).is_none());
        assert_eq!(registry.register(second.clone()), Some(first));
        assert_eq!(registry.get("f"), Some(&second));
    }

    #[test]
    fn test_resolve_uses_registered_function_of_same_name() {
        let captured = Function::new("f", |_| Ok(Value::Int(1)));
        let registered = Function::new("f", |_| Ok(Value::Int(2)));
        let applied = Applied::wrap(captured);
        let snapshot = Snapshot::capture(&Value::from(applied)).unwrap();

        let restored = Registry::new().with(registered.clone()).resolve(&snapshot).unwrap();
        let restored = restored.as_applied().unwrap();
        assert_eq!(restored.target(), &registered);
        assert_eq!(restored.call(Arguments::new()).unwrap(), Value::Int(2));
    }

    #[test]
    fn test_resolve_unknown_function() {
        let error = Registry::new()
            .resolve(&Snapshot::Function("missing".to_string()))
            .unwrap_err();
        assert_eq!(
            error.to_string(),
            "invalid partial state: unknown function 'missing'"
        );
    }

    #[test]
    fn test_resolve_applied_without_target() {
        let error = Registry::new()
            .resolve(&Snapshot::Applied(Box::new(Snapshot::Tuple(vec![]))))
            .unwrap_err();
        assert!(matches!(error, ApplyError::MalformedState { .. }));
    }

    #[test]
    fn test_resolve_applied_with_non_callable_target() {
        let state = Snapshot::Tuple(vec![
            Snapshot::Int(1),
            Snapshot::Tuple(vec![]),
            Snapshot::Tuple(vec![]),
            Snapshot::None,
            Snapshot::None,
        ]);
        let error = Registry::new()
            .resolve(&Snapshot::Applied(Box::new(state)))
            .unwrap_err();
        assert!(matches!(error, ApplyError::NotCallable { type_name: "int" }));
    }
}
