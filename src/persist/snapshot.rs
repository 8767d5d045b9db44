//! Serializable snapshots of values.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::apply::guard::RecursionGuard;
use crate::apply::{ApplyError, Value};

/// A serializable image of a [`Value`].
///
/// Functions are recorded by name and resolved again through a
/// [`Registry`](super::Registry). Applied calls are recorded as the five item
/// state produced by [`Applied::reduce`](crate::Applied::reduce), so
/// restoring one goes through the same bare-construct-then-restore path as
/// any other persistence layer.
///
/// # Examples
///
/// ```rust
/// use lambars_partial::persist::Snapshot;
/// use lambars_partial::Value;
///
/// let snapshot = Snapshot::capture(&Value::tuple([1, 2])).unwrap();
/// let json = serde_json::to_string(&snapshot).unwrap();
/// assert_eq!(
///     json,
///     r#"{"kind":"tuple","value":[{"kind":"int","value":1},{"kind":"int","value":2}]}"#
/// );
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Snapshot {
    /// [`Value::None`].
    None,
    /// [`Value::Bool`].
    Bool(bool),
    /// [`Value::Int`].
    Int(i64),
    /// [`Value::Float`]. Non-finite floats are written as `"nan"`, `"inf"`
    /// or `"-inf"`.
    Float(#[serde(with = "float_repr")] f64),
    /// [`Value::Str`].
    Str(String),
    /// [`Value::Tuple`].
    Tuple(Vec<Snapshot>),
    /// [`Value::List`].
    List(Vec<Snapshot>),
    /// [`Value::Map`].
    Map(IndexMap<String, Snapshot>),
    /// [`Value::Placeholder`].
    Placeholder,
    /// [`Value::Function`], by name.
    Function(String),
    /// [`Value::Applied`], as its restore state.
    Applied(Box<Snapshot>),
    /// [`Value::Slot`], by content.
    Slot(Box<Snapshot>),
}

mod float_repr {
    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer, Serializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum FloatRepr {
        Finite(f64),
        Named(String),
    }

    #[allow(clippy::trivially_copy_pass_by_ref)]
    pub fn serialize<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
        if value.is_finite() {
            serializer.serialize_f64(*value)
        } else if value.is_nan() {
            serializer.serialize_str("nan")
        } else if value.is_sign_positive() {
            serializer.serialize_str("inf")
        } else {
            serializer.serialize_str("-inf")
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
        match FloatRepr::deserialize(deserializer)? {
            FloatRepr::Finite(value) => Ok(value),
            FloatRepr::Named(name) => match name.as_str() {
                "nan" => Ok(f64::NAN),
                "inf" => Ok(f64::INFINITY),
                "-inf" => Ok(f64::NEG_INFINITY),
                other => Err(D::Error::custom(format_args!("unknown float '{other}'"))),
            },
        }
    }
}

fn cyclic() -> ApplyError {
    ApplyError::malformed("cyclic value cannot be captured")
}

impl Snapshot {
    /// Captures `value`.
    ///
    /// # Errors
    ///
    /// Returns [`ApplyError::MalformedState`] if the value reaches itself
    /// through an applied call or slot.
    pub fn capture(value: &Value) -> Result<Self, ApplyError> {
        Ok(match value {
            Value::None => Self::None,
            Value::Bool(value) => Self::Bool(*value),
            Value::Int(value) => Self::Int(*value),
            Value::Float(value) => Self::Float(*value),
            Value::Str(value) => Self::Str(value.to_string()),
            Value::Tuple(items) => Self::Tuple(capture_all(items)?),
            Value::List(items) => Self::List(capture_all(items)?),
            Value::Map(map) => Self::Map(
                map.iter()
                    .map(|(key, value)| Ok((key.clone(), Self::capture(value)?)))
                    .collect::<Result<_, ApplyError>>()?,
            ),
            Value::Placeholder => Self::Placeholder,
            Value::Function(function) => Self::Function(function.name().to_string()),
            Value::Applied(applied) => {
                let _guard = RecursionGuard::enter(applied.identity()).ok_or_else(cyclic)?;
                Self::Applied(Box::new(Self::capture(&applied.reduce().state)?))
            }
            Value::Slot(slot) => {
                let _guard = RecursionGuard::enter(slot.identity()).ok_or_else(cyclic)?;
                Self::Slot(Box::new(Self::capture(&slot.get())?))
            }
        })
    }
}

fn capture_all(items: &[Value]) -> Result<Vec<Snapshot>, ApplyError> {
    items.iter().map(Snapshot::capture).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::apply::{Function, Slot};
    use crate::arguments;

    #[test]
    fn test_capture_records_function_by_name() {
        let function = Function::new("noop", |_| Ok(Value::None));
        assert_eq!(
            Snapshot::capture(&Value::from(function)).unwrap(),
            Snapshot::Function("noop".to_string())
        );
    }

    #[test]
    fn test_capture_applied_uses_restore_state() {
        let function = Function::new("noop", |_| Ok(Value::None));
        let applied = crate::Applied::construct(function, arguments!(1, __)).unwrap();
        let snapshot = Snapshot::capture(&Value::from(applied)).unwrap();

        let Snapshot::Applied(state) = snapshot else {
            panic!("expected an applied snapshot");
        };
        assert_eq!(
            *state,
            Snapshot::Tuple(vec![
                Snapshot::Function("noop".to_string()),
                Snapshot::Tuple(vec![Snapshot::Int(1)]),
                Snapshot::Tuple(vec![]),
                Snapshot::None,
                Snapshot::None,
            ])
        );
    }

    #[test]
    fn test_non_finite_floats_use_names() {
        let json = serde_json::to_string(&Snapshot::Float(f64::NEG_INFINITY)).unwrap();
        assert_eq!(json, r#"{"kind":"float","value":"-inf"}"#);

        let snapshot: Snapshot = serde_json::from_str(r#"{"kind":"float","value":"nan"}"#).unwrap();
        assert!(matches!(snapshot, Snapshot::Float(value) if value.is_nan()));
    }

    #[test]
    fn test_unknown_float_name_is_rejected() {
        let result = serde_json::from_str::<Snapshot>(r#"{"kind":"float","value":"huge"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_capture_rejects_cycles() {
        let slot = Slot::new(Value::None);
        slot.set(Value::list([Value::from(slot.clone())]));
        assert!(matches!(
            Snapshot::capture(&Value::from(slot)),
            Err(ApplyError::MalformedState { .. })
        ));
    }
}
