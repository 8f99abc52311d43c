//! Typed steering values.

use serde::Serialize;

use crate::{SteeringError, SteeringResult};

/// A single scalar steering value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Scalar {
    Int(i64),
    Real(f64),
    Bool(bool),
    Str(String),
}

/// A steering parameter value: one scalar or a flat list of scalars.
///
/// Nesting is not representable here; looser input goes through
/// [`RawValue`] and is rejected on conversion.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    Scalar(Scalar),
    List(Vec<Scalar>),
}

impl Value {
    /// Convert a loose input value, rejecting nested lists.
    ///
    /// Takes the raw value by reference so the caller's data survives a
    /// failed conversion untouched.
    pub fn from_raw(key: &str, raw: &RawValue) -> SteeringResult<Value> {
        match raw {
            RawValue::Int(v) => Ok(Value::Scalar(Scalar::Int(*v))),
            RawValue::Real(v) => Ok(Value::Scalar(Scalar::Real(*v))),
            RawValue::Bool(v) => Ok(Value::Scalar(Scalar::Bool(*v))),
            RawValue::Str(v) => Ok(Value::Scalar(Scalar::Str(v.clone()))),
            RawValue::List(items) => {
                let mut elements = Vec::with_capacity(items.len());
                for item in items {
                    match item {
                        RawValue::Int(v) => elements.push(Scalar::Int(*v)),
                        RawValue::Real(v) => elements.push(Scalar::Real(*v)),
                        RawValue::Bool(v) => elements.push(Scalar::Bool(*v)),
                        RawValue::Str(v) => elements.push(Scalar::Str(v.clone())),
                        RawValue::List(_) => {
                            return Err(SteeringError::NestedValue {
                                key: key.to_string(),
                            });
                        }
                    }
                }
                Ok(Value::List(elements))
            }
        }
    }

    pub fn as_scalar(&self) -> Option<&Scalar> {
        match self {
            Value::Scalar(s) => Some(s),
            Value::List(_) => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Scalar]> {
        match self {
            Value::Scalar(_) => None,
            Value::List(items) => Some(items),
        }
    }
}

impl From<i64> for Scalar {
    fn from(v: i64) -> Self {
        Scalar::Int(v)
    }
}

impl From<f64> for Scalar {
    fn from(v: f64) -> Self {
        Scalar::Real(v)
    }
}

impl From<bool> for Scalar {
    fn from(v: bool) -> Self {
        Scalar::Bool(v)
    }
}

impl From<&str> for Scalar {
    fn from(v: &str) -> Self {
        Scalar::Str(v.to_string())
    }
}

impl From<String> for Scalar {
    fn from(v: String) -> Self {
        Scalar::Str(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Scalar(v.into())
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Scalar(v.into())
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Scalar(v.into())
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Scalar(v.into())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Scalar(v.into())
    }
}

impl From<Vec<Scalar>> for Value {
    fn from(v: Vec<Scalar>) -> Self {
        Value::List(v)
    }
}

/// Loose input shape accepted at the constructor boundary.
///
/// Unlike [`Value`], lists may nest here; [`Value::from_raw`] rejects the
/// nesting with [`SteeringError::NestedValue`].
#[derive(Debug, Clone, PartialEq)]
pub enum RawValue {
    Int(i64),
    Real(f64),
    Bool(bool),
    Str(String),
    List(Vec<RawValue>),
}

impl From<i64> for RawValue {
    fn from(v: i64) -> Self {
        RawValue::Int(v)
    }
}

impl From<f64> for RawValue {
    fn from(v: f64) -> Self {
        RawValue::Real(v)
    }
}

impl From<bool> for RawValue {
    fn from(v: bool) -> Self {
        RawValue::Bool(v)
    }
}

impl From<&str> for RawValue {
    fn from(v: &str) -> Self {
        RawValue::Str(v.to_string())
    }
}

impl From<String> for RawValue {
    fn from(v: String) -> Self {
        RawValue::Str(v)
    }
}

impl From<Vec<RawValue>> for RawValue {
    fn from(v: Vec<RawValue>) -> Self {
        RawValue::List(v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_raw_flat_list() {
        let raw = RawValue::List(vec![1.into(), 2.5.into(), "U".into()]);
        let value = Value::from_raw("K", &raw).unwrap();
        assert_eq!(
            value,
            Value::List(vec![Scalar::Int(1), Scalar::Real(2.5), Scalar::Str("U".into())])
        );
    }

    #[test]
    fn from_raw_rejects_nesting() {
        let raw = RawValue::List(vec![RawValue::List(vec![1.into()])]);
        let err = Value::from_raw("COORDS", &raw).unwrap_err();
        assert!(matches!(err, SteeringError::NestedValue { key } if key == "COORDS"));
        // the input is still intact after the failed conversion
        assert_eq!(raw, RawValue::List(vec![RawValue::List(vec![1.into()])]));
    }
}
