//! Typed key-value attributes
//!
//! Values carry an explicit type tag. `Invalid` is the zero value of an
//! attribute whose type was never set (or that came from a newer API with a
//! type this model does not know); exporters drop it.

use opentelemetry::Array;

/// Attribute value tagged with its type.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum Value {
    #[default]
    Invalid,
    Bool(bool),
    I64(i64),
    F64(f64),
    String(String),
    BoolSlice(Vec<bool>),
    I64Slice(Vec<i64>),
    F64Slice(Vec<f64>),
    StringSlice(Vec<String>),
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::I64(i)
    }
}

impl From<f64> for Value {
    fn from(d: f64) -> Self {
        Value::F64(d)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<Vec<bool>> for Value {
    fn from(values: Vec<bool>) -> Self {
        Value::BoolSlice(values)
    }
}

impl From<Vec<i64>> for Value {
    fn from(values: Vec<i64>) -> Self {
        Value::I64Slice(values)
    }
}

impl From<Vec<f64>> for Value {
    fn from(values: Vec<f64>) -> Self {
        Value::F64Slice(values)
    }
}

impl From<Vec<String>> for Value {
    fn from(values: Vec<String>) -> Self {
        Value::StringSlice(values)
    }
}

impl From<opentelemetry::Value> for Value {
    #[allow(unreachable_patterns)]
    fn from(value: opentelemetry::Value) -> Self {
        match value {
            opentelemetry::Value::Bool(b) => Value::Bool(b),
            opentelemetry::Value::I64(i) => Value::I64(i),
            opentelemetry::Value::F64(d) => Value::F64(d),
            opentelemetry::Value::String(s) => Value::String(s.as_str().to_string()),
            opentelemetry::Value::Array(array) => match array {
                Array::Bool(values) => Value::BoolSlice(values),
                Array::I64(values) => Value::I64Slice(values),
                Array::F64(values) => Value::F64Slice(values),
                Array::String(values) => {
                    Value::StringSlice(values.iter().map(|s| s.as_str().to_string()).collect())
                }
                _ => Value::Invalid,
            },
            _ => Value::Invalid,
        }
    }
}

/// A single attribute.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct KeyValue {
    pub key: String,
    pub value: Value,
}

impl KeyValue {
    pub fn new(key: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

impl From<opentelemetry::KeyValue> for KeyValue {
    fn from(kv: opentelemetry::KeyValue) -> Self {
        Self {
            key: kv.key.as_str().to_string(),
            value: kv.value.into(),
        }
    }
}
