//! Typed SDK key-values → generic attribute map entries

use crate::domain::pdata::{AnyValue, AttributeMap};
use crate::domain::sdk::{KeyValue, Value};

/// Map every attribute of an ordered slice into `map`.
pub fn map_attributes(map: &mut AttributeMap, attrs: &[KeyValue]) {
    map.ensure_capacity(attrs.len());
    for kv in attrs {
        map_attribute(map, &kv.key, &kv.value);
    }
}

/// Map every attribute yielded by `attrs` into `map`, reserving the length
/// the iterator reports up front.
pub fn map_attributes_iter<'a, I>(map: &mut AttributeMap, attrs: I)
where
    I: ExactSizeIterator<Item = &'a KeyValue>,
{
    map.ensure_capacity(attrs.len());
    for kv in attrs {
        map_attribute(map, &kv.key, &kv.value);
    }
}

/// Insert a single attribute into `map`.
///
/// `Value::Invalid` has no generic counterpart and is dropped: no entry is
/// written and nothing fails.
pub fn map_attribute(map: &mut AttributeMap, key: &str, value: &Value) {
    match value {
        Value::Bool(b) => map.put_bool(key, *b),
        Value::I64(i) => map.put_int(key, *i),
        Value::F64(d) => map.put_double(key, *d),
        Value::String(s) => map.put_str(key, s.as_str()),
        Value::BoolSlice(values) => map.put_slice(key, to_slice(values, |b| AnyValue::Bool(*b))),
        Value::I64Slice(values) => map.put_slice(key, to_slice(values, |i| AnyValue::Int(*i))),
        Value::F64Slice(values) => map.put_slice(key, to_slice(values, |d| AnyValue::Double(*d))),
        Value::StringSlice(values) => {
            map.put_slice(key, to_slice(values, |s| AnyValue::Str(s.clone())))
        }
        Value::Invalid => {}
    }
}

fn to_slice<T>(values: &[T], f: impl Fn(&T) -> AnyValue) -> Vec<AnyValue> {
    let mut out = Vec::with_capacity(values.len());
    for value in values {
        out.push(f(value));
    }
    out
}
