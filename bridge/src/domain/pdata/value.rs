//! Generic attribute values and the attribute map

use std::fmt;

/// A dynamically typed attribute value.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum AnyValue {
    #[default]
    Empty,
    Str(String),
    Bool(bool),
    Int(i64),
    Double(f64),
    Slice(Vec<AnyValue>),
}

impl AnyValue {
    /// Short name of the value type, shown next to detailed log attributes
    pub fn type_name(&self) -> &'static str {
        match self {
            AnyValue::Empty => "Empty",
            AnyValue::Str(_) => "Str",
            AnyValue::Bool(_) => "Bool",
            AnyValue::Int(_) => "Int",
            AnyValue::Double(_) => "Double",
            AnyValue::Slice(_) => "Slice",
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            AnyValue::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            AnyValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            AnyValue::Int(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_double(&self) -> Option<f64> {
        match self {
            AnyValue::Double(d) => Some(*d),
            _ => None,
        }
    }

    pub fn as_slice(&self) -> Option<&[AnyValue]> {
        match self {
            AnyValue::Slice(values) => Some(values),
            _ => None,
        }
    }
}

impl fmt::Display for AnyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnyValue::Empty => Ok(()),
            AnyValue::Str(s) => f.write_str(s),
            AnyValue::Bool(b) => write!(f, "{}", b),
            AnyValue::Int(i) => write!(f, "{}", i),
            AnyValue::Double(d) => write!(f, "{}", d),
            AnyValue::Slice(values) => {
                f.write_str("[")?;
                for (i, value) in values.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", value)?;
                }
                f.write_str("]")
            }
        }
    }
}

/// Attribute map with unique keys, iterated in insertion order.
///
/// Putting a key that already exists replaces its value in place.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AttributeMap {
    entries: Vec<(String, AnyValue)>,
}

impl AttributeMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make room for at least `capacity` entries in total
    pub fn ensure_capacity(&mut self, capacity: usize) {
        if capacity > self.entries.capacity() {
            self.entries.reserve_exact(capacity - self.entries.len());
        }
    }

    pub fn capacity(&self) -> usize {
        self.entries.capacity()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, key: &str) -> Option<&AnyValue> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, value)| value)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Insert or replace the value for `key`
    pub fn put(&mut self, key: impl Into<String>, value: AnyValue) {
        let key = key.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, existing)) => *existing = value,
            None => self.entries.push((key, value)),
        }
    }

    pub fn put_str(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.put(key, AnyValue::Str(value.into()));
    }

    pub fn put_bool(&mut self, key: impl Into<String>, value: bool) {
        self.put(key, AnyValue::Bool(value));
    }

    pub fn put_int(&mut self, key: impl Into<String>, value: i64) {
        self.put(key, AnyValue::Int(value));
    }

    pub fn put_double(&mut self, key: impl Into<String>, value: f64) {
        self.put(key, AnyValue::Double(value));
    }

    pub fn put_slice(&mut self, key: impl Into<String>, values: Vec<AnyValue>) {
        self.put(key, AnyValue::Slice(values));
    }

    pub fn iter(&self) -> impl ExactSizeIterator<Item = (&str, &AnyValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_put_and_get_scalars() {
        let mut map = AttributeMap::new();
        map.put_str("s", "text");
        map.put_bool("b", true);
        map.put_int("i", -7);
        map.put_double("d", 2.5);

        assert_eq!(map.len(), 4);
        assert_eq!(map.get("s").and_then(AnyValue::as_str), Some("text"));
        assert_eq!(map.get("b").and_then(AnyValue::as_bool), Some(true));
        assert_eq!(map.get("i").and_then(AnyValue::as_int), Some(-7));
        assert_eq!(map.get("d").and_then(AnyValue::as_double), Some(2.5));
        assert!(map.get("missing").is_none());
    }

    #[test]
    fn test_put_existing_key_replaces_in_place() {
        let mut map = AttributeMap::new();
        map.put_str("first", "a");
        map.put_str("second", "b");
        map.put_int("first", 1);

        assert_eq!(map.len(), 2);
        let entries: Vec<(&str, &AnyValue)> = map.iter().collect();
        assert_eq!(entries[0], ("first", &AnyValue::Int(1)));
        assert_eq!(entries[1], ("second", &AnyValue::Str("b".to_string())));
    }

    #[test]
    fn test_ensure_capacity() {
        let mut map = AttributeMap::new();
        map.ensure_capacity(8);
        assert!(map.capacity() >= 8);
        assert!(map.is_empty());

        // Smaller requests never shrink
        map.ensure_capacity(2);
        assert!(map.capacity() >= 8);
    }

    #[test]
    fn test_iteration_preserves_insertion_order() {
        let mut map = AttributeMap::new();
        for key in ["z", "a", "m"] {
            map.put_bool(key, true);
        }
        let keys: Vec<&str> = map.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["z", "a", "m"]);
    }

    #[test]
    fn test_any_value_display() {
        let value = AnyValue::Slice(vec![
            AnyValue::Int(1),
            AnyValue::Str("two".to_string()),
            AnyValue::Bool(false),
        ]);
        assert_eq!(value.to_string(), "[1, two, false]");
        assert_eq!(AnyValue::Empty.to_string(), "");
        assert_eq!(AnyValue::Double(0.5).to_string(), "0.5");
    }

    #[test]
    fn test_any_value_type_name() {
        assert_eq!(AnyValue::Str(String::new()).type_name(), "Str");
        assert_eq!(AnyValue::Slice(Vec::new()).type_name(), "Slice");
        assert_eq!(AnyValue::default().type_name(), "Empty");
    }

    #[test]
    fn test_as_slice() {
        let value = AnyValue::Slice(vec![AnyValue::Bool(true)]);
        assert_eq!(value.as_slice(), Some(&[AnyValue::Bool(true)][..]));
        assert!(AnyValue::Int(1).as_slice().is_none());
    }
}
