//! Resource and instrumentation scope attached to SDK spans

use super::attribute::{KeyValue, Value};

/// The entity (service, process) that produced a batch of spans.
///
/// Attributes are kept sorted by key with duplicates collapsed (the last value
/// for a key wins), so two resources built from the same set of attributes in
/// any order compare equal.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Resource {
    attrs: Vec<KeyValue>,
    schema_url: Option<String>,
}

impl Resource {
    /// Create a resource from a set of attributes
    pub fn new<T>(attrs: T) -> Self
    where
        T: IntoIterator<Item = KeyValue>,
    {
        let mut sorted: Vec<KeyValue> = Vec::new();
        for kv in attrs {
            match sorted.binary_search_by(|existing| existing.key.cmp(&kv.key)) {
                Ok(idx) => sorted[idx] = kv,
                Err(idx) => sorted.insert(idx, kv),
            }
        }
        Self {
            attrs: sorted,
            schema_url: None,
        }
    }

    /// An empty resource with no attributes and no schema URL
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn with_schema_url(mut self, schema_url: impl Into<String>) -> Self {
        self.schema_url = Some(schema_url.into());
        self
    }

    /// Schema URL of the resource, if any
    pub fn schema_url(&self) -> Option<&str> {
        self.schema_url.as_deref()
    }

    /// Iterate over the attributes in key order
    pub fn iter(&self) -> std::slice::Iter<'_, KeyValue> {
        self.attrs.iter()
    }

    pub fn len(&self) -> usize {
        self.attrs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attrs.is_empty()
    }

    /// Look up the value of an attribute by key
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.attrs
            .binary_search_by(|kv| kv.key.as_str().cmp(key))
            .ok()
            .map(|idx| &self.attrs[idx].value)
    }
}

/// Name and version of the library that created a span.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct InstrumentationScope {
    pub name: String,
    pub version: String,
}

impl InstrumentationScope {
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resource_attributes_sorted_by_key() {
        let resource = Resource::new([
            KeyValue::new("service.version", "1.2.3"),
            KeyValue::new("host.name", "box-1"),
            KeyValue::new("service.name", "checkout"),
        ]);

        let keys: Vec<&str> = resource.iter().map(|kv| kv.key.as_str()).collect();
        assert_eq!(keys, vec!["host.name", "service.name", "service.version"]);
        assert_eq!(resource.len(), 3);
    }

    #[test]
    fn test_resource_duplicate_key_last_wins() {
        let resource = Resource::new([
            KeyValue::new("service.name", "first"),
            KeyValue::new("service.name", "second"),
        ]);

        assert_eq!(resource.len(), 1);
        assert_eq!(
            resource.get("service.name"),
            Some(&Value::from("second"))
        );
    }

    #[test]
    fn test_resource_equality_ignores_insertion_order() {
        let a = Resource::new([KeyValue::new("a", 1_i64), KeyValue::new("b", true)]);
        let b = Resource::new([KeyValue::new("b", true), KeyValue::new("a", 1_i64)]);
        assert_eq!(a, b);
    }

    #[test]
    fn test_resource_schema_url_participates_in_equality() {
        let a = Resource::new([KeyValue::new("a", 1_i64)]);
        let b = a.clone().with_schema_url("https://opentelemetry.io/schemas/1.21.0");
        assert_ne!(a, b);
        assert_eq!(
            b.schema_url(),
            Some("https://opentelemetry.io/schemas/1.21.0")
        );
    }

    #[test]
    fn test_resource_empty() {
        let resource = Resource::empty();
        assert!(resource.is_empty());
        assert_eq!(resource.iter().len(), 0);
        assert!(resource.schema_url().is_none());
    }

    #[test]
    fn test_scope_equality_by_value() {
        assert_eq!(
            InstrumentationScope::new("lib", "1.0"),
            InstrumentationScope::new(String::from("lib"), String::from("1.0"))
        );
        assert_ne!(
            InstrumentationScope::new("lib", "1.0"),
            InstrumentationScope::new("lib", "1.1")
        );
    }
}
