//! Resource → scope → spans grouping of a flat span batch
//!
//! Spans are bucketed by the *value* of their resource and scope, never by
//! pointer identity: two spans whose resources were built separately from the
//! same attributes share a bucket. Buckets appear in first-seen order, but
//! callers must not rely on any particular group order.

use rustc_hash::FxHashMap;

use crate::domain::sdk::{InstrumentationScope, ReadOnlySpan, Resource, Value};

/// Spans sharing one resource, split further by scope.
#[derive(Debug)]
pub struct ResourceGroup<'a> {
    pub resource: &'a Resource,
    pub scopes: Vec<ScopeGroup<'a>>,
}

/// Spans sharing one (resource, scope) pair, in input order.
#[derive(Debug)]
pub struct ScopeGroup<'a> {
    pub scope: &'a InstrumentationScope,
    pub spans: Vec<&'a ReadOnlySpan>,
}

/// Group `spans` by resource, then by scope.
///
/// Returns `None` for an empty batch. A returned grouping never contains an
/// empty bucket.
pub fn group(spans: &[ReadOnlySpan]) -> Option<Vec<ResourceGroup<'_>>> {
    if spans.is_empty() {
        return None;
    }

    let mut groups: Vec<ResourceGroup<'_>> = Vec::new();
    let mut resource_index: FxHashMap<ResourceKey, usize> = FxHashMap::default();
    // Per resource group: scope → index into that group's `scopes`
    let mut scope_index: Vec<FxHashMap<&InstrumentationScope, usize>> = Vec::new();

    for span in spans {
        let resource = span.resource.as_ref();
        let r_idx = *resource_index
            .entry(ResourceKey::new(resource))
            .or_insert_with(|| {
                groups.push(ResourceGroup {
                    resource,
                    scopes: Vec::new(),
                });
                scope_index.push(FxHashMap::default());
                groups.len() - 1
            });

        let group = &mut groups[r_idx];
        let s_idx = *scope_index[r_idx].entry(&span.scope).or_insert_with(|| {
            group.scopes.push(ScopeGroup {
                scope: &span.scope,
                spans: Vec::new(),
            });
            group.scopes.len() - 1
        });
        group.scopes[s_idx].spans.push(span);
    }

    Some(groups)
}

/// Hashable canonical form of a resource: its key-sorted attributes plus the
/// schema URL.
#[derive(Debug, PartialEq, Eq, Hash)]
struct ResourceKey {
    attrs: Vec<(String, ValueKey)>,
    schema_url: Option<String>,
}

impl ResourceKey {
    fn new(resource: &Resource) -> Self {
        Self {
            attrs: resource
                .iter()
                .map(|kv| (kv.key.clone(), ValueKey::new(&kv.value)))
                .collect(),
            schema_url: resource.schema_url().map(str::to_string),
        }
    }
}

/// Hashable mirror of `Value`. Floats are compared by raw bit pattern, so
/// `0.0` and `-0.0` differ, as do NaNs with different payloads.
#[derive(Debug, PartialEq, Eq, Hash)]
enum ValueKey {
    Invalid,
    Bool(bool),
    I64(i64),
    F64(u64),
    String(String),
    BoolSlice(Vec<bool>),
    I64Slice(Vec<i64>),
    F64Slice(Vec<u64>),
    StringSlice(Vec<String>),
}

impl ValueKey {
    fn new(value: &Value) -> Self {
        match value {
            Value::Invalid => ValueKey::Invalid,
            Value::Bool(b) => ValueKey::Bool(*b),
            Value::I64(i) => ValueKey::I64(*i),
            Value::F64(d) => ValueKey::F64(d.to_bits()),
            Value::String(s) => ValueKey::String(s.clone()),
            Value::BoolSlice(values) => ValueKey::BoolSlice(values.clone()),
            Value::I64Slice(values) => ValueKey::I64Slice(values.clone()),
            Value::F64Slice(values) => {
                ValueKey::F64Slice(values.iter().map(|d| d.to_bits()).collect())
            }
            Value::StringSlice(values) => ValueKey::StringSlice(values.clone()),
        }
    }
}
