//! SDK span batch → collector trace batch
//!
//! ```text
//! [ReadOnlySpan]  ──group──▶  resource ─┬─ scope ─── [span, span, ...]
//!                                       └─ scope ─── [span, ...]
//!                 ──build──▶  Traces { ResourceSpans { ScopeSpans { Span } } }
//! ```
//!
//! - `attributes` - typed key-values → `AttributeMap` entries
//! - `grouping` - value-keyed resource/scope bucketing
//! - `span` - per-span fields, links, events, kind and status tables
//!
//! Translation is a pure function: it borrows the input, allocates a fresh
//! output, performs no I/O and cannot fail. Attribute values of an unknown
//! type are dropped.

mod attributes;
mod grouping;
mod span;

pub use attributes::{map_attribute, map_attributes, map_attributes_iter};
pub use grouping::{ResourceGroup, ScopeGroup, group};

use crate::domain::pdata::{self, InstrumentationScope, ResourceSpans, ScopeSpans, Traces};
use crate::domain::sdk::ReadOnlySpan;

/// Translate a batch of SDK spans into a collector trace batch.
///
/// One `ResourceSpans` is emitted per distinct resource and one `ScopeSpans`
/// per distinct scope inside it. The order of groups is unspecified; spans
/// inside a scope keep their input order.
pub fn translate(spans: &[ReadOnlySpan]) -> Traces {
    let Some(groups) = group(spans) else {
        return Traces::new();
    };

    let mut resource_spans = Vec::with_capacity(groups.len());
    for resource_group in &groups {
        resource_spans.push(translate_resource(resource_group));
    }
    Traces { resource_spans }
}

fn translate_resource(group: &ResourceGroup<'_>) -> ResourceSpans {
    let mut resource = pdata::Resource::default();
    map_attributes_iter(&mut resource.attributes, group.resource.iter());

    let mut scope_spans = Vec::with_capacity(group.scopes.len());
    for scope_group in &group.scopes {
        scope_spans.push(ScopeSpans {
            scope: InstrumentationScope {
                name: scope_group.scope.name.clone(),
                version: scope_group.scope.version.clone(),
            },
            spans: span::translate_spans(&scope_group.spans),
        });
    }

    ResourceSpans {
        resource,
        schema_url: group.resource.schema_url().unwrap_or_default().to_string(),
        scope_spans,
    }
}
