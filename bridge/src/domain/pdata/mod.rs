//! Collector-side trace model
//!
//! A batch is a three-level hierarchy: one `ResourceSpans` per distinct
//! resource, one `ScopeSpans` per distinct instrumentation scope within it,
//! and the spans themselves. Attributes live in a generic `AttributeMap`.

mod trace;
mod value;

pub use trace::{
    InstrumentationScope, Resource, ResourceSpans, ScopeSpans, Span, SpanEvent, SpanId, SpanKind,
    SpanLink, Status, StatusCode, Timestamp, TraceId, TraceState, Traces,
};
pub use value::{AnyValue, AttributeMap};
