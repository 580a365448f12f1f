//! SDK-side span model
//!
//! Read-only view of the spans an OpenTelemetry SDK hands to its exporters:
//! a flat list where every span carries its own resource and scope, and
//! attributes are type-tagged key-value pairs.

mod attribute;
mod resource;
mod span;

pub use attribute::{KeyValue, Value};
pub use resource::{InstrumentationScope, Resource};
pub use span::{Event, Link, ReadOnlySpan, SpanBuilder, SpanKind, Status, StatusCode};
