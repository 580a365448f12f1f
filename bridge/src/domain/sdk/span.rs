//! Completed, read-only spans as handed to an exporter by the SDK

use std::sync::Arc;
use std::time::SystemTime;

use opentelemetry::trace::{SpanId, TraceId, TraceState};

use super::attribute::KeyValue;
use super::resource::{InstrumentationScope, Resource};

/// Role of a span in a trace, using the SDK's numbering.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum SpanKind {
    #[default]
    Unspecified,
    Internal,
    Server,
    Client,
    Producer,
    Consumer,
}

impl SpanKind {
    /// Decode the SDK's numeric kind. Unknown codes decode as `Unspecified`.
    pub fn from_code(code: i32) -> Self {
        match code {
            1 => SpanKind::Internal,
            2 => SpanKind::Server,
            3 => SpanKind::Client,
            4 => SpanKind::Producer,
            5 => SpanKind::Consumer,
            _ => SpanKind::Unspecified,
        }
    }
}

impl From<opentelemetry::trace::SpanKind> for SpanKind {
    fn from(kind: opentelemetry::trace::SpanKind) -> Self {
        match kind {
            opentelemetry::trace::SpanKind::Internal => SpanKind::Internal,
            opentelemetry::trace::SpanKind::Server => SpanKind::Server,
            opentelemetry::trace::SpanKind::Client => SpanKind::Client,
            opentelemetry::trace::SpanKind::Producer => SpanKind::Producer,
            opentelemetry::trace::SpanKind::Consumer => SpanKind::Consumer,
        }
    }
}

/// Status code, using the SDK's numbering (unset=0, error=1, ok=2).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum StatusCode {
    #[default]
    Unset,
    Error,
    Ok,
}

impl StatusCode {
    /// Decode the SDK's numeric status code. Unknown codes decode as `Unset`.
    pub fn from_code(code: u32) -> Self {
        match code {
            1 => StatusCode::Error,
            2 => StatusCode::Ok,
            _ => StatusCode::Unset,
        }
    }
}

/// Outcome of the operation a span represents.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Status {
    pub code: StatusCode,
    pub description: String,
}

impl Status {
    pub fn ok() -> Self {
        Self {
            code: StatusCode::Ok,
            description: String::new(),
        }
    }

    pub fn error(description: impl Into<String>) -> Self {
        Self {
            code: StatusCode::Error,
            description: description.into(),
        }
    }
}

impl From<opentelemetry::trace::Status> for Status {
    fn from(status: opentelemetry::trace::Status) -> Self {
        match status {
            opentelemetry::trace::Status::Unset => Status::default(),
            opentelemetry::trace::Status::Ok => Status::ok(),
            opentelemetry::trace::Status::Error { description } => {
                Status::error(description.into_owned())
            }
        }
    }
}

/// Reference from a span to another, causally related span.
#[derive(Clone, Debug, PartialEq)]
pub struct Link {
    pub trace_id: TraceId,
    pub span_id: SpanId,
    pub trace_state: TraceState,
    pub attributes: Vec<KeyValue>,
    pub dropped_attributes_count: usize,
}

impl Link {
    pub fn new(trace_id: TraceId, span_id: SpanId, attributes: Vec<KeyValue>) -> Self {
        Self {
            trace_id,
            span_id,
            trace_state: TraceState::default(),
            attributes,
            dropped_attributes_count: 0,
        }
    }
}

/// Timestamped annotation recorded on a span.
#[derive(Clone, Debug, PartialEq)]
pub struct Event {
    pub name: String,
    pub timestamp: SystemTime,
    pub attributes: Vec<KeyValue>,
    pub dropped_attributes_count: usize,
}

impl Event {
    pub fn new(name: impl Into<String>, timestamp: SystemTime, attributes: Vec<KeyValue>) -> Self {
        Self {
            name: name.into(),
            timestamp,
            attributes,
            dropped_attributes_count: 0,
        }
    }
}

/// A completed span. Exporters only ever read from it.
///
/// The resource is shared between all spans a provider produced, hence the
/// `Arc`. A root span carries `SpanId::INVALID` as its parent.
#[derive(Clone, Debug, PartialEq)]
pub struct ReadOnlySpan {
    pub trace_id: TraceId,
    pub span_id: SpanId,
    pub parent_span_id: SpanId,
    pub trace_state: TraceState,
    pub name: String,
    pub kind: SpanKind,
    pub start_time: SystemTime,
    pub end_time: SystemTime,
    pub resource: Arc<Resource>,
    pub scope: InstrumentationScope,
    pub attributes: Vec<KeyValue>,
    pub links: Vec<Link>,
    pub events: Vec<Event>,
    pub status: Status,
    pub dropped_attributes_count: usize,
    pub dropped_links_count: usize,
    pub dropped_events_count: usize,
}

impl ReadOnlySpan {
    /// Start building a span with the given identity and name
    pub fn builder(trace_id: TraceId, span_id: SpanId, name: impl Into<String>) -> SpanBuilder {
        SpanBuilder::new(trace_id, span_id, name)
    }

    /// Whether the span has a parent in the same trace
    pub fn has_parent(&self) -> bool {
        self.parent_span_id != SpanId::INVALID
    }
}

/// Builder for [`ReadOnlySpan`]. Unset fields take the SDK defaults: no
/// parent, unspecified kind, both timestamps at the Unix epoch, empty
/// resource and scope, unset status.
#[derive(Clone, Debug)]
pub struct SpanBuilder {
    span: ReadOnlySpan,
}

impl SpanBuilder {
    fn new(trace_id: TraceId, span_id: SpanId, name: impl Into<String>) -> Self {
        Self {
            span: ReadOnlySpan {
                trace_id,
                span_id,
                parent_span_id: SpanId::INVALID,
                trace_state: TraceState::default(),
                name: name.into(),
                kind: SpanKind::Unspecified,
                start_time: SystemTime::UNIX_EPOCH,
                end_time: SystemTime::UNIX_EPOCH,
                resource: Arc::new(Resource::empty()),
                scope: InstrumentationScope::default(),
                attributes: Vec::new(),
                links: Vec::new(),
                events: Vec::new(),
                status: Status::default(),
                dropped_attributes_count: 0,
                dropped_links_count: 0,
                dropped_events_count: 0,
            },
        }
    }

    pub fn parent_span_id(mut self, parent: SpanId) -> Self {
        self.span.parent_span_id = parent;
        self
    }

    pub fn trace_state(mut self, trace_state: TraceState) -> Self {
        self.span.trace_state = trace_state;
        self
    }

    pub fn kind(mut self, kind: SpanKind) -> Self {
        self.span.kind = kind;
        self
    }

    pub fn start_time(mut self, start: SystemTime) -> Self {
        self.span.start_time = start;
        self
    }

    pub fn end_time(mut self, end: SystemTime) -> Self {
        self.span.end_time = end;
        self
    }

    pub fn resource(mut self, resource: Arc<Resource>) -> Self {
        self.span.resource = resource;
        self
    }

    pub fn scope(mut self, scope: InstrumentationScope) -> Self {
        self.span.scope = scope;
        self
    }

    pub fn attributes(mut self, attributes: Vec<KeyValue>) -> Self {
        self.span.attributes = attributes;
        self
    }

    pub fn links(mut self, links: Vec<Link>) -> Self {
        self.span.links = links;
        self
    }

    pub fn events(mut self, events: Vec<Event>) -> Self {
        self.span.events = events;
        self
    }

    pub fn status(mut self, status: Status) -> Self {
        self.span.status = status;
        self
    }

    pub fn dropped_counts(mut self, attributes: usize, links: usize, events: usize) -> Self {
        self.span.dropped_attributes_count = attributes;
        self.span.dropped_links_count = links;
        self.span.dropped_events_count = events;
        self
    }

    pub fn build(self) -> ReadOnlySpan {
        self.span
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids() -> (TraceId, SpanId) {
        (
            TraceId::from_bytes([1; 16]),
            SpanId::from_bytes([2; 8]),
        )
    }

    #[test]
    fn test_builder_defaults() {
        let (trace_id, span_id) = ids();
        let span = ReadOnlySpan::builder(trace_id, span_id, "op").build();

        assert_eq!(span.name, "op");
        assert_eq!(span.kind, SpanKind::Unspecified);
        assert_eq!(span.status.code, StatusCode::Unset);
        assert!(!span.has_parent());
        assert!(span.resource.is_empty());
        assert!(span.attributes.is_empty());
    }

    #[test]
    fn test_builder_parent() {
        let (trace_id, span_id) = ids();
        let span = ReadOnlySpan::builder(trace_id, span_id, "child")
            .parent_span_id(SpanId::from_bytes([9; 8]))
            .build();
        assert!(span.has_parent());
    }

    #[test]
    fn test_span_kind_from_code() {
        assert_eq!(SpanKind::from_code(0), SpanKind::Unspecified);
        assert_eq!(SpanKind::from_code(1), SpanKind::Internal);
        assert_eq!(SpanKind::from_code(2), SpanKind::Server);
        assert_eq!(SpanKind::from_code(3), SpanKind::Client);
        assert_eq!(SpanKind::from_code(4), SpanKind::Producer);
        assert_eq!(SpanKind::from_code(5), SpanKind::Consumer);
        assert_eq!(SpanKind::from_code(42), SpanKind::Unspecified);
        assert_eq!(SpanKind::from_code(-1), SpanKind::Unspecified);
    }

    #[test]
    fn test_status_code_from_code() {
        assert_eq!(StatusCode::from_code(0), StatusCode::Unset);
        assert_eq!(StatusCode::from_code(1), StatusCode::Error);
        assert_eq!(StatusCode::from_code(2), StatusCode::Ok);
        assert_eq!(StatusCode::from_code(7), StatusCode::Unset);
    }

    #[test]
    fn test_span_kind_from_api() {
        assert_eq!(
            SpanKind::from(opentelemetry::trace::SpanKind::Server),
            SpanKind::Server
        );
        assert_eq!(
            SpanKind::from(opentelemetry::trace::SpanKind::Internal),
            SpanKind::Internal
        );
    }

    #[test]
    fn test_status_from_api() {
        let status = Status::from(opentelemetry::trace::Status::error("boom"));
        assert_eq!(status.code, StatusCode::Error);
        assert_eq!(status.description, "boom");

        let status = Status::from(opentelemetry::trace::Status::Ok);
        assert_eq!(status, Status::ok());

        let status = Status::from(opentelemetry::trace::Status::Unset);
        assert_eq!(status, Status::default());
    }
}
