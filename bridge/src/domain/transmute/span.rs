//! Per-span field translation and the kind/status code tables

use crate::domain::pdata::{self, AttributeMap, Timestamp};
use crate::domain::sdk::{self, ReadOnlySpan};
use crate::utils::time::system_time_to_nanos;

use super::attributes::map_attributes;

pub(super) fn translate_spans(spans: &[&ReadOnlySpan]) -> Vec<pdata::Span> {
    let mut out = Vec::with_capacity(spans.len());
    for span in spans {
        out.push(translate_span(span));
    }
    out
}

/// Translate one span. The parent id of a root span is the empty id.
pub(super) fn translate_span(span: &ReadOnlySpan) -> pdata::Span {
    let mut attributes = AttributeMap::new();
    map_attributes(&mut attributes, &span.attributes);

    pdata::Span {
        trace_id: trace_id(span.trace_id),
        span_id: span_id(span.span_id),
        trace_state: pdata::TraceState::from_raw(span.trace_state.header()),
        parent_span_id: span_id(span.parent_span_id),
        name: span.name.clone(),
        kind: span_kind(span.kind),
        start_timestamp: Timestamp::from_nanos(system_time_to_nanos(span.start_time)),
        end_timestamp: Timestamp::from_nanos(system_time_to_nanos(span.end_time)),
        attributes,
        events: translate_events(&span.events),
        links: translate_links(&span.links),
        status: translate_status(&span.status),
        dropped_attributes_count: widen(span.dropped_attributes_count),
        dropped_events_count: widen(span.dropped_events_count),
        dropped_links_count: widen(span.dropped_links_count),
    }
}

pub(super) fn span_kind(kind: sdk::SpanKind) -> pdata::SpanKind {
    match kind {
        sdk::SpanKind::Internal => pdata::SpanKind::Internal,
        sdk::SpanKind::Server => pdata::SpanKind::Server,
        sdk::SpanKind::Client => pdata::SpanKind::Client,
        sdk::SpanKind::Producer => pdata::SpanKind::Producer,
        sdk::SpanKind::Consumer => pdata::SpanKind::Consumer,
        _ => pdata::SpanKind::Unspecified,
    }
}

pub(super) fn status_code(code: sdk::StatusCode) -> pdata::StatusCode {
    match code {
        sdk::StatusCode::Ok => pdata::StatusCode::Ok,
        sdk::StatusCode::Error => pdata::StatusCode::Error,
        _ => pdata::StatusCode::Unset,
    }
}

fn translate_status(status: &sdk::Status) -> pdata::Status {
    pdata::Status {
        message: status.description.clone(),
        code: status_code(status.code),
    }
}

fn translate_links(links: &[sdk::Link]) -> Vec<pdata::SpanLink> {
    let mut out = Vec::with_capacity(links.len());
    for link in links {
        let mut attributes = AttributeMap::new();
        map_attributes(&mut attributes, &link.attributes);
        out.push(pdata::SpanLink {
            trace_id: trace_id(link.trace_id),
            span_id: span_id(link.span_id),
            trace_state: pdata::TraceState::from_raw(link.trace_state.header()),
            attributes,
            dropped_attributes_count: widen(link.dropped_attributes_count),
        });
    }
    out
}

fn translate_events(events: &[sdk::Event]) -> Vec<pdata::SpanEvent> {
    let mut out = Vec::with_capacity(events.len());
    for event in events {
        let mut attributes = AttributeMap::new();
        map_attributes(&mut attributes, &event.attributes);
        out.push(pdata::SpanEvent {
            name: event.name.clone(),
            timestamp: Timestamp::from_nanos(system_time_to_nanos(event.timestamp)),
            attributes,
            dropped_attributes_count: widen(event.dropped_attributes_count),
        });
    }
    out
}

fn trace_id(id: opentelemetry::trace::TraceId) -> pdata::TraceId {
    pdata::TraceId::new(id.to_bytes())
}

fn span_id(id: opentelemetry::trace::SpanId) -> pdata::SpanId {
    pdata::SpanId::new(id.to_bytes())
}

/// Counts beyond `u32::MAX` saturate.
fn widen(count: usize) -> u32 {
    u32::try_from(count).unwrap_or(u32::MAX)
}
