//! OTLP utility functions
//!
//! Converts translated batches into OTLP protobuf types for consumers that
//! ship or persist the wire format.

use opentelemetry_proto::tonic::collector::trace::v1::ExportTraceServiceRequest;
use opentelemetry_proto::tonic::common::v1::{
    AnyValue as ProtoAnyValue, ArrayValue, InstrumentationScope as ProtoScope,
    KeyValue as ProtoKeyValue, any_value,
};
use opentelemetry_proto::tonic::resource::v1::Resource as ProtoResource;
use opentelemetry_proto::tonic::trace::v1::{
    ResourceSpans as ProtoResourceSpans, ScopeSpans as ProtoScopeSpans, Span as ProtoSpan,
    Status as ProtoStatus, span,
};
use prost::Message;

use crate::domain::pdata::{
    AnyValue, AttributeMap, ResourceSpans, ScopeSpans, Span, SpanEvent, SpanLink, Traces,
};

// ============================================================================
// BATCH CONVERSION
// ============================================================================

/// Convert a translated batch into an OTLP export request
pub fn to_export_request(traces: &Traces) -> ExportTraceServiceRequest {
    ExportTraceServiceRequest {
        resource_spans: traces.resource_spans.iter().map(resource_spans).collect(),
    }
}

/// Size of the protobuf encoding of `request` in bytes
pub fn encoded_len(request: &ExportTraceServiceRequest) -> usize {
    request.encoded_len()
}

fn resource_spans(rs: &ResourceSpans) -> ProtoResourceSpans {
    ProtoResourceSpans {
        resource: Some(ProtoResource {
            attributes: key_values(&rs.resource.attributes),
            ..Default::default()
        }),
        scope_spans: rs.scope_spans.iter().map(scope_spans).collect(),
        schema_url: rs.schema_url.clone(),
    }
}

fn scope_spans(ss: &ScopeSpans) -> ProtoScopeSpans {
    ProtoScopeSpans {
        scope: Some(ProtoScope {
            name: ss.scope.name.clone(),
            version: ss.scope.version.clone(),
            ..Default::default()
        }),
        spans: ss.spans.iter().map(proto_span).collect(),
        ..Default::default()
    }
}

fn proto_span(s: &Span) -> ProtoSpan {
    ProtoSpan {
        trace_id: s.trace_id.as_bytes().to_vec(),
        span_id: s.span_id.as_bytes().to_vec(),
        trace_state: s.trace_state.as_raw().to_string(),
        // OTLP encodes "no parent" as an empty byte string
        parent_span_id: if s.parent_span_id.is_empty() {
            Vec::new()
        } else {
            s.parent_span_id.as_bytes().to_vec()
        },
        name: s.name.clone(),
        kind: s.kind as i32,
        start_time_unix_nano: s.start_timestamp.as_nanos(),
        end_time_unix_nano: s.end_timestamp.as_nanos(),
        attributes: key_values(&s.attributes),
        dropped_attributes_count: s.dropped_attributes_count,
        events: s.events.iter().map(proto_event).collect(),
        dropped_events_count: s.dropped_events_count,
        links: s.links.iter().map(proto_link).collect(),
        dropped_links_count: s.dropped_links_count,
        status: Some(ProtoStatus {
            message: s.status.message.clone(),
            code: s.status.code as i32,
        }),
        ..Default::default()
    }
}

fn proto_event(e: &SpanEvent) -> span::Event {
    span::Event {
        time_unix_nano: e.timestamp.as_nanos(),
        name: e.name.clone(),
        attributes: key_values(&e.attributes),
        dropped_attributes_count: e.dropped_attributes_count,
    }
}

fn proto_link(l: &SpanLink) -> span::Link {
    span::Link {
        trace_id: l.trace_id.as_bytes().to_vec(),
        span_id: l.span_id.as_bytes().to_vec(),
        trace_state: l.trace_state.as_raw().to_string(),
        attributes: key_values(&l.attributes),
        dropped_attributes_count: l.dropped_attributes_count,
        ..Default::default()
    }
}

// ============================================================================
// ATTRIBUTE CONVERSION
// ============================================================================

/// Convert an attribute map to OTLP key-values, keeping map order
pub fn key_values(attrs: &AttributeMap) -> Vec<ProtoKeyValue> {
    attrs
        .iter()
        .map(|(key, value)| ProtoKeyValue {
            key: key.to_string(),
            value: Some(proto_any_value(value)),
        })
        .collect()
}

/// Convert a generic value to an OTLP `AnyValue`
pub fn proto_any_value(value: &AnyValue) -> ProtoAnyValue {
    let value = match value {
        AnyValue::Empty => None,
        AnyValue::Str(s) => Some(any_value::Value::StringValue(s.clone())),
        AnyValue::Bool(b) => Some(any_value::Value::BoolValue(*b)),
        AnyValue::Int(i) => Some(any_value::Value::IntValue(*i)),
        AnyValue::Double(d) => Some(any_value::Value::DoubleValue(*d)),
        AnyValue::Slice(values) => Some(any_value::Value::ArrayValue(ArrayValue {
            values: values.iter().map(proto_any_value).collect(),
        })),
    };
    ProtoAnyValue { value }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::pdata::{
        InstrumentationScope, Resource, SpanId, SpanKind, Status, StatusCode, Timestamp, TraceId,
        TraceState,
    };

    fn sample_traces() -> Traces {
        let mut resource = Resource::default();
        resource.attributes.put_str("service.name", "svc");

        let mut attributes = AttributeMap::new();
        attributes.put_str("http.method", "GET");
        attributes.put_slice("ports", vec![AnyValue::Int(80), AnyValue::Int(443)]);

        let span = Span {
            trace_id: TraceId::new([1; 16]),
            span_id: SpanId::new([2; 8]),
            trace_state: TraceState::from_raw("a=b"),
            name: "GET /".to_string(),
            kind: SpanKind::Server,
            start_timestamp: Timestamp::from_nanos(10),
            end_timestamp: Timestamp::from_nanos(20),
            attributes,
            events: vec![SpanEvent {
                name: "start".to_string(),
                timestamp: Timestamp::from_nanos(11),
                ..Default::default()
            }],
            links: vec![SpanLink {
                trace_id: TraceId::new([3; 16]),
                span_id: SpanId::new([4; 8]),
                dropped_attributes_count: 2,
                ..Default::default()
            }],
            status: Status {
                message: "fine".to_string(),
                code: StatusCode::Ok,
            },
            dropped_links_count: 5,
            ..Default::default()
        };

        Traces {
            resource_spans: vec![ResourceSpans {
                resource,
                schema_url: "https://opentelemetry.io/schemas/1.24.0".to_string(),
                scope_spans: vec![ScopeSpans {
                    scope: InstrumentationScope {
                        name: "lib".to_string(),
                        version: "1.0".to_string(),
                    },
                    spans: vec![span],
                }],
            }],
        }
    }

    #[test]
    fn test_to_export_request_structure() {
        let request = to_export_request(&sample_traces());
        assert_eq!(request.resource_spans.len(), 1);

        let rs = &request.resource_spans[0];
        assert_eq!(rs.schema_url, "https://opentelemetry.io/schemas/1.24.0");
        let resource = rs.resource.as_ref().unwrap();
        assert_eq!(resource.attributes.len(), 1);
        assert_eq!(resource.attributes[0].key, "service.name");

        let ss = &rs.scope_spans[0];
        let scope = ss.scope.as_ref().unwrap();
        assert_eq!(scope.name, "lib");
        assert_eq!(scope.version, "1.0");

        let span = &ss.spans[0];
        assert_eq!(span.trace_id, vec![1; 16]);
        assert_eq!(span.span_id, vec![2; 8]);
        assert!(span.parent_span_id.is_empty());
        assert_eq!(span.trace_state, "a=b");
        assert_eq!(span.kind, 2);
        assert_eq!(span.start_time_unix_nano, 10);
        assert_eq!(span.end_time_unix_nano, 20);
        assert_eq!(span.events[0].name, "start");
        assert_eq!(span.events[0].time_unix_nano, 11);
        assert_eq!(span.links[0].span_id, vec![4; 8]);
        assert_eq!(span.links[0].dropped_attributes_count, 2);
        assert_eq!(span.dropped_links_count, 5);

        let status = span.status.as_ref().unwrap();
        assert_eq!(status.code, 1);
        assert_eq!(status.message, "fine");
    }

    #[test]
    fn test_parent_span_id_kept_when_set() {
        let mut traces = sample_traces();
        traces.resource_spans[0].scope_spans[0].spans[0].parent_span_id = SpanId::new([9; 8]);
        let request = to_export_request(&traces);
        assert_eq!(
            request.resource_spans[0].scope_spans[0].spans[0].parent_span_id,
            vec![9; 8]
        );
    }

    #[test]
    fn test_proto_any_value_slice() {
        let value = proto_any_value(&AnyValue::Slice(vec![
            AnyValue::Int(80),
            AnyValue::Str("x".to_string()),
        ]));
        match value.value {
            Some(any_value::Value::ArrayValue(array)) => {
                assert_eq!(array.values.len(), 2);
                assert_eq!(array.values[0].value, Some(any_value::Value::IntValue(80)));
                assert_eq!(
                    array.values[1].value,
                    Some(any_value::Value::StringValue("x".to_string()))
                );
            }
            other => panic!("expected array value, got {:?}", other),
        }
    }

    #[test]
    fn test_proto_any_value_empty() {
        assert!(proto_any_value(&AnyValue::Empty).value.is_none());
    }

    #[test]
    fn test_key_values_keep_order() {
        let mut attrs = AttributeMap::new();
        attrs.put_bool("z", true);
        attrs.put_double("a", 0.5);
        let kvs = key_values(&attrs);
        let keys: Vec<&str> = kvs.iter().map(|kv| kv.key.as_str()).collect();
        assert_eq!(keys, vec!["z", "a"]);
    }

    #[test]
    fn test_encoded_len() {
        let empty = to_export_request(&Traces::new());
        assert_eq!(encoded_len(&empty), 0);

        let request = to_export_request(&sample_traces());
        assert!(encoded_len(&request) > 0);
        assert_eq!(encoded_len(&request), request.encode_to_vec().len());
    }
}
