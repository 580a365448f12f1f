//! Generated sample batch for the `run` command

use std::sync::Arc;
use std::time::{Duration, SystemTime};

use opentelemetry::trace::{SpanId, TraceId};

use crate::domain::sdk::{
    Event, InstrumentationScope, KeyValue, ReadOnlySpan, Resource, SpanKind, Status,
};

use super::config::SampleConfig;
use super::constants::SAMPLE_SCOPE_NAME;

const SCHEMA_URL: &str = "https://opentelemetry.io/schemas/1.24.0";

/// Build one trace per service: a server root span followed by client
/// children. Every fifth span fails.
pub fn sample_spans(config: &SampleConfig, base: SystemTime) -> Vec<ReadOnlySpan> {
    let scope = InstrumentationScope::new(SAMPLE_SCOPE_NAME, env!("CARGO_PKG_VERSION"));
    let mut spans = Vec::with_capacity(config.services * config.spans_per_service);

    for service in 0..config.services {
        let resource = Arc::new(
            Resource::new([
                KeyValue::new("service.name", format!("sample-service-{}", service)),
                KeyValue::new("telemetry.sdk.name", "opentelemetry"),
                KeyValue::new("telemetry.sdk.language", "rust"),
            ])
            .with_schema_url(SCHEMA_URL),
        );
        let trace_id = TraceId::from_bytes((service as u128 + 1).to_be_bytes());
        let root_id = span_id(service, 0, config.spans_per_service);

        for index in 0..config.spans_per_service {
            let start = base + Duration::from_millis(index as u64);
            let end = start + Duration::from_micros(750);
            let seq = service * config.spans_per_service + index;
            let status = if seq % 5 == 4 {
                Status::error("sample failure")
            } else {
                Status::ok()
            };

            let mut builder = ReadOnlySpan::builder(
                trace_id,
                span_id(service, index, config.spans_per_service),
                if index == 0 {
                    "GET /sample".to_string()
                } else {
                    format!("call-{}", index)
                },
            )
            .resource(resource.clone())
            .scope(scope.clone())
            .start_time(start)
            .end_time(end)
            .status(status)
            .attributes(vec![
                KeyValue::new("http.method", "GET"),
                KeyValue::new("sample.index", index as i64),
                KeyValue::new("sample.ratio", index as f64 / 10.0),
                KeyValue::new("sample.tags", vec!["a".to_string(), "b".to_string()]),
            ])
            .events(vec![Event::new("start", start, Vec::new())]);

            builder = if index == 0 {
                builder.kind(SpanKind::Server)
            } else {
                builder.kind(SpanKind::Client).parent_span_id(root_id)
            };
            spans.push(builder.build());
        }
    }

    spans
}

fn span_id(service: usize, index: usize, per_service: usize) -> SpanId {
    SpanId::from_bytes(((service * per_service + index) as u64 + 1).to_be_bytes())
}
