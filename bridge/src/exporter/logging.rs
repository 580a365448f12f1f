//! Logging consumer: reports each batch through `tracing`

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::pdata::{AttributeMap, Span, Traces};
use crate::utils::otlp;

use super::consumer::{ConsumerFactory, TracesConsumer, parse_config};
use super::error::{ConsumerError, ExportError};
use super::factory::Settings;

/// How much of each batch is logged
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Verbosity {
    /// Batch counts only
    Basic,
    /// Counts plus one line per span
    #[default]
    Normal,
    /// Counts plus every span with its attributes
    Detailed,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct LoggingConfig {
    #[serde(default)]
    pub verbosity: Verbosity,
}

pub struct LoggingConsumerFactory;

impl ConsumerFactory for LoggingConsumerFactory {
    fn kind(&self) -> &'static str {
        "logging"
    }

    fn default_config(&self) -> serde_json::Value {
        serde_json::json!({ "verbosity": "normal" })
    }

    fn create_traces_consumer(
        &self,
        settings: &Settings,
        config: serde_json::Value,
    ) -> Result<Arc<dyn TracesConsumer>, ExportError> {
        let config: LoggingConfig = parse_config(self.kind(), config)?;
        tracing::debug!(
            command = %settings.build_info.command,
            verbosity = ?config.verbosity,
            "Creating logging consumer"
        );
        Ok(Arc::new(LoggingConsumer::new(config)))
    }
}

pub struct LoggingConsumer {
    verbosity: Verbosity,
}

impl LoggingConsumer {
    pub fn new(config: LoggingConfig) -> Self {
        Self {
            verbosity: config.verbosity,
        }
    }

    pub fn verbosity(&self) -> Verbosity {
        self.verbosity
    }

    fn log_span(&self, span: &Span) {
        match self.verbosity {
            Verbosity::Basic => {}
            Verbosity::Normal => {
                tracing::debug!(
                    trace_id = %span.trace_id,
                    span_id = %span.span_id,
                    name = %span.name,
                    "Span"
                );
            }
            Verbosity::Detailed => {
                let attributes = format_attributes(&span.attributes);
                tracing::debug!(
                    trace_id = %span.trace_id,
                    span_id = %span.span_id,
                    parent_span_id = %span.parent_span_id,
                    name = %span.name,
                    kind = span.kind.as_str(),
                    start = %span.start_timestamp,
                    end = %span.end_timestamp,
                    status = span.status.code.as_str(),
                    events = span.events.len(),
                    links = span.links.len(),
                    attributes = %attributes,
                    "Span"
                );
            }
        }
    }
}

/// `key=value (Type)` pairs in map order
fn format_attributes(attrs: &AttributeMap) -> String {
    attrs
        .iter()
        .map(|(k, v)| format!("{}={} ({})", k, v, v.type_name()))
        .collect::<Vec<_>>()
        .join(", ")
}

#[async_trait]
impl TracesConsumer for LoggingConsumer {
    async fn consume_traces(&self, traces: Traces) -> Result<(), ConsumerError> {
        let bytes = otlp::encoded_len(&otlp::to_export_request(&traces));
        tracing::info!(
            resource_spans = traces.resource_spans.len(),
            spans = traces.span_count(),
            bytes,
            "TracesExporter"
        );
        for span in traces.spans() {
            self.log_span(span);
        }
        Ok(())
    }

    fn name(&self) -> &'static str {
        "logging"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::pdata::AnyValue;

    #[test]
    fn test_default_config_parses() {
        let factory = LoggingConsumerFactory;
        let config: LoggingConfig = parse_config("logging", factory.default_config()).unwrap();
        assert_eq!(config.verbosity, Verbosity::Normal);
    }

    #[test]
    fn test_verbosity_from_json() {
        let config: LoggingConfig =
            serde_json::from_value(serde_json::json!({ "verbosity": "detailed" })).unwrap();
        assert_eq!(LoggingConsumer::new(config).verbosity(), Verbosity::Detailed);

        let config: LoggingConfig = serde_json::from_value(serde_json::json!({})).unwrap();
        assert_eq!(config.verbosity, Verbosity::Normal);
    }

    #[test]
    fn test_format_attributes_with_types() {
        let mut attrs = AttributeMap::new();
        attrs.put_str("http.method", "GET");
        attrs.put_int("http.status_code", 200);
        attrs.put_slice("ports", vec![AnyValue::Int(80), AnyValue::Int(443)]);

        assert_eq!(
            format_attributes(&attrs),
            "http.method=GET (Str), http.status_code=200 (Int), ports=[80, 443] (Slice)"
        );
        assert_eq!(format_attributes(&AttributeMap::new()), "");
    }

    #[test]
    fn test_invalid_config_rejected() {
        let factory = LoggingConsumerFactory;
        let result = factory.create_traces_consumer(
            &Settings::default(),
            serde_json::json!({ "verbosity": "loud" }),
        );
        assert!(matches!(result, Err(ExportError::Config(_))));

        let result = factory.create_traces_consumer(
            &Settings::default(),
            serde_json::json!({ "colour": true }),
        );
        assert!(matches!(result, Err(ExportError::Config(_))));
    }

    #[tokio::test]
    async fn test_consume_traces() {
        let factory = LoggingConsumerFactory;
        let consumer = factory
            .create_traces_consumer(
                &Settings::default(),
                serde_json::json!({ "verbosity": "detailed" }),
            )
            .unwrap();
        assert_eq!(consumer.name(), "logging");
        consumer.consume_traces(Traces::new()).await.unwrap();
        consumer.shutdown().await.unwrap();
    }
}
