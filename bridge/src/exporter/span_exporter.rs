//! Span exporter: translates SDK batches and hands them to a consumer

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::domain::sdk::ReadOnlySpan;
use crate::domain::translate;

use super::consumer::TracesConsumer;
use super::error::ExportError;

pub struct SpanExporter {
    consumer: Arc<dyn TracesConsumer>,
    shut_down: AtomicBool,
}

impl SpanExporter {
    pub fn new(consumer: Arc<dyn TracesConsumer>) -> Self {
        Self {
            consumer,
            shut_down: AtomicBool::new(false),
        }
    }

    /// Translate `spans` and forward the batch. An empty input is forwarded
    /// as an empty batch.
    pub async fn export_spans(&self, spans: &[ReadOnlySpan]) -> Result<(), ExportError> {
        if self.is_shut_down() {
            return Err(ExportError::Shutdown);
        }

        let traces = translate(spans);
        tracing::trace!(
            consumer = self.consumer.name(),
            input_spans = spans.len(),
            resource_spans = traces.resource_spans.len(),
            "Exporting spans"
        );

        self.consumer.consume_traces(traces).await.map_err(|e| {
            tracing::warn!(error = %e, consumer = self.consumer.name(), "Export failed");
            ExportError::from(e)
        })
    }

    /// Shut the consumer down. Only the first call reaches the consumer.
    pub async fn shutdown(&self) -> Result<(), ExportError> {
        if self.shut_down.swap(true, Ordering::AcqRel) {
            return Err(ExportError::Shutdown);
        }
        tracing::debug!(consumer = self.consumer.name(), "Shutting down span exporter");
        self.consumer.shutdown().await?;
        Ok(())
    }

    pub fn is_shut_down(&self) -> bool {
        self.shut_down.load(Ordering::Acquire)
    }
}
