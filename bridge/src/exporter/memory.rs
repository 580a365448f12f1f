//! In-memory consumer that keeps every batch it receives

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::domain::pdata::Traces;

use super::consumer::{ConsumerFactory, TracesConsumer};
use super::error::{ConsumerError, ExportError};
use super::factory::Settings;

/// Factory handing out one shared memory consumer
///
/// Every consumer created by the same factory is the same instance, so the
/// caller can keep the factory and inspect what was exported.
#[derive(Default)]
pub struct MemoryConsumerFactory {
    consumer: Arc<MemoryConsumer>,
}

impl MemoryConsumerFactory {
    pub fn new() -> Self {
        Self::default()
    }

    /// The shared consumer instance
    pub fn consumer(&self) -> Arc<MemoryConsumer> {
        self.consumer.clone()
    }
}

impl ConsumerFactory for MemoryConsumerFactory {
    fn kind(&self) -> &'static str {
        "memory"
    }

    fn default_config(&self) -> serde_json::Value {
        serde_json::json!({})
    }

    fn create_traces_consumer(
        &self,
        _settings: &Settings,
        _config: serde_json::Value,
    ) -> Result<Arc<dyn TracesConsumer>, ExportError> {
        Ok(self.consumer.clone())
    }
}

#[derive(Default)]
pub struct MemoryConsumer {
    batches: Mutex<Vec<Traces>>,
    shut_down: AtomicBool,
}

impl MemoryConsumer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the received batches, in arrival order
    pub fn batches(&self) -> Vec<Traces> {
        self.batches.lock().clone()
    }

    pub fn batch_count(&self) -> usize {
        self.batches.lock().len()
    }

    /// Total spans across all received batches
    pub fn span_count(&self) -> usize {
        self.batches.lock().iter().map(Traces::span_count).sum()
    }

    pub fn is_shut_down(&self) -> bool {
        self.shut_down.load(Ordering::Acquire)
    }
}

#[async_trait]
impl TracesConsumer for MemoryConsumer {
    async fn consume_traces(&self, traces: Traces) -> Result<(), ConsumerError> {
        // Flag is read and written under the batch lock
        let mut batches = self.batches.lock();
        if self.is_shut_down() {
            return Err(ConsumerError::Closed);
        }
        batches.push(traces);
        Ok(())
    }

    async fn shutdown(&self) -> Result<(), ConsumerError> {
        let _batches = self.batches.lock();
        self.shut_down.store(true, Ordering::Release);
        Ok(())
    }

    fn name(&self) -> &'static str {
        "memory"
    }
}
