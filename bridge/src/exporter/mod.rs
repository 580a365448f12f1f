//! Exporter glue between the SDK and downstream consumers
//!
//! `Factory` builds a `SpanExporter` around a consumer created from JSON
//! config. Each export translates the SDK batch and forwards the result.

mod consumer;
mod error;
mod factory;
mod file;
mod logging;
mod memory;
mod span_exporter;

pub use consumer::{CONSUMER_KINDS, ConsumerFactory, TracesConsumer, consumer_factory};
pub use error::{ConsumerError, ExportError};
pub use factory::{BuildInfo, Factory, Settings};
pub use file::{DEFAULT_FILE_PATH, FileConsumer, FileConsumerConfig, FileConsumerFactory};
pub use logging::{LoggingConfig, LoggingConsumer, LoggingConsumerFactory, Verbosity};
pub use memory::{MemoryConsumer, MemoryConsumerFactory};
pub use span_exporter::SpanExporter;
