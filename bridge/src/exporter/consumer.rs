//! Downstream consumer traits and the built-in consumer registry
//!
//! A consumer receives translated batches. Each consumer kind has a factory
//! that turns an opaque JSON config into a typed config and builds the
//! consumer from it.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::pdata::Traces;

use super::error::{ConsumerError, ExportError};
use super::factory::Settings;
use super::file::FileConsumerFactory;
use super::logging::LoggingConsumerFactory;
use super::memory::MemoryConsumerFactory;

/// Receiver of translated trace batches
#[async_trait]
pub trait TracesConsumer: Send + Sync {
    /// Consume one batch. Ownership of the batch moves to the consumer.
    async fn consume_traces(&self, traces: Traces) -> Result<(), ConsumerError>;

    /// Flush and release resources. Called at most once by the exporter.
    async fn shutdown(&self) -> Result<(), ConsumerError> {
        Ok(())
    }

    /// Consumer kind, for logging
    fn name(&self) -> &'static str;
}

/// Builds consumers of one kind from their JSON config
pub trait ConsumerFactory: Send + Sync {
    /// Kind identifier used in configuration
    fn kind(&self) -> &'static str;

    /// Config used when the caller supplies none
    fn default_config(&self) -> serde_json::Value;

    fn create_traces_consumer(
        &self,
        settings: &Settings,
        config: serde_json::Value,
    ) -> Result<Arc<dyn TracesConsumer>, ExportError>;
}

/// Built-in consumer kinds
pub const CONSUMER_KINDS: &[&str] = &["logging", "file", "memory"];

/// Look up a built-in consumer factory by kind
pub fn consumer_factory(kind: &str) -> Result<Arc<dyn ConsumerFactory>, ExportError> {
    match kind.to_lowercase().as_str() {
        "logging" => Ok(Arc::new(LoggingConsumerFactory)),
        "file" => Ok(Arc::new(FileConsumerFactory)),
        "memory" => Ok(Arc::new(MemoryConsumerFactory::new())),
        _ => Err(ExportError::UnknownConsumer(kind.to_string())),
    }
}

/// Deserialize a consumer config, mapping failures to `ExportError::Config`
pub(crate) fn parse_config<T: serde::de::DeserializeOwned>(
    kind: &str,
    config: serde_json::Value,
) -> Result<T, ExportError> {
    serde_json::from_value(config).map_err(|e| ExportError::Config(format!("{}: {}", kind, e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_consumer_factory_known_kinds() {
        for kind in CONSUMER_KINDS {
            let factory = consumer_factory(kind).unwrap();
            assert_eq!(factory.kind(), *kind);
        }
    }

    #[test]
    fn test_consumer_factory_case_insensitive() {
        assert_eq!(consumer_factory("LOGGING").unwrap().kind(), "logging");
    }

    #[test]
    fn test_consumer_factory_unknown() {
        let err = consumer_factory("kafka").err().unwrap();
        assert!(matches!(err, ExportError::UnknownConsumer(ref k) if k == "kafka"));
    }

    #[test]
    fn test_parse_config_error_names_kind() {
        #[derive(serde::Deserialize, Debug)]
        #[allow(dead_code)]
        struct Needs {
            path: String,
        }
        let err = parse_config::<Needs>("file", serde_json::json!({})).unwrap_err();
        match err {
            ExportError::Config(msg) => {
                assert!(msg.starts_with("file: "));
                assert!(msg.contains("path"));
            }
            other => panic!("expected config error, got {:?}", other),
        }
    }
}
