//! Exporter factory and creation settings

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::consumer::ConsumerFactory;
use super::error::ExportError;
use super::span_exporter::SpanExporter;

/// Identity of the program hosting the exporter
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct BuildInfo {
    pub command: String,
    pub description: String,
    pub version: String,
}

impl Default for BuildInfo {
    fn default() -> Self {
        Self {
            command: env!("CARGO_PKG_NAME").to_string(),
            description: "OpenTelemetry SDK to collector pdata translator".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

/// Settings passed to every consumer a factory creates
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Settings {
    pub build_info: BuildInfo,
}

/// Creates span exporters backed by consumers of one kind
pub struct Factory {
    consumer_factory: Arc<dyn ConsumerFactory>,
    settings: Settings,
}

impl Factory {
    /// `None` settings describe this crate
    pub fn new(consumer_factory: Arc<dyn ConsumerFactory>, settings: Option<Settings>) -> Self {
        Self {
            consumer_factory,
            settings: settings.unwrap_or_default(),
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn consumer_kind(&self) -> &'static str {
        self.consumer_factory.kind()
    }

    /// Build a span exporter. `None` config selects the consumer's default.
    pub fn span_exporter(
        &self,
        config: Option<serde_json::Value>,
    ) -> Result<SpanExporter, ExportError> {
        let config = config.unwrap_or_else(|| self.consumer_factory.default_config());
        let consumer = self
            .consumer_factory
            .create_traces_consumer(&self.settings, config)?;

        tracing::debug!(
            consumer = consumer.name(),
            version = %self.settings.build_info.version,
            "Span exporter created"
        );
        Ok(SpanExporter::new(consumer))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::exporter::{MemoryConsumerFactory, consumer_factory};

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.build_info.command, "spanbridge");
        assert_eq!(settings.build_info.version, env!("CARGO_PKG_VERSION"));
        assert!(!settings.build_info.description.is_empty());
    }

    #[test]
    fn test_custom_settings_kept() {
        let settings = Settings {
            build_info: BuildInfo {
                command: "agent".to_string(),
                description: "test agent".to_string(),
                version: "9.9.9".to_string(),
            },
        };
        let factory = Factory::new(Arc::new(MemoryConsumerFactory::new()), Some(settings.clone()));
        assert_eq!(factory.settings(), &settings);
        assert_eq!(factory.consumer_kind(), "memory");
    }

    #[test]
    fn test_span_exporter_default_config() {
        let factory = Factory::new(consumer_factory("logging").unwrap(), None);
        assert!(factory.span_exporter(None).is_ok());
    }

    #[test]
    fn test_span_exporter_invalid_config() {
        let factory = Factory::new(consumer_factory("logging").unwrap(), None);
        let result = factory.span_exporter(Some(serde_json::json!({ "verbosity": 3 })));
        assert!(matches!(result, Err(ExportError::Config(_))));
    }
}
