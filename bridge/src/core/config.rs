use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::exporter::CONSUMER_KINDS;

use super::cli::CliConfig;
use super::constants::{
    CONFIG_FILE_NAME, DEFAULT_EXPORTER, DEFAULT_SAMPLE_SERVICES, DEFAULT_SAMPLE_SPANS_PER_SERVICE,
    MAX_SAMPLE_SIZE, MAX_SAMPLE_SPANS,
};

// =============================================================================
// File Configuration
// =============================================================================

/// Exporter section of the config file
#[derive(Debug, Default, Deserialize)]
pub struct ExporterFileConfig {
    pub kind: Option<String>,
    /// Consumer-specific config, passed through untouched
    pub config: Option<serde_json::Value>,
}

/// Sample batch section of the config file
#[derive(Debug, Default, Deserialize)]
pub struct SampleFileConfig {
    pub services: Option<usize>,
    pub spans_per_service: Option<usize>,
}

/// File-based configuration (JSON)
#[derive(Debug, Default, Deserialize)]
pub struct FileConfig {
    pub exporter: Option<ExporterFileConfig>,
    pub sample: Option<SampleFileConfig>,
    #[serde(flatten)]
    pub extra: serde_json::Value,
}

impl FileConfig {
    /// Load configuration from a JSON file
    fn load_from_file(path: &Path) -> Result<Self> {
        tracing::debug!(path = %path.display(), "Loading config file");
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config: Self = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        tracing::trace!(config = ?config, "Parsed config file");
        Ok(config)
    }

    /// Warn about unknown fields in the config
    fn warn_unknown_fields(&self) {
        if let serde_json::Value::Object(map) = &self.extra
            && !map.is_empty()
        {
            let keys_str: String = map
                .keys()
                .map(|k| k.as_str())
                .collect::<Vec<_>>()
                .join(", ");
            tracing::warn!(
                fields = %keys_str,
                "Unknown fields in config file (possible typos)"
            );
        }
    }

    /// Merge another FileConfig into this one (other takes precedence)
    fn merge(&mut self, other: FileConfig) {
        if let Some(exporter) = other.exporter {
            let current = self
                .exporter
                .get_or_insert_with(ExporterFileConfig::default);
            if exporter.kind.is_some() {
                tracing::trace!(kind = ?exporter.kind, "Merging exporter.kind");
                current.kind = exporter.kind;
            }
            if exporter.config.is_some() {
                tracing::trace!("Merging exporter.config");
                current.config = exporter.config;
            }
        }

        if let Some(sample) = other.sample {
            let current = self.sample.get_or_insert_with(SampleFileConfig::default);
            if sample.services.is_some() {
                tracing::trace!(services = ?sample.services, "Merging sample.services");
                current.services = sample.services;
            }
            if sample.spans_per_service.is_some() {
                tracing::trace!(
                    spans_per_service = ?sample.spans_per_service,
                    "Merging sample.spans_per_service"
                );
                current.spans_per_service = sample.spans_per_service;
            }
        }
    }
}

// =============================================================================
// Application Configuration
// =============================================================================

/// Which consumer receives exported batches
#[derive(Debug, Clone, PartialEq)]
pub struct ExporterConfig {
    pub kind: String,
    /// `None` selects the consumer's default config
    pub config: Option<serde_json::Value>,
}

/// Shape of the generated sample batch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SampleConfig {
    pub services: usize,
    pub spans_per_service: usize,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub exporter: ExporterConfig,
    pub sample: SampleConfig,
}

impl AppConfig {
    /// Load configuration: defaults -> config file -> CLI/env overrides
    pub fn load(cli: &CliConfig) -> Result<Self> {
        tracing::debug!("Loading application configuration");
        tracing::trace!(cli = ?cli, "CLI config");

        // 1. Load from CLI-specified path OR local directory
        let config_path = if let Some(ref path) = cli.config {
            if !path.exists() {
                anyhow::bail!("Config file not found: {}", path.display());
            }
            Some(path.clone())
        } else {
            let local = PathBuf::from(CONFIG_FILE_NAME);
            if local.exists() { Some(local) } else { None }
        };

        let mut file_config = FileConfig::default();
        if let Some(path) = config_path {
            let overlay = FileConfig::load_from_file(&path)?;
            overlay.warn_unknown_fields();
            file_config.merge(overlay);
            tracing::debug!(path = %path.display(), "Config file loaded");
        }

        Self::from_layers(file_config, cli)
    }

    fn from_layers(file_config: FileConfig, cli: &CliConfig) -> Result<Self> {
        let file_exporter = file_config.exporter.unwrap_or_default();
        let file_sample = file_config.sample.unwrap_or_default();

        // 2. Layer configs: defaults -> file config -> CLI/env overrides
        let file_kind = file_exporter.kind.map(|k| k.to_lowercase());
        let kind = cli
            .exporter
            .clone()
            .or_else(|| file_kind.clone())
            .unwrap_or_else(|| DEFAULT_EXPORTER.to_string());

        if !CONSUMER_KINDS.contains(&kind.as_str()) {
            anyhow::bail!(
                "Invalid exporter kind '{}'. Valid options: {}",
                kind,
                CONSUMER_KINDS.join(", ")
            );
        }

        // File config belongs to the file's kind; drop it if the CLI switched kinds
        let mut config = match file_kind {
            Some(ref k) if *k != kind => {
                tracing::debug!(
                    file_kind = %k,
                    kind = %kind,
                    "Ignoring exporter.config written for another consumer"
                );
                None
            }
            _ => file_exporter.config,
        };

        if let Some(ref output) = cli.output {
            if kind != "file" {
                anyhow::bail!("--output requires the file exporter (got '{}')", kind);
            }
            let mut object = match config.take() {
                Some(serde_json::Value::Object(map)) => map,
                Some(other) => anyhow::bail!("exporter.config must be an object, got {}", other),
                None => serde_json::Map::new(),
            };
            object.insert(
                "path".to_string(),
                serde_json::Value::String(output.display().to_string()),
            );
            config = Some(serde_json::Value::Object(object));
        }

        let sample = SampleConfig {
            services: cli
                .services
                .or(file_sample.services)
                .unwrap_or(DEFAULT_SAMPLE_SERVICES),
            spans_per_service: cli
                .spans
                .or(file_sample.spans_per_service)
                .unwrap_or(DEFAULT_SAMPLE_SPANS_PER_SERVICE),
        };

        let config = Self {
            exporter: ExporterConfig { kind, config },
            sample,
        };
        config.validate()?;

        tracing::debug!(
            exporter = %config.exporter.kind,
            services = config.sample.services,
            spans_per_service = config.sample.spans_per_service,
            "Configuration loaded"
        );
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.sample.services > MAX_SAMPLE_SIZE {
            anyhow::bail!(
                "sample.services must be at most {} (got {})",
                MAX_SAMPLE_SIZE,
                self.sample.services
            );
        }
        if self.sample.spans_per_service > MAX_SAMPLE_SIZE {
            anyhow::bail!(
                "sample.spans_per_service must be at most {} (got {})",
                MAX_SAMPLE_SIZE,
                self.sample.spans_per_service
            );
        }
        let total = self
            .sample
            .services
            .checked_mul(self.sample.spans_per_service)
            .unwrap_or(usize::MAX);
        if total > MAX_SAMPLE_SPANS {
            anyhow::bail!(
                "sample.services * sample.spans_per_service must be at most {} (got {})",
                MAX_SAMPLE_SPANS,
                total
            );
        }
        Ok(())
    }
}
