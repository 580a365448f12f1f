//! File consumer: appends each batch as one OTLP JSON line

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tokio::fs::OpenOptions;
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;

use crate::domain::pdata::Traces;
use crate::utils::otlp;

use super::consumer::{ConsumerFactory, TracesConsumer, parse_config};
use super::error::{ConsumerError, ExportError};
use super::factory::Settings;

/// Default output file, relative to the working directory
pub const DEFAULT_FILE_PATH: &str = "spanbridge-traces.jsonl";

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct FileConsumerConfig {
    pub path: PathBuf,
}

pub struct FileConsumerFactory;

impl ConsumerFactory for FileConsumerFactory {
    fn kind(&self) -> &'static str {
        "file"
    }

    fn default_config(&self) -> serde_json::Value {
        serde_json::json!({ "path": DEFAULT_FILE_PATH })
    }

    fn create_traces_consumer(
        &self,
        settings: &Settings,
        config: serde_json::Value,
    ) -> Result<Arc<dyn TracesConsumer>, ExportError> {
        let config: FileConsumerConfig = parse_config(self.kind(), config)?;
        if config.path.as_os_str().is_empty() {
            return Err(ExportError::Config("file: path must not be empty".to_string()));
        }
        tracing::debug!(
            command = %settings.build_info.command,
            path = %config.path.display(),
            "Creating file consumer"
        );
        Ok(Arc::new(FileConsumer::new(config.path)))
    }
}

/// One line of the output file
#[derive(Serialize)]
struct FileEntry<T: Serialize> {
    timestamp: String,
    data: T,
}

pub struct FileConsumer {
    path: PathBuf,
    /// Serializes appends so concurrent batches never interleave
    write_lock: Mutex<()>,
    closed: AtomicBool,
}

impl FileConsumer {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
            closed: AtomicBool::new(false),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl TracesConsumer for FileConsumer {
    async fn consume_traces(&self, traces: Traces) -> Result<(), ConsumerError> {
        if self.closed.load(Ordering::Acquire) {
            return Err(ConsumerError::Closed);
        }

        let entry = FileEntry {
            timestamp: Utc::now().to_rfc3339(),
            data: otlp::to_export_request(&traces),
        };
        let json = serde_json::to_string(&entry)?;

        let _guard = self.write_lock.lock().await;
        // Shutdown may have completed while this batch waited for the lock
        if self.closed.load(Ordering::Acquire) {
            return Err(ConsumerError::Closed);
        }

        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            tokio::fs::create_dir_all(parent).await?;
        }

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await?;
        file.write_all(json.as_bytes()).await?;
        file.write_all(b"\n").await?;
        file.flush().await?;

        tracing::trace!(
            path = %self.path.display(),
            spans = traces.span_count(),
            "Appended batch"
        );
        Ok(())
    }

    async fn shutdown(&self) -> Result<(), ConsumerError> {
        // Wait for an in-flight append before closing
        let _guard = self.write_lock.lock().await;
        self.closed.store(true, Ordering::Release);
        Ok(())
    }

    fn name(&self) -> &'static str {
        "file"
    }
}
