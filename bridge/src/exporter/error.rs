//! Exporter error types

use thiserror::Error;

/// Error returned by a downstream traces consumer
#[derive(Error, Debug)]
pub enum ConsumerError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Consumer is closed")]
    Closed,
}

/// Error returned by the factory and the span exporter
#[derive(Error, Debug)]
pub enum ExportError {
    #[error("Exporter configuration error: {0}")]
    Config(String),

    #[error("Consumer error: {0}")]
    Consumer(#[from] ConsumerError),

    #[error("Exporter is shut down")]
    Shutdown,

    #[error("Unknown consumer kind '{0}'")]
    UnknownConsumer(String),
}
