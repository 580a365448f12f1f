//! Translation of OpenTelemetry SDK span batches into collector pdata traces

pub mod app;
pub mod core;
pub mod domain;
pub mod exporter;
pub mod utils;

pub use domain::translate;
pub use exporter::{Factory, SpanExporter};
