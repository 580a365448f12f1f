//! Core application infrastructure

pub mod cli;
pub mod config;
pub mod constants;
pub mod sample;

pub use crate::app::BridgeApp;
pub use cli::{CliConfig, Commands};
pub use config::{AppConfig, ExporterConfig, SampleConfig};
