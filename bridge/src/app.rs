//! Core application

use std::time::SystemTime;

use anyhow::{Context, Result};

use crate::core::cli::{self, Commands};
use crate::core::config::AppConfig;
use crate::core::constants::{APP_NAME, APP_NAME_LOWER, ENV_LOG};
use crate::core::sample::sample_spans;
use crate::exporter::{CONSUMER_KINDS, Factory, consumer_factory};

pub struct BridgeApp;

impl BridgeApp {
    /// Run the application with CLI argument parsing
    pub async fn run() -> Result<()> {
        dotenvy::dotenv().ok();
        Self::init_logging();

        tracing::debug!("Application starting");

        let (cli_config, command) = cli::parse();
        tracing::trace!(command = ?command, "Parsed command");

        match command {
            Some(Commands::Consumers) => {
                Self::list_consumers()?;
                return Ok(());
            }
            Some(Commands::Run) | None => {}
        }

        let config = AppConfig::load(&cli_config)?;
        Self::export_sample(&config).await?;
        Ok(())
    }

    /// Translate a generated batch and export it through the configured
    /// consumer. Returns the number of spans exported.
    pub async fn export_sample(config: &AppConfig) -> Result<usize> {
        let consumers = consumer_factory(&config.exporter.kind)?;
        let factory = Factory::new(consumers, None);
        let exporter = factory
            .span_exporter(config.exporter.config.clone())
            .context("Failed to create span exporter")?;

        let spans = sample_spans(&config.sample, SystemTime::now());
        exporter
            .export_spans(&spans)
            .await
            .context("Failed to export sample batch")?;
        exporter
            .shutdown()
            .await
            .context("Failed to shut down span exporter")?;

        tracing::info!(
            app = APP_NAME,
            exporter = %config.exporter.kind,
            spans = spans.len(),
            "Sample batch exported"
        );
        Ok(spans.len())
    }

    fn list_consumers() -> Result<()> {
        for kind in CONSUMER_KINDS {
            let factory = consumer_factory(kind)?;
            println!("{:<10} {}", kind, factory.default_config());
        }
        Ok(())
    }

    fn init_logging() {
        let default_filter = format!("info,{}=info", APP_NAME_LOWER);

        let filter = std::env::var(ENV_LOG)
            .or_else(|_| std::env::var("RUST_LOG"))
            .unwrap_or(default_filter);

        tracing_subscriber::fmt()
            .with_target(false)
            .with_thread_ids(false)
            .with_level(true)
            .with_ansi(true)
            .compact()
            .with_env_filter(filter)
            .init();
    }
}
