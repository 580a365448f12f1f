use clap::{Parser, Subcommand};

use std::path::PathBuf;

use crate::exporter::CONSUMER_KINDS;

use super::constants::{
    ENV_CONFIG, ENV_EXPORTER, ENV_OUTPUT, ENV_SAMPLE_SERVICES, ENV_SAMPLE_SPANS,
};

#[derive(Parser)]
#[command(name = "spanbridge")]
#[command(
    version,
    about = "OpenTelemetry SDK to collector pdata translator",
    long_about = None
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Path to config file
    #[arg(long, short = 'c', global = true, env = ENV_CONFIG)]
    pub config: Option<PathBuf>,

    /// Consumer receiving translated batches (logging, file, memory)
    #[arg(long, short = 'e', global = true, env = ENV_EXPORTER, value_parser = parse_consumer_kind)]
    pub exporter: Option<String>,

    /// Output path for the file consumer
    #[arg(long, short = 'o', global = true, env = ENV_OUTPUT)]
    pub output: Option<PathBuf>,

    /// Number of services in the sample batch
    #[arg(long, global = true, env = ENV_SAMPLE_SERVICES)]
    pub services: Option<usize>,

    /// Spans per service in the sample batch
    #[arg(long, global = true, env = ENV_SAMPLE_SPANS)]
    pub spans: Option<usize>,
}

/// Parse consumer kind from CLI/env string
fn parse_consumer_kind(s: &str) -> Result<String, String> {
    let kind = s.to_lowercase();
    if CONSUMER_KINDS.contains(&kind.as_str()) {
        Ok(kind)
    } else {
        Err(format!(
            "Invalid consumer '{}'. Valid options: {}",
            s,
            CONSUMER_KINDS.join(", ")
        ))
    }
}

#[derive(Subcommand, Clone, Debug)]
pub enum Commands {
    /// Translate and export a generated sample batch (default command)
    Run,
    /// List built-in consumer kinds
    Consumers,
}

/// Configuration derived from CLI arguments
#[derive(Debug, Clone, Default)]
pub struct CliConfig {
    pub config: Option<PathBuf>,
    pub exporter: Option<String>,
    pub output: Option<PathBuf>,
    pub services: Option<usize>,
    pub spans: Option<usize>,
}

/// Parse CLI arguments and return config with command
pub fn parse() -> (CliConfig, Option<Commands>) {
    let cli = Cli::parse();
    let config = CliConfig {
        config: cli.config,
        exporter: cli.exporter,
        output: cli.output,
        services: cli.services,
        spans: cli.spans,
    };
    (config, cli.command)
}
