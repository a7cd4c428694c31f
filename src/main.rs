//! onesignal-mcp
//!
//! Exposes the OneSignal REST API as MCP tools over stdio.

mod cli;
mod register;

use std::io::IsTerminal;
use std::path::PathBuf;

use clap::Parser;
use tracing::{info, warn};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use onesignal_config::{Config, ConfigLoader, ConfigValidator, LoggingConfig};
use onesignal_mcp_server::{McpServer, ServerInfo, serve_stdio};

use crate::cli::{Cli, Commands};
use crate::register::build_registries;

fn default_log_dir() -> PathBuf {
    dirs::home_dir()
        .map(|h| h.join(".onesignal-mcp"))
        .unwrap_or_else(|| PathBuf::from(".onesignal-mcp"))
        .join("logs")
}

/// Initialize tracing. stdout carries protocol traffic only, so the console
/// layer writes to stderr.
fn init_tracing(logging: &LoggingConfig) -> Result<(), Box<dyn std::error::Error>> {
    let file_layer = if logging.file {
        let log_dir = logging
            .dir
            .as_deref()
            .map(|dir| PathBuf::from(ConfigLoader::expand_path(dir)))
            .unwrap_or_else(default_log_dir);
        std::fs::create_dir_all(&log_dir)?;

        let file_appender = RollingFileAppender::builder()
            .rotation(Rotation::DAILY)
            .filename_prefix("onesignal-mcp")
            .filename_suffix("log")
            .max_log_files(14)
            .build(&log_dir)?;
        let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

        // Dropping the guard stops the background writer.
        static GUARD: std::sync::OnceLock<tracing_appender::non_blocking::WorkerGuard> =
            std::sync::OnceLock::new();
        let _ = GUARD.set(guard);

        Some(fmt::layer().with_writer(non_blocking).with_ansi(false))
    } else {
        None
    };

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true)
                .with_ansi(std::io::stderr().is_terminal()),
        )
        .with(file_layer)
        .init();

    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = ConfigLoader::resolve(cli.config.as_deref(), cli.env_file.as_deref())?;

    init_tracing(&config.logging)?;
    // Loading ran before the subscriber existed.
    for warning in ConfigValidator::validate(&config).warnings {
        warn!("{}: {}", warning.path, warning.message);
    }

    match cli.command.unwrap_or(Commands::Serve) {
        Commands::Serve => run_server(&config).await,
        Commands::Tools => print_tools(&config).await,
        Commands::Config => {
            println!("{}", serde_json::to_string_pretty(&config.redacted())?);
            Ok(())
        }
    }
}

async fn run_server(config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    info!("Starting onesignal-mcp v{}", env!("CARGO_PKG_VERSION"));
    info!(api_url = %config.api_url, org_api_key = config.has_org_api_key(), "Configuration loaded");

    let registries = build_registries(config).await?;
    let server = McpServer::new(
        ServerInfo::new("onesignal-mcp", env!("CARGO_PKG_VERSION")),
        registries.tools,
        registries.resources,
    );

    serve_stdio(&server).await?;
    info!("Shutting down");
    Ok(())
}

async fn print_tools(config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let registries = build_registries(config).await?;
    let tools: Vec<serde_json::Value> = registries
        .tools
        .list()
        .iter()
        .map(|definition| definition.to_mcp_tool())
        .collect();
    println!("{}", serde_json::to_string_pretty(&tools)?);
    Ok(())
}
