//! CLI definitions for onesignal-mcp.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// OneSignal MCP server.
#[derive(Parser)]
#[command(name = "onesignal-mcp")]
#[command(about = "Model Context Protocol server for the OneSignal REST API")]
#[command(version)]
pub(crate) struct Cli {
    /// Configuration file path (TOML). Without one, apps come from the environment.
    #[arg(short, long, global = true, env = "ONESIGNAL_MCP_CONFIG")]
    pub config: Option<PathBuf>,

    /// Dotenv file with credentials. Defaults to `.env` in the working
    /// directory when present; the process environment wins over it.
    #[arg(long, global = true, env = "ONESIGNAL_MCP_ENV_FILE")]
    pub env_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub(crate) enum Commands {
    /// Serve MCP over stdin/stdout (default)
    Serve,

    /// Print the tool definitions as JSON
    Tools,

    /// Print the resolved configuration with secrets masked
    Config,
}
