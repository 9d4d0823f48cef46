// Standalone MCP server binary

use anyhow::Result;
use cariari_mcp::tools::{GetPropertiesTool, GetPropertyTool, ToolRegistry};
use cariari_mcp::{McpConfig, McpServer};
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser, Debug)]
#[command(name = "cariari-mcp")]
#[command(about = "MCP server for the Cariari Agency property listings", version)]
struct Args {
    /// Path to configuration file
    #[arg(short, long, env = "CARIARI_MCP_CONFIG", default_value = "cariari-mcp.toml")]
    config: PathBuf,

    /// Base URL of the listing API
    #[arg(long, env = "CARIARI_API_URL")]
    base_url: Option<String>,

    /// Upstream request timeout in seconds
    #[arg(long, env = "CARIARI_API_TIMEOUT_SECS")]
    timeout_secs: Option<u64>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // stdout carries the protocol, logs go to stderr
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "cariari=info".into()),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let args = Args::parse();

    tracing::info!("Cariari MCP Server starting...");

    let config = McpConfig::load(&args.config)?.with_overrides(args.base_url, args.timeout_secs);
    let client = config.build_client()?;
    tracing::info!(base_url = %client.endpoint().base(), "Using listing API");

    let mut registry = ToolRegistry::new();
    registry.register(Arc::new(GetPropertiesTool::new(client.clone())));
    registry.register(Arc::new(GetPropertyTool::new(client)));

    tracing::info!("Registered {} tools", registry.len());

    // Start MCP server
    let server = McpServer::new(registry);
    server.start().await?;

    Ok(())
}
