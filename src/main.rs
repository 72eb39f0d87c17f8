/// Main entry point for the MCP HTTP server
///
/// This file sets up logging, parses command line arguments, and starts the
/// server. Tools are registered by applications embedding the library; the
/// binary serves the protocol endpoints for the configured URL.

use clap::Parser;
use tracing::{info, warn};

use mcp_http_server::config::{parse_list_literal, DEFAULT_SESSION_TIMEOUT_MS};
use mcp_http_server::{McpHttpServer, ServerConfig};

/// Command line arguments for the MCP HTTP server
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Server name reported to clients
    #[arg(long, default_value = "MCP Server")]
    name: String,

    /// Full URL of the MCP endpoint (scheme://host[:port]/path)
    #[arg(long, default_value = "http://localhost:8000/mcp")]
    url: String,

    /// Session sweep interval in milliseconds
    #[arg(long, default_value_t = DEFAULT_SESSION_TIMEOUT_MS)]
    session_timeout_ms: u64,

    /// Authorization servers as JSON string literals, e.g. '"https://tenant.auth0.com"'
    #[arg(long, default_value = "")]
    authorization_servers: String,

    /// Supported scopes as JSON string literals, e.g. '"tools:read"'
    #[arg(long, default_value = "")]
    scopes_supported: String,

    /// Reject tool calls missing a required argument
    #[arg(long)]
    require_arguments: bool,

    /// Address to listen on (defaults to the URL's host and port)
    #[arg(long)]
    bind: Option<String>,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,

    /// Enable verbose output (implies debug)
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // Set up logging based on command line flags
    let log_level = if args.verbose {
        "debug"
    } else if args.debug {
        "info"
    } else {
        "warn"
    };

    tracing_subscriber::fmt()
        .with_env_filter(format!("mcp_http_server={}", log_level))
        .with_writer(std::io::stderr)
        .init();

    info!("Starting MCP HTTP server");

    let authorization_servers = parse_list_literal("authorization_servers", &args.authorization_servers)?;
    let scopes_supported = parse_list_literal("scopes_supported", &args.scopes_supported)?;

    let config = ServerConfig::new(args.name, args.url)?
        .with_session_timeout_ms(args.session_timeout_ms)?
        .with_authorization(authorization_servers, scopes_supported)
        .with_required_arguments(args.require_arguments);

    if !config.authorization_enabled()
        && (!config.authorization_servers.is_empty() || !config.scopes_supported.is_empty())
    {
        warn!("Authorization needs both --authorization-servers and --scopes-supported; running without it");
    }

    let bind = args.bind.unwrap_or_else(|| config.authority());
    info!("Serving {} on {}", config.url, bind);

    let server = McpHttpServer::new(config);
    server.run(&bind).await?;

    info!("MCP HTTP server shutdown complete");
    Ok(())
}
