/// Public library interface for the MCP HTTP server
///
/// This module exports the server, its configuration, and the types needed
/// to register tools and embed the request gateway in other applications.

use thiserror::Error;

// Internal modules
pub mod auth;
pub mod config;
pub mod domain;
pub mod gateway;
pub mod mcp;
pub mod session;
pub mod tools;
pub mod transport;

// Re-export public modules and types
pub use auth::{AuthError, JwtPayloadDecoder, TokenDecoder};
pub use config::{ConfigError, ServerConfig};
pub use domain::*;
pub use gateway::{Gateway, GatewayRequest, GatewayResponse};
pub use session::SessionStore;
pub use tools::{RegistryError, Tool, ToolArguments, ToolRegistry};

/// Errors that can occur during server operation
#[derive(Error, Debug)]
pub enum ServerError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Tool registration error: {0}")]
    Registry(#[from] RegistryError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// MCP server exposing registered tools over HTTP
///
/// Register tools first, then call `run` to start serving. Tools cannot be
/// added once the server is running.
pub struct McpHttpServer {
    gateway: Gateway,
}

impl McpHttpServer {
    /// Create a server for the given configuration
    pub fn new(config: ServerConfig) -> Self {
        tracing::info!(
            "Initializing MCP server '{}' at {}",
            config.server_name,
            config.url
        );

        Self {
            gateway: Gateway::new(config),
        }
    }

    /// Use a custom bearer token decoder, e.g. one that verifies signatures
    pub fn with_token_decoder(mut self, decoder: impl TokenDecoder + 'static) -> Self {
        self.gateway = self.gateway.with_token_decoder(decoder);
        self
    }

    /// Register a tool; see `ToolRegistry::register`
    pub fn add_tool<F>(
        &mut self,
        name: impl Into<String>,
        description: impl Into<String>,
        input_schema: impl Into<Schema>,
        output_schema: impl Into<Schema>,
        callback: F,
    ) -> Result<(), ServerError>
    where
        F: Fn(&ToolArguments) -> Vec<Content> + Send + Sync + 'static,
    {
        self.gateway
            .tools_mut()
            .register(name, description, input_schema, output_schema, callback)?;
        Ok(())
    }

    /// Serve requests on `bind` (a `host:port` address) until interrupted
    pub async fn run(self, bind: &str) -> Result<(), ServerError> {
        tracing::info!(
            "Starting MCP server with {} registered tool(s)...",
            self.gateway.tools().len()
        );
        transport::serve(self.gateway, bind).await
    }

    /// Get a reference to the gateway (useful for testing)
    pub fn gateway(&self) -> &Gateway {
        &self.gateway
    }

    /// Get a mutable reference to the gateway, e.g. to answer requests
    /// without a listener
    pub fn gateway_mut(&mut self) -> &mut Gateway {
        &mut self.gateway
    }
}
