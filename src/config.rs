/// Server configuration
///
/// Built from command line arguments by the binary, or directly by
/// applications embedding the server.

use std::time::Duration;
use thiserror::Error;

/// Default tick interval of the session sweep (10 minutes)
pub const DEFAULT_SESSION_TIMEOUT_MS: u64 = 10 * 60 * 1000;

/// Errors that can occur while building a configuration
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid server URL '{0}': expected scheme://host[:port]/path")]
    InvalidUrl(String),

    #[error("Invalid {field} list: {reason}")]
    InvalidList { field: &'static str, reason: String },

    #[error("Session timeout must be greater than zero")]
    ZeroSessionTimeout,
}

/// Everything a server instance needs to know before it starts serving
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Display name reported in `serverInfo`
    pub server_name: String,
    /// Full base URL, also the expected token audience
    pub url: String,
    /// Scheme and authority part of `url`
    pub host: String,
    /// Path part of `url`, the MCP endpoint
    pub entry_point: String,
    /// Interval between session sweep ticks
    pub session_timeout_ms: u64,
    pub authorization_servers: Vec<String>,
    pub scopes_supported: Vec<String>,
    /// Reject `tools/call` requests missing a required argument
    pub require_arguments: bool,
}

impl ServerConfig {
    /// Create a configuration with authorization disabled and the
    /// default session timeout
    pub fn new(server_name: impl Into<String>, url: impl Into<String>) -> Result<Self, ConfigError> {
        let url = url.into();
        let (host, entry_point) = split_url(&url)?;

        Ok(Self {
            server_name: server_name.into(),
            url,
            host,
            entry_point,
            session_timeout_ms: DEFAULT_SESSION_TIMEOUT_MS,
            authorization_servers: Vec::new(),
            scopes_supported: Vec::new(),
            require_arguments: false,
        })
    }

    pub fn with_session_timeout_ms(mut self, session_timeout_ms: u64) -> Result<Self, ConfigError> {
        if session_timeout_ms == 0 {
            return Err(ConfigError::ZeroSessionTimeout);
        }
        self.session_timeout_ms = session_timeout_ms;
        Ok(self)
    }

    pub fn with_authorization(
        mut self,
        authorization_servers: Vec<String>,
        scopes_supported: Vec<String>,
    ) -> Self {
        self.authorization_servers = authorization_servers;
        self.scopes_supported = scopes_supported;
        self
    }

    pub fn with_required_arguments(mut self, require_arguments: bool) -> Self {
        self.require_arguments = require_arguments;
        self
    }

    /// Authorization is enforced only when both lists are configured
    pub fn authorization_enabled(&self) -> bool {
        !self.authorization_servers.is_empty() && !self.scopes_supported.is_empty()
    }

    pub fn session_timeout(&self) -> Duration {
        Duration::from_millis(self.session_timeout_ms)
    }

    /// `host:port` to listen on, derived from the URL
    ///
    /// The scheme's default port is used when the URL names none.
    pub fn authority(&self) -> String {
        let (scheme, authority) = match self.host.split_once("://") {
            Some(parts) => parts,
            None => ("", self.host.as_str()),
        };

        let has_port = match authority.rsplit_once(':') {
            // IPv6 literals contain colons inside brackets
            Some((_, port)) => !port.contains(']'),
            None => false,
        };
        if has_port {
            return authority.to_string();
        }

        let port = if scheme.eq_ignore_ascii_case("https") { 443 } else { 80 };
        format!("{}:{}", authority, port)
    }
}

/// Split a full URL into its host (scheme and authority) and path
///
/// A URL without a path gets `/` as its entry point.
pub fn split_url(url: &str) -> Result<(String, String), ConfigError> {
    let scheme_end = url
        .find("://")
        .ok_or_else(|| ConfigError::InvalidUrl(url.to_string()))?;
    let rest = &url[scheme_end + 3..];
    if rest.is_empty() {
        return Err(ConfigError::InvalidUrl(url.to_string()));
    }

    match rest.find('/') {
        Some(path_start) => {
            let split = scheme_end + 3 + path_start;
            Ok((url[..split].to_string(), url[split..].to_string()))
        }
        None => Ok((url.to_string(), "/".to_string())),
    }
}

/// Parse a list given as JSON string literals
///
/// Accepts either a JSON array (`["a", "b"]`) or the bare array contents
/// (`"a", "b"`). A blank literal is an empty list.
pub fn parse_list_literal(field: &'static str, literal: &str) -> Result<Vec<String>, ConfigError> {
    let literal = literal.trim();
    if literal.is_empty() {
        return Ok(Vec::new());
    }

    let array = if literal.starts_with('[') {
        literal.to_string()
    } else {
        format!("[{}]", literal)
    };

    serde_json::from_str::<Vec<String>>(&array).map_err(|e| ConfigError::InvalidList {
        field,
        reason: e.to_string(),
    })
}
