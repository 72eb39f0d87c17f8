/// Authorization gate for the MCP endpoint

use serde::Serialize;
use tracing::debug;

use super::{AuthError, JwtPayloadDecoder, TokenDecoder};
use crate::config::ServerConfig;

/// Well-known prefix of the protected-resource metadata document
pub const METADATA_PREFIX: &str = "/.well-known/oauth-protected-resource";

const BEARER_PREFIX: &str = "Bearer ";

/// Protected-resource metadata served to clients that need a token
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProtectedResourceMetadata {
    pub resource: String,
    pub authorization_servers: Vec<String>,
    pub scopes_supported: Vec<String>,
    pub bearer_methods_supported: Vec<String>,
}

/// Checks bearer tokens against the server URL when authorization is enabled
pub struct AuthorizationGate {
    enabled: bool,
    resource: String,
    host: String,
    entry_point: String,
    authorization_servers: Vec<String>,
    scopes_supported: Vec<String>,
    decoder: Box<dyn TokenDecoder>,
}

impl AuthorizationGate {
    /// Build a gate from the server configuration, decoding tokens with
    /// `JwtPayloadDecoder`
    pub fn from_config(config: &ServerConfig) -> Self {
        Self {
            enabled: config.authorization_enabled(),
            resource: config.url.clone(),
            host: config.host.clone(),
            entry_point: config.entry_point.clone(),
            authorization_servers: config.authorization_servers.clone(),
            scopes_supported: config.scopes_supported.clone(),
            decoder: Box::new(JwtPayloadDecoder),
        }
    }

    /// Replace the token decoder
    pub fn with_decoder(mut self, decoder: impl TokenDecoder + 'static) -> Self {
        self.decoder = Box::new(decoder);
        self
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Check the value of an `Authorization` header
    ///
    /// Always succeeds when authorization is disabled.
    pub fn authorize(&self, header: Option<&str>) -> Result<(), AuthError> {
        if !self.enabled {
            return Ok(());
        }

        let header = header.ok_or(AuthError::MissingHeader)?;
        let token = header.strip_prefix(BEARER_PREFIX).ok_or(AuthError::NotBearer)?;
        let audience = self.decoder.audience(token.trim())?;

        if audience != self.resource {
            return Err(AuthError::AudienceMismatch {
                expected: self.resource.clone(),
                actual: audience,
            });
        }

        debug!("Bearer token accepted for {}", self.resource);
        Ok(())
    }

    /// Path of the metadata document for this server's entry point
    pub fn metadata_path(&self) -> String {
        format!("{}{}", METADATA_PREFIX, self.entry_point)
    }

    /// Value of the `WWW-Authenticate` header sent with 401 responses
    pub fn challenge(&self) -> String {
        format!("Bearer resource_metadata=\"{}{}\"", self.host, self.metadata_path())
    }

    pub fn metadata(&self) -> ProtectedResourceMetadata {
        ProtectedResourceMetadata {
            resource: self.resource.clone(),
            authorization_servers: self.authorization_servers.clone(),
            scopes_supported: self.scopes_supported.clone(),
            bearer_methods_supported: vec!["header".to_string()],
        }
    }
}
