/// Request gateway: the HTTP-facing orchestrator of the server
///
/// For every request it picks the route, applies authorization, manages the
/// session named by the `mcp-session-id` header and drives the method
/// dispatcher. Authorization and session failures are answered here with
/// HTTP status codes and never reach the JSON-RPC layer.

pub mod http;

pub use http::*;

use axum::http::{Method, StatusCode};
use tracing::{debug, error, info, warn};

use crate::auth::{AuthorizationGate, TokenDecoder};
use crate::config::ServerConfig;
use crate::mcp::dispatcher::{
    METHOD_INITIALIZE, NOTIFICATION_CANCELLED, NOTIFICATION_INITIALIZED,
};
use crate::mcp::{DispatchContext, JsonRpcRequest, JsonRpcResponse, MethodDispatcher};
use crate::session::SessionStore;
use crate::tools::ToolRegistry;

/// Owns all server state and answers HTTP requests against it
///
/// One gateway owns one tool registry and one session store for its whole
/// lifetime. Callers serialize access; `handle` and `sweep_sessions` must
/// never run concurrently.
pub struct Gateway {
    config: ServerConfig,
    tools: ToolRegistry,
    sessions: SessionStore,
    auth: AuthorizationGate,
    dispatcher: MethodDispatcher,
}

impl Gateway {
    pub fn new(config: ServerConfig) -> Self {
        let auth = AuthorizationGate::from_config(&config);
        if auth.is_enabled() {
            info!("Authorization enabled, metadata at {}", auth.metadata_path());
        }

        Self {
            config,
            tools: ToolRegistry::new(),
            sessions: SessionStore::new(),
            auth,
            dispatcher: MethodDispatcher::new(),
        }
    }

    /// Use a different decoder for bearer tokens
    pub fn with_token_decoder(mut self, decoder: impl TokenDecoder + 'static) -> Self {
        self.auth = AuthorizationGate::from_config(&self.config).with_decoder(decoder);
        self
    }

    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    pub fn tools(&self) -> &ToolRegistry {
        &self.tools
    }

    pub fn tools_mut(&mut self) -> &mut ToolRegistry {
        &mut self.tools
    }

    pub fn sessions(&self) -> &SessionStore {
        &self.sessions
    }

    pub fn dispatcher_mut(&mut self) -> &mut MethodDispatcher {
        &mut self.dispatcher
    }

    /// Advance session expiry by one tick
    pub fn sweep_sessions(&mut self) {
        self.sessions.sweep();
    }

    /// Answer one HTTP request
    pub fn handle(&mut self, request: GatewayRequest) -> GatewayResponse {
        debug!("{} {}", request.method, request.path);

        if request.path == self.config.entry_point {
            return match request.method {
                Method::POST => self.handle_post(&request),
                Method::DELETE => self.handle_delete(&request),
                _ => GatewayResponse::empty(StatusCode::METHOD_NOT_ALLOWED),
            };
        }

        if self.auth.is_enabled() && request.path == self.auth.metadata_path() {
            return self.handle_metadata(&request);
        }

        GatewayResponse::empty(StatusCode::METHOD_NOT_ALLOWED)
    }

    /// Explicit session termination
    fn handle_delete(&mut self, request: &GatewayRequest) -> GatewayResponse {
        if let Some(session_id) = request.header(HEADER_SESSION_ID) {
            self.sessions.erase(session_id);
        }
        GatewayResponse::empty(StatusCode::OK)
    }

    fn handle_post(&mut self, request: &GatewayRequest) -> GatewayResponse {
        if let Err(e) = self.auth.authorize(request.header(HEADER_AUTHORIZATION)) {
            warn!("Unauthorized request: {}", e);
            return GatewayResponse::empty(StatusCode::UNAUTHORIZED)
                .with_header(HEADER_WWW_AUTHENTICATE, self.auth.challenge());
        }

        let rpc: JsonRpcRequest = match serde_json::from_slice(&request.body) {
            Ok(rpc) => rpc,
            Err(e) => {
                warn!("Failed to parse JSON-RPC request: {}", e);
                return GatewayResponse::empty(StatusCode::BAD_REQUEST);
            }
        };

        let method = match rpc.method.as_deref() {
            Some(method) => method,
            None => {
                warn!("JSON-RPC request without a method");
                return GatewayResponse::empty(StatusCode::BAD_REQUEST);
            }
        };

        let session_id = if method == METHOD_INITIALIZE {
            self.sessions.create()
        } else {
            match request.header(HEADER_SESSION_ID) {
                Some(id) if self.sessions.is_valid(id) => {
                    self.sessions.touch(id);
                    id.to_string()
                }
                other => {
                    warn!("Rejected '{}' for unknown session {:?}", method, other);
                    return GatewayResponse::empty(StatusCode::BAD_REQUEST);
                }
            }
        };

        if method == NOTIFICATION_INITIALIZED || method == NOTIFICATION_CANCELLED {
            debug!("Notification '{}' on session {}", method, session_id);
            return GatewayResponse::empty(StatusCode::ACCEPTED)
                .with_header(HEADER_SESSION_ID, session_id);
        }

        let context = DispatchContext {
            tools: &self.tools,
            server_name: &self.config.server_name,
            require_arguments: self.config.require_arguments,
        };

        match self.dispatcher.dispatch(&context, &rpc) {
            Ok(Some(response)) => match event_stream_message(&response) {
                Ok(body) => GatewayResponse::empty(StatusCode::OK)
                    .with_header(HEADER_CONTENT_TYPE, "text/event-stream")
                    .with_header(HEADER_SESSION_ID, session_id)
                    .with_body(body),
                Err(e) => {
                    error!("Failed to serialize response to '{}': {}", method, e);
                    GatewayResponse::internal_error()
                }
            },
            Ok(None) => GatewayResponse::empty(StatusCode::ACCEPTED)
                .with_header(HEADER_SESSION_ID, session_id),
            Err(e) => {
                error!("Failed to build result of '{}': {}", method, e);
                GatewayResponse::internal_error()
            }
        }
    }

    /// Protected-resource metadata document and its CORS preflight
    fn handle_metadata(&self, request: &GatewayRequest) -> GatewayResponse {
        match request.method {
            Method::GET => match serde_json::to_string(&self.auth.metadata()) {
                Ok(body) => GatewayResponse::empty(StatusCode::OK)
                    .with_header("access-control-allow-origin", "*")
                    .with_header(HEADER_CONTENT_TYPE, "application/json")
                    .with_body(body),
                Err(e) => {
                    error!("Failed to serialize resource metadata: {}", e);
                    GatewayResponse::internal_error()
                }
            },
            Method::OPTIONS => GatewayResponse::empty(StatusCode::NO_CONTENT)
                .with_header("access-control-allow-origin", "*")
                .with_header("access-control-allow-methods", "GET")
                .with_header("access-control-allow-headers", "mcp-protocol-version"),
            _ => GatewayResponse::empty(StatusCode::METHOD_NOT_ALLOWED),
        }
    }
}

/// Frame a JSON-RPC response as a single server-sent event
pub fn event_stream_message(response: &JsonRpcResponse) -> Result<String, serde_json::Error> {
    Ok(format!("event: message\ndata: {}\n\n", serde_json::to_string(response)?))
}
