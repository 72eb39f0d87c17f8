/// MCP (Model Context Protocol) message structures and JSON-RPC handling
///
/// This module defines the JSON-RPC envelope exchanged over the HTTP
/// endpoint and the result payloads of the MCP methods we answer.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

pub use jsonrpc_core::{Error as JsonRpcError, ErrorCode};

/// MCP protocol version we support
pub const MCP_VERSION: &str = "2025-03-26";

/// JSON-RPC version string carried by every message
pub const JSONRPC_VERSION: &str = "2.0";

/// JSON-RPC 2.0 request message
///
/// Every field is optional at this level so that a request missing its
/// method can still be recognised and rejected by the gateway.
#[derive(Debug, Default, Deserialize)]
pub struct JsonRpcRequest {
    /// JSON-RPC version (always "2.0")
    #[serde(default)]
    pub jsonrpc: Option<String>,
    /// Request identifier; `Some(Value::Null)` for an explicit `"id": null`
    #[serde(default, deserialize_with = "present")]
    pub id: Option<Value>,
    /// The method to call (e.g., "tools/call")
    #[serde(default)]
    pub method: Option<String>,
    /// Parameters for the method call
    #[serde(default)]
    pub params: Option<Value>,
}

/// Keeps an explicit `null` distinct from an absent field
fn present<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

/// JSON-RPC 2.0 response message
///
/// `id` is echoed from the request, and left out when the request had none.
#[derive(Debug, Serialize)]
pub struct JsonRpcResponse {
    /// JSON-RPC version (always "2.0")
    pub jsonrpc: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<Value>,
    /// Successful result (if no error occurred)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    /// Error information (if something went wrong)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<JsonRpcError>,
}

impl JsonRpcResponse {
    /// Create a successful response
    pub fn success(id: Option<Value>, result: Value) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION,
            id,
            result: Some(result),
            error: None,
        }
    }

    /// Create an error response
    pub fn error(id: Option<Value>, error: JsonRpcError) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION,
            id,
            result: None,
            error: Some(error),
        }
    }
}

/// Build a JSON-RPC error object
pub fn rpc_error(code: ErrorCode, message: impl Into<String>) -> JsonRpcError {
    JsonRpcError {
        code,
        message: message.into(),
        data: None,
    }
}

/// MCP tool call parameters
#[derive(Debug, Default, Deserialize)]
pub struct ToolCallParams {
    /// Name of the tool to call
    #[serde(default)]
    pub name: String,
    /// Arguments to pass to the tool
    #[serde(default)]
    pub arguments: Map<String, Value>,
}

/// Capability marker serialized as an empty object
#[derive(Debug, Default, Serialize)]
pub struct EmptyCapability {}

/// MCP server capabilities
#[derive(Debug, Default, Serialize)]
pub struct ServerCapabilities {
    pub logging: EmptyCapability,
    pub tools: EmptyCapability,
}

/// Information about our server
#[derive(Debug, Serialize)]
pub struct ServerInfo {
    pub name: String,
    pub version: String,
}

/// MCP initialization response
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InitializeResult {
    pub protocol_version: String,
    pub capabilities: ServerCapabilities,
    pub server_info: ServerInfo,
}

impl InitializeResult {
    pub fn new(server_name: &str) -> Self {
        Self {
            protocol_version: MCP_VERSION.to_string(),
            capabilities: ServerCapabilities::default(),
            server_info: ServerInfo {
                name: server_name.to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
        }
    }
}
