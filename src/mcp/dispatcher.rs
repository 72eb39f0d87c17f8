/// JSON-RPC method dispatch
///
/// Methods are routed through a table from method name to handler. Handlers
/// receive the server state they need through a `DispatchContext` rather
/// than owning it, so the table can be built once and shared.

use std::collections::HashMap;
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::mcp::protocol::*;
use crate::mcp::render::{render_call_result, ToolsListResult};
use crate::tools::{ToolArguments, ToolRegistry};

pub const METHOD_INITIALIZE: &str = "initialize";
pub const METHOD_LOGGING_SET_LEVEL: &str = "logging/setLevel";
pub const METHOD_TOOLS_LIST: &str = "tools/list";
pub const METHOD_TOOLS_CALL: &str = "tools/call";
pub const NOTIFICATION_INITIALIZED: &str = "notifications/initialized";
pub const NOTIFICATION_CANCELLED: &str = "notifications/cancelled";

/// Message of the error returned for calls to unregistered tools
pub const UNKNOWN_TOOL_MESSAGE: &str = "Unknown tool: invalid_tool_name";

/// Server state visible to method handlers
pub struct DispatchContext<'a> {
    pub tools: &'a ToolRegistry,
    pub server_name: &'a str,
    /// Reject tool calls that omit a required argument
    pub require_arguments: bool,
}

/// Ways a method handler can fail
#[derive(Error, Debug)]
pub enum MethodError {
    /// Reported to the client as a JSON-RPC error object
    #[error("{}", .0.message)]
    Rpc(JsonRpcError),

    /// Failure to build the result; the request fails as a whole
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<JsonRpcError> for MethodError {
    fn from(error: JsonRpcError) -> Self {
        MethodError::Rpc(error)
    }
}

/// Handler for one JSON-RPC method
pub type MethodHandler = fn(&DispatchContext<'_>, Option<&Value>) -> Result<Value, MethodError>;

/// Routes requests to the handler registered for their method
pub struct MethodDispatcher {
    handlers: HashMap<&'static str, MethodHandler>,
}

impl Default for MethodDispatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl MethodDispatcher {
    /// Create a dispatcher answering the standard MCP methods
    pub fn new() -> Self {
        let mut dispatcher = Self {
            handlers: HashMap::new(),
        };
        dispatcher.register(METHOD_INITIALIZE, handle_initialize);
        dispatcher.register(METHOD_LOGGING_SET_LEVEL, handle_logging_set_level);
        dispatcher.register(METHOD_TOOLS_LIST, handle_tools_list);
        dispatcher.register(METHOD_TOOLS_CALL, handle_tools_call);
        dispatcher
    }

    /// Add or replace the handler for a method
    pub fn register(&mut self, method: &'static str, handler: MethodHandler) {
        self.handlers.insert(method, handler);
    }

    pub fn handles(&self, method: &str) -> bool {
        self.handlers.contains_key(method)
    }

    /// Handle a JSON-RPC request
    ///
    /// Returns `Ok(None)` for a successful request that carried no id, since
    /// there is nothing to correlate a reply with. Error replies are always
    /// produced. `Err` means the result could not be serialized.
    pub fn dispatch(
        &self,
        context: &DispatchContext<'_>,
        request: &JsonRpcRequest,
    ) -> Result<Option<JsonRpcResponse>, serde_json::Error> {
        let method = request.method.as_deref().unwrap_or_default();

        let outcome = match self.handlers.get(method) {
            Some(handler) => handler(context, request.params.as_ref()),
            None => {
                warn!("Method '{}' not found", method);
                Err(rpc_error(ErrorCode::MethodNotFound, "Method not found").into())
            }
        };

        match outcome {
            Ok(result) => Ok(request
                .id
                .clone()
                .map(|id| JsonRpcResponse::success(Some(id), result))),
            Err(MethodError::Rpc(error)) => Ok(Some(JsonRpcResponse::error(request.id.clone(), error))),
            Err(MethodError::Json(e)) => Err(e),
        }
    }
}

/// Handle MCP initialization request
fn handle_initialize(context: &DispatchContext<'_>, _params: Option<&Value>) -> Result<Value, MethodError> {
    info!("MCP client initialized a session");
    Ok(serde_json::to_value(InitializeResult::new(context.server_name))?)
}

/// Accept any log level; the server does not forward logs to clients
fn handle_logging_set_level(_context: &DispatchContext<'_>, params: Option<&Value>) -> Result<Value, MethodError> {
    if let Some(level) = params.and_then(|p| p.get("level")).and_then(|l| l.as_str()) {
        debug!("Client requested log level '{}'", level);
    }
    Ok(Value::Object(serde_json::Map::new()))
}

/// Handle tools/list request
fn handle_tools_list(context: &DispatchContext<'_>, _params: Option<&Value>) -> Result<Value, MethodError> {
    let result: ToolsListResult = context.tools.list().collect();
    Ok(serde_json::to_value(result)?)
}

/// Handle tools/call request
fn handle_tools_call(context: &DispatchContext<'_>, params: Option<&Value>) -> Result<Value, MethodError> {
    let params: ToolCallParams = match params {
        Some(params) => serde_json::from_value(params.clone()).map_err(|e| {
            rpc_error(ErrorCode::InvalidParams, format!("Invalid parameters: {}", e))
        })?,
        None => ToolCallParams::default(),
    };

    let tool = match context.tools.get(&params.name) {
        Some(tool) => tool,
        None => {
            warn!("Call to unknown tool '{}'", params.name);
            return Err(rpc_error(ErrorCode::InvalidParams, UNKNOWN_TOOL_MESSAGE).into());
        }
    };

    let mut arguments = ToolArguments::new();
    for property in &tool.input_schema {
        let supplied = params.arguments.get(&property.name).filter(|v| !v.is_null());
        if supplied.is_none() && property.required && context.require_arguments {
            return Err(rpc_error(
                ErrorCode::InvalidParams,
                format!("Missing required argument: {}", property.name),
            )
            .into());
        }
        arguments.insert(property.name.clone(), argument_text(supplied));
    }

    info!("Calling tool '{}' with {} argument(s)", tool.name, arguments.len());
    let contents = tool.invoke(&arguments);
    debug!("Tool '{}' returned {} content item(s)", tool.name, contents.len());

    let result = render_call_result(tool, &contents)?;
    Ok(serde_json::to_value(result)?)
}

/// Textual form of an argument value
///
/// Strings pass through unchanged, other JSON values keep their JSON text,
/// and missing values become empty strings.
fn argument_text(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Null) | None => String::new(),
        Some(other) => other.to_string(),
    }
}
