/// MCP protocol implementation
///
/// This module handles the Model Context Protocol messages: JSON-RPC
/// envelopes, method routing, and rendering of tool schemas and results.

pub mod dispatcher;
pub mod protocol;
pub mod render;

// Re-export main types
pub use dispatcher::{DispatchContext, MethodDispatcher, MethodError, MethodHandler};
pub use protocol::{JsonRpcRequest, JsonRpcResponse};
