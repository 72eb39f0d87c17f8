/// Shared fixtures for the integration tests
use axum::http::Method;
use mcp_http_server::*;
use serde_json::{json, Value};

pub const URL: &str = "https://localhost:8000/mcp";

/// Configuration with authorization disabled
pub fn config() -> ServerConfig {
    ServerConfig::new("MCP Test", URL).expect("valid URL")
}

/// Register the TV channel tools used across the tests
pub fn register_tools(gateway: &mut Gateway) {
    gateway
        .tools_mut()
        .register(
            "get_channels",
            "Returns a list of available TV channels.",
            vec![Property::required("location", PropertyType::String, "location of TV")],
            vec![
                Property::required("channel_no", PropertyType::String, "channel no"),
                Property::required("service_name", PropertyType::String, "service name"),
            ],
            |_: &ToolArguments| {
                vec![
                    Content::object()
                        .with_property("channel_no", "011")
                        .with_property("service_name", "NHK G"),
                    Content::object()
                        .with_property("channel_no", "021")
                        .with_property("service_name", "ETV"),
                ]
            },
        )
        .expect("register get_channels");

    gateway
        .tools_mut()
        .register(
            "get_location",
            "Returns where the TV is installed.",
            vec![Property::required("location", PropertyType::String, "location of TV")],
            Schema::new(),
            |args: &ToolArguments| vec![Content::text(format!("TV is in the {}", args["location"]))],
        )
        .expect("register get_location");
}

pub fn gateway() -> Gateway {
    let mut gateway = Gateway::new(config());
    register_tools(&mut gateway);
    gateway
}

pub fn post(body: Value, session_id: Option<&str>) -> GatewayRequest {
    let request = GatewayRequest::new(Method::POST, "/mcp")
        .with_header("content-type", "application/json")
        .with_body(body.to_string());
    match session_id {
        Some(id) => request.with_header("mcp-session-id", id),
        None => request,
    }
}

/// Run `initialize` and return the new session id
pub fn initialize(gateway: &mut Gateway) -> String {
    let response = gateway.handle(post(
        json!({"jsonrpc": "2.0", "id": 0, "method": "initialize", "params": {}}),
        None,
    ));
    assert_eq!(response.status.as_u16(), 200);
    response
        .header("mcp-session-id")
        .expect("session header")
        .to_string()
}

/// Decode the JSON-RPC message carried by an event-stream body
pub fn event_payload(response: &GatewayResponse) -> Value {
    assert_eq!(response.header("content-type"), Some("text/event-stream"));
    let data = response
        .body
        .strip_prefix("event: message\ndata: ")
        .and_then(|rest| rest.strip_suffix("\n\n"))
        .expect("single event-stream message");
    serde_json::from_str(data).expect("JSON payload")
}

/// Send a method call on an existing session and decode the reply
pub fn call(gateway: &mut Gateway, session_id: &str, id: u64, method: &str, params: Value) -> Value {
    let response = gateway.handle(post(
        json!({"jsonrpc": "2.0", "id": id, "method": method, "params": params}),
        Some(session_id),
    ));
    assert_eq!(response.status.as_u16(), 200, "unexpected status for {}", method);
    assert_eq!(response.header("mcp-session-id"), Some(session_id));
    event_payload(&response)
}
