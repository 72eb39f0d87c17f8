/// Mapping of gateway responses onto axum responses
use mcp_http_server::transport;
use serde_json::json;

use super::helpers::*;

#[test]
fn test_event_stream_response_maps_to_http() {
    let mut gateway = gateway();
    let response = gateway.handle(post(
        json!({"jsonrpc": "2.0", "id": 1, "method": "initialize"}),
        None,
    ));

    let http = transport::into_response(response.clone());
    assert_eq!(http.status(), response.status);
    assert_eq!(http.headers()["content-type"], "text/event-stream");
    assert_eq!(
        http.headers()["mcp-session-id"],
        response.header("mcp-session-id").unwrap()
    );

    let body = tokio_test::block_on(axum::body::to_bytes(http.into_body(), usize::MAX)).unwrap();
    assert_eq!(&body[..], response.body.as_bytes());
}

#[test]
fn test_challenge_maps_to_http() {
    let config = config().with_authorization(
        vec!["https://tenant.us.auth0.com".to_string()],
        vec!["tools:call".to_string()],
    );
    let mut gateway = mcp_http_server::Gateway::new(config);
    let response = gateway.handle(post(json!({"jsonrpc": "2.0", "id": 1, "method": "initialize"}), None));

    let http = transport::into_response(response);
    assert_eq!(http.status().as_u16(), 401);
    assert!(http.headers()["www-authenticate"]
        .to_str()
        .unwrap()
        .starts_with("Bearer resource_metadata="));
}
