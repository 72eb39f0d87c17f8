/// Rendering of tool definitions and results through the public API
use mcp_http_server::mcp::render::{render_call_result, ToolDefinition, ToolsListResult};
use mcp_http_server::*;
use serde_json::json;

fn registry() -> ToolRegistry {
    let mut registry = ToolRegistry::new();
    registry
        .register(
            "get_weather",
            "Weather for a location",
            vec![Property::required("location", PropertyType::String, "city name")],
            Schema::new(),
            |args: &ToolArguments| vec![Content::text(format!("Rain in {}", args["location"]))],
        )
        .unwrap();
    registry
        .register(
            "get_temperature",
            "Temperature readings",
            Schema::new(),
            vec![
                Property::required("celsius", PropertyType::Number, "degrees"),
                Property::optional("station", PropertyType::String, "station name"),
            ],
            |_: &ToolArguments| {
                vec![Content::object()
                    .with_property("celsius", "21.5")
                    .with_property("station", "Shibuya")]
            },
        )
        .unwrap();
    registry
}

#[test]
fn test_input_only_tool_definition() {
    let registry = registry();
    let definition = serde_json::to_value(ToolDefinition::from(registry.get("get_weather").unwrap())).unwrap();

    assert_eq!(definition["inputSchema"]["required"], json!(["location"]));
    assert!(definition.get("outputSchema").is_none());
}

#[test]
fn test_tool_without_input_schema_has_no_input_schema_key() {
    let registry = registry();
    let definition = serde_json::to_value(ToolDefinition::from(registry.get("get_temperature").unwrap())).unwrap();
    assert!(definition.get("inputSchema").is_none());
    assert_eq!(
        definition["outputSchema"]["properties"]["content"]["items"]["required"],
        json!(["celsius"])
    );
}

#[test]
fn test_list_result_follows_registration_order() {
    let registry = registry();
    let result: ToolsListResult = registry.list().collect();
    let names: Vec<&str> = result.tools.iter().map(|t| t.name.as_str()).collect();
    assert_eq!(names, vec!["get_weather", "get_temperature"]);
}

#[test]
fn test_numbers_are_unquoted() {
    let registry = registry();
    let tool = registry.get("get_temperature").unwrap();
    let result = render_call_result(tool, &tool.invoke(&ToolArguments::new())).unwrap();
    let result = serde_json::to_value(result).unwrap();

    assert_eq!(
        result["content"][0]["text"],
        "{\"celsius\": 21.5,\"station\": \"Shibuya\"}"
    );
    assert_eq!(
        result["structuredContent"]["content"][0],
        json!({"celsius": 21.5, "station": "Shibuya"})
    );
}

#[test]
fn test_empty_result_renders_empty_arrays() {
    let mut registry = ToolRegistry::new();
    registry
        .register(
            "nothing",
            "Returns nothing",
            Schema::new(),
            vec![Property::required("value", PropertyType::String, "value")],
            |_: &ToolArguments| Vec::new(),
        )
        .unwrap();

    let tool = registry.get("nothing").unwrap();
    let result = serde_json::to_value(render_call_result(tool, &[]).unwrap()).unwrap();
    assert_eq!(result, json!({"content": [], "structuredContent": {"content": []}}));
}
