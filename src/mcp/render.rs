/// Rendering of tool schemas and tool results into MCP result shapes
///
/// JSON is produced through serde from typed structures so that the nested
/// text rendering of structured content gets its escaping from the
/// serializer rather than by hand.

use std::collections::BTreeMap;
use std::io;

use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::domain::{Content, PropertyType, Schema};
use crate::tools::Tool;

/// JSON schema of a single property
#[derive(Debug, Serialize)]
pub struct PropertySchema {
    #[serde(rename = "type")]
    pub schema_type: &'static str,
    pub description: String,
}

/// JSON schema of an object built from a tool schema
#[derive(Debug, Serialize)]
pub struct ObjectSchema {
    #[serde(rename = "type")]
    pub schema_type: &'static str,
    pub properties: BTreeMap<String, PropertySchema>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub required: Vec<String>,
}

impl From<&Schema> for ObjectSchema {
    fn from(schema: &Schema) -> Self {
        let properties = schema
            .iter()
            .map(|p| {
                (
                    p.name.clone(),
                    PropertySchema {
                        schema_type: p.property_type.schema_name(),
                        description: p.description.clone(),
                    },
                )
            })
            .collect();

        Self {
            schema_type: "object",
            properties,
            required: schema.required_names(),
        }
    }
}

/// Array of objects, used for the `content` member of output schemas
#[derive(Debug, Serialize)]
pub struct ArraySchema {
    #[serde(rename = "type")]
    pub schema_type: &'static str,
    pub items: ObjectSchema,
}

#[derive(Debug, Serialize)]
pub struct OutputProperties {
    pub content: ArraySchema,
}

/// Output schema: an object whose required `content` is an array of
/// objects shaped like the tool's output properties
#[derive(Debug, Serialize)]
pub struct OutputSchema {
    #[serde(rename = "type")]
    pub schema_type: &'static str,
    pub properties: OutputProperties,
    pub required: Vec<&'static str>,
}

impl From<&Schema> for OutputSchema {
    fn from(schema: &Schema) -> Self {
        Self {
            schema_type: "object",
            properties: OutputProperties {
                content: ArraySchema {
                    schema_type: "array",
                    items: ObjectSchema::from(schema),
                },
            },
            required: vec!["content"],
        }
    }
}

/// MCP tool definition as listed by `tools/list`
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolDefinition {
    pub name: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub input_schema: Option<ObjectSchema>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_schema: Option<OutputSchema>,
}

impl From<&Tool> for ToolDefinition {
    fn from(tool: &Tool) -> Self {
        Self {
            name: tool.name.clone(),
            description: tool.description.clone(),
            input_schema: (!tool.input_schema.is_empty()).then(|| ObjectSchema::from(&tool.input_schema)),
            output_schema: (!tool.output_schema.is_empty()).then(|| OutputSchema::from(&tool.output_schema)),
        }
    }
}

/// Result of `tools/list`
#[derive(Debug, Serialize)]
pub struct ToolsListResult {
    pub tools: Vec<ToolDefinition>,
}

impl<'a> FromIterator<&'a Tool> for ToolsListResult {
    fn from_iter<I: IntoIterator<Item = &'a Tool>>(iter: I) -> Self {
        Self {
            tools: iter.into_iter().map(ToolDefinition::from).collect(),
        }
    }
}

/// Content returned by a tool
#[derive(Debug, Serialize)]
pub struct ToolContent {
    /// Type of content
    #[serde(rename = "type")]
    pub content_type: String,
    /// The actual content/result
    pub text: String,
}

/// One structured content object, members kept in the order the tool
/// produced them
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StructuredObject(pub Vec<(String, Value)>);

impl Serialize for StructuredObject {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (name, value) in &self.0 {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

#[derive(Debug, Serialize)]
pub struct StructuredContent {
    pub content: Vec<StructuredObject>,
}

/// MCP tool call result
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolCallResult {
    pub content: Vec<ToolContent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub structured_content: Option<StructuredContent>,
}

/// Compact JSON with a space after each key separator
struct SpacedFormatter;

impl serde_json::ser::Formatter for SpacedFormatter {
    fn begin_object_value<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        writer.write_all(b": ")
    }
}

/// Render an object as the text of a `text` content item
fn object_text(object: &StructuredObject) -> Result<String, serde_json::Error> {
    let mut buf = Vec::new();
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, SpacedFormatter);
    object.serialize(&mut serializer)?;
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

/// Type a property value according to the output schema
fn typed_value(property_type: PropertyType, name: &str, raw: &str) -> Value {
    match property_type {
        PropertyType::Number => match raw.trim().parse::<serde_json::Number>() {
            Ok(number) => Value::Number(number),
            Err(_) => {
                warn!("Property '{}' is declared as a number but holds '{}'", name, raw);
                Value::Null
            }
        },
        PropertyType::String => Value::String(raw.to_string()),
        PropertyType::Object => {
            serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()))
        }
    }
}

/// Build the structured object for one content item
///
/// Properties the output schema does not declare are dropped.
pub fn structured_object(output_schema: &Schema, content: &Content) -> StructuredObject {
    let members = content
        .properties
        .iter()
        .filter_map(|property| match output_schema.get(&property.name) {
            Some(declared) => Some((
                property.name.clone(),
                typed_value(declared.property_type, &property.name, &property.value),
            )),
            None => {
                debug!("Dropping undeclared output property '{}'", property.name);
                None
            }
        })
        .collect();

    StructuredObject(members)
}

/// Render the result of a tool invocation
///
/// Tools without an output schema get one text item per content, typed by
/// the content's own type tag. Tools with an output schema get both a text
/// rendering of each structured object and the objects themselves under
/// `structuredContent`.
pub fn render_call_result(tool: &Tool, contents: &[Content]) -> Result<ToolCallResult, serde_json::Error> {
    if !tool.has_output_schema() {
        let content = contents
            .iter()
            .map(|c| ToolContent {
                content_type: c.content_type.schema_name().to_string(),
                text: c.value.clone(),
            })
            .collect();

        return Ok(ToolCallResult {
            content,
            structured_content: None,
        });
    }

    let objects: Vec<StructuredObject> = contents
        .iter()
        .map(|c| structured_object(&tool.output_schema, c))
        .collect();

    let content = objects
        .iter()
        .map(|object| {
            Ok(ToolContent {
                content_type: "text".to_string(),
                text: object_text(object)?,
            })
        })
        .collect::<Result<Vec<_>, serde_json::Error>>()?;

    Ok(ToolCallResult {
        content,
        structured_content: Some(StructuredContent { content: objects }),
    })
}
