/// Result units produced by tool invocations

use serde::{Deserialize, Serialize};

use super::PropertyType;

/// Named value carried by a structured content item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentProperty {
    pub name: String,
    pub value: String,
}

/// One unit of a tool's result
///
/// Tools without an output schema only use `content_type` and `value`.
/// Tools with an output schema fill `properties`, whose values are typed
/// by the matching output schema entry when rendered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Content {
    pub content_type: PropertyType,
    pub value: String,
    #[serde(default)]
    pub properties: Vec<ContentProperty>,
}

impl Content {
    pub fn new(content_type: PropertyType, value: impl Into<String>) -> Self {
        Self {
            content_type,
            value: value.into(),
            properties: Vec::new(),
        }
    }

    /// Plain string content
    pub fn text(value: impl Into<String>) -> Self {
        Self::new(PropertyType::String, value)
    }

    /// Plain numeric content, kept in its textual form
    pub fn number(value: impl Into<String>) -> Self {
        Self::new(PropertyType::Number, value)
    }

    /// Empty structured content, to be filled with `with_property`
    pub fn object() -> Self {
        Self::new(PropertyType::Object, "")
    }

    /// Append a named property value
    pub fn with_property(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.properties.push(ContentProperty {
            name: name.into(),
            value: value.into(),
        });
        self
    }
}
