/// Property and schema types describing a tool's arguments and results
///
/// A schema is a mapping from property name to property. Names are unique
/// within a schema and iteration follows name order, which is also the
/// order properties appear in generated JSON.

use serde::{Deserialize, Serialize};
use std::collections::btree_map;
use std::collections::BTreeMap;

/// Type tag of a property or content item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PropertyType {
    Number,
    String,
    Object,
}

impl PropertyType {
    /// Name used for this type in JSON schemas
    ///
    /// Only numbers and strings have a schema name; anything else is
    /// rendered as `"unknown"`.
    pub fn schema_name(&self) -> &'static str {
        match self {
            PropertyType::Number => "number",
            PropertyType::String => "string",
            _ => "unknown",
        }
    }
}

/// One named field in a tool's input or output schema
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Property {
    pub name: String,
    pub property_type: PropertyType,
    pub description: String,
    pub required: bool,
}

impl Property {
    pub fn new(
        name: impl Into<String>,
        property_type: PropertyType,
        description: impl Into<String>,
        required: bool,
    ) -> Self {
        Self {
            name: name.into(),
            property_type,
            description: description.into(),
            required,
        }
    }

    /// Shorthand for a property that must be present
    pub fn required(
        name: impl Into<String>,
        property_type: PropertyType,
        description: impl Into<String>,
    ) -> Self {
        Self::new(name, property_type, description, true)
    }

    /// Shorthand for a property that may be omitted
    pub fn optional(
        name: impl Into<String>,
        property_type: PropertyType,
        description: impl Into<String>,
    ) -> Self {
        Self::new(name, property_type, description, false)
    }
}

/// Set of properties keyed by name
///
/// Inserting a property whose name is already present replaces it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Schema {
    properties: BTreeMap<String, Property>,
}

impl Schema {
    /// Create an empty schema
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, property: Property) {
        self.properties.insert(property.name.clone(), property);
    }

    pub fn get(&self, name: &str) -> Option<&Property> {
        self.properties.get(name)
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }

    pub fn len(&self) -> usize {
        self.properties.len()
    }

    /// Iterate over properties in name order
    pub fn iter(&self) -> btree_map::Values<'_, String, Property> {
        self.properties.values()
    }

    /// Names of the properties flagged as required, in iteration order
    pub fn required_names(&self) -> Vec<String> {
        self.iter()
            .filter(|p| p.required)
            .map(|p| p.name.clone())
            .collect()
    }
}

impl FromIterator<Property> for Schema {
    fn from_iter<I: IntoIterator<Item = Property>>(iter: I) -> Self {
        let mut schema = Schema::new();
        for property in iter {
            schema.insert(property);
        }
        schema
    }
}

impl From<Vec<Property>> for Schema {
    fn from(properties: Vec<Property>) -> Self {
        properties.into_iter().collect()
    }
}

impl<'a> IntoIterator for &'a Schema {
    type Item = &'a Property;
    type IntoIter = btree_map::Values<'a, String, Property>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
