/// Registry of tools that clients can list and call
///
/// Tools are keyed by name and kept in registration order so that
/// `tools/list` is stable across calls.

use std::collections::HashMap;
use std::fmt;
use thiserror::Error;
use tracing::{debug, warn};

use crate::domain::{Content, Schema};

/// Arguments passed to a tool, keyed by input property name
pub type ToolArguments = HashMap<String, String>;

/// Callback executed when a tool is called
pub type ToolCallback = Box<dyn Fn(&ToolArguments) -> Vec<Content> + Send + Sync>;

/// Errors that can occur while registering tools
#[derive(Error, Debug, PartialEq, Eq)]
pub enum RegistryError {
    #[error("Tool name cannot be empty")]
    EmptyName,
}

/// A named, schema-described operation
pub struct Tool {
    pub name: String,
    pub description: String,
    pub input_schema: Schema,
    pub output_schema: Schema,
    callback: ToolCallback,
}

impl Tool {
    /// Run the tool's callback with the given arguments
    pub fn invoke(&self, arguments: &ToolArguments) -> Vec<Content> {
        (self.callback)(arguments)
    }

    /// Whether results are rendered as structured content
    pub fn has_output_schema(&self) -> bool {
        !self.output_schema.is_empty()
    }
}

impl fmt::Debug for Tool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tool")
            .field("name", &self.name)
            .field("description", &self.description)
            .field("input_schema", &self.input_schema)
            .field("output_schema", &self.output_schema)
            .finish_non_exhaustive()
    }
}

/// Holds every registered tool for the lifetime of a server
#[derive(Debug, Default)]
pub struct ToolRegistry {
    tools: Vec<Tool>,
    index: HashMap<String, usize>,
}

impl ToolRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a tool under `name`
    ///
    /// Registering a name that already exists replaces the previous tool
    /// in place; it keeps its original position in `list()`.
    pub fn register<F>(
        &mut self,
        name: impl Into<String>,
        description: impl Into<String>,
        input_schema: impl Into<Schema>,
        output_schema: impl Into<Schema>,
        callback: F,
    ) -> Result<(), RegistryError>
    where
        F: Fn(&ToolArguments) -> Vec<Content> + Send + Sync + 'static,
    {
        let name = name.into();
        if name.is_empty() {
            return Err(RegistryError::EmptyName);
        }

        let tool = Tool {
            name: name.clone(),
            description: description.into(),
            input_schema: input_schema.into(),
            output_schema: output_schema.into(),
            callback: Box::new(callback),
        };

        match self.index.get(&name) {
            Some(&position) => {
                warn!("Tool '{}' registered again, replacing previous definition", name);
                self.tools[position] = tool;
            }
            None => {
                debug!("Registered tool '{}'", name);
                self.index.insert(name, self.tools.len());
                self.tools.push(tool);
            }
        }

        Ok(())
    }

    /// Iterate over all tools in registration order
    pub fn list(&self) -> std::slice::Iter<'_, Tool> {
        self.tools.iter()
    }

    /// Look up a tool by name
    pub fn get(&self, name: &str) -> Option<&Tool> {
        self.index.get(name).map(|&position| &self.tools[position])
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}
