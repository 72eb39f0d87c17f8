/// Domain module containing the data model shared by the server layers
///
/// This module defines tool schemas (Property, Schema) and the Content
/// values that tools return when invoked.

pub mod content;
pub mod schema;

// Re-export public types for easy access
pub use content::*;
pub use schema::*;
