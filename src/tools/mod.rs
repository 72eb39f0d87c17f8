/// Tool registry
///
/// This module holds the tools that MCP clients can discover through
/// `tools/list` and run through `tools/call`.

pub mod registry;

// Re-export registry types for easy access
pub use registry::*;
