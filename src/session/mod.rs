/// Session tracking for the HTTP transport
///
/// Sessions are correlation tokens minted by `initialize` and carried by
/// clients in the `mcp-session-id` header.

pub mod store;

pub use store::*;
