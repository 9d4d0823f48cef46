// MCP (Model Context Protocol) server for the Cariari Agency listing API.
// Exposes `get-properties` and `get-property` to agent clients over stdio.

pub mod config;
pub mod protocol;
pub mod server;
pub mod tools;

pub use config::McpConfig;
pub use server::McpServer;
