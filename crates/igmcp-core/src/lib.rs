//! igmcp core — transport-agnostic domain for the Instagram MCP server.
//!
//! This crate contains everything except the transports themselves:
//!
//! - [`graph`] — the Graph API gateway, read-side operations, and the
//!   container-based publishing workflows
//! - [`tools`] — the static tool catalog, typed per-tool inputs, and the
//!   executor that turns failures into uniform tool results
//! - [`mcp`] — JSON-RPC envelopes, the session store, and the session
//!   dispatcher shared by the Streamable HTTP and stdio transports
//!
//! The HTTP server (`igmcp-server`) and the CLI (`igmcp-cli`) are thin
//! adapters over these pieces.

pub mod config;
pub mod error;
pub mod graph;
pub mod mcp;
pub mod tools;

// Convenience re-exports
pub use config::Credentials;
pub use error::Error;
pub use graph::{GraphClient, HttpSend, ReqwestSender};
pub use mcp::{McpHandler, SessionMode, SessionStore};
pub use tools::ToolExecutor;
