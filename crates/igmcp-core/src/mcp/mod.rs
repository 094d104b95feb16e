//! MCP protocol layer: JSON-RPC envelopes, session store, and the
//! transport-agnostic dispatcher.

pub mod handler;
pub mod session;
pub mod types;

pub use handler::{McpHandler, McpReply, SessionMode, SERVER_NAME};
pub use session::{Session, SessionStore};
