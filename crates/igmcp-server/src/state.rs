//! Shared application state for the axum server.

use std::sync::Arc;

use igmcp_core::config::Credentials;
use igmcp_core::graph::HttpSend;
use igmcp_core::mcp::{McpHandler, SessionMode};
use igmcp_core::tools::ToolExecutor;

/// Shared state accessible by all API handlers. Owns the MCP dispatcher
/// (and through it the session store), so every server instance gets an
/// independent session namespace.
pub struct AppStateInner {
    pub handler: McpHandler,
    /// Default account id from the environment, merged into per-request
    /// credential overrides.
    pub default_account_id: Option<String>,
}

pub type AppState = Arc<AppStateInner>;

impl AppStateInner {
    pub fn new(
        credentials: Option<Credentials>,
        sender: Arc<dyn HttpSend>,
        mode: SessionMode,
    ) -> Self {
        let default_account_id = credentials.as_ref().and_then(|c| c.account_id.clone());
        let executor = ToolExecutor::new(credentials, sender);
        Self {
            handler: McpHandler::new(executor, mode),
            default_account_id,
        }
    }
}
