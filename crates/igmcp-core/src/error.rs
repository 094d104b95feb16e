//! Core error taxonomy for the Instagram MCP domain.
//!
//! Every failure a tool invocation can hit is one of these variants. They
//! are converted into uniform `isError` tool results at the executor
//! boundary and into JSON-RPC error objects at the dispatcher boundary —
//! nothing here ever terminates the serving process.

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// No access token configured. Raised before any gateway construction.
    #[error("INSTAGRAM_ACCESS_TOKEN is required")]
    MissingCredential,

    /// Tool arguments failed validation at the registry boundary.
    #[error("Invalid arguments for {tool}: {message}")]
    InvalidArguments { tool: String, message: String },

    /// Network or decoding failure reaching the Graph API.
    #[error("Transport error: {0}")]
    Transport(String),

    /// The Graph API answered with an embedded error object. Code and
    /// message are preserved verbatim from the response body.
    #[error("Instagram API Error ({code}): {message}")]
    Upstream { code: i64, message: String },

    /// Requested tool name is not in the catalog.
    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    /// Request referenced an unrecognized or closed session identifier.
    #[error("Session error: {0}")]
    Session(String),
}
