//! MCP request dispatcher.
//!
//! `McpHandler` is the transport-agnostic session state machine
//! (`NoSession → Initializing → Active → Closed`). Transports hand it the
//! out-of-band session identifier and the decoded JSON-RPC message; it
//! resolves the session, routes the method, and returns the response
//! envelope plus the identifier of any session created by this message.
//!
//! The same handler serves both deployment shapes:
//! - `Stateful` — Streamable HTTP with the `Mcp-Session-Id` header, or
//!   stdio with the identifier held by the transport loop.
//! - `Stateless` — one-shot request/response; every request is its own
//!   full session cycle and no identifier is generated or required.

use serde_json::{json, Value};

use super::session::SessionStore;
use super::types;
use crate::tools::{tool_categories, tool_count, tool_definitions, ToolExecutor};

/// Server name advertised in `initialize` and server-info.
pub const SERVER_NAME: &str = "instagram-mcp";

/// Protocol revision assumed when the client does not send one.
pub const DEFAULT_PROTOCOL_VERSION: &str = "2024-11-05";

/// URI of the single exposed resource.
pub const SERVER_INFO_URI: &str = "instagram://server-info";

/// How the dispatcher treats session identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionMode {
    Stateful,
    Stateless,
}

/// Outcome of dispatching one inbound message.
#[derive(Debug)]
pub struct McpReply {
    /// Set when this message created a session; the transport must hand
    /// the identifier back to the client out-of-band.
    pub session_id: Option<String>,
    /// JSON-RPC response envelope. For notifications on a duplex
    /// transport the caller decides whether to emit it.
    pub body: Value,
}

#[derive(Clone)]
pub struct McpHandler {
    executor: ToolExecutor,
    sessions: SessionStore,
    mode: SessionMode,
}

impl McpHandler {
    pub fn new(executor: ToolExecutor, mode: SessionMode) -> Self {
        Self {
            executor,
            sessions: SessionStore::new(),
            mode,
        }
    }

    pub fn mode(&self) -> SessionMode {
        self.mode
    }

    pub fn sessions(&self) -> &SessionStore {
        &self.sessions
    }

    /// Derived handler with different credentials, sharing this handler's
    /// session store. Used for per-request credential overrides.
    pub fn with_credentials(&self, credentials: Option<crate::config::Credentials>) -> Self {
        Self {
            executor: self.executor.with_credentials(credentials),
            sessions: self.sessions.clone(),
            mode: self.mode,
        }
    }

    /// Resolve the session and dispatch one message.
    pub async fn handle_message(&self, session_id: Option<&str>, message: Value) -> McpReply {
        let id = message.get("id").cloned().unwrap_or(Value::Null);

        if message.get("jsonrpc").and_then(|v| v.as_str()) != Some("2.0") {
            return McpReply {
                session_id: None,
                body: types::error(
                    id,
                    types::INVALID_REQUEST,
                    "Invalid JSON-RPC version, expected \"2.0\"",
                ),
            };
        }

        let method = match message.get("method").and_then(|m| m.as_str()) {
            Some(method) if !method.is_empty() => method.to_string(),
            _ => {
                return McpReply {
                    session_id: None,
                    body: types::error(id, types::INVALID_REQUEST, "Missing method"),
                }
            }
        };

        let params = message
            .get("params")
            .cloned()
            .unwrap_or(Value::Object(Default::default()));

        tracing::debug!(method = %method, session = ?session_id, "mcp request");

        if self.mode == SessionMode::Stateless {
            return McpReply {
                session_id: None,
                body: self.dispatch(&method, id, params).await,
            };
        }

        let live = match session_id {
            Some(sid) => self.sessions.contains(sid).await,
            None => false,
        };

        if live {
            // Live session: route normally.
            McpReply {
                session_id: None,
                body: self.dispatch(&method, id, params).await,
            }
        } else if session_id.is_none() && method == "initialize" {
            // Handshake with no identifier: create the session.
            let new_id = self.sessions.create().await;
            let active = self.sessions.len().await;
            tracing::info!(session = %new_id, active, "session created");
            McpReply {
                session_id: Some(new_id),
                body: self.dispatch(&method, id, params).await,
            }
        } else {
            // Unknown or closed identifier, or a non-handshake request
            // with no identifier. Rejected here so a stale identifier can
            // never smuggle requests into another session.
            McpReply {
                session_id: None,
                body: types::error(
                    id,
                    types::SESSION_ERROR,
                    "Bad Request: No valid session ID provided",
                ),
            }
        }
    }

    /// Explicit session teardown. Closing an unknown or already-closed
    /// identifier is a no-op success.
    pub async fn close_session(&self, session_id: &str) {
        if self.mode == SessionMode::Stateless {
            return;
        }
        if self.sessions.remove(session_id).await {
            let active = self.sessions.len().await;
            tracing::info!(session = %session_id, active, "session closed");
        }
    }

    async fn dispatch(&self, method: &str, id: Value, params: Value) -> Value {
        match method {
            "initialize" => {
                let protocol_version = params
                    .get("protocolVersion")
                    .and_then(|v| v.as_str())
                    .unwrap_or(DEFAULT_PROTOCOL_VERSION);
                types::success(
                    id,
                    json!({
                        "protocolVersion": protocol_version,
                        "capabilities": {
                            "tools": { "listChanged": false },
                            "prompts": { "listChanged": false },
                            "resources": { "subscribe": false, "listChanged": false }
                        },
                        "serverInfo": {
                            "name": SERVER_NAME,
                            "version": env!("CARGO_PKG_VERSION")
                        }
                    }),
                )
            }

            "ping" => types::success(id, json!({})),

            // Client confirms initialization — accepted, nothing to do.
            "notifications/initialized" => types::success(id, json!({})),

            "tools/list" => types::success(id, json!({ "tools": tool_definitions() })),

            "tools/call" => {
                let name = params.get("name").and_then(|v| v.as_str()).unwrap_or("");
                let arguments = params
                    .get("arguments")
                    .cloned()
                    .unwrap_or(Value::Object(Default::default()));
                let result = self.executor.execute(name, arguments).await;
                types::success(id, result)
            }

            "prompts/list" => types::success(
                id,
                json!({
                    "prompts": [
                        {
                            "name": "content-publishing",
                            "description": "Guide for publishing photos, carousels, reels, and stories to Instagram"
                        },
                        {
                            "name": "analytics-guide",
                            "description": "Guide for viewing Instagram account and media insights"
                        }
                    ]
                }),
            ),

            "prompts/get" => {
                let name = params.get("name").and_then(|v| v.as_str()).unwrap_or("");
                match prompt_text(name) {
                    Some(text) => types::success(
                        id,
                        json!({
                            "messages": [{
                                "role": "user",
                                "content": { "type": "text", "text": text }
                            }]
                        }),
                    ),
                    None => types::error(
                        id,
                        types::INVALID_PARAMS,
                        format!("Unknown prompt: {}", name),
                    ),
                }
            }

            "resources/list" => types::success(
                id,
                json!({
                    "resources": [{
                        "uri": SERVER_INFO_URI,
                        "name": "server-info",
                        "description": "Connection status and available tools for this Instagram MCP server",
                        "mimeType": "application/json"
                    }]
                }),
            ),

            "resources/read" => {
                let uri = params.get("uri").and_then(|v| v.as_str()).unwrap_or("");
                if uri != SERVER_INFO_URI {
                    return types::error(
                        id,
                        types::INVALID_PARAMS,
                        format!("Unknown resource: {}", uri),
                    );
                }
                types::success(
                    id,
                    json!({
                        "contents": [{
                            "uri": SERVER_INFO_URI,
                            "mimeType": "application/json",
                            "text": self.server_info().to_string()
                        }]
                    }),
                )
            }

            _ => types::error(
                id,
                types::METHOD_NOT_FOUND,
                format!("Method not found: {}", method),
            ),
        }
    }

    /// The server-info document behind [`SERVER_INFO_URI`].
    pub fn server_info(&self) -> Value {
        json!({
            "name": SERVER_NAME,
            "version": env!("CARGO_PKG_VERSION"),
            "connected": self.executor.has_credentials(),
            "tools_available": tool_count(),
            "tool_categories": tool_categories(),
            "api": "Instagram Graph API v22.0 (via Facebook Graph API)",
        })
    }
}

fn prompt_text(name: &str) -> Option<String> {
    match name {
        "content-publishing" => Some(
            [
                "You are an Instagram content publishing assistant.",
                "",
                "Publishing tools:",
                "1. **Photo** — ig_publish_photo (image URL + caption)",
                "2. **Carousel** — ig_publish_carousel (2-10 media URLs + caption)",
                "3. **Reel** — ig_publish_reel (video URL + caption, optional cover)",
                "4. **Story** — ig_publish_story (image/video URL, disappears in 24h)",
                "",
                "Tips:",
                "- Images: JPEG recommended, max 8MB",
                "- Videos: MP4, max 15 min, max 1GB",
                "- Captions: max 2200 chars, up to 30 hashtags",
                "- All media URLs must be publicly accessible",
                "- Publishing is 2-step (create container → publish) but handled automatically",
            ]
            .join("\n"),
        ),
        "analytics-guide" => Some(
            [
                "You are an Instagram analytics assistant.",
                "",
                "Account metrics (ig_get_account_insights):",
                "- impressions, reach, follower_count, profile_views",
                "- email_contacts, phone_call_clicks, website_clicks",
                "- Period: day, week, days_28, lifetime",
                "",
                "Media metrics (ig_get_media_insights):",
                "- Image/Carousel: impressions, reach, engagement, saved",
                "- Reel/Video: plays, reach, total_interactions, saved",
                "",
                "Story metrics (ig_get_story_insights):",
                "- impressions, reach, replies, taps_forward, taps_back, exits",
                "",
                "Hashtag research:",
                "1. ig_search_hashtag → get hashtag ID",
                "2. ig_get_hashtag_top → most popular posts",
                "3. ig_get_hashtag_recent → latest posts (24h)",
            ]
            .join("\n"),
        ),
        _ => None,
    }
}
