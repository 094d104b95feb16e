//! MCP Streamable HTTP API - /mcp
//!
//! POST   /mcp - JSON-RPC messages (initialize, tools/list, tools/call, ...)
//! GET    /mcp - SSE stream for server-initiated messages (heartbeat only)
//! DELETE /mcp - Terminate an MCP session
//!
//! The session identifier travels out-of-band in the `Mcp-Session-Id`
//! header. Query parameters `INSTAGRAM_ACCESS_TOKEN` and
//! `INSTAGRAM_ACCOUNT_ID` on POST override the environment credential for
//! that single request.

use std::convert::Infallible;

use axum::{
    extract::{Query, State},
    http::{HeaderMap, StatusCode},
    response::sse::{Event, KeepAlive, Sse},
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use tokio_stream::StreamExt as _;

use igmcp_core::config::Credentials;
use igmcp_core::mcp::{types, McpHandler, SessionMode};

use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/", get(mcp_get).post(mcp_post).delete(mcp_delete))
}

fn session_header(headers: &HeaderMap) -> Option<String> {
    headers
        .get("mcp-session-id")
        .and_then(|v| v.to_str().ok())
        .map(|s| s.to_string())
}

/// Per-request credential override carried in the query string.
#[derive(Debug, Deserialize)]
struct CredentialOverride {
    #[serde(rename = "INSTAGRAM_ACCESS_TOKEN")]
    access_token: Option<String>,
    #[serde(rename = "INSTAGRAM_ACCOUNT_ID")]
    account_id: Option<String>,
}

/// Per-request handler: the shared one, or a derived one when the query
/// string carries a credential override.
fn request_handler(state: &AppState, query: &CredentialOverride) -> McpHandler {
    match query.access_token.as_deref().filter(|t| !t.is_empty()) {
        Some(token) => {
            let account_id = query
                .account_id
                .clone()
                .or_else(|| state.default_account_id.clone());
            state
                .handler
                .with_credentials(Some(Credentials::new(token, account_id)))
        }
        None => state.handler.clone(),
    }
}

// ─── POST /mcp ────────────────────────────────────────────────────────

async fn mcp_post(
    headers: HeaderMap,
    State(state): State<AppState>,
    Query(query): Query<CredentialOverride>,
    Json(body): Json<serde_json::Value>,
) -> axum::response::Response {
    let session_id = session_header(&headers);

    tracing::debug!(
        method = body.get("method").and_then(|m| m.as_str()).unwrap_or(""),
        session = ?session_id,
        "mcp post"
    );

    let handler = request_handler(&state, &query);
    let reply = handler.handle_message(session_id.as_deref(), body).await;

    let mut response_headers = HeaderMap::new();
    response_headers.insert(
        "access-control-expose-headers",
        "Mcp-Session-Id, MCP-Protocol-Version".parse().unwrap(),
    );
    if let Some(new_session) = &reply.session_id {
        response_headers.insert("mcp-session-id", new_session.parse().unwrap());
    }

    let status = match reply.body.pointer("/error/code").and_then(|c| c.as_i64()) {
        Some(types::SESSION_ERROR) => StatusCode::BAD_REQUEST,
        _ => StatusCode::OK,
    };

    (status, response_headers, Json(reply.body)).into_response()
}

// ─── GET /mcp (SSE) ───────────────────────────────────────────────────

async fn mcp_get(
    headers: HeaderMap,
    State(state): State<AppState>,
) -> Result<
    Sse<impl tokio_stream::Stream<Item = Result<Event, Infallible>>>,
    (StatusCode, Json<serde_json::Value>),
> {
    if state.handler.mode() == SessionMode::Stateless {
        return Err((
            StatusCode::METHOD_NOT_ALLOWED,
            Json(types::error(
                serde_json::Value::Null,
                types::SESSION_ERROR,
                "Method not allowed. Use POST.",
            )),
        ));
    }

    let session_id = session_header(&headers);
    let live = match &session_id {
        Some(sid) => state.handler.sessions().contains(sid).await,
        None => false,
    };
    if !live {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(types::error(
                serde_json::Value::Null,
                types::SESSION_ERROR,
                "No active session. Send an initialize POST request first.",
            )),
        ));
    }

    let heartbeat = tokio_stream::wrappers::IntervalStream::new(tokio::time::interval(
        std::time::Duration::from_secs(30),
    ))
    .map(|_| Ok(Event::default().comment("heartbeat")));

    Ok(Sse::new(heartbeat).keep_alive(KeepAlive::default()))
}

// ─── DELETE /mcp ──────────────────────────────────────────────────────

async fn mcp_delete(
    headers: HeaderMap,
    State(state): State<AppState>,
) -> Result<StatusCode, (StatusCode, Json<serde_json::Value>)> {
    if state.handler.mode() == SessionMode::Stateless {
        // Every stateless request is its own closed session already.
        return Ok(StatusCode::NO_CONTENT);
    }

    match session_header(&headers) {
        Some(sid) => {
            // Idempotent: closing an unknown or already-closed session
            // succeeds without error.
            state.handler.close_session(&sid).await;
            Ok(StatusCode::NO_CONTENT)
        }
        None => Err((
            StatusCode::BAD_REQUEST,
            Json(types::error(
                serde_json::Value::Null,
                types::SESSION_ERROR,
                "Missing Mcp-Session-Id header",
            )),
        )),
    }
}
