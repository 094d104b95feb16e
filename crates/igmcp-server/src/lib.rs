//! igmcp server — Streamable HTTP transport for the Instagram MCP tools.
//!
//! A standalone axum adapter over `igmcp-core`:
//! - POST/GET/DELETE `/mcp` — the MCP Streamable HTTP protocol
//! - GET `/` — server info
//! - GET `/health` — liveness probe
//!
//! This crate can be used standalone or embedded (the CLI's `serve`
//! command is a thin wrapper around [`start_server`]).

pub mod api;
pub mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use igmcp_core::config::Credentials;
use igmcp_core::graph::{HttpSend, ReqwestSender};
use igmcp_core::mcp::{SessionMode, SERVER_NAME};
use igmcp_core::tools::tool_count;

use self::state::{AppState, AppStateInner};

/// Configuration for the HTTP server.
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Serve every request as its own session, with no identifier
    /// generated or required (one-shot deployments).
    pub stateless: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            stateless: false,
        }
    }
}

/// Create a shared `AppState` backed by the production HTTP sender.
pub fn create_app_state(credentials: Option<Credentials>, stateless: bool) -> AppState {
    let mode = if stateless {
        SessionMode::Stateless
    } else {
        SessionMode::Stateful
    };
    Arc::new(AppStateInner::new(
        credentials,
        Arc::new(ReqwestSender::new()) as Arc<dyn HttpSend>,
        mode,
    ))
}

/// Build the full application router for a pre-built state. Exposed
/// separately so tests can drive the router without binding a socket.
pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .merge(api::api_router())
        .route("/", axum::routing::get(server_info))
        .route("/health", axum::routing::get(health_check))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Start the HTTP server. Returns the actual address it listens on; the
/// accept loop runs in a background task.
pub async fn start_server(config: ServerConfig) -> Result<SocketAddr, String> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "igmcp_server=info,tower_http=info".into()),
        )
        .init();

    let credentials = Credentials::from_env();
    tracing::info!(
        configured = credentials.is_some(),
        tools = tool_count(),
        stateless = config.stateless,
        "starting Instagram MCP server"
    );

    let state = create_app_state(credentials, config.stateless);
    start_server_with_state(config, state).await
}

/// Start the HTTP server with a pre-built `AppState`.
pub async fn start_server_with_state(
    config: ServerConfig,
    state: AppState,
) -> Result<SocketAddr, String> {
    let app = app(state);

    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .map_err(|e| format!("Invalid address: {}", e))?;

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| format!("Failed to bind to {}: {}", addr, e))?;

    let local_addr = listener
        .local_addr()
        .map_err(|e| format!("Failed to get local address: {}", e))?;

    tracing::info!("Instagram MCP server listening on {}", local_addr);

    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await {
            tracing::error!("Server error: {}", e);
        }
    });

    Ok(local_addr)
}

async fn server_info(
    axum::extract::State(state): axum::extract::State<AppState>,
) -> axum::Json<serde_json::Value> {
    axum::Json(serde_json::json!({
        "name": SERVER_NAME,
        "version": env!("CARGO_PKG_VERSION"),
        "status": "ok",
        "tools": tool_count(),
        "transport": "streamable-http",
        "stateless": state.handler.mode() == SessionMode::Stateless,
        "endpoints": { "mcp": "/mcp" },
    }))
}

async fn health_check() -> axum::Json<serde_json::Value> {
    axum::Json(serde_json::json!({
        "status": "ok",
        "server": "igmcp-server",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
