pub mod mcp_routes;

use axum::Router;

use crate::state::AppState;

/// Build the complete API router.
pub fn api_router() -> Router<AppState> {
    Router::new().nest("/mcp", mcp_routes::router())
}
