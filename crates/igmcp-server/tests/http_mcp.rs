//! Integration tests for the Streamable HTTP MCP surface.
//!
//! These drive the full axum router with a recording HTTP sender, so the
//! whole path — session resolution, registry dispatch, publish workflows,
//! error mapping — is exercised without any network traffic.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{HeaderMap, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use igmcp_core::config::Credentials;
use igmcp_core::graph::mock::MockSend;
use igmcp_core::graph::HttpSend;
use igmcp_core::mcp::SessionMode;
use igmcp_server::state::{AppState, AppStateInner};

fn test_app(
    credentials: Option<Credentials>,
    mock: &Arc<MockSend>,
    mode: SessionMode,
) -> Router {
    let state: AppState = Arc::new(AppStateInner::new(
        credentials,
        mock.clone() as Arc<dyn HttpSend>,
        mode,
    ));
    igmcp_server::app(state)
}

async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    session: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, HeaderMap, Value) {
    let mut request = Request::builder().method(method).uri(uri);
    if let Some(sid) = session {
        request = request.header("mcp-session-id", sid);
    }
    let request = match body {
        Some(body) => request
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => request.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, headers, value)
}

fn rpc(id: u64, method: &str, params: Value) -> Value {
    json!({"jsonrpc": "2.0", "id": id, "method": method, "params": params})
}

fn creds() -> Option<Credentials> {
    Some(Credentials::new("env-token", None))
}

#[tokio::test]
async fn test_initialize_issues_session_header_and_routes_follow_ups() {
    let mock = MockSend::returning(vec![json!({"id": "1"})]);
    let app = test_app(creds(), &mock, SessionMode::Stateful);

    let (status, headers, body) =
        send(&app, "POST", "/mcp", None, Some(rpc(1, "initialize", json!({})))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["result"]["serverInfo"]["name"], "instagram-mcp");

    let sid = headers
        .get("mcp-session-id")
        .expect("initialize must return a session id")
        .to_str()
        .unwrap()
        .to_string();

    let (status, _, body) = send(
        &app,
        "POST",
        "/mcp",
        Some(&sid),
        Some(rpc(2, "tools/list", json!({}))),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["result"]["tools"].as_array().unwrap().len(), 25);
}

#[tokio::test]
async fn test_request_without_live_session_is_bad_request() {
    let mock = MockSend::returning(vec![json!({})]);
    let app = test_app(creds(), &mock, SessionMode::Stateful);

    let (status, _, body) = send(
        &app,
        "POST",
        "/mcp",
        None,
        Some(rpc(1, "tools/list", json!({}))),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], -32000);

    let (status, _, body) = send(
        &app,
        "POST",
        "/mcp",
        Some("ghost-session"),
        Some(rpc(1, "tools/list", json!({}))),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], -32000);
}

#[tokio::test]
async fn test_delete_closes_session_and_is_idempotent() {
    let mock = MockSend::returning(vec![json!({})]);
    let app = test_app(creds(), &mock, SessionMode::Stateful);

    let (_, headers, _) =
        send(&app, "POST", "/mcp", None, Some(rpc(1, "initialize", json!({})))).await;
    let sid = headers.get("mcp-session-id").unwrap().to_str().unwrap().to_string();

    let (status, _, _) = send(&app, "DELETE", "/mcp", Some(&sid), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    // Closing again succeeds — close is idempotent.
    let (status, _, _) = send(&app, "DELETE", "/mcp", Some(&sid), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    // The closed identifier no longer routes.
    let (status, _, _) = send(
        &app,
        "POST",
        "/mcp",
        Some(&sid),
        Some(rpc(2, "tools/list", json!({}))),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // Missing header stays an error: close needs an identifier.
    let (status, _, _) = send(&app, "DELETE", "/mcp", None, None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_stateless_mode_serves_one_shot_requests() {
    let mock = MockSend::returning(vec![json!({"id": "17890", "username": "acme"})]);
    let app = test_app(creds(), &mock, SessionMode::Stateless);

    // No handshake, no header — the request is its own session cycle.
    let (status, headers, body) = send(
        &app,
        "POST",
        "/mcp",
        None,
        Some(rpc(
            1,
            "tools/call",
            json!({"name": "ig_get_account", "arguments": {"account_id": "17890"}}),
        )),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(headers.get("mcp-session-id").is_none());
    assert_eq!(body["result"]["isError"], false);
    assert_eq!(mock.call_count(), 1);

    // Initialize works too but never mints an identifier.
    let (_, headers, _) =
        send(&app, "POST", "/mcp", None, Some(rpc(2, "initialize", json!({})))).await;
    assert!(headers.get("mcp-session-id").is_none());
}

#[tokio::test]
async fn test_query_params_override_missing_environment_credential() {
    let mock = MockSend::returning(vec![json!({"id": "17890"})]);
    let app = test_app(None, &mock, SessionMode::Stateless);

    let call = rpc(
        1,
        "tools/call",
        json!({"name": "ig_get_account", "arguments": {"account_id": "17890"}}),
    );

    // Without the override there is no credential at all.
    let (_, _, body) = send(&app, "POST", "/mcp", None, Some(call.clone())).await;
    assert_eq!(body["result"]["isError"], true);
    assert_eq!(
        body["result"]["content"][0]["text"],
        "Error: INSTAGRAM_ACCESS_TOKEN is required"
    );
    assert_eq!(mock.call_count(), 0);

    // The override supplies one for this request only.
    let (_, _, body) = send(
        &app,
        "POST",
        "/mcp?INSTAGRAM_ACCESS_TOKEN=query-token",
        None,
        Some(call),
    )
    .await;
    assert_eq!(body["result"]["isError"], false);
    assert_eq!(mock.call_count(), 1);
    assert!(mock.calls()[0].url.contains("access_token=query-token"));
}

#[tokio::test]
async fn test_carousel_publish_end_to_end_over_http() {
    let mock = MockSend::returning(vec![
        json!({"id": "child-1"}),
        json!({"id": "child-2"}),
        json!({"id": "agg-1"}),
        json!({"id": "published-1"}),
    ]);
    let app = test_app(creds(), &mock, SessionMode::Stateful);

    let (_, headers, _) =
        send(&app, "POST", "/mcp", None, Some(rpc(1, "initialize", json!({})))).await;
    let sid = headers.get("mcp-session-id").unwrap().to_str().unwrap().to_string();

    let (_, _, body) = send(
        &app,
        "POST",
        "/mcp",
        Some(&sid),
        Some(rpc(
            2,
            "tools/call",
            json!({
                "name": "ig_publish_carousel",
                "arguments": {"account_id": "17890", "media_urls": ["a.jpg", "b.mp4"], "caption": "trip"}
            }),
        )),
    )
    .await;

    assert_eq!(body["result"]["isError"], false);
    assert_eq!(mock.call_count(), 4);
    let payload: Value =
        serde_json::from_str(body["result"]["content"][0]["text"].as_str().unwrap()).unwrap();
    assert_eq!(payload["id"], "published-1");
}

#[tokio::test]
async fn test_info_and_health_endpoints() {
    let mock = MockSend::returning(vec![json!({})]);
    let app = test_app(creds(), &mock, SessionMode::Stateful);

    let (status, _, body) = send(&app, "GET", "/", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "instagram-mcp");
    assert_eq!(body["tools"], 25);
    assert_eq!(body["transport"], "streamable-http");

    let (status, _, body) = send(&app, "GET", "/health", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_sse_stream_requires_live_session() {
    let mock = MockSend::returning(vec![json!({})]);
    let app = test_app(creds(), &mock, SessionMode::Stateful);

    let (status, _, _) = send(&app, "GET", "/mcp", None, None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _, _) = send(&app, "GET", "/mcp", Some("ghost"), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}
