//! `igmcp stdio` — MCP over stdio.
//!
//! Newline-delimited JSON-RPC on stdin/stdout; all diagnostics go to
//! stderr so they never corrupt the protocol stream. The connection is
//! one stateful session whose identifier lives in this loop — it is
//! never carried on the wire.

use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

use igmcp_core::config::Credentials;
use igmcp_core::graph::ReqwestSender;
use igmcp_core::mcp::{types, McpHandler, SessionMode};
use igmcp_core::tools::{tool_count, ToolExecutor};

pub async fn run() -> Result<(), String> {
    // Route tracing to stderr; stdout belongs to the protocol.
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "igmcp_core=info".into()),
        )
        .init();

    let credentials = Credentials::from_env();
    let configured = credentials.is_some();

    let executor = ToolExecutor::new(credentials, Arc::new(ReqwestSender::new()));
    let handler = McpHandler::new(executor, SessionMode::Stateful);

    eprintln!("Instagram MCP Server running on stdio");
    eprintln!(
        "Token: {}",
        if configured {
            "***configured***"
        } else {
            "(not configured yet)"
        }
    );
    eprintln!("Tools available: {}", tool_count());
    eprintln!("Ready for MCP client\n");

    let stdin = tokio::io::stdin();
    let mut stdout = tokio::io::stdout();
    let mut lines = BufReader::new(stdin).lines();

    let mut session_id: Option<String> = None;

    while let Ok(Some(line)) = lines.next_line().await {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let message: serde_json::Value = match serde_json::from_str(line) {
            Ok(v) => v,
            Err(e) => {
                let response = types::error(
                    serde_json::Value::Null,
                    types::PARSE_ERROR,
                    format!("Parse error: {}", e),
                );
                write_line(&mut stdout, &response).await;
                continue;
            }
        };

        let notification = types::is_notification(&message);
        let reply = handler.handle_message(session_id.as_deref(), message).await;
        if let Some(new_id) = reply.session_id {
            session_id = Some(new_id);
        }

        // Notifications expect no response on a duplex transport.
        if !notification {
            write_line(&mut stdout, &reply.body).await;
        }
    }

    // stdin closed: transport teardown ends the session.
    if let Some(sid) = &session_id {
        handler.close_session(sid).await;
    }
    eprintln!("stdin closed, shutting down");
    Ok(())
}

async fn write_line(stdout: &mut tokio::io::Stdout, value: &serde_json::Value) {
    let line = format!("{}\n", value);
    if let Err(e) = stdout.write_all(line.as_bytes()).await {
        eprintln!("Failed to write response: {}", e);
        return;
    }
    let _ = stdout.flush().await;
}
