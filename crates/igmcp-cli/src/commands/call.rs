//! `igmcp call` — One-shot tool invocation.
//!
//! Bypasses the session protocol entirely: parse the arguments, run the
//! tool against the live Graph API, print the tool result. Useful for
//! smoke-testing credentials and individual tools.

use std::sync::Arc;

use igmcp_core::config::Credentials;
use igmcp_core::graph::ReqwestSender;
use igmcp_core::tools::ToolExecutor;

use super::print_json;

pub async fn run(tool: &str, args_str: &str) -> Result<(), String> {
    let args: serde_json::Value =
        serde_json::from_str(args_str).map_err(|e| format!("Invalid JSON args: {}", e))?;

    let executor = ToolExecutor::new(Credentials::from_env(), Arc::new(ReqwestSender::new()));
    let result = executor.execute(tool, args).await;

    print_json(&result);

    if result.get("isError").and_then(|v| v.as_bool()).unwrap_or(false) {
        return Err(format!("tool call failed: {}", tool));
    }
    Ok(())
}
