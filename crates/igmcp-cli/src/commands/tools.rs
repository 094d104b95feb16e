//! `igmcp tools` — Print the tool catalog.

use super::print_json;

pub fn run() -> Result<(), String> {
    print_json(&serde_json::json!({
        "tools": igmcp_core::tools::tool_definitions(),
    }));
    Ok(())
}
