//! JSON-RPC 2.0 envelope helpers.
//!
//! Defined standalone (no HTTP framework types) so the same dispatcher
//! serves the Streamable HTTP transport and the stdio transport.

use serde_json::{json, Value};

// Standard JSON-RPC 2.0 error codes.
pub const PARSE_ERROR: i64 = -32700;
pub const INVALID_REQUEST: i64 = -32600;
pub const METHOD_NOT_FOUND: i64 = -32601;
pub const INVALID_PARAMS: i64 = -32602;
pub const INTERNAL_ERROR: i64 = -32603;

// Server-defined range (-32000..-32099). Session violations use -32000,
// matching the Streamable HTTP convention for missing/invalid sessions.
pub const SESSION_ERROR: i64 = -32000;

/// Build a success response envelope.
pub fn success(id: Value, result: Value) -> Value {
    json!({
        "jsonrpc": "2.0",
        "id": id,
        "result": result,
    })
}

/// Build an error response envelope.
pub fn error(id: Value, code: i64, message: impl Into<String>) -> Value {
    json!({
        "jsonrpc": "2.0",
        "id": id,
        "error": { "code": code, "message": message.into() },
    })
}

/// Whether an inbound message is a notification (carries no id and thus
/// expects no response on a duplex transport).
pub fn is_notification(message: &Value) -> bool {
    message.get("id").map(Value::is_null).unwrap_or(true)
}
