//! Tool registry: static catalog, typed inputs, and the executor.

pub mod catalog;
pub mod exec;
pub mod params;

pub use catalog::{tool_categories, tool_count, tool_definitions};
pub use exec::ToolExecutor;
pub use params::ToolCall;
