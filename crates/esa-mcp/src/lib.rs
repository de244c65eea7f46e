pub mod jsonrpc;
pub mod tools;

pub use jsonrpc::{JsonRpcError, JsonRpcRequest, JsonRpcResponse};
pub use tools::{ToolDefinition, ToolRegistry};
