//! MCP transport - JSON-RPC 2.0 over newline-delimited stdio

pub mod codec;
pub mod messages;
pub mod server;

pub use codec::{DEFAULT_MAX_LENGTH, Incoming, McpCodec};
pub use messages::{
    ErrorCode, JsonRpcRequest, JsonRpcResponse, Methods, PROTOCOL_VERSION, RpcError, ServerInfo,
    ToolCallParams,
};
pub use server::McpServer;
