//! MCP server - JSON-RPC over a byte stream (stdin/stdout in production)
//!
//! Provides:
//! - Request routing (initialize, ping, tools/list, tools/call)
//! - One task per request, so slow outbound calls do not block other requests
//! - A single writer task that serializes responses onto the output stream

use std::sync::Arc;

use futures::{SinkExt, StreamExt};
use log::{debug, error, info, warn};
use serde::Serialize;
use serde_json::Value;
use tokio::io::{AsyncRead, AsyncWrite};
use tokio::sync::mpsc;
use tokio_util::codec::{FramedRead, FramedWrite};

use crate::error::{OutcallError, Result};
use crate::tools::ToolDispatcher;

use super::codec::{Incoming, McpCodec};
use super::messages::{
    InitializeResult, JsonRpcRequest, JsonRpcResponse, Methods, PROTOCOL_VERSION, RpcError,
    ServerCapabilities, ServerInfo, ToolCallParams, ToolsCapability, ToolsListResult,
};

/// Capacity of the response channel
const RESPONSE_CHANNEL_CAPACITY: usize = 64;

/// MCP server wrapping a tool dispatcher
pub struct McpServer {
    dispatcher: Arc<ToolDispatcher>,
    info: ServerInfo,
}

impl McpServer {
    pub fn new(dispatcher: Arc<ToolDispatcher>) -> Self {
        Self {
            dispatcher,
            info: ServerInfo::default(),
        }
    }

    /// Serve on the process's stdin/stdout until stdin closes
    pub async fn run_stdio(self: Arc<Self>) -> Result<()> {
        info!("Outbound Call MCP server running on stdio");
        self.serve(tokio::io::stdin(), tokio::io::stdout()).await
    }

    /// Serve requests read from `reader`, writing responses to `writer`.
    ///
    /// Returns once the reader reaches EOF and every in-flight response is written.
    pub async fn serve<R, W>(self: Arc<Self>, reader: R, writer: W) -> Result<()>
    where
        R: AsyncRead + Unpin + Send + 'static,
        W: AsyncWrite + Unpin + Send + 'static,
    {
        let mut frames = FramedRead::new(reader, McpCodec::new());
        let mut sink = FramedWrite::new(writer, McpCodec::new());
        let (tx, mut rx) = mpsc::channel::<JsonRpcResponse>(RESPONSE_CHANNEL_CAPACITY);

        let writer_task = tokio::spawn(async move {
            while let Some(response) = rx.recv().await {
                sink.send(response).await?;
            }
            Ok::<_, std::io::Error>(())
        });

        while let Some(frame) = frames.next().await {
            match frame {
                Ok(Incoming::Request(request)) => {
                    let server = Arc::clone(&self);
                    let tx = tx.clone();
                    tokio::spawn(async move {
                        if let Some(response) = server.handle(request).await {
                            if tx.send(response).await.is_err() {
                                warn!("Response dropped: writer closed");
                            }
                        }
                    });
                }
                Ok(Incoming::Malformed(reason)) => {
                    warn!("Malformed message: {}", reason);
                    let response = JsonRpcResponse::error(Value::Null, RpcError::parse_error(reason));
                    if tx.send(response).await.is_err() {
                        break;
                    }
                }
                Err(e) => {
                    error!("Transport read error: {}", e);
                    break;
                }
            }
        }

        debug!("Input closed, draining responses");
        drop(tx);

        writer_task
            .await
            .map_err(|e| OutcallError::Io(std::io::Error::other(e.to_string())))??;

        info!("Server shutting down");
        Ok(())
    }

    /// Handle a single message; notifications produce no response
    pub async fn handle(&self, request: JsonRpcRequest) -> Option<JsonRpcResponse> {
        if request.is_notification() {
            debug!("Notification: {}", request.method);
            return None;
        }
        let id = request.id.clone().unwrap_or(Value::Null);

        debug!("<- {} (id {})", request.method, id);

        let response = match request.method.as_str() {
            Methods::INITIALIZE => {
                let result = InitializeResult {
                    protocol_version: PROTOCOL_VERSION.into(),
                    capabilities: ServerCapabilities {
                        tools: ToolsCapability { list_changed: false },
                    },
                    server_info: self.info.clone(),
                };
                to_response(id, &result)
            }

            Methods::PING => JsonRpcResponse::success(id, Value::Object(Default::default())),

            Methods::TOOLS_LIST => {
                let result = ToolsListResult {
                    tools: self.dispatcher.list_tools(),
                };
                to_response(id, &result)
            }

            Methods::TOOLS_CALL => self.handle_tool_call(id, request.params).await,

            other => JsonRpcResponse::error(id, RpcError::method_not_found(other)),
        };

        Some(response)
    }

    async fn handle_tool_call(&self, id: Value, params: Value) -> JsonRpcResponse {
        let params: ToolCallParams = match serde_json::from_value(params) {
            Ok(p) => p,
            Err(e) => return JsonRpcResponse::error(id, RpcError::invalid_params(e.to_string())),
        };

        info!("Calling tool: {}", params.name);
        match self.dispatcher.call_tool(&params.name, &params.arguments).await {
            Ok(result) => to_response(id, &result),
            Err(e @ OutcallError::UnknownTool(_)) => {
                warn!("{}", e);
                JsonRpcResponse::error(id, RpcError::unknown_tool(e.to_string()))
            }
            Err(e) => JsonRpcResponse::error(id, RpcError::internal_error(e.to_string())),
        }
    }
}

fn to_response<T: Serialize>(id: Value, result: &T) -> JsonRpcResponse {
    match serde_json::to_value(result) {
        Ok(v) => JsonRpcResponse::success(id, v),
        Err(e) => JsonRpcResponse::error(
            id,
            RpcError::internal_error(format!("Serialization error: {}", e)),
        ),
    }
}
