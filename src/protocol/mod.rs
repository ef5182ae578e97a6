pub mod request;
pub mod response;

pub use request::{
    GetLexiconParams, InitializeParams, JsonRpcRequest, ResourceReadParams, RpcId,
    ToolCallParams, ValidateArtifactParams,
};
pub use response::{
    JsonRpcError, JsonRpcResponse, McpError, McpErrorCode, McpErrorResponse, ReadResourceResult,
    ResourceContents, ToolResult, ToolResultContent,
};
