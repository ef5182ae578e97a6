pub mod get_lexicon;
pub mod lexicon_resource;
pub mod validate_artifact;

use crate::lexicon::FetchError;
use crate::protocol::{
    GetLexiconParams, JsonRpcError, JsonRpcRequest, JsonRpcResponse, McpErrorCode,
    McpErrorResponse, ResourceReadParams, ToolCallParams, ToolResult, ValidateArtifactParams,
};
use crate::schema::SchemaError;
use crate::server::AppState;

use lexicon_resource::{LEXICON_MIME_TYPE, LEXICON_RESOURCE_URI, LEXICON_RESOURCE_URI_ALIAS};

/// Instruction string advertised during `initialize`. The server only
/// answers read-only queries about Gemara artifacts.
pub const ADVISORY_DESCRIPTION: &str =
    "Advisory mode: Provides information about Gemara artifacts in the workspace (read-only)";

/// Dispatch a JSON-RPC request to the appropriate handler.
///
/// Returns `None` for notifications (no response required).
pub async fn dispatch(req: &JsonRpcRequest, state: &AppState) -> Option<JsonRpcResponse> {
    match req.method.as_str() {
        "initialize" => {
            let result = serde_json::json!({
                "protocolVersion": "2024-11-05",
                "capabilities": {
                    "tools": {},
                    "resources": {}
                },
                "serverInfo": {
                    "name": "gemara-mcp",
                    "title": "Gemara MCP",
                    "version": env!("CARGO_PKG_VERSION")
                },
                "instructions": ADVISORY_DESCRIPTION
            });
            Some(JsonRpcResponse::success(req.id.clone(), result))
        }

        "notifications/initialized" => None,

        "ping" => Some(JsonRpcResponse::success(req.id.clone(), serde_json::json!({}))),

        "tools/list" => {
            let result = serde_json::json!({
                "tools": [
                    {
                        "name": "get_lexicon",
                        "description": "Retrieve the Gemara Lexicon containing definitions of terms used in the Gemara model.",
                        "inputSchema": {
                            "type": "object",
                            "properties": {
                                "refresh": {
                                    "type": "boolean",
                                    "description": "Force refresh of lexicon cache (default: false)"
                                }
                            }
                        }
                    },
                    {
                        "name": "validate_gemara_artifact",
                        "description": "Validate a Gemara artifact YAML content against the Gemara schema module.",
                        "inputSchema": {
                            "type": "object",
                            "required": ["artifact_content", "definition"],
                            "properties": {
                                "artifact_content": {
                                    "type": "string",
                                    "description": "YAML content of the Gemara artifact to validate"
                                },
                                "definition": {
                                    "type": "string",
                                    "description": "Schema definition name to validate against (e.g., '#ControlCatalog', '#GuidanceDocument', '#Policy', '#EvaluationLog')"
                                }
                            }
                        }
                    }
                ]
            });
            Some(JsonRpcResponse::success(req.id.clone(), result))
        }

        "resources/list" => {
            let result = serde_json::json!({
                "resources": [
                    {
                        "name": "lexicon",
                        "uri": LEXICON_RESOURCE_URI,
                        "title": "Gemara Lexicon",
                        "description": "The Gemara Lexicon containing definitions of terms used in the Gemara framework.",
                        "mimeType": LEXICON_MIME_TYPE
                    },
                    {
                        "name": "lexicon",
                        "uri": LEXICON_RESOURCE_URI_ALIAS,
                        "title": "Gemara Lexicon",
                        "description": "The Gemara Lexicon containing definitions of terms used in the Gemara framework.",
                        "mimeType": LEXICON_MIME_TYPE
                    }
                ]
            });
            Some(JsonRpcResponse::success(req.id.clone(), result))
        }

        "resources/read" => {
            let params: ResourceReadParams = match &req.params {
                Some(v) => match serde_json::from_value(v.clone()) {
                    Ok(p) => p,
                    Err(e) => {
                        return Some(JsonRpcResponse::error(
                            req.id.clone(),
                            JsonRpcError::invalid_params(format!(
                                "Invalid resources/read params: {e}"
                            )),
                        ));
                    }
                },
                None => ResourceReadParams { uri: None },
            };

            // Both the canonical URI and the alias resolve to the lexicon.
            let known = matches!(
                params.uri.as_deref(),
                None | Some(LEXICON_RESOURCE_URI) | Some(LEXICON_RESOURCE_URI_ALIAS)
            );
            if !known {
                let uri = params.uri.unwrap_or_default();
                return Some(JsonRpcResponse::error(
                    req.id.clone(),
                    McpErrorResponse::new(
                        McpErrorCode::ResourceUnknown,
                        format!("Unknown resource URI: {uri}"),
                    )
                    .into(),
                ));
            }

            match lexicon_resource::handle(params.uri, state).await {
                Ok(result) => {
                    let value = serde_json::to_value(&result)
                        .expect("ReadResourceResult must serialize to JSON Value");
                    Some(JsonRpcResponse::success(req.id.clone(), value))
                }
                Err(mcp_err) => Some(JsonRpcResponse::error(req.id.clone(), mcp_err.into())),
            }
        }

        "tools/call" => {
            let params: ToolCallParams = match &req.params {
                Some(v) => match serde_json::from_value(v.clone()) {
                    Ok(p) => p,
                    Err(e) => {
                        return Some(JsonRpcResponse::error(
                            req.id.clone(),
                            JsonRpcError::invalid_params(format!(
                                "Invalid tools/call params: {e}"
                            )),
                        ));
                    }
                },
                None => {
                    return Some(JsonRpcResponse::error(
                        req.id.clone(),
                        JsonRpcError::invalid_params("Missing params for tools/call"),
                    ));
                }
            };

            let tool_result = dispatch_tool_call(&params, state).await;
            let result_json = serde_json::to_value(&tool_result)
                .expect("ToolResult must serialize to JSON Value");
            Some(JsonRpcResponse::success(req.id.clone(), result_json))
        }

        _ => Some(JsonRpcResponse::error(
            req.id.clone(),
            JsonRpcError::method_not_found(&req.method),
        )),
    }
}

async fn dispatch_tool_call(params: &ToolCallParams, state: &AppState) -> ToolResult {
    match params.name.as_str() {
        // Arguments are optional here: `refresh` defaults to false.
        "get_lexicon" => {
            let lexicon_params: GetLexiconParams = match &params.arguments {
                Some(v) => match serde_json::from_value(v.clone()) {
                    Ok(p) => p,
                    Err(e) => {
                        return ToolResult::error(format!(
                            "Invalid arguments for get_lexicon: {e}"
                        ));
                    }
                },
                None => GetLexiconParams::default(),
            };
            get_lexicon::handle(lexicon_params, state).await
        }

        "validate_gemara_artifact" => {
            let validate_params: ValidateArtifactParams = match &params.arguments {
                Some(v) => match serde_json::from_value(v.clone()) {
                    Ok(p) => p,
                    Err(e) => {
                        return ToolResult::error(format!(
                            "Invalid arguments for validate_gemara_artifact: {e}"
                        ));
                    }
                },
                None => ValidateArtifactParams::default(),
            };
            validate_artifact::handle(validate_params, state).await
        }

        _ => ToolResult::error(format!("Unknown tool: {}", params.name)),
    }
}

/// Map a fetch failure into the MCP error envelope, preserving the
/// network / upstream-status / decode distinction.
pub(crate) fn fetch_error(err: &FetchError) -> McpErrorResponse {
    let code = match err {
        FetchError::Request(_) | FetchError::Transport(_) | FetchError::Body(_) => {
            McpErrorCode::TransportError
        }
        FetchError::Status(_) => McpErrorCode::UpstreamStatus,
        FetchError::Decode(_) => McpErrorCode::DecodeError,
    };
    McpErrorResponse::new(code, err.to_string())
}

/// Map a schema-resolution failure into the MCP error envelope.
pub(crate) fn schema_error(err: &SchemaError) -> McpErrorResponse {
    McpErrorResponse::new(McpErrorCode::SchemaUnavailable, err.to_string())
}
