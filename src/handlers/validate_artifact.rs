use crate::protocol::{McpErrorCode, McpErrorResponse, ToolResult, ValidateArtifactParams};
use crate::server::AppState;

/// Handle a `validate_gemara_artifact` tool call.
///
/// Input errors are rejected before the schema engine is touched.
/// Validation failures (malformed YAML, schema violations) come back as
/// normal results with `valid: false`; only schema-resolution problems
/// surface as errors.
pub async fn handle(params: ValidateArtifactParams, state: &AppState) -> ToolResult {
    if params.artifact_content.is_empty() {
        return McpErrorResponse::new(McpErrorCode::InvalidInput, "artifact_content is required")
            .into();
    }
    if params.definition.is_empty() {
        return McpErrorResponse::new(McpErrorCode::InvalidInput, "definition is required").into();
    }

    // Validation is sync CPU work; run it off the protocol loop.
    let engine = state.schema.clone();
    let timeout = state.config.tool_timeout;
    let task = tokio::task::spawn_blocking(move || {
        engine.validate(&params.artifact_content, &params.definition)
    });

    match tokio::time::timeout(timeout, task).await {
        Ok(Ok(Ok(outcome))) => match serde_json::to_string(&outcome) {
            Ok(json) => ToolResult::text(format!("{json}\n")),
            Err(e) => {
                eprintln!("Serialization failed: {e}");
                McpErrorResponse::new(McpErrorCode::InternalError, "Internal error").into()
            }
        },
        Ok(Ok(Err(schema_err))) => {
            eprintln!("Schema resolution failed: {schema_err}");
            super::schema_error(&schema_err).into()
        }
        Ok(Err(join_err)) => {
            eprintln!("Task join error: {join_err}");
            McpErrorResponse::new(McpErrorCode::InternalError, "Internal error").into()
        }
        Err(_) => {
            eprintln!("Validation timed out after {} seconds", timeout.as_secs());
            McpErrorResponse::new(McpErrorCode::InternalError, "Operation timed out").into()
        }
    }
}
