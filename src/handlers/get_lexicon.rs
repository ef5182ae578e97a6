use crate::protocol::{GetLexiconParams, McpErrorCode, McpErrorResponse, ToolResult};
use crate::server::AppState;

/// Handle a `get_lexicon` tool call.
///
/// `refresh: true` always fetches and reports `cached: false`; otherwise
/// the shared cache path answers and `cached` reflects whether this call
/// had to fetch.
pub async fn handle(params: GetLexiconParams, state: &AppState) -> ToolResult {
    match state.lexicon.get(params.refresh).await {
        Ok(output) => match serde_json::to_string(&output) {
            Ok(json) => ToolResult::text(format!("{json}\n")),
            Err(e) => {
                eprintln!("Serialization failed: {e}");
                McpErrorResponse::new(McpErrorCode::InternalError, "Internal error").into()
            }
        },
        Err(err) => {
            eprintln!("Lexicon fetch failed: {err}");
            super::fetch_error(&err).into()
        }
    }
}
