use crate::protocol::{McpErrorCode, McpErrorResponse, ReadResourceResult, ResourceContents};
use crate::server::AppState;

/// Canonical URI of the lexicon resource.
pub const LEXICON_RESOURCE_URI: &str = "https://gemara.openssf.org/model/02-definitions";

/// Short alias accepted alongside the canonical URI.
pub const LEXICON_RESOURCE_URI_ALIAS: &str = "gemara://lexicon";

/// The lexicon resource is always served as JSON, whatever the source
/// document's format.
pub const LEXICON_MIME_TYPE: &str = "application/json";

/// Handle a `resources/read` of the lexicon.
///
/// Serves the cached entry list, fetching first when the cache is empty
/// or stale. The response echoes the requested URI (canonical when the
/// request carried none).
pub async fn handle(
    requested_uri: Option<String>,
    state: &AppState,
) -> Result<ReadResourceResult, McpErrorResponse> {
    let uri = requested_uri.unwrap_or_else(|| LEXICON_RESOURCE_URI.to_string());

    let entries = state.lexicon.read().await.map_err(|err| {
        eprintln!("Lexicon fetch failed: {err}");
        super::fetch_error(&err)
    })?;

    let text = serde_json::to_string(&entries).map_err(|e| {
        eprintln!("Serialization failed: {e}");
        McpErrorResponse::new(McpErrorCode::InternalError, "Internal error")
    })?;

    Ok(ReadResourceResult {
        contents: vec![ResourceContents {
            uri,
            mime_type: LEXICON_MIME_TYPE.to_string(),
            text,
        }],
    })
}
