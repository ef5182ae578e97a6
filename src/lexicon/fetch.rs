use serde::{Deserialize, Serialize};

/// A single term in the Gemara Lexicon.
///
/// Terms are passed through exactly as published: ordering is preserved
/// and duplicate headwords are not collapsed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LexiconEntry {
    pub term: String,
    pub definition: String,
    #[serde(default)]
    pub references: Vec<String>,
}

/// Failure modes of a lexicon fetch.
///
/// Variants distinguish where in the request lifecycle the failure
/// occurred so callers can tell network trouble from upstream trouble
/// from a malformed document.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("failed to create request: {0}")]
    Request(#[source] reqwest::Error),
    #[error("failed to fetch lexicon: {0}")]
    Transport(#[source] reqwest::Error),
    #[error("unexpected status code: {0}")]
    Status(u16),
    #[error("failed to read response body: {0}")]
    Body(#[source] reqwest::Error),
    #[error("failed to parse lexicon YAML: {0}")]
    Decode(#[from] serde_yaml::Error),
}

/// Fetch the lexicon document from `url` and decode it.
///
/// Issues a single GET with the client's configured deadline applied to
/// the whole request. Any non-200 status is an error. No retries; the
/// caller owns retry policy. Does not touch the cache.
pub async fn fetch_lexicon(
    client: &reqwest::Client,
    url: &str,
) -> Result<Vec<LexiconEntry>, FetchError> {
    let request = client.get(url).build().map_err(FetchError::Request)?;

    let response = client
        .execute(request)
        .await
        .map_err(FetchError::Transport)?;

    let status = response.status();
    if status != reqwest::StatusCode::OK {
        return Err(FetchError::Status(status.as_u16()));
    }

    let body = response.bytes().await.map_err(FetchError::Body)?;

    let entries: Vec<LexiconEntry> = serde_yaml::from_slice(&body)?;
    Ok(entries)
}
