use std::path::PathBuf;
use std::time::Duration;

/// Canonical location of the published lexicon document.
pub const DEFAULT_LEXICON_URL: &str =
    "https://raw.githubusercontent.com/gemaraproj/gemara/main/docs/lexicon.yaml";

/// Default deadline for tool operations, including the lexicon fetch (30 seconds).
const DEFAULT_TOOL_TIMEOUT_SECS: u64 = 30;

/// Default lexicon cache TTL (24 hours; the lexicon changes infrequently).
const DEFAULT_LEXICON_TTL_SECS: u64 = 24 * 60 * 60;

/// Server configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub lexicon_url: String,
    pub tool_timeout: Duration,
    pub lexicon_ttl: Duration,
    pub schema_module: Option<PathBuf>,
}

impl ServerConfig {
    /// Load configuration from environment.
    ///
    /// - `GEMARA_LEXICON_URL` (optional) — lexicon source override
    /// - `GEMARA_TOOL_TIMEOUT_SECS` (optional, default 30) — max seconds per tool call
    /// - `GEMARA_LEXICON_TTL_SECS` (optional, default 86400) — lexicon cache TTL
    /// - `GEMARA_SCHEMA_MODULE` (optional) — path to a schema module file
    ///   overriding the bundled snapshot
    pub fn from_env() -> Result<Self, String> {
        let lexicon_url = std::env::var("GEMARA_LEXICON_URL")
            .unwrap_or_else(|_| DEFAULT_LEXICON_URL.to_string());

        let tool_timeout_secs = match std::env::var("GEMARA_TOOL_TIMEOUT_SECS") {
            Ok(val) => val
                .parse::<u64>()
                .map_err(|_| "GEMARA_TOOL_TIMEOUT_SECS must be a positive integer".to_string())?,
            Err(_) => DEFAULT_TOOL_TIMEOUT_SECS,
        };

        let lexicon_ttl_secs = match std::env::var("GEMARA_LEXICON_TTL_SECS") {
            Ok(val) => val
                .parse::<u64>()
                .map_err(|_| "GEMARA_LEXICON_TTL_SECS must be a positive integer".to_string())?,
            Err(_) => DEFAULT_LEXICON_TTL_SECS,
        };

        let schema_module = std::env::var("GEMARA_SCHEMA_MODULE").ok().map(PathBuf::from);

        Ok(Self {
            lexicon_url,
            tool_timeout: Duration::from_secs(tool_timeout_secs),
            lexicon_ttl: Duration::from_secs(lexicon_ttl_secs),
            schema_module,
        })
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            lexicon_url: DEFAULT_LEXICON_URL.to_string(),
            tool_timeout: Duration::from_secs(DEFAULT_TOOL_TIMEOUT_SECS),
            lexicon_ttl: Duration::from_secs(DEFAULT_LEXICON_TTL_SECS),
            schema_module: None,
        }
    }
}
