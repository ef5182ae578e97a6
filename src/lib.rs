//! MCP server for the Gemara framework.
//!
//! Exposes the `get_lexicon` and `validate_gemara_artifact` tools plus the
//! Gemara Lexicon resource over JSON-RPC 2.0 stdio transport, compatible
//! with any MCP-aware AI agent. The server is advisory: it answers
//! read-only queries about Gemara artifacts and never mutates anything.
//!
//! See <https://gemara.openssf.org> for the Gemara model itself.

pub mod config;
pub mod handlers;
pub mod lexicon;
pub mod protocol;
pub mod server;

pub mod schema;
