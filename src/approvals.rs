//! Approval Token Derivation
//!
//! One token per server entry, of the form `<name>-<fingerprint>`. The
//! fingerprint covers the descriptor as the containerized agent will see it,
//! so the token asserts "this exact config, in that execution context, has
//! been approved".

use serde::Serialize;
use serde_json::Value;

use crate::config::McpConfig;
use crate::hashing::fingerprint;

/// Working directory of the agent inside the container. Every approval
/// digest embeds this marker, NOT the actual output directory: the agent
/// computes its project identifier from where it runs, which is always
/// /workspace in the image.
///
/// Compatibility-sensitive: changing this invalidates every previously
/// generated approval token.
pub const WORKSPACE_PATH: &str = "/workspace";

/// Digest input for one server entry. Field order is part of the wire
/// contract: `path` before `server`.
#[derive(Debug, Serialize)]
struct ApprovalRecord<'a> {
    path: &'static str,
    server: &'a Value,
}

/// Token for a single named server config.
pub fn approval_token(name: &str, server: &Value) -> Result<String, serde_json::Error> {
    let record = ApprovalRecord {
        path: WORKSPACE_PATH,
        server,
    };
    Ok(format!("{}-{}", name, fingerprint(&record)?))
}

/// Derive one token per server, in the mapping's entry order. No dedup,
/// no sorting.
pub fn derive_approvals(config: &McpConfig) -> Result<Vec<String>, serde_json::Error> {
    config
        .servers
        .iter()
        .map(|(name, server)| approval_token(name, server))
        .collect()
}
