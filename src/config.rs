//! Connector Config Model - Loading and Shape Validation

use serde_json::{Map, Value};
use std::fs;
use std::path::Path;

use crate::generator::GeneratorError;

/// Required top-level field of the input file.
pub const SERVERS_FIELD: &str = "mcpServers";

/// The validated server mapping.
///
/// Descriptors are open-ended: each entry is kept as an opaque JSON value so
/// arbitrary fields pass through to the digest step untouched, in their
/// original key order.
#[derive(Debug, Clone)]
pub struct McpConfig {
    pub servers: Map<String, Value>,
}

impl McpConfig {
    pub fn len(&self) -> usize {
        self.servers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.servers.is_empty()
    }
}

/// Validated config plus the raw text it was parsed from.
///
/// The raw text is what gets copied to the output: re-serializing the parsed
/// tree could alter formatting, and the copy must be byte-identical.
#[derive(Debug, Clone)]
pub struct LoadedConfig {
    pub config: McpConfig,
    pub raw: String,
}

/// Read and validate the config at `path`. The input file is never modified.
pub fn load(path: &Path) -> Result<LoadedConfig, GeneratorError> {
    let raw = fs::read_to_string(path)?;
    let config = parse(&raw)?;
    Ok(LoadedConfig { config, raw })
}

/// Parse raw text and assert the required `mcpServers` object is present.
/// The mapping may be empty.
pub fn parse(raw: &str) -> Result<McpConfig, GeneratorError> {
    let value: Value =
        serde_json::from_str(raw).map_err(|e| GeneratorError::Parse(e.to_string()))?;

    let servers = value
        .get(SERVERS_FIELD)
        .and_then(Value::as_object)
        .ok_or(GeneratorError::Validation)?;

    Ok(McpConfig {
        servers: servers.clone(),
    })
}
