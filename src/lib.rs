//! MCP Config Generator
//!
//! Turns an `mcp.json` describing named MCP servers into the two files the
//! containerized agent expects: a verbatim copy of the config and a list of
//! pre-computed approval tokens. A separate deploy module automates pushing
//! the container image to GHCR.

pub mod approvals;
pub mod config;
pub mod deploy;
pub mod generator;
pub mod hashing;

pub use approvals::{approval_token, derive_approvals, WORKSPACE_PATH};
pub use config::{LoadedConfig, McpConfig};
pub use deploy::{DeployError, ImageCoordinate, RepoInfo};
pub use generator::{generate, GeneratedFiles, GeneratorError, APPROVALS_SUBPATH, CONFIG_SUBPATH};
pub use hashing::{canonical_json, fingerprint, sha256_hex};
