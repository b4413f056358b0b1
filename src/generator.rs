//! Generation Pipeline - Single Entry Point
//!
//! CRITICAL: generate MUST validate before writing. A config that fails to
//! parse or validate produces no output files at all, and the approvals file
//! is never written if the copy step failed.

use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::approvals::derive_approvals;
use crate::config::{self, LoadedConfig};

/// Relative path of the verbatim config copy under the output root.
pub const CONFIG_SUBPATH: &str = ".cursor/mcp.json";

/// Relative path of the approvals list under the output root.
pub const APPROVALS_SUBPATH: &str = ".cursor/projects/workspace/mcp-approvals.json";

#[derive(Debug, Error)]
pub enum GeneratorError {
    #[error("Failed to parse mcp.json: {0}")]
    Parse(String),

    #[error("Invalid mcp.json: missing or invalid 'mcpServers' field")]
    Validation,

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Paths of the two generated artifacts, for display by the CLI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedFiles {
    pub config_path: PathBuf,
    pub approvals_path: PathBuf,
}

/// Generate both artifacts under `output_dir` from the config at `input_file`.
pub fn generate(input_file: &Path, output_dir: &Path) -> Result<GeneratedFiles, GeneratorError> {
    let loaded = config::load(input_file)?;
    write_artifacts(&loaded, output_dir)
}

/// Materialize an already-loaded config: prepare directories, write the
/// verbatim copy, then derive and write the approvals list. Existing files
/// at either path are overwritten.
pub fn write_artifacts(
    loaded: &LoadedConfig,
    output_dir: &Path,
) -> Result<GeneratedFiles, GeneratorError> {
    let config_path = output_dir.join(CONFIG_SUBPATH);
    let approvals_path = output_dir.join(APPROVALS_SUBPATH);

    ensure_parent(&config_path)?;
    ensure_parent(&approvals_path)?;

    // Verbatim byte copy of the input, not a re-serialization.
    fs::write(&config_path, &loaded.raw)?;

    let approvals = derive_approvals(&loaded.config)?;
    let body = format!("{}\n", serde_json::to_string_pretty(&approvals)?);
    fs::write(&approvals_path, body)?;

    Ok(GeneratedFiles {
        config_path,
        approvals_path,
    })
}

/// mkdir -p semantics; safe to call when the directories already exist.
fn ensure_parent(path: &Path) -> Result<(), GeneratorError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    Ok(())
}
