//! GHCR Deploy Front End
//!
//! Flag-less: configuration comes from the environment (GITHUB_TOKEN,
//! GHCR_TOKEN, GITHUB_ACTOR, GHCR_TAG).

use std::process::ExitCode;

use tracing_subscriber::EnvFilter;

use mcpgen_core::deploy;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    match deploy::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Deployment failed: {}", e);
            ExitCode::FAILURE
        }
    }
}
