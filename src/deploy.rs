//! Registry Deploy Automation
//!
//! Builds and pushes the container image to GHCR. Token detection order:
//! 1. GITHUB_TOKEN (auto-provided in GitHub Actions)
//! 2. GHCR_TOKEN (optional override for local runs)
//! 3. `gh auth token` fallback
//!
//! Pure process orchestration: every stage shells out, and the first
//! non-zero exit aborts the whole sequence.

use once_cell::sync::Lazy;
use regex::Regex;
use std::env;
use std::io::Write;
use std::process::{Command, Stdio};
use thiserror::Error;
use tracing::info;

pub const REGISTRY: &str = "ghcr.io";

/// CI-injected token (GitHub Actions).
pub const CI_TOKEN_VAR: &str = "GITHUB_TOKEN";
/// Operator-supplied override for local deploys.
pub const OVERRIDE_TOKEN_VAR: &str = "GHCR_TOKEN";
/// Username override; falls back to the repo owner.
pub const ACTOR_VAR: &str = "GITHUB_ACTOR";
/// Image tag override; defaults to `latest`.
pub const TAG_VAR: &str = "GHCR_TAG";

/// Matches https (`https://github.com/owner/repo.git`) and ssh
/// (`git@github.com:owner/repo.git`) remotes, `.git` suffix optional.
static GITHUB_REMOTE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"github\.com[/:]([^/]+)/([^/]+?)(?:\.git)?$").unwrap());

#[derive(Debug, Error)]
pub enum DeployError {
    #[error(
        "Failed to get GitHub token. Please set GHCR_TOKEN or run: gh auth login --scopes write:packages"
    )]
    NoToken,

    #[error("Failed to get repo info from git. Make sure you are in a git repository.")]
    NoRemote,

    #[error("Could not parse GitHub URL: {0}")]
    RemoteParse(String),

    #[error("{0} failed")]
    Stage(&'static str),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoInfo {
    pub owner: String,
    pub repo: String,
}

/// Fully qualified image reference on the registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageCoordinate {
    pub owner: String,
    pub repo: String,
    pub tag: String,
}

impl ImageCoordinate {
    pub fn new(info: &RepoInfo, tag: impl Into<String>) -> Self {
        Self {
            owner: info.owner.clone(),
            repo: info.repo.clone(),
            tag: tag.into(),
        }
    }

    pub fn name(&self) -> String {
        format!("{}/{}/{}:{}", REGISTRY, self.owner, self.repo, self.tag)
    }
}

/// Extract owner/repo from a git remote URL.
pub fn parse_github_remote(url: &str) -> Option<RepoInfo> {
    let caps = GITHUB_REMOTE.captures(url.trim())?;
    Some(RepoInfo {
        owner: caps[1].to_string(),
        repo: caps[2].to_string(),
    })
}

/// Run a command and return its trimmed stdout, or None on spawn failure,
/// non-zero exit, or empty output.
fn capture_stdout(program: &str, args: &[&str]) -> Option<String> {
    let output = Command::new(program)
        .args(args)
        .stderr(Stdio::null())
        .output()
        .ok()?;
    if !output.status.success() {
        return None;
    }
    let text = String::from_utf8_lossy(&output.stdout).trim().to_string();
    (!text.is_empty()).then_some(text)
}

/// Resolve the registry token from the documented source order.
pub fn resolve_token() -> Result<String, DeployError> {
    for var in [CI_TOKEN_VAR, OVERRIDE_TOKEN_VAR] {
        if let Ok(token) = env::var(var) {
            if !token.is_empty() {
                return Ok(token);
            }
        }
    }
    capture_stdout("gh", &["auth", "token"]).ok_or(DeployError::NoToken)
}

/// Owner and repo of the `origin` remote of the current repository.
pub fn repo_info() -> Result<RepoInfo, DeployError> {
    let url =
        capture_stdout("git", &["remote", "get-url", "origin"]).ok_or(DeployError::NoRemote)?;
    parse_github_remote(&url).ok_or(DeployError::RemoteParse(url))
}

/// Build, authenticate, and push. Aborts on the first failing stage.
pub fn run() -> Result<(), DeployError> {
    info!("starting deployment to {}", REGISTRY);

    let token = resolve_token()?;
    let info = repo_info()?;
    let username = env::var(ACTOR_VAR).unwrap_or_else(|_| info.owner.clone());
    let tag = env::var(TAG_VAR).unwrap_or_else(|_| "latest".to_string());
    let image = ImageCoordinate::new(&info, tag).name();

    info!(image = %image, "building Docker image");
    run_stage(
        "Docker build",
        Command::new("docker").args(["build", "-t", &image, "."]),
    )?;

    info!(username = %username, "logging in to {}", REGISTRY);
    login(&username, &token)?;

    info!(image = %image, "pushing image");
    run_stage("Docker push", Command::new("docker").args(["push", &image]))?;

    info!(image = %image, "deployed");
    Ok(())
}

/// Run a stage with inherited stdio so build/push progress is visible.
fn run_stage(stage: &'static str, cmd: &mut Command) -> Result<(), DeployError> {
    let status = cmd.status()?;
    if !status.success() {
        return Err(DeployError::Stage(stage));
    }
    Ok(())
}

/// `docker login` with the token on stdin so it never appears in argv.
fn login(username: &str, token: &str) -> Result<(), DeployError> {
    let mut child = Command::new("docker")
        .args(["login", REGISTRY, "-u", username, "--password-stdin"])
        .stdin(Stdio::piped())
        .spawn()?;

    if let Some(mut stdin) = child.stdin.take() {
        stdin.write_all(token.as_bytes())?;
        stdin.write_all(b"\n")?;
    }

    let status = child.wait()?;
    if !status.success() {
        return Err(DeployError::Stage("Docker login"));
    }
    Ok(())
}
