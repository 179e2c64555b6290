//! Nix prefetch tooling wrappers
//!
//! Content hashes are computed by external tools: `nix-prefetch-github` for
//! repository trees, `nix-prefetch-url` for release archives, and
//! `nix hash to-sri` for converting legacy digests to the SRI format.

use serde::Deserialize;
use tokio::process::Command;

use crate::{Error, Result};

const REQUIRED_TOOLS: &[&str] = &["nix-prefetch-github", "nix-prefetch-url", "nix"];

/// Structured output of nix-prefetch-github
#[derive(Debug, Deserialize)]
struct PrefetchOutput {
    hash: String,
}

/// Check that every external tool is on PATH before any fetching starts.
pub fn ensure_tools() -> Result<()> {
    for &tool in REQUIRED_TOOLS {
        if which::which(tool).is_err() {
            return Err(Error::ToolMissing(tool));
        }
    }
    Ok(())
}

/// Run a command capturing stdout; a non-zero exit is an error.
async fn run_capture(program: &str, args: &[&str]) -> Result<Vec<u8>> {
    let output = Command::new(program).args(args).output().await?;

    if !output.status.success() {
        return Err(Error::CommandFailed {
            program: program.to_string(),
            status: output.status,
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        });
    }

    Ok(output.stdout)
}

/// Prefetch a GitHub repository tree and return its content hash.
///
/// `fetch_submodules` hashes the tree with its submodules checked out,
/// which is required for dependencies vendored that way.
pub async fn prefetch_github(
    owner: &str,
    repo: &str,
    rev: &str,
    fetch_submodules: bool,
) -> Result<String> {
    let mut args = vec![owner, repo, "--rev", rev];
    if fetch_submodules {
        args.push("--fetch-submodules");
    }

    let stdout = run_capture("nix-prefetch-github", &args).await?;
    let parsed: PrefetchOutput = serde_json::from_slice(&stdout)?;
    Ok(parsed.hash)
}

/// Prefetch a URL as an unpacked archive and return the legacy digest.
pub async fn prefetch_url_unpacked(url: &str) -> Result<String> {
    let stdout = run_capture("nix-prefetch-url", &[url, "--unpack"]).await?;
    Ok(String::from_utf8_lossy(&stdout).trim().to_string())
}

/// Convert a legacy digest to the self-describing SRI format.
pub async fn to_sri(hash_type: &str, digest: &str) -> Result<String> {
    let stdout = run_capture(
        "nix",
        &[
            "--extra-experimental-features",
            "nix-command",
            "hash",
            "to-sri",
            "--type",
            hash_type,
            digest,
        ],
    )
    .await?;
    Ok(String::from_utf8_lossy(&stdout).trim().to_string())
}
