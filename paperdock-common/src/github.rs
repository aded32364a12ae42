//! Repository cloning via git shell-out
//!
//! Explicit subprocess invocation with captured exit code and stderr;
//! nonzero exits surface as errors, never silently swallowed.

use std::path::Path;
use tokio::process::Command;
use tracing::{info, warn};

use crate::{Error, Result};

/// Clone `url` into `dest` with `git clone --depth 1`.
///
/// An existing clone at `dest` is replaced (last writer wins, matching
/// the paper-directory collision policy).
pub async fn clone_repo(url: &str, dest: &Path) -> Result<()> {
    if dest.exists() {
        warn!("replacing existing clone at {}", dest.display());
        tokio::fs::remove_dir_all(dest).await?;
    }

    info!("cloning {} into {}", url, dest.display());

    let output = Command::new("git")
        .args(["clone", "--depth", "1", url])
        .arg(dest)
        .output()
        .await
        .map_err(|e| Error::ArtifactFetch(format!("failed to run git: {}", e)))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(Error::ArtifactFetch(format!(
            "git clone of {} failed ({}): {}",
            url,
            output.status,
            stderr.trim()
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn clone_of_invalid_url_reports_stderr() {
        let tmp = tempfile::tempdir().unwrap();
        let dest = tmp.path().join("repo");
        let err = clone_repo("file:///nonexistent/paperdock-test-repo", &dest)
            .await
            .unwrap_err();
        assert!(matches!(err, Error::ArtifactFetch(_)));
    }
}
