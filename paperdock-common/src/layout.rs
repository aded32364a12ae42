//! Filesystem layout for downloaded papers
//!
//! Artifacts live under `<root>/<tag>/<sanitized title>/`. Distinct
//! papers whose sanitized titles coincide share a directory; last
//! writer wins.

use std::path::{Path, PathBuf};
use tracing::warn;

use crate::Result;

/// PDF file name inside a paper directory
pub const PDF_FILE_NAME: &str = "paper.pdf";
/// Source tarball name inside a paper directory
pub const SOURCE_FILE_NAME: &str = "source.tar.gz";
/// Clone target directory name inside a paper directory
pub const GITHUB_DIR_NAME: &str = "github";

/// Replace path-illegal characters with spaces and collapse whitespace
pub fn sanitize_title(title: &str) -> String {
    let replaced: String = title
        .chars()
        .map(|c| {
            if c.is_control() || matches!(c, '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|')
            {
                ' '
            } else {
                c
            }
        })
        .collect();

    let collapsed = replaced.split_whitespace().collect::<Vec<_>>().join(" ");
    if collapsed.is_empty() {
        "untitled".to_string()
    } else {
        collapsed
    }
}

/// Path of a paper's directory, without creating it
pub fn paper_dir_path(root: &Path, tag: &str, title: &str) -> PathBuf {
    root.join(tag).join(sanitize_title(title))
}

/// Ensure `<root>/<tag>/<sanitized title>` exists and return it
pub fn paper_dir(root: &Path, tag: &str, title: &str) -> Result<PathBuf> {
    let dir = paper_dir_path(root, tag, title);
    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}

/// Best-effort removal of a paper's directory.
///
/// An already-missing directory or a failed delete is logged and
/// ignored; record deletion must not fail over disk cleanup.
pub fn remove_paper_dir(root: &Path, tag: &str, title: &str) {
    let dir = paper_dir_path(root, tag, title);
    if !dir.exists() {
        return;
    }
    if let Err(e) = std::fs::remove_dir_all(&dir) {
        warn!("failed to remove {}: {}", dir.display(), e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sanitize_replaces_illegal_characters() {
        assert_eq!(
            sanitize_title("Attention: Is/All\\You*Need?"),
            "Attention Is All You Need"
        );
    }

    #[test]
    fn sanitize_collapses_whitespace() {
        assert_eq!(sanitize_title("  Deep \t\n  Nets  "), "Deep Nets");
    }

    #[test]
    fn sanitize_empty_falls_back() {
        assert_eq!(sanitize_title("///"), "untitled");
        assert_eq!(sanitize_title(""), "untitled");
    }

    #[test]
    fn paper_dir_created_under_tag() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = paper_dir(tmp.path(), "ml", "Deep Nets: A Survey").unwrap();
        assert!(dir.is_dir());
        assert!(dir.ends_with("ml/Deep Nets A Survey"));
    }

    #[test]
    fn remove_missing_dir_is_silent() {
        let tmp = tempfile::tempdir().unwrap();
        remove_paper_dir(tmp.path(), "nope", "Nothing Here");
    }
}
