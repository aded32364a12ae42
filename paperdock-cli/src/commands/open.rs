//! `paperdock open` / `paperdock open-kb` - open directories in the
//! desktop file manager

use std::path::Path;

use paperdock_common::db::PaperStore;
use paperdock_common::layout::{self, GITHUB_DIR_NAME, SOURCE_FILE_NAME};
use paperdock_common::Error;

/// What part of a paper's directory to open
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OpenTarget {
    /// The paper directory itself (PDF and tarball live here)
    Dir,
    /// The downloaded source tarball
    Source,
    /// The cloned companion repository
    Github,
}

/// Open a paper's directory (or a part of it) with the platform opener.
pub async fn run(
    store: &PaperStore,
    root: &Path,
    id: &str,
    target: OpenTarget,
) -> anyhow::Result<()> {
    let record = store
        .get_by_id(id)
        .await?
        .ok_or_else(|| Error::NotFound(format!("paper {}", id)))?;

    let dir = layout::paper_dir_path(root, &record.tag, &record.title);
    let path = match target {
        OpenTarget::Dir => dir,
        OpenTarget::Source => dir.join(SOURCE_FILE_NAME),
        OpenTarget::Github => dir.join(GITHUB_DIR_NAME),
    };

    open_path(&path)
}

/// Open the root folder itself.
pub fn run_open_root(root: &Path) -> anyhow::Result<()> {
    open_path(root)
}

fn open_path(path: &Path) -> anyhow::Result<()> {
    if !path.exists() {
        anyhow::bail!("path does not exist: {}", path.display());
    }

    let opener = if cfg!(target_os = "macos") {
        "open"
    } else if cfg!(target_os = "windows") {
        "explorer"
    } else {
        "xdg-open"
    };

    let status = std::process::Command::new(opener).arg(path).status()?;
    if !status.success() {
        anyhow::bail!("{} exited with {}", opener, status);
    }
    Ok(())
}
