//! `paperdock clean` - wipe the root folder and reset the database

use std::path::Path;

use tracing::warn;

use paperdock_common::config::DB_FILE_NAME;
use paperdock_common::db::PaperStore;

use super::confirm;

/// Remove every downloaded artifact and clear the papers table.
///
/// The database files themselves are left in place (including the WAL
/// and shm sidecars) so the open pool stays valid.
pub async fn run(store: &PaperStore, root: &Path, force: bool) -> anyhow::Result<()> {
    let count = store.count().await?;
    println!(
        "This removes all downloaded files under {} and deletes {} record(s).",
        root.display(),
        count
    );

    if !force && !confirm("Proceed?") {
        println!("Aborted.");
        return Ok(());
    }

    if root.is_dir() {
        for entry in std::fs::read_dir(root)? {
            let entry = entry?;
            let name = entry.file_name();
            if name.to_string_lossy().starts_with(DB_FILE_NAME) {
                continue;
            }
            let path = entry.path();
            let removed = if path.is_dir() {
                std::fs::remove_dir_all(&path)
            } else {
                std::fs::remove_file(&path)
            };
            if let Err(err) = removed {
                warn!(path = %path.display(), %err, "failed to remove");
            }
        }
    }

    let deleted = store.clear().await?;
    println!("Removed {} record(s).", deleted);
    Ok(())
}
