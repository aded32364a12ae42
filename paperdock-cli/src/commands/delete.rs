//! `paperdock delete` - remove records and their downloaded files

use std::path::Path;

use paperdock_common::db::PaperStore;
use paperdock_common::{layout, Error};

use super::{collect_matching, confirm};

/// Delete one paper by id, or every paper under a tag.
///
/// Tag deletes show the matched set and ask for confirmation unless
/// `force` is set. Files on disk are removed before the records.
pub async fn run(
    store: &PaperStore,
    root: &Path,
    id: Option<&str>,
    tag: Option<&str>,
    force: bool,
) -> anyhow::Result<()> {
    match (id, tag) {
        (Some(id), _) => delete_one(store, root, id).await,
        (None, Some(tag)) => delete_tag(store, root, tag, force).await,
        (None, None) => anyhow::bail!("give a paper id or --tag"),
    }
}

async fn delete_one(store: &PaperStore, root: &Path, id: &str) -> anyhow::Result<()> {
    let record = store
        .get_by_id(id)
        .await?
        .ok_or_else(|| Error::NotFound(format!("paper {}", id)))?;

    layout::remove_paper_dir(root, &record.tag, &record.title);
    store.delete_by_id(id).await?;
    println!("Deleted: {} ({})", record.title, record.id);
    Ok(())
}

async fn delete_tag(store: &PaperStore, root: &Path, tag: &str, force: bool) -> anyhow::Result<()> {
    let records = collect_matching(store, &[], Some(tag)).await?;
    if records.is_empty() {
        println!("No papers tagged '{}'.", tag);
        return Ok(());
    }

    println!("Papers tagged '{}':", tag);
    for record in &records {
        println!("  {} {}", record.id, record.title);
    }

    if !force && !confirm("Delete these papers and their files?") {
        println!("Aborted.");
        return Ok(());
    }

    for record in &records {
        layout::remove_paper_dir(root, &record.tag, &record.title);
    }
    let deleted = store.delete_by_tag(tag).await?;
    println!("Deleted {} paper(s).", deleted);
    Ok(())
}
