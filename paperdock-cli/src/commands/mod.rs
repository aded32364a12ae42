//! CLI command implementations
//!
//! Each subcommand lives in its own module; shared helpers live here.

use std::io::{self, BufRead, Write};

use paperdock_common::db::PaperStore;
use paperdock_common::models::PaperRecord;
use paperdock_common::Result;

pub mod bibtex;
pub mod clean;
pub mod delete;
pub mod download;
pub mod list;
pub mod open;
pub mod web;

/// Page size used when walking the full result set of a filter
const COLLECT_CHUNK: i64 = 200;

/// Collect every record matching the given keywords and tag filter,
/// paging through the store in chunks.
pub async fn collect_matching(
    store: &PaperStore,
    keywords: &[String],
    tag: Option<&str>,
) -> Result<Vec<PaperRecord>> {
    let mut records = Vec::new();
    let mut page = 1;
    loop {
        let chunk = store.search(keywords, tag, page, COLLECT_CHUNK).await?;
        let done = (chunk.items.len() as i64) < COLLECT_CHUNK;
        records.extend(chunk.items);
        if done {
            break;
        }
        page += 1;
    }
    Ok(records)
}

/// Prompt the user for a yes/no confirmation on stdin. Defaults to no.
pub fn confirm(prompt: &str) -> bool {
    print!("{} [y/N] ", prompt);
    let _ = io::stdout().flush();

    let mut line = String::new();
    if io::stdin().lock().read_line(&mut line).is_err() {
        return false;
    }
    matches!(line.trim(), "y" | "Y" | "yes")
}
