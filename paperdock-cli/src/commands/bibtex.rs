//! `paperdock bibtex` - export stored BibTeX entries

use std::path::Path;

use tracing::warn;

use paperdock_common::db::PaperStore;

use super::collect_matching;

/// Concatenate the stored BibTeX entries of matching papers, to stdout
/// or a file. Records without a stored entry are skipped with a warning.
pub async fn run(
    store: &PaperStore,
    keywords: &[String],
    tag: Option<&str>,
    all: bool,
    output: Option<&Path>,
) -> anyhow::Result<()> {
    if keywords.is_empty() && tag.is_none() && !all {
        anyhow::bail!("give keywords, --tag, or --all");
    }

    let records = collect_matching(store, keywords, tag).await?;
    if records.is_empty() {
        anyhow::bail!("no papers matched");
    }

    let mut entries = Vec::new();
    for record in &records {
        match &record.bibtex {
            Some(bibtex) => entries.push(bibtex.trim().to_string()),
            None => warn!(id = %record.id, "no bibtex stored, skipping"),
        }
    }
    if entries.is_empty() {
        anyhow::bail!("none of the matched papers have stored bibtex");
    }

    let text = entries.join("\n\n") + "\n";
    match output {
        Some(path) => {
            std::fs::write(path, &text)?;
            println!(
                "Wrote {} entr{} to {}",
                entries.len(),
                if entries.len() == 1 { "y" } else { "ies" },
                path.display()
            );
        }
        None => print!("{}", text),
    }
    Ok(())
}
