//! Download flow: metadata, PDF, source tarball, BibTeX, optional clone

use std::path::Path;

use tracing::{info, warn};

use paperdock_common::arxiv::{self, ArxivClient};
use paperdock_common::db::PaperStore;
use paperdock_common::layout::{self, GITHUB_DIR_NAME, PDF_FILE_NAME, SOURCE_FILE_NAME};
use paperdock_common::models::{self, PaperRecord, DEFAULT_TAG};
use paperdock_common::{github, Result};

/// Fetch an arXiv paper end to end and store its record.
///
/// The record is only written once metadata and both artifacts are on
/// disk. A failed optional clone leaves the record in place with the
/// github URL set but no local path.
pub async fn download_paper(
    store: &PaperStore,
    root: &Path,
    input: &str,
    tag: Option<String>,
    github_url: Option<String>,
) -> Result<PaperRecord> {
    let id = arxiv::extract_identifier(input)?;
    let tag = tag.unwrap_or_else(|| DEFAULT_TAG.to_string());

    let client = ArxivClient::new()?;

    info!(%id, "fetching metadata");
    let metadata = client.fetch_metadata(&id).await?;

    let dir = layout::paper_dir(root, &tag, &metadata.title)?;
    let pdf_path = dir.join(PDF_FILE_NAME);
    let source_path = dir.join(SOURCE_FILE_NAME);

    info!(%id, path = %pdf_path.display(), "downloading pdf");
    client.download_pdf(&id, &pdf_path).await?;

    info!(%id, path = %source_path.display(), "downloading source");
    client.download_source(&id, &source_path).await?;

    // BibTeX is nice to have; a fetch failure does not abort the download.
    let bibtex = match client.fetch_bibtex(&id).await {
        Ok(text) => Some(text),
        Err(err) => {
            warn!(%id, %err, "bibtex fetch failed, continuing without it");
            None
        }
    };

    let record = PaperRecord {
        id: metadata.id.clone(),
        title: metadata.title.clone(),
        abstract_text: metadata.abstract_text.clone(),
        authors: metadata.authors.clone(),
        categories: metadata.categories.clone(),
        tag: tag.clone(),
        pdf_url: Some(arxiv::pdf_url(&id)),
        source_url: Some(arxiv::source_url(&id)),
        github_url: github_url.clone(),
        local_pdf_path: Some(pdf_path.to_string_lossy().into_owned()),
        local_source_path: Some(source_path.to_string_lossy().into_owned()),
        local_github_path: None,
        bibtex,
        date_added: models::now_timestamp(),
    };
    store.upsert(&record).await?;

    if let Some(url) = github_url {
        let github_dir = dir.join(GITHUB_DIR_NAME);
        info!(%id, %url, "cloning companion repository");
        match github::clone_repo(&url, &github_dir).await {
            Ok(()) => {
                let path = github_dir.to_string_lossy().into_owned();
                return store.set_github(&record.id, Some(&url), Some(&path)).await;
            }
            Err(err) => {
                warn!(%id, %err, "clone failed, record kept without local repo");
            }
        }
    }

    Ok(record)
}

/// `paperdock download` entry point.
pub async fn run(
    store: &PaperStore,
    root: &Path,
    input: &str,
    tag: Option<String>,
    github_url: Option<String>,
) -> anyhow::Result<()> {
    let record = download_paper(store, root, input, tag, github_url).await?;
    println!("Downloaded: {} ({})", record.title, record.id);
    println!("  tag:     {}", record.tag);
    if let Some(path) = &record.local_pdf_path {
        println!("  pdf:     {}", path);
    }
    if let Some(path) = &record.local_source_path {
        println!("  source:  {}", path);
    }
    if let Some(path) = &record.local_github_path {
        println!("  github:  {}", path);
    }
    Ok(())
}
