//! arXiv API client
//!
//! Fetches paper metadata from arXiv's Atom feed API
//! (http://export.arxiv.org/api/query) and downloads the binary
//! artifacts (PDF, source tarball) plus the exported BibTeX entry.
//! The Atom entry fields are mined with regular expressions; arXiv's
//! feed is stable enough that this holds up in practice.

use regex::Regex;
use std::path::Path;
use std::time::Duration;
use tokio::io::AsyncWriteExt;
use tracing::debug;

use crate::models::PaperMetadata;
use crate::{Error, Result};

const ARXIV_API_URL: &str = "http://export.arxiv.org/api/query";
const USER_AGENT: &str = concat!("paperdock/", env!("CARGO_PKG_VERSION"));
const HTTP_TIMEOUT_SECS: u64 = 30;

/// Remote PDF location for a paper id
pub fn pdf_url(id: &str) -> String {
    format!("https://arxiv.org/pdf/{}", id)
}

/// Remote source-tarball location for a paper id
pub fn source_url(id: &str) -> String {
    format!("https://arxiv.org/e-print/{}", id)
}

fn bibtex_url(id: &str) -> String {
    format!("https://arxiv.org/bibtex/{}", id)
}

/// Extract the bare arXiv identifier from user input.
///
/// Accepts a bare id (`2101.12345`), an abstract-page URL, or a PDF
/// URL, each optionally carrying a `v\d+` version suffix. Anything
/// else is `InvalidIdentifier`.
pub fn extract_identifier(input: &str) -> Result<String> {
    let input = input.trim();
    let patterns = [
        r"^(\d+\.\d+)(?:v\d+)?$",
        r"^https?://(?:www\.)?arxiv\.org/abs/(\d+\.\d+)(?:v\d+)?/?$",
        r"^https?://(?:www\.)?arxiv\.org/pdf/(\d+\.\d+)(?:v\d+)?(?:\.pdf)?/?$",
    ];

    for pattern in patterns {
        let re = Regex::new(pattern).unwrap();
        if let Some(caps) = re.captures(input) {
            return Ok(caps[1].to_string());
        }
    }

    Err(Error::InvalidIdentifier(input.to_string()))
}

/// Client for the arXiv API and artifact downloads
pub struct ArxivClient {
    http: reqwest::Client,
}

impl ArxivClient {
    pub fn new() -> Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(HTTP_TIMEOUT_SECS))
            .build()
            .map_err(|e| Error::MetadataFetch(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self { http })
    }

    /// Query the API for a single paper's metadata.
    ///
    /// Optional fields degrade to empty string/list; a failed request,
    /// non-2xx status, or a response with no recoverable entry title is
    /// `MetadataFetch`.
    pub async fn fetch_metadata(&self, id: &str) -> Result<PaperMetadata> {
        let url = format!("{}?id_list={}", ARXIV_API_URL, id);
        debug!(%url, "fetching arXiv metadata");

        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| Error::MetadataFetch(format!("request to arXiv failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(Error::MetadataFetch(format!(
                "arXiv API returned status {} for {}",
                response.status(),
                id
            )));
        }

        let body = response
            .text()
            .await
            .map_err(|e| Error::MetadataFetch(format!("failed to read API response: {}", e)))?;

        parse_entry(id, &body)
    }

    /// Stream the paper's PDF to `dest`
    pub async fn download_pdf(&self, id: &str, dest: &Path) -> Result<()> {
        self.download(&pdf_url(id), dest).await
    }

    /// Stream the paper's source tarball to `dest`
    pub async fn download_source(&self, id: &str, dest: &Path) -> Result<()> {
        self.download(&source_url(id), dest).await
    }

    /// Fetch the exported BibTeX entry for a paper
    pub async fn fetch_bibtex(&self, id: &str) -> Result<String> {
        let url = bibtex_url(id);
        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| Error::ArtifactFetch(format!("bibtex request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(Error::ArtifactFetch(format!(
                "bibtex fetch returned status {} for {}",
                response.status(),
                id
            )));
        }

        let text = response
            .text()
            .await
            .map_err(|e| Error::ArtifactFetch(format!("failed to read bibtex: {}", e)))?;

        Ok(text.trim().to_string())
    }

    /// Stream a binary artifact to a file. No retry; the caller decides.
    async fn download(&self, url: &str, dest: &Path) -> Result<()> {
        debug!(%url, dest = %dest.display(), "downloading artifact");

        let mut response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| Error::ArtifactFetch(format!("request to {} failed: {}", url, e)))?;

        if !response.status().is_success() {
            return Err(Error::ArtifactFetch(format!(
                "{} returned status {}",
                url,
                response.status()
            )));
        }

        if let Some(parent) = dest.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        let mut file = tokio::fs::File::create(dest).await?;
        while let Some(chunk) = response
            .chunk()
            .await
            .map_err(|e| Error::ArtifactFetch(format!("download from {} aborted: {}", url, e)))?
        {
            file.write_all(&chunk).await?;
        }
        file.flush().await?;

        Ok(())
    }
}

/// Pull the metadata fields out of the Atom response body
fn parse_entry(id: &str, body: &str) -> Result<PaperMetadata> {
    let entry_re = Regex::new(r"(?s)<entry>(.*?)</entry>").unwrap();
    let entry = entry_re
        .captures(body)
        .map(|caps| caps[1].to_string())
        .ok_or_else(|| Error::MetadataFetch(format!("no entry in API response for {}", id)))?;

    let title = capture_text(&entry, r"(?s)<title>(.*?)</title>");
    if title.is_empty() {
        return Err(Error::MetadataFetch(format!(
            "entry for {} has no recoverable title",
            id
        )));
    }

    let abstract_text = capture_text(&entry, r"(?s)<summary>(.*?)</summary>");
    let published = capture_text(&entry, r"<published>([^<]*)</published>");
    let updated = capture_text(&entry, r"<updated>([^<]*)</updated>");

    let author_re = Regex::new(r"<name>([^<]*)</name>").unwrap();
    let authors: Vec<String> = author_re
        .captures_iter(&entry)
        .map(|caps| clean_text(&caps[1]))
        .filter(|name| !name.is_empty())
        .collect();

    let category_re = Regex::new(r#"<category[^>]*term="([^"]*)""#).unwrap();
    let categories: Vec<String> = category_re
        .captures_iter(&entry)
        .map(|caps| clean_text(&caps[1]))
        .filter(|term| !term.is_empty())
        .collect();

    Ok(PaperMetadata {
        id: id.to_string(),
        title,
        abstract_text,
        authors,
        categories,
        published,
        updated,
    })
}

fn capture_text(entry: &str, pattern: &str) -> String {
    Regex::new(pattern)
        .unwrap()
        .captures(entry)
        .map(|caps| clean_text(&caps[1]))
        .unwrap_or_default()
}

/// Unescape the XML entities arXiv emits and collapse whitespace runs
fn clean_text(raw: &str) -> String {
    let unescaped = raw
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&");

    unescaped.split_whitespace().collect::<Vec<_>>().join(" ")
}
