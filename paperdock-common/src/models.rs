//! Paper record model and the codec for list-valued columns

use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// Tag assigned to papers downloaded without an explicit tag
pub const DEFAULT_TAG: &str = "default";

/// One stored paper. `id` is the canonical arXiv identifier and is
/// immutable once the record is created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaperRecord {
    pub id: String,
    pub title: String,
    #[serde(rename = "abstract")]
    pub abstract_text: String,
    pub authors: Vec<String>,
    pub categories: Vec<String>,
    pub tag: String,
    pub pdf_url: Option<String>,
    pub source_url: Option<String>,
    pub github_url: Option<String>,
    pub local_pdf_path: Option<String>,
    pub local_source_path: Option<String>,
    pub local_github_path: Option<String>,
    pub bibtex: Option<String>,
    /// RFC 3339 UTC timestamp set at insertion time; the sole sort key
    pub date_added: String,
}

/// Metadata recovered from the arXiv API for a single paper
#[derive(Debug, Clone, PartialEq)]
pub struct PaperMetadata {
    pub id: String,
    pub title: String,
    pub abstract_text: String,
    pub authors: Vec<String>,
    pub categories: Vec<String>,
    pub published: String,
    pub updated: String,
}

/// Current time as the stored `date_added` representation
/// (second resolution; ties in listings break arbitrarily)
pub fn now_timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Encode an ordered string list into a single TEXT column value.
///
/// JSON is used instead of a naive comma-join so that values containing
/// the delimiter round-trip exactly.
pub fn encode_list(values: &[String]) -> String {
    serde_json::to_string(values).unwrap_or_else(|_| "[]".to_string())
}

/// Decode a TEXT column value back into the ordered string list.
///
/// Tolerates the legacy comma-joined format for rows written before the
/// JSON codec was introduced.
pub fn decode_list(raw: &str) -> Vec<String> {
    if raw.trim().is_empty() {
        return Vec::new();
    }
    match serde_json::from_str::<Vec<String>>(raw) {
        Ok(values) => values,
        Err(_) => raw.split(',').map(|s| s.trim().to_string()).collect(),
    }
}
