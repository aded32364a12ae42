//! Paper collection endpoints: listing/search, download, edit, delete,
//! BibTeX export

use axum::extract::{Path, Query, State};
use axum::http::header::CONTENT_TYPE;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::json;

use paperdock_common::models::PaperRecord;
use paperdock_common::{layout, pagination, Error};

use super::ApiError;
use crate::{commands, AppState};

/// Query parameters for listing and search
#[derive(Debug, Deserialize)]
pub struct ListQuery {
    /// Whitespace-separated keywords; absent means plain listing
    pub q: Option<String>,

    /// Exact tag filter (case-sensitive)
    pub tag: Option<String>,

    /// Page number (1-indexed)
    #[serde(default = "default_page")]
    pub page: i64,

    #[serde(default = "default_page_size")]
    pub page_size: i64,
}

fn default_page() -> i64 {
    1
}

fn default_page_size() -> i64 {
    20
}

/// Paginated listing response
#[derive(Debug, Serialize)]
pub struct PageResponse {
    pub items: Vec<PaperRecord>,
    pub total: i64,
    pub page: i64,
    pub page_size: i64,
}

/// GET /api/papers?q=&tag=&page=&page_size=
pub async fn list_papers(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<PageResponse>, ApiError> {
    let keywords: Vec<String> = query
        .q
        .as_deref()
        .unwrap_or_default()
        .split_whitespace()
        .map(str::to_string)
        .collect();

    let p = pagination::sanitize(query.page, query.page_size);
    let page = state
        .store
        .search(&keywords, query.tag.as_deref(), p.page, p.page_size)
        .await?;

    Ok(Json(PageResponse {
        items: page.items,
        total: page.total,
        page: p.page,
        page_size: p.page_size,
    }))
}

/// GET /api/papers/:id
pub async fn get_paper(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<PaperRecord>, ApiError> {
    let record = state
        .store
        .get_by_id(&id)
        .await?
        .ok_or_else(|| Error::NotFound(format!("paper {}", id)))?;

    Ok(Json(record))
}

/// Download request body
#[derive(Debug, Deserialize)]
pub struct DownloadRequest {
    /// arXiv URL or bare identifier
    pub url: String,
    pub tag: Option<String>,
    /// Companion repository to clone alongside the artifacts
    pub github: Option<String>,
}

/// POST /api/papers
///
/// Runs the full download flow (metadata + artifacts + optional clone)
/// and returns the stored record.
pub async fn download_paper(
    State(state): State<AppState>,
    Json(request): Json<DownloadRequest>,
) -> Result<Json<PaperRecord>, ApiError> {
    let record = commands::download::download_paper(
        &state.store,
        &state.root,
        &request.url,
        request.tag,
        request.github,
    )
    .await?;

    Ok(Json(record))
}

/// Edit request body; at least one field must be present
#[derive(Debug, Deserialize)]
pub struct UpdateRequest {
    pub tag: Option<String>,
    pub github_url: Option<String>,
}

/// PATCH /api/papers/:id
pub async fn update_paper(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<UpdateRequest>,
) -> Result<Json<PaperRecord>, ApiError> {
    if request.tag.is_none() && request.github_url.is_none() {
        return Err(Error::InvalidInput(
            "provide at least one of: tag, github_url".to_string(),
        )
        .into());
    }

    if let Some(tag) = &request.tag {
        state.store.set_tag(&id, tag).await?;
    }
    if let Some(url) = &request.github_url {
        state.store.set_github(&id, Some(url), None).await?;
    }

    let record = state
        .store
        .get_by_id(&id)
        .await?
        .ok_or_else(|| Error::NotFound(format!("paper {}", id)))?;

    Ok(Json(record))
}

/// DELETE /api/papers/:id
///
/// Idempotent; also removes the paper's downloaded files.
pub async fn delete_paper(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, ApiError> {
    if let Some(record) = state.store.get_by_id(&id).await? {
        layout::remove_paper_dir(&state.root, &record.tag, &record.title);
    }
    state.store.delete_by_id(&id).await?;

    Ok(Json(json!({ "deleted": id })))
}

/// Query parameters for bulk delete
#[derive(Debug, Deserialize)]
pub struct BulkDeleteQuery {
    pub tag: Option<String>,
}

/// DELETE /api/papers?tag=T
pub async fn delete_papers_by_tag(
    State(state): State<AppState>,
    Query(query): Query<BulkDeleteQuery>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let tag = query
        .tag
        .ok_or_else(|| Error::InvalidInput("tag query parameter is required".to_string()))?;

    let records = commands::collect_matching(&state.store, &[], Some(&tag)).await?;
    for record in &records {
        layout::remove_paper_dir(&state.root, &record.tag, &record.title);
    }
    state.store.delete_by_tag(&tag).await?;

    Ok(Json(json!({ "deleted": records.len() })))
}

/// GET /api/papers/:id/bibtex
pub async fn get_bibtex(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    let record = state
        .store
        .get_by_id(&id)
        .await?
        .ok_or_else(|| Error::NotFound(format!("paper {}", id)))?;

    let bibtex = record
        .bibtex
        .ok_or_else(|| Error::NotFound(format!("no bibtex stored for {}", id)))?;

    Ok((
        [(CONTENT_TYPE, "text/plain; charset=utf-8")],
        bibtex,
    )
        .into_response())
}
