//! paperdock-cli library - command implementations and the web surface

use axum::routing::get;
use axum::Router;
use paperdock_common::db::PaperStore;
use std::path::PathBuf;
use tower_http::trace::TraceLayer;

pub mod api;
pub mod commands;

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Paper store over the SQLite pool
    pub store: PaperStore,
    /// Root folder holding the database and downloaded artifacts
    pub root: PathBuf,
}

impl AppState {
    pub fn new(store: PaperStore, root: PathBuf) -> Self {
        Self { store, root }
    }
}

/// Build the application router: JSON API plus the bundled UI
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route(
            "/api/papers",
            get(api::list_papers)
                .post(api::download_paper)
                .delete(api::delete_papers_by_tag),
        )
        .route(
            "/api/papers/:id",
            get(api::get_paper)
                .patch(api::update_paper)
                .delete(api::delete_paper),
        )
        .route("/api/papers/:id/bibtex", get(api::get_bibtex))
        .route("/", get(api::serve_index))
        .route("/static/app.js", get(api::serve_app_js))
        .merge(api::health_routes())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
