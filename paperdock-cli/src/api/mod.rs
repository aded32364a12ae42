//! HTTP API handlers for the paperdock web surface

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use paperdock_common::Error;
use serde_json::json;

pub mod health;
pub mod papers;
pub mod ui;

pub use health::health_routes;
pub use papers::{
    delete_paper, delete_papers_by_tag, download_paper, get_bibtex, get_paper, list_papers,
    update_paper,
};
pub use ui::{serve_app_js, serve_index};

/// Adapter mapping library errors onto HTTP responses:
/// 400 for validation/invalid identifier, 404 for not-found,
/// 500 for fetch/storage, body `{"error": message}`.
pub struct ApiError(pub Error);

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        ApiError(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            Error::InvalidIdentifier(_) | Error::InvalidInput(_) => StatusCode::BAD_REQUEST,
            Error::NotFound(_) => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        let message = self.0.to_string();

        if status.is_server_error() {
            tracing::error!(%message, "request failed");
        } else {
            tracing::debug!(%message, "client error");
        }

        let body = Json(json!({
            "error": message,
        }));

        (status, body).into_response()
    }
}
