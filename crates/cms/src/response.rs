//! Responses shared by the session gate and the page handlers.

use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};

use crate::credentials::CredentialError;
use crate::documents::DocumentStoreError;
use crate::session::SessionError;

/// 302 back to the document list.
pub fn redirect_home() -> Response {
    (StatusCode::FOUND, [(header::LOCATION, "/")]).into_response()
}

/// Failures outside the handled taxonomy; they surface as a plain 500.
#[derive(Debug, thiserror::Error)]
pub enum HtmlError {
    #[error("template error: {0}")]
    Template(#[from] askama::Error),
    #[error("document store error: {0}")]
    Documents(#[from] DocumentStoreError),
    #[error("credential store error: {0}")]
    Credentials(#[from] CredentialError),
    #[error("session error: {0}")]
    Session(#[from] SessionError),
    #[error("background task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

impl IntoResponse for HtmlError {
    fn into_response(self) -> Response {
        tracing::error!(error = %self, "request failed");
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            "Unexpected error".to_string(),
        )
            .into_response()
    }
}
