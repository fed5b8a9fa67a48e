use atlas_core::{RefreshError, SourceError, StorageError};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use std::collections::BTreeMap;
use tracing::error;

pub type Result<T> = std::result::Result<T, AppError>;

/// Application-level failures, mapped onto the wire contract.
#[derive(Debug)]
pub enum AppError {
    /// An upstream fetch failed; the response names the side that did.
    SourceUnavailable(SourceError),
    CountryNotFound,
    ImageNotFound,
    /// Per-field detail for malformed query parameters.
    Validation(BTreeMap<String, String>),
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            AppError::SourceUnavailable(err) => (
                StatusCode::SERVICE_UNAVAILABLE,
                json!({
                    "error": "External data source unavailable",
                    "details": format!("Could not fetch data from {}", err.kind()),
                }),
            ),
            AppError::CountryNotFound => (
                StatusCode::NOT_FOUND,
                json!({"error": "Country not found"}),
            ),
            AppError::ImageNotFound => (
                StatusCode::NOT_FOUND,
                json!({"error": "Summary image not found"}),
            ),
            AppError::Validation(details) => (
                StatusCode::BAD_REQUEST,
                json!({"error": "Validation failed", "details": details}),
            ),
            AppError::Internal(detail) => {
                error!(detail = %detail, "request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({"error": "Internal server error"}),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}

impl From<RefreshError> for AppError {
    fn from(err: RefreshError) -> Self {
        match err {
            RefreshError::Source(source) => Self::SourceUnavailable(source),
            RefreshError::Storage(storage) => Self::Internal(storage.to_string()),
            RefreshError::Render(render) => Self::Internal(render.to_string()),
        }
    }
}

impl From<StorageError> for AppError {
    fn from(err: StorageError) -> Self {
        Self::Internal(err.to_string())
    }
}
