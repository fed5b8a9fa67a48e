use crate::error::{AppError, Result};
use crate::model::{ListQuery, MessageResponse, RefreshResponse, StatusResponse};
use crate::state::AppState;
use atlas_core::CountryRecord;
use axum::extract::{Path, Query, State};
use axum::http::header;
use axum::response::{IntoResponse, Response};
use axum::Json;
use std::io::ErrorKind;

pub async fn refresh_handler(State(state): State<AppState>) -> Result<Json<RefreshResponse>> {
    let report = state.mirror.refresh().await?;

    Ok(Json(RefreshResponse {
        message: "Countries refreshed successfully",
        count: report.upserted,
    }))
}

pub async fn status_handler(State(state): State<AppState>) -> Result<Json<StatusResponse>> {
    let status = state.repository.status().await?;

    Ok(Json(status.into()))
}

pub async fn list_countries_handler(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<CountryRecord>>> {
    let (filter, sort) = query.into_parts()?;
    let records = state.repository.list(&filter, sort).await?;

    Ok(Json(records))
}

pub async fn get_country_handler(
    Path(name): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<CountryRecord>> {
    let record = state
        .repository
        .find_by_name(&name)
        .await?
        .ok_or(AppError::CountryNotFound)?;

    Ok(Json(record))
}

pub async fn delete_country_handler(
    Path(name): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<MessageResponse>> {
    if !state.repository.remove(&name).await? {
        return Err(AppError::CountryNotFound);
    }

    Ok(Json(MessageResponse {
        message: "Country deleted successfully",
    }))
}

pub async fn image_handler(State(state): State<AppState>) -> Result<Response> {
    let bytes = match tokio::fs::read(&state.image_path).await {
        Ok(bytes) => bytes,
        Err(err) if err.kind() == ErrorKind::NotFound => return Err(AppError::ImageNotFound),
        Err(err) => return Err(AppError::Internal(err.to_string())),
    };

    Ok(([(header::CONTENT_TYPE, "image/png")], bytes).into_response())
}
