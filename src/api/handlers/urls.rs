//! Handlers for short URL management endpoints (create, list, delete).

use axum::{
    Extension, Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde_json::json;
use validator::Validate;

use crate::api::dto::pagination::ListUrlsParams;
use crate::api::dto::url::{CreateUrlRequest, UrlListResponse, UrlResponse};
use crate::api::middleware::auth::CurrentUser;
use crate::error::AppError;
use crate::state::AppState;
use crate::utils::url_normalizer::normalize_url;

/// Creates a short URL owned by the caller.
///
/// # Endpoint
///
/// `POST /urls`
///
/// # Request Body
///
/// ```json
/// {
///   "original_url": "https://example.com/some/long/path",
///   "short_key": "my-key"   // optional
/// }
/// ```
///
/// An empty `short_key` is treated as absent.
///
/// # Errors
///
/// - 400 Bad Request if validation or URL normalization fails
/// - 409 Conflict if the requested short key already exists
/// - 500 Internal Server Error if no free key could be generated
pub async fn create_url_handler(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Json(mut payload): Json<CreateUrlRequest>,
) -> Result<(StatusCode, Json<UrlResponse>), AppError> {
    payload.short_key = payload.short_key.filter(|k| !k.is_empty());
    payload.validate()?;

    let original_url = normalize_url(&payload.original_url).map_err(|e| {
        AppError::bad_request(
            e.to_string(),
            json!({ "original_url": payload.original_url }),
        )
    })?;

    let record = state
        .alias_service
        .allocate(original_url, payload.short_key, user.id)
        .await?;

    Ok((StatusCode::CREATED, Json(record.into())))
}

/// Lists the caller's short URLs, newest first.
///
/// # Endpoint
///
/// `GET /urls?page=1&per_page=10&is_active=true`
///
/// All parameters are optional; see [`ListUrlsParams`] for defaults and bounds.
pub async fn list_urls_handler(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Query(params): Query<ListUrlsParams>,
) -> Result<Json<UrlListResponse>, AppError> {
    let (page, per_page) = params
        .validate_and_get_page()
        .map_err(|msg| AppError::bad_request(msg, json!({})))?;

    let page = state
        .alias_service
        .list_for_owner(user.id, page, per_page, params.is_active)
        .await?;

    Ok(Json(page.into()))
}

/// Deletes one of the caller's short URLs.
///
/// # Endpoint
///
/// `DELETE /urls/{id}`
///
/// # Errors
///
/// - 404 Not Found if no URL has this id
/// - 403 Forbidden if the URL belongs to another user
pub async fn delete_url_handler(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    state.alias_service.delete(id, user.id).await?;

    Ok(StatusCode::NO_CONTENT)
}
