//! Handler for short URL redirect.

use axum::{
    extract::{Path, State},
    response::Redirect,
};

use crate::error::AppError;
use crate::state::AppState;

/// Redirects a short key to its original URL.
///
/// # Endpoint
///
/// `GET /r/{short_key}`
///
/// Each successful redirect increments the record's click count by one.
///
/// # Errors
///
/// - 404 Not Found if the short key doesn't exist
/// - 410 Gone if the URL is inactive or has expired
pub async fn redirect_handler(
    Path(short_key): Path<String>,
    State(state): State<AppState>,
) -> Result<Redirect, AppError> {
    let original_url = state.alias_service.resolve(&short_key).await?;

    Ok(Redirect::temporary(&original_url))
}
