//! Handler for user registration.

use axum::{Json, extract::State, http::StatusCode};
use validator::Validate;

use crate::api::dto::user::{RegisterRequest, UserResponse};
use crate::error::AppError;
use crate::state::AppState;

/// Registers a new user.
///
/// # Endpoint
///
/// `POST /auth/register`
///
/// ```json
/// { "username": "alice", "password": "correct horse" }
/// ```
///
/// # Errors
///
/// - 400 Bad Request if username or password length is out of range
/// - 409 Conflict if the username is taken
pub async fn register_handler(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<UserResponse>), AppError> {
    payload.validate()?;

    let user = state
        .user_service
        .register(payload.username, payload.password)
        .await?;

    Ok((StatusCode::CREATED, Json(user.into())))
}
