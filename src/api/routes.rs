//! API route configuration.

use crate::api::handlers::{
    create_url_handler, delete_url_handler, health_handler, list_urls_handler, redirect_handler,
    register_handler,
};
use crate::state::AppState;
use axum::{
    Router,
    routing::{delete, get, post},
};

/// Routes reachable without credentials.
///
/// # Endpoints
///
/// - `POST /auth/register`  - Create a user account
/// - `GET  /r/{short_key}`  - Redirect to the original URL
/// - `GET  /health`         - Health check
pub fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(register_handler))
        .route("/r/{short_key}", get(redirect_handler))
        .route("/health", get(health_handler))
}

/// Routes that require HTTP Basic authentication.
///
/// The caller must attach [`crate::api::middleware::auth::layer`].
///
/// # Endpoints
///
/// - `GET    /urls`       - List the caller's URLs (paginated)
/// - `POST   /urls`       - Create a short URL
/// - `DELETE /urls/{id}`  - Delete one of the caller's URLs
pub fn protected_routes() -> Router<AppState> {
    Router::new()
        .route("/urls", get(list_urls_handler).post(create_url_handler))
        .route("/urls/{id}", delete(delete_url_handler))
}
