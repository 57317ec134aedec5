//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `POST   /auth/register`  - User registration (public)
//! - `GET    /r/{short_key}`  - Short URL redirect (public)
//! - `GET    /health`         - Health check (public)
//! - `/urls`, `/urls/{id}`    - Short URL management (HTTP Basic required)
//!
//! Every route is also served under `/api/v1`.
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **CORS** - Configured origins
//! - **Authentication** - HTTP Basic on management routes
//! - **Path normalization** - Trailing slash handling

use crate::api;
use crate::api::middleware::{auth, cors, tracing};
use crate::state::AppState;
use axum::{Router, middleware};
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

/// Versioned prefix under which every route is mounted a second time.
pub const API_PREFIX: &str = "/api/v1";

/// Constructs the application router with all routes and middleware.
///
/// Returns a plain [`Router`] so it can be driven directly by test servers;
/// [`app_router`] adds path normalization on top for serving.
pub fn build_router(state: AppState, cors_origins: &[String]) -> Router {
    let protected = api::routes::protected_routes()
        .route_layer(middleware::from_fn_with_state(state.clone(), auth::layer));

    let routes = Router::new()
        .merge(api::routes::public_routes())
        .merge(protected);

    Router::new()
        .merge(routes.clone())
        .nest(API_PREFIX, routes)
        .with_state(state)
        .layer(cors::layer(cors_origins))
        .layer(tracing::layer())
}

/// [`build_router`] wrapped so that `/urls/` and `/urls` hit the same route.
pub fn app_router(state: AppState, cors_origins: &[String]) -> NormalizePath<Router> {
    NormalizePathLayer::trim_trailing_slash().layer(build_router(state, cors_origins))
}
