//! HTTP Basic authentication middleware.

use axum::{
    extract::{FromRequestParts, Request, State},
    middleware::Next,
    response::Response,
};
use axum_auth::AuthBasic;

use crate::{error::AppError, state::AppState};

/// The authenticated caller, inserted into request extensions by [`layer`].
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub id: i64,
    pub username: String,
}

/// Authenticates requests using HTTP Basic credentials.
///
/// # Header Format
///
/// ```text
/// Authorization: Basic base64(<username>:<password>)
/// ```
///
/// On success the matching [`CurrentUser`] is added to the request
/// extensions for handlers to extract with `Extension<CurrentUser>`.
///
/// # Errors
///
/// Returns `401 Unauthorized` with `WWW-Authenticate: Basic` if the header
/// is missing or malformed, or if the credentials do not match a user.
///
/// # Example
///
/// ```rust,ignore
/// let protected = Router::new()
///     .route("/urls", get(list_urls_handler))
///     .route_layer(middleware::from_fn_with_state(state.clone(), auth::layer));
/// ```
pub async fn layer(
    State(st): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let (mut parts, body) = req.into_parts();

    let AuthBasic((username, password)) = AuthBasic::from_request_parts(&mut parts, &())
        .await
        .map_err(|_| {
            AppError::unauthorized(
                "Unauthorized",
                serde_json::json!({"reason": "Authorization header is missing or invalid"}),
            )
        })?;

    let user = st
        .auth_service
        .authenticate(&username, password.as_deref().unwrap_or_default())
        .await?;

    let mut req = Request::from_parts(parts, body);
    req.extensions_mut().insert(CurrentUser {
        id: user.id,
        username: user.username,
    });

    Ok(next.run(req).await)
}
