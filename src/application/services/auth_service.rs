//! Authentication of HTTP Basic credentials.

use std::sync::Arc;

use serde_json::json;
use tracing::{debug, warn};

use crate::domain::entities::User;
use crate::domain::repositories::UserRepository;
use crate::error::AppError;
use crate::utils::password::verify_password;

/// Service that checks a username/password pair against stored users.
pub struct AuthService {
    repository: Arc<dyn UserRepository>,
}

impl AuthService {
    pub fn new(repository: Arc<dyn UserRepository>) -> Self {
        Self { repository }
    }

    /// Returns the user owning these credentials.
    ///
    /// Unknown usernames and wrong passwords produce the same error so that
    /// callers cannot enumerate accounts.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unauthorized`] on bad credentials.
    /// Returns [`AppError::Internal`] on database errors or a corrupt stored hash.
    pub async fn authenticate(&self, username: &str, password: &str) -> Result<User, AppError> {
        let Some(user) = self.repository.find_by_username(username).await? else {
            warn!(username, "Authentication failed: user not found");
            return Err(invalid_credentials());
        };

        let stored_hash = user.password_hash.clone();
        let password = password.to_owned();
        let matches =
            tokio::task::spawn_blocking(move || verify_password(&password, &stored_hash))
                .await
                .map_err(|e| {
                    AppError::internal(
                        "Password check task failed",
                        json!({ "reason": e.to_string() }),
                    )
                })?
                .map_err(|e| {
                    AppError::internal(
                        "Stored password hash is invalid",
                        json!({ "reason": e.to_string() }),
                    )
                })?;

        if !matches {
            warn!(username, "Authentication failed: invalid password");
            return Err(invalid_credentials());
        }

        debug!(username, user_id = user.id, "Authenticated user");
        Ok(user)
    }
}

fn invalid_credentials() -> AppError {
    AppError::unauthorized(
        "Invalid username or password",
        json!({ "reason": "Invalid username or password" }),
    )
}
