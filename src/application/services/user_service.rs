//! User registration.

use std::sync::Arc;

use serde_json::json;
use tracing::{info, warn};

use crate::domain::entities::{NewUser, User};
use crate::domain::errors::RegistryError;
use crate::domain::repositories::UserRepository;
use crate::error::AppError;
use crate::utils::password::hash_password;

/// Service for creating user accounts.
pub struct UserService {
    repository: Arc<dyn UserRepository>,
}

impl UserService {
    pub fn new(repository: Arc<dyn UserRepository>) -> Self {
        Self { repository }
    }

    /// Registers a new user with an Argon2id-hashed password.
    ///
    /// Hashing runs on the blocking pool so it does not stall the runtime.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the username is taken, whether the
    /// pre-check catches it or the unique constraint does.
    ///
    /// Returns [`AppError::Internal`] on hashing or database errors.
    pub async fn register(&self, username: String, password: String) -> Result<User, AppError> {
        if self
            .repository
            .find_by_username(&username)
            .await?
            .is_some()
        {
            warn!(username, "Registration failed: username already exists");
            return Err(username_taken(&username));
        }

        let password_hash = tokio::task::spawn_blocking(move || hash_password(&password))
            .await
            .map_err(|e| {
                AppError::internal(
                    "Password hashing task failed",
                    json!({ "reason": e.to_string() }),
                )
            })?
            .map_err(|e| {
                AppError::internal("Failed to hash password", json!({ "reason": e.to_string() }))
            })?;

        let new_user = NewUser {
            username: username.clone(),
            password_hash,
        };

        match self.repository.create(new_user).await {
            Ok(user) => {
                info!(username = %user.username, user_id = user.id, "Registered user");
                Ok(user)
            }
            Err(RegistryError::UniqueViolation { .. }) => Err(username_taken(&username)),
            Err(e) => Err(e.into()),
        }
    }

    /// Lists all registered users.
    pub async fn list_users(&self) -> Result<Vec<User>, AppError> {
        Ok(self.repository.list().await?)
    }
}

fn username_taken(username: &str) -> AppError {
    AppError::conflict("Username already exists", json!({ "username": username }))
}
