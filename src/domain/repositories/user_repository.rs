//! Repository trait for registered users.

use crate::domain::entities::{NewUser, User};
use crate::domain::errors::RegistryError;
use async_trait::async_trait;

/// Credential storage used by registration and authentication.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Creates a user.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::UniqueViolation`] if the username is taken.
    async fn create(&self, new_user: NewUser) -> Result<User, RegistryError>;

    /// Finds a user by exact username.
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RegistryError>;

    /// Lists all users, oldest first.
    async fn list(&self) -> Result<Vec<User>, RegistryError>;
}
