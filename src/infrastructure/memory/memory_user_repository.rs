//! In-memory user repository.

use std::collections::BTreeMap;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;

use crate::domain::entities::{NewUser, User};
use crate::domain::errors::RegistryError;
use crate::domain::repositories::UserRepository;

pub const USERNAME_CONSTRAINT: &str = "users_username_key";

#[derive(Default)]
pub struct InMemoryUserRepository {
    users: Mutex<BTreeMap<i64, User>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, BTreeMap<i64, User>>, RegistryError> {
        self.users
            .lock()
            .map_err(|_| RegistryError::Storage("mutex poisoned".into()))
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, new_user: NewUser) -> Result<User, RegistryError> {
        let mut users = self.lock()?;

        if users.values().any(|u| u.username == new_user.username) {
            return Err(RegistryError::UniqueViolation {
                constraint: USERNAME_CONSTRAINT.to_string(),
            });
        }

        let id = users.keys().next_back().copied().unwrap_or(0) + 1;
        let user = User {
            id,
            username: new_user.username,
            password_hash: new_user.password_hash,
            created_at: Utc::now(),
        };
        users.insert(id, user.clone());

        Ok(user)
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RegistryError> {
        let users = self.lock()?;
        Ok(users.values().find(|u| u.username == username).cloned())
    }

    async fn list(&self) -> Result<Vec<User>, RegistryError> {
        let users = self.lock()?;
        Ok(users.values().cloned().collect())
    }
}
