//! Shared application state injected into every handler.

use sqlx::PgPool;
use std::sync::Arc;

use crate::application::services::{AliasService, AllocationSettings, AuthService, UserService};
use crate::domain::repositories::{AliasRepository, UserRepository};
use crate::infrastructure::memory::{InMemoryAliasRepository, InMemoryUserRepository};
use crate::infrastructure::persistence::{PgAliasRepository, PgUserRepository};

/// Services shared across requests.
///
/// Cloning is cheap: every field is behind an `Arc`.
#[derive(Clone)]
pub struct AppState {
    pub alias_service: Arc<AliasService>,
    pub user_service: Arc<UserService>,
    pub auth_service: Arc<AuthService>,
    /// Connection pool used by the health check; `None` for the memory backend.
    pub db: Option<Arc<PgPool>>,
}

impl AppState {
    /// Wires services over the given repositories.
    pub fn new(
        alias_repository: Arc<dyn AliasRepository>,
        user_repository: Arc<dyn UserRepository>,
        settings: AllocationSettings,
        db: Option<Arc<PgPool>>,
    ) -> Self {
        Self {
            alias_service: Arc::new(AliasService::new(alias_repository, settings)),
            user_service: Arc::new(UserService::new(user_repository.clone())),
            auth_service: Arc::new(AuthService::new(user_repository)),
            db,
        }
    }

    /// State backed by PostgreSQL repositories sharing one pool.
    pub fn postgres(pool: Arc<PgPool>, settings: AllocationSettings) -> Self {
        Self::new(
            Arc::new(PgAliasRepository::new(pool.clone())),
            Arc::new(PgUserRepository::new(pool.clone())),
            settings,
            Some(pool),
        )
    }

    /// State backed by process-local maps.
    pub fn in_memory(settings: AllocationSettings) -> Self {
        Self::new(
            Arc::new(InMemoryAliasRepository::new()),
            Arc::new(InMemoryUserRepository::new()),
            settings,
            None,
        )
    }
}
