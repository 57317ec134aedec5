#![allow(dead_code)]

use axum_test::TestServer;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use chrono::{Duration, Utc};
use serde_json::json;
use std::sync::Arc;
use url_alias::application::services::AllocationSettings;
use url_alias::domain::entities::{AliasRecord, NewAliasRecord};
use url_alias::domain::repositories::AliasRepository;
use url_alias::infrastructure::memory::{InMemoryAliasRepository, InMemoryUserRepository};
use url_alias::routes::build_router;
use url_alias::state::AppState;

pub const PASSWORD: &str = "correct-horse";

/// Test server over in-memory repositories.
///
/// The alias repository is returned too so tests can seed records directly
/// (expired or inactive ones cannot be created through the API).
pub struct TestApp {
    pub server: TestServer,
    pub aliases: Arc<InMemoryAliasRepository>,
}

pub fn create_test_app() -> TestApp {
    let aliases = Arc::new(InMemoryAliasRepository::new());
    let users = Arc::new(InMemoryUserRepository::new());

    let state = AppState::new(
        aliases.clone(),
        users,
        AllocationSettings::default(),
        None,
    );

    let app = build_router(state, &["*".to_string()]);

    TestApp {
        server: TestServer::new(app).unwrap(),
        aliases,
    }
}

/// `Authorization` header value for HTTP Basic.
pub fn basic_auth(username: &str, password: &str) -> String {
    format!("Basic {}", STANDARD.encode(format!("{username}:{password}")))
}

/// Registers `username` with [`PASSWORD`] and returns its id.
pub async fn register(server: &TestServer, username: &str) -> i64 {
    let response = server
        .post("/auth/register")
        .json(&json!({ "username": username, "password": PASSWORD }))
        .await;
    response.assert_status(axum::http::StatusCode::CREATED);
    response.json::<serde_json::Value>()["id"].as_i64().unwrap()
}

/// Inserts a record straight into the repository.
pub async fn seed_record(
    repo: &InMemoryAliasRepository,
    short_key: &str,
    owner_id: i64,
    expires_in: Duration,
) -> AliasRecord {
    let now = Utc::now();
    repo.insert(NewAliasRecord {
        original_url: format!("https://example.com/{short_key}"),
        short_key: short_key.to_string(),
        owner_id,
        created_at: now,
        expires_at: now + expires_in,
    })
    .await
    .unwrap()
}
