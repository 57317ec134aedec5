//! PostgreSQL repository tests.
//!
//! Each test gets a fresh database from `#[sqlx::test]` with migrations
//! applied. Run with `DATABASE_URL` set and `cargo test -- --ignored`.

use chrono::{Duration, Utc};
use sqlx::PgPool;
use std::sync::Arc;
use url_alias::domain::entities::{NewAliasRecord, NewUser};
use url_alias::domain::errors::RegistryError;
use url_alias::domain::repositories::{AliasRepository, UserRepository};
use url_alias::infrastructure::persistence::{PgAliasRepository, PgUserRepository};

async fn create_owner(pool: &PgPool, username: &str) -> i64 {
    let repo = PgUserRepository::new(Arc::new(pool.clone()));
    repo.create(NewUser {
        username: username.to_string(),
        password_hash: "hash".to_string(),
    })
    .await
    .unwrap()
    .id
}

fn new_record(key: &str, owner_id: i64) -> NewAliasRecord {
    let now = Utc::now();
    NewAliasRecord {
        original_url: format!("https://example.com/{key}"),
        short_key: key.to_string(),
        owner_id,
        created_at: now,
        expires_at: now + Duration::days(1),
    }
}

#[sqlx::test]
#[ignore = "requires DATABASE_URL"]
async fn test_insert_and_find(pool: PgPool) {
    let owner_id = create_owner(&pool, "alice").await;
    let repo = PgAliasRepository::new(Arc::new(pool));

    let inserted = repo.insert(new_record("abc123", owner_id)).await.unwrap();
    assert!(inserted.is_active);
    assert_eq!(inserted.click_count, 0);

    let by_key = repo.find_by_key("abc123").await.unwrap().unwrap();
    let by_id = repo.find_by_id(inserted.id).await.unwrap().unwrap();
    assert_eq!(by_key.id, inserted.id);
    assert_eq!(by_id.short_key, "abc123");
    assert!(repo.find_by_key("zzz999").await.unwrap().is_none());
}

#[sqlx::test]
#[ignore = "requires DATABASE_URL"]
async fn test_duplicate_key_is_unique_violation(pool: PgPool) {
    let owner_id = create_owner(&pool, "alice").await;
    let repo = PgAliasRepository::new(Arc::new(pool));

    repo.insert(new_record("dup001", owner_id)).await.unwrap();
    let err = repo.insert(new_record("dup001", owner_id)).await.unwrap_err();

    assert_eq!(
        err,
        RegistryError::UniqueViolation {
            constraint: "urls_short_key_key".to_string()
        }
    );
}

#[sqlx::test]
#[ignore = "requires DATABASE_URL"]
async fn test_keys_differing_in_case_are_distinct(pool: PgPool) {
    let owner_id = create_owner(&pool, "alice").await;
    let repo = PgAliasRepository::new(Arc::new(pool));

    let lower = repo.insert(new_record("exmpl", owner_id)).await.unwrap();
    let upper = repo.insert(new_record("EXMPL", owner_id)).await.unwrap();
    assert_ne!(lower.id, upper.id);

    let found_lower = repo.find_by_key("exmpl").await.unwrap().unwrap();
    let found_upper = repo.find_by_key("EXMPL").await.unwrap().unwrap();
    assert_eq!(found_lower.original_url, "https://example.com/exmpl");
    assert_eq!(found_upper.original_url, "https://example.com/EXMPL");
    assert!(repo.find_by_key("Exmpl").await.unwrap().is_none());
}

#[sqlx::test]
#[ignore = "requires DATABASE_URL"]
async fn test_concurrent_increments(pool: PgPool) {
    let owner_id = create_owner(&pool, "alice").await;
    let repo = Arc::new(PgAliasRepository::new(Arc::new(pool)));
    let record = repo.insert(new_record("hot001", owner_id)).await.unwrap();

    let handles: Vec<_> = (0..20)
        .map(|_| {
            let repo = repo.clone();
            tokio::spawn(async move { repo.increment_clicks(record.id).await })
        })
        .collect();
    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    let stored = repo.find_by_id(record.id).await.unwrap().unwrap();
    assert_eq!(stored.click_count, 20);
}

#[sqlx::test]
#[ignore = "requires DATABASE_URL"]
async fn test_delete_reports_rows(pool: PgPool) {
    let owner_id = create_owner(&pool, "alice").await;
    let repo = PgAliasRepository::new(Arc::new(pool));
    let record = repo.insert(new_record("del001", owner_id)).await.unwrap();

    assert_eq!(repo.delete_by_id(record.id).await.unwrap(), 1);
    assert_eq!(repo.delete_by_id(record.id).await.unwrap(), 0);
}

#[sqlx::test]
#[ignore = "requires DATABASE_URL"]
async fn test_list_by_owner_paginates_and_filters(pool: PgPool) {
    let alice = create_owner(&pool, "alice").await;
    let bobby = create_owner(&pool, "bobby").await;
    let repo = PgAliasRepository::new(Arc::new(pool));

    for i in 0..15 {
        let mut new = new_record(&format!("key{i:02}"), alice);
        new.created_at = Utc::now() + Duration::seconds(i);
        let record = repo.insert(new).await.unwrap();
        if i >= 10 {
            assert!(repo.set_active(record.id, false).await.unwrap());
        }
    }
    repo.insert(new_record("bobby1", bobby)).await.unwrap();

    let (items, total) = repo.list_by_owner(alice, 2, 5, Some(true)).await.unwrap();
    assert_eq!(total, 10);
    assert_eq!(items.len(), 5);
    assert_eq!(items[0].short_key, "key04");

    let (_, all) = repo.list_by_owner(alice, 1, 100, None).await.unwrap();
    assert_eq!(all, 15);
}

#[sqlx::test]
#[ignore = "requires DATABASE_URL"]
async fn test_duplicate_username(pool: PgPool) {
    create_owner(&pool, "alice").await;
    let repo = PgUserRepository::new(Arc::new(pool));

    let err = repo
        .create(NewUser {
            username: "alice".to_string(),
            password_hash: "other".to_string(),
        })
        .await
        .unwrap_err();

    assert!(matches!(err, RegistryError::UniqueViolation { .. }));
    assert!(repo.find_by_username("alice").await.unwrap().is_some());
}
