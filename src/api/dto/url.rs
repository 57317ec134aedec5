//! DTOs for short URL endpoints.

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;
use validator::Validate;

use crate::domain::entities::{AliasPage, AliasRecord};

/// Allowed characters for caller-chosen short keys.
static SHORT_KEY_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_-]+$").expect("short key regex is valid"));

/// Request to create a short URL.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateUrlRequest {
    /// Target URL (must be valid HTTP/HTTPS); normalized before storage.
    #[validate(url(message = "Invalid URL format"))]
    pub original_url: String,

    /// Optional caller-chosen key. A random key is generated when absent.
    #[validate(length(min = 1, max = 32, message = "Short key must be 1-32 characters"))]
    #[validate(regex(
        path = *SHORT_KEY_REGEX,
        message = "Short key may only contain letters, digits, '_' and '-'"
    ))]
    pub short_key: Option<String>,
}

/// JSON representation of a stored short URL.
#[derive(Debug, Serialize, Deserialize)]
pub struct UrlResponse {
    pub id: i64,
    pub original_url: String,
    pub short_key: String,
    pub is_active: bool,
    pub expires_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub click_count: i64,
    pub owner_id: i64,
}

impl From<AliasRecord> for UrlResponse {
    fn from(record: AliasRecord) -> Self {
        Self {
            id: record.id,
            original_url: record.original_url,
            short_key: record.short_key,
            is_active: record.is_active,
            expires_at: record.expires_at,
            created_at: record.created_at,
            click_count: record.click_count,
            owner_id: record.owner_id,
        }
    }
}

/// One page of the caller's short URLs.
#[derive(Debug, Serialize, Deserialize)]
pub struct UrlListResponse {
    pub items: Vec<UrlResponse>,
    pub total: i64,
    pub page: i64,
    pub per_page: i64,
    pub total_pages: i64,
}

impl From<AliasPage> for UrlListResponse {
    fn from(page: AliasPage) -> Self {
        let total_pages = page.total_pages();
        Self {
            items: page.items.into_iter().map(UrlResponse::from).collect(),
            total: page.total,
            page: page.page,
            per_page: page.per_page,
            total_pages,
        }
    }
}
