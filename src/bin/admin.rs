//! CLI administration tool for url-alias.
//!
//! Provides commands for managing users and short URLs, viewing statistics,
//! and performing database operations without going through the HTTP API.
//!
//! # Usage
//!
//! ```bash
//! # Create a user (prompts for missing values)
//! cargo run --bin admin -- user create --username alice
//!
//! # List users
//! cargo run --bin admin -- user list
//!
//! # Disable or re-enable a short URL
//! cargo run --bin admin -- alias deactivate abc123
//! cargo run --bin admin -- alias activate abc123
//!
//! # Inspect a short URL
//! cargo run --bin admin -- alias show abc123
//!
//! # View statistics
//! cargo run --bin admin -- stats
//!
//! # Check database connection / apply migrations
//! cargo run --bin admin -- db check
//! cargo run --bin admin -- db migrate
//! ```
//!
//! # Environment Variables
//!
//! `DATABASE_URL` or the `DB_*` components, as for the server.

use url_alias::application::services::UserService;
use url_alias::config::{Config, StorageBackend, mask_connection_string};
use url_alias::domain::repositories::AliasRepository;
use url_alias::infrastructure::persistence::{PgAliasRepository, PgUserRepository};
use url_alias::server::{connect_pool, migrate};

use anyhow::{Context, Result};
use chrono::Utc;
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::{Confirm, Input, Password};
use sqlx::PgPool;
use std::sync::Arc;

/// CLI tool for managing url-alias.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Top-level command groups.
#[derive(Subcommand)]
enum Commands {
    /// Manage users
    User {
        #[command(subcommand)]
        action: UserAction,
    },

    /// Manage short URLs
    Alias {
        #[command(subcommand)]
        action: AliasAction,
    },

    /// Show statistics
    Stats,

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

#[derive(Subcommand)]
enum UserAction {
    /// Create a new user
    Create {
        #[arg(short, long)]
        username: Option<String>,

        /// Password (prompted without echo if omitted)
        #[arg(short, long)]
        password: Option<String>,
    },

    /// List all users
    List,
}

#[derive(Subcommand)]
enum AliasAction {
    /// Re-enable redirects for a short key
    Activate { short_key: String },

    /// Stop redirecting a short key without deleting it
    Deactivate {
        short_key: String,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },

    /// Show details of a short key
    Show { short_key: String },
}

#[derive(Subcommand)]
enum DbAction {
    /// Check database connection
    Check,

    /// Apply pending migrations
    Migrate,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let config = Config::from_env().context("Failed to load configuration")?;
    if config.storage_backend != StorageBackend::Postgres {
        anyhow::bail!("The admin tool requires STORAGE_BACKEND=postgres");
    }

    let pool = connect_pool(&config).await?;

    match cli.command {
        Commands::User { action } => handle_user_action(action, &pool).await?,
        Commands::Alias { action } => handle_alias_action(action, &pool).await?,
        Commands::Stats => handle_stats(&pool).await?,
        Commands::Db { action } => handle_db_action(action, &pool, &config).await?,
    }

    pool.close().await;
    Ok(())
}

async fn handle_user_action(action: UserAction, pool: &PgPool) -> Result<()> {
    let service = UserService::new(Arc::new(PgUserRepository::new(Arc::new(pool.clone()))));

    match action {
        UserAction::Create { username, password } => {
            println!("{}", "👤 Create User".bright_blue().bold());
            println!();

            let username = match username {
                Some(u) => u,
                None => Input::new().with_prompt("Username").interact_text()?,
            };

            let password = match password {
                Some(p) => p,
                None => Password::new()
                    .with_prompt("Password")
                    .with_confirmation("Repeat password", "Passwords do not match")
                    .interact()?,
            };

            if !(3..=50).contains(&username.chars().count()) {
                anyhow::bail!("Username must be 3-50 characters");
            }
            if !(8..=128).contains(&password.chars().count()) {
                anyhow::bail!("Password must be 8-128 characters");
            }

            let user = service
                .register(username, password)
                .await
                .map_err(|e| anyhow::anyhow!("Failed to create user: {}", e))?;

            println!(
                "{} {} (id {})",
                "✅ Created user".green().bold(),
                user.username.cyan(),
                user.id.to_string().bright_black()
            );
        }
        UserAction::List => {
            println!("{}", "📋 Users".bright_blue().bold());
            println!();

            let users = service
                .list_users()
                .await
                .map_err(|e| anyhow::anyhow!("Failed to list users: {}", e))?;

            if users.is_empty() {
                println!("{}", "  No users found".yellow());
                return Ok(());
            }

            println!(
                "  {:<6} {:<30} {:<20}",
                "ID".bright_white().bold(),
                "Username".bright_white().bold(),
                "Created".bright_white().bold()
            );
            println!("  {}", "─".repeat(58).bright_black());

            for user in &users {
                println!(
                    "  {:<6} {:<30} {}",
                    user.id.to_string().bright_black(),
                    user.username.cyan(),
                    user.created_at
                        .format("%Y-%m-%d %H:%M")
                        .to_string()
                        .bright_black()
                );
            }

            println!();
            println!("  Total: {}", users.len().to_string().bright_white().bold());
        }
    }

    Ok(())
}

async fn handle_alias_action(action: AliasAction, pool: &PgPool) -> Result<()> {
    let repo = PgAliasRepository::new(Arc::new(pool.clone()));

    let short_key = match &action {
        AliasAction::Activate { short_key }
        | AliasAction::Deactivate { short_key, .. }
        | AliasAction::Show { short_key } => short_key.clone(),
    };

    let record = repo
        .find_by_key(&short_key)
        .await
        .map_err(|e| anyhow::anyhow!("Database error: {}", e))?
        .with_context(|| format!("Short key '{short_key}' not found"))?;

    match action {
        AliasAction::Show { .. } => {
            let status = if !record.is_active {
                "INACTIVE".red()
            } else if record.is_expired_at(Utc::now()) {
                "EXPIRED".yellow()
            } else {
                "ACTIVE".green()
            };

            println!("{}", "🔗 Short URL".bright_blue().bold());
            println!();
            println!("  ID:       {}", record.id.to_string().bright_black());
            println!("  Key:      {}", record.short_key.cyan());
            println!("  Target:   {}", record.original_url);
            println!("  Owner:    {}", record.owner_id);
            println!("  Clicks:   {}", record.click_count.to_string().bright_green());
            println!("  Created:  {}", record.created_at.format("%Y-%m-%d %H:%M"));
            println!("  Expires:  {}", record.expires_at.format("%Y-%m-%d %H:%M"));
            println!("  Status:   {status}");
        }
        AliasAction::Activate { .. } => {
            set_active(&repo, record.id, true).await?;
            println!("{} {}", "✅ Activated".green().bold(), short_key.cyan());
        }
        AliasAction::Deactivate { yes, .. } => {
            if !yes {
                let confirmed = Confirm::new()
                    .with_prompt(format!("Deactivate '{short_key}'?"))
                    .default(false)
                    .interact()?;

                if !confirmed {
                    println!("{}", "❌ Cancelled".red());
                    return Ok(());
                }
            }

            set_active(&repo, record.id, false).await?;
            println!("{} {}", "✅ Deactivated".green().bold(), short_key.cyan());
        }
    }

    Ok(())
}

async fn set_active(repo: &PgAliasRepository, id: i64, active: bool) -> Result<()> {
    let updated = repo
        .set_active(id, active)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to update short URL: {}", e))?;

    if !updated {
        anyhow::bail!("Short URL {id} was deleted concurrently");
    }
    Ok(())
}

/// Displays user, URL and click totals.
async fn handle_stats(pool: &PgPool) -> Result<()> {
    println!("{}", "📊 Statistics".bright_blue().bold());
    println!();

    let users_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
        .fetch_one(pool)
        .await?;

    let (urls_count, active_count, clicks_count): (i64, i64, i64) = sqlx::query_as(
        "SELECT COUNT(*), \
                COUNT(*) FILTER (WHERE is_active AND expires_at >= NOW()), \
                COALESCE(SUM(click_count), 0)::BIGINT \
         FROM urls",
    )
    .fetch_one(pool)
    .await?;

    println!("  Users:        {}", users_count.to_string().bright_green().bold());
    println!("  Short URLs:   {}", urls_count.to_string().bright_green().bold());
    println!("  Redirecting:  {}", active_count.to_string().bright_green().bold());
    println!("  Clicks:       {}", clicks_count.to_string().bright_green().bold());
    println!();

    Ok(())
}

async fn handle_db_action(action: DbAction, pool: &PgPool, config: &Config) -> Result<()> {
    match action {
        DbAction::Check => {
            println!(
                "{} {}",
                "🔍 Checking".bright_blue(),
                mask_connection_string(&config.database_url)
            );

            sqlx::query("SELECT 1").fetch_one(pool).await?;

            let version: String = sqlx::query_scalar("SELECT version()")
                .fetch_one(pool)
                .await?;

            println!("{}", "✅ Database connection OK".green().bold());
            println!("  PostgreSQL: {}", version.bright_white());
        }
        DbAction::Migrate => {
            migrate(pool).await?;
            println!("{}", "✅ Migrations applied".green().bold());
        }
    }

    Ok(())
}
