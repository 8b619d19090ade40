//! CLI administration tool for snaplink.
//!
//! Provides commands for managing user accounts, inspecting links,
//! and performing database operations without requiring HTTP API access.
//!
//! # Usage
//!
//! ```bash
//! # Create a new user (prompts for missing fields)
//! cargo run --bin admin -- user create --username alice --email alice@example.com
//!
//! # List all users
//! cargo run --bin admin -- user list
//!
//! # Show the links of a user, by id or username
//! cargo run --bin admin -- links --owner alice
//!
//! # Check database connection
//! cargo run --bin admin -- db check
//! ```
//!
//! # Environment Variables
//!
//! - `DATABASE_URL` (or `DB_HOST`/`DB_PORT`/`DB_USER`/`DB_PASSWORD`/`DB_NAME`):
//!   PostgreSQL connection
//!
//! # Features
//!
//! - **User Management**: Create and list accounts
//! - **Links**: Per-owner link listing with visit counts
//! - **Database Tools**: Connection checks and info queries
//! - **Interactive Prompts**: Password entry with confirmation
//! - **Colored Output**: Terminal-friendly formatting using `colored` crate

use snaplink::application::services::auth_service::validate_registration;
use snaplink::config::{Config, mask_connection_string};
use snaplink::domain::entities::{NewUser, User};
use snaplink::domain::repositories::{LinkRepository, UserRepository};
use snaplink::infrastructure::persistence::{PgLinkRepository, PgUserRepository};
use snaplink::utils::password::hash_password;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::{Confirm, Input, Password};
use sqlx::PgPool;
use std::sync::Arc;

/// CLI tool for managing snaplink.
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
    /// Manage user accounts
    User {
        #[command(subcommand)]
        action: UserAction,
    },

    /// List the links of one user
    Links {
        /// User id or username
        #[arg(short, long)]
        owner: String,
    },

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

/// User management subcommands.
#[derive(Subcommand)]
enum UserAction {
    /// Create a new user
    Create {
        #[arg(short, long)]
        username: Option<String>,

        #[arg(short, long)]
        email: Option<String>,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },

    /// List all users
    List,
}

/// Database operation subcommands.
#[derive(Subcommand)]
enum DbAction {
    /// Check database connection
    Check,

    /// Show database info
    Info,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let database_url = Config::load_database_url()?;

    let pool = PgPool::connect(&database_url)
        .await
        .with_context(|| {
            format!(
                "Failed to connect to database {}",
                mask_connection_string(&database_url)
            )
        })?;

    match cli.command {
        Commands::User { action } => handle_user_action(action, &pool).await?,
        Commands::Links { owner } => list_links(&owner, &pool).await?,
        Commands::Db { action } => handle_db_action(action, &pool).await?,
    }

    Ok(())
}

/// Dispatches user management commands.
async fn handle_user_action(action: UserAction, pool: &PgPool) -> Result<()> {
    let repo = PgUserRepository::new(Arc::new(pool.clone()));

    match action {
        UserAction::Create {
            username,
            email,
            yes,
        } => create_user(&repo, username, email, yes).await,
        UserAction::List => list_users(&repo).await,
    }
}

/// Creates a user with interactive prompts.
///
/// # Flow
///
/// 1. Prompt for username and email (or use provided)
/// 2. Prompt for password twice
/// 3. Validate with the same rules as `POST /auth/register`
/// 4. Confirm creation (unless `--yes` flag)
/// 5. Hash with Argon2id and store
async fn create_user(
    repo: &PgUserRepository,
    username: Option<String>,
    email: Option<String>,
    skip_confirm: bool,
) -> Result<()> {
    println!("{}", "👤 Create User".bright_blue().bold());
    println!();

    let username = match username {
        Some(u) => u,
        None => Input::new().with_prompt("Username").interact_text()?,
    };

    let email = match email {
        Some(e) => e,
        None => Input::new().with_prompt("Email").interact_text()?,
    };

    let password = Password::new()
        .with_prompt("Password")
        .with_confirmation("Repeat password", "Passwords don't match")
        .interact()?;

    validate_registration(&username, &email, &password)
        .map_err(|e| anyhow::anyhow!("{}: {}", e, e.to_error_info().details))?;

    let username = username.trim().to_string();
    let email = email.trim().to_lowercase();

    println!();
    println!("{}", "User details:".bright_white().bold());
    println!("  Username: {}", username.cyan());
    println!("  Email:    {}", email.cyan());
    println!();

    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt("Create this user?")
            .default(true)
            .interact()?;

        if !confirmed {
            println!("{}", "❌ Cancelled".red());
            return Ok(());
        }
    }

    let password_hash = hash_password(&password).map_err(|e| anyhow::anyhow!("{e}"))?;

    let user = repo
        .create(NewUser {
            username,
            email,
            password_hash,
        })
        .await
        .map_err(|e| anyhow::anyhow!("Failed to create user: {}", e))?;

    println!();
    println!(
        "{} (id {})",
        "✅ User created successfully!".green().bold(),
        user.id.to_string().bright_white()
    );
    println!();

    Ok(())
}

/// Lists all users.
///
/// # Output Format
///
/// ```text
/// 📋 Users
///
///   ID  Username             Email                          Created
///   ───────────────────────────────────────────────────────────────────────────
///   1   alice                alice@example.com              2026-01-15 10:30
/// ```
async fn list_users(repo: &PgUserRepository) -> Result<()> {
    println!("{}", "📋 Users".bright_blue().bold());
    println!();

    let users = repo
        .list()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to list users: {}", e))?;

    if users.is_empty() {
        println!("{}", "  No users found".yellow());
        println!();
        println!(
            "  Create one with: {} admin user create",
            "cargo run --bin".bright_cyan()
        );
        return Ok(());
    }

    println!(
        "  {:<3} {:<20} {:<30} {:<16}",
        "ID".bright_white().bold(),
        "Username".bright_white().bold(),
        "Email".bright_white().bold(),
        "Created".bright_white().bold()
    );
    println!("  {}", "─".repeat(75).bright_black());

    for user in &users {
        println!(
            "  {:<3} {:<20} {:<30} {}",
            user.id.to_string().bright_black(),
            user.username.cyan(),
            user.email,
            user.created_at
                .format("%Y-%m-%d %H:%M")
                .to_string()
                .bright_black(),
        );
    }

    println!();
    println!("  Total: {}", users.len().to_string().bright_white().bold());
    println!();

    Ok(())
}

/// Resolves `owner` as a numeric id first, then as a username.
async fn find_owner(repo: &PgUserRepository, owner: &str) -> Result<User> {
    let user = match owner.parse::<i64>() {
        Ok(id) => repo.find_by_id(id).await,
        Err(_) => repo.find_by_username(owner).await,
    }
    .map_err(|e| anyhow::anyhow!("Database error: {}", e))?;

    user.with_context(|| format!("User '{owner}' not found"))
}

/// Lists the links of one user, most recent first.
async fn list_links(owner: &str, pool: &PgPool) -> Result<()> {
    let pool = Arc::new(pool.clone());
    let users = PgUserRepository::new(pool.clone());
    let links = PgLinkRepository::new(pool);

    let user = find_owner(&users, owner).await?;

    println!(
        "{} {}",
        "🔗 Links of".bright_blue().bold(),
        user.username.cyan().bold()
    );
    println!();

    let items = links
        .list_by_owner(user.id)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to list links: {}", e))?;

    if items.is_empty() {
        println!("{}", "  No links found".yellow());
        return Ok(());
    }

    println!(
        "  {:<10} {:<8} {:<16} {}",
        "Code".bright_white().bold(),
        "Visits".bright_white().bold(),
        "Created".bright_white().bold(),
        "URL".bright_white().bold()
    );
    println!("  {}", "─".repeat(75).bright_black());

    for link in &items {
        println!(
            "  {:<10} {:<8} {:<16} {}",
            link.code.cyan(),
            link.visit_count.to_string().bright_green(),
            link.created_at
                .format("%Y-%m-%d %H:%M")
                .to_string()
                .bright_black(),
            link.original_url
        );
    }

    let total_visits: i64 = items.iter().map(|l| l.visit_count).sum();

    println!();
    println!(
        "  Total: {} links, {} visits",
        items.len().to_string().bright_white().bold(),
        total_visits.to_string().bright_white().bold()
    );
    println!();

    Ok(())
}

/// Handles database diagnostic commands.
async fn handle_db_action(action: DbAction, pool: &PgPool) -> Result<()> {
    match action {
        DbAction::Check => {
            println!("{}", "🔍 Checking database connection...".bright_blue());

            sqlx::query("SELECT 1").fetch_one(pool).await?;

            println!("{}", "✅ Database connection OK".green().bold());
        }
        DbAction::Info => {
            println!("{}", "ℹ️  Database Information".bright_blue().bold());
            println!();

            let version: String = sqlx::query_scalar("SELECT version()")
                .fetch_one(pool)
                .await?;

            let users = PgUserRepository::new(Arc::new(pool.clone()))
                .count()
                .await
                .map_err(|e| anyhow::anyhow!("{e}"))?;
            let links = PgLinkRepository::new(Arc::new(pool.clone()))
                .count()
                .await
                .map_err(|e| anyhow::anyhow!("{e}"))?;

            println!("  PostgreSQL: {}", version.bright_white());
            println!("  Users:      {}", users.to_string().bright_green().bold());
            println!("  Links:      {}", links.to_string().bright_green().bold());
            println!();
        }
    }

    Ok(())
}
