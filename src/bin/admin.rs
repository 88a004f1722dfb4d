//! CLI administration tool for slug-shortener.
//!
//! Provides commands for inspecting and creating short links, viewing
//! statistics, and performing database operations without going through
//! the HTTP API.
//!
//! # Usage
//!
//! ```bash
//! # Show where a slug points
//! cargo run --bin admin -- link show my-slug
//!
//! # Create a link (same validation and normalization as the API)
//! cargo run --bin admin -- link create my-slug example.com
//!
//! # View statistics
//! cargo run --bin admin -- stats
//!
//! # Check database connection
//! cargo run --bin admin -- db check
//! ```
//!
//! # Environment Variables
//!
//! - `DATABASE_URL` (required): PostgreSQL connection string

use slug_shortener::application::services::SlugService;
use slug_shortener::domain::repositories::SlugRepository;
use slug_shortener::infrastructure::persistence::PgSlugRepository;
use slug_shortener::utils::{slug_validator::validate_slug, url_normalizer::normalize_url};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::Confirm;
use sqlx::PgPool;
use std::sync::Arc;

/// Client key recorded for links created from the CLI. No limiter is attached.
const ADMIN_CLIENT_KEY: &str = "admin-cli";

/// CLI tool for managing slug-shortener.
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
    /// Inspect or create short links
    Link {
        #[command(subcommand)]
        action: LinkAction,
    },

    /// Show statistics
    Stats,

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

/// Link subcommands.
#[derive(Subcommand)]
enum LinkAction {
    /// Show the destination of a slug
    Show {
        slug: String,
    },

    /// Create a new short link
    Create {
        slug: String,

        /// Destination URL; `https://` is prepended when no scheme is given
        url: String,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },
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
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL must be set")?;

    let pool = PgPool::connect(&database_url)
        .await
        .context("Failed to connect to database")?;

    match cli.command {
        Commands::Link { action } => handle_link_action(action, &pool).await?,
        Commands::Stats => handle_stats(&pool).await?,
        Commands::Db { action } => handle_db_action(action, &pool).await?,
    }

    Ok(())
}

/// Dispatches link commands through the same service the API uses.
async fn handle_link_action(action: LinkAction, pool: &PgPool) -> Result<()> {
    let repository = Arc::new(PgSlugRepository::new(Arc::new(pool.clone())));
    let service = SlugService::new(repository);

    match action {
        LinkAction::Show { slug } => show_link(&service, &slug).await?,
        LinkAction::Create { slug, url, yes } => create_link(&service, &slug, &url, yes).await?,
    }

    Ok(())
}

async fn show_link(service: &SlugService, slug: &str) -> Result<()> {
    let link = service
        .resolve_slug(slug)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to resolve slug: {}", e))?;

    println!("{}", "Short link".bright_blue().bold());
    println!();
    println!("  Slug:    {}", link.slug.cyan());
    println!("  URL:     {}", link.url.bright_white());
    println!(
        "  Created: {}",
        link.created_at
            .format("%Y-%m-%d %H:%M:%S UTC")
            .to_string()
            .bright_black()
    );
    println!();

    Ok(())
}

/// Creates a link after showing the normalized form and asking for confirmation.
async fn create_link(service: &SlugService, slug: &str, url: &str, skip_confirm: bool) -> Result<()> {
    println!("{}", "Create short link".bright_blue().bold());
    println!();

    let slug = validate_slug(slug).map_err(|e| anyhow::anyhow!("{}", e))?;
    let normalized = normalize_url(url).map_err(|e| anyhow::anyhow!("{}", e))?;

    println!("  Slug: {}", slug.as_str().cyan());
    println!("  URL:  {}", normalized.bright_white());
    println!();

    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt("Create this link?")
            .default(true)
            .interact()?;

        if !confirmed {
            println!("{}", "Cancelled".red());
            return Ok(());
        }
    }

    service
        .create_slug(slug.as_str(), url, ADMIN_CLIENT_KEY)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to create link: {}", e))?;

    println!("{}", "Link created successfully!".green().bold());
    println!();

    Ok(())
}

/// Displays the number of stored links.
async fn handle_stats(pool: &PgPool) -> Result<()> {
    println!("{}", "Statistics".bright_blue().bold());
    println!();

    let repository = PgSlugRepository::new(Arc::new(pool.clone()));
    let links_count = repository
        .count()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to count links: {}", e))?;

    let latest: Option<chrono::DateTime<chrono::Utc>> =
        sqlx::query_scalar("SELECT MAX(created_at) FROM short_links")
            .fetch_one(pool)
            .await?;

    println!(
        "  Links:       {}",
        links_count.to_string().bright_green().bold()
    );
    if let Some(latest) = latest {
        println!(
            "  Last created: {}",
            latest.format("%Y-%m-%d %H:%M").to_string().bright_black()
        );
    }
    println!();

    Ok(())
}

/// Handles database diagnostic commands.
async fn handle_db_action(action: DbAction, pool: &PgPool) -> Result<()> {
    match action {
        DbAction::Check => {
            println!("{}", "Checking database connection...".bright_blue());

            sqlx::query("SELECT 1").fetch_one(pool).await?;

            println!("{}", "Database connection OK".green().bold());
        }
        DbAction::Info => {
            println!("{}", "Database Information".bright_blue().bold());
            println!();

            let version: String = sqlx::query_scalar("SELECT version()")
                .fetch_one(pool)
                .await?;

            let migrated: bool = sqlx::query_scalar(
                "SELECT EXISTS (SELECT 1 FROM information_schema.tables WHERE table_name = 'short_links')",
            )
            .fetch_one(pool)
            .await?;

            println!("  PostgreSQL: {}", version.bright_white());
            println!(
                "  Schema:     {}",
                if migrated {
                    "migrated".green()
                } else {
                    "not migrated".yellow()
                }
            );
            println!();
        }
    }

    Ok(())
}
