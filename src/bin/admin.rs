//! CLI administration tool for link-shortener.
//!
//! Inspects stored links and runs the retention policy on demand, without
//! going through the HTTP API.
//!
//! # Usage
//!
//! ```bash
//! # List stored links, newest first
//! cargo run --bin admin -- list
//!
//! # Link and click totals
//! cargo run --bin admin -- stats
//!
//! # Delete links older than the retention window now
//! cargo run --bin admin -- purge --yes
//!
//! # Check database connection
//! cargo run --bin admin -- db check
//! ```
//!
//! # Environment Variables
//!
//! - `DATABASE_URL` (required): PostgreSQL connection string
//! - `LINK_TTL_SECONDS` (optional): retention window used by `purge` (default: 86400)

use link_shortener::domain::expiry_sweeper::sweep_once;
use link_shortener::domain::repositories::LinkRepository;
use link_shortener::infrastructure::persistence::PgLinkRepository;

use anyhow::{Context, Result};
use chrono::{DateTime, Duration, Utc};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::Confirm;
use sqlx::PgPool;
use std::sync::Arc;

/// CLI tool for managing link-shortener.
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
    /// List stored links, newest first
    List {
        /// Show at most this many links
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Show statistics
    Stats,

    /// Delete links older than the retention window
    Purge {
        /// Retention window in seconds (defaults to LINK_TTL_SECONDS or 86400)
        #[arg(long, env = "LINK_TTL_SECONDS", default_value_t = 86_400)]
        ttl_seconds: i64,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
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
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL must be set")?;

    let pool = PgPool::connect(&database_url)
        .await
        .context("Failed to connect to database")?;

    match cli.command {
        Commands::List { limit } => handle_list(&pool, limit).await?,
        Commands::Stats => handle_stats(&pool).await?,
        Commands::Purge { ttl_seconds, yes } => handle_purge(&pool, ttl_seconds, yes).await?,
        Commands::Db { action } => handle_db_action(action, &pool).await?,
    }

    Ok(())
}

/// Prints stored links as a table.
async fn handle_list(pool: &PgPool, limit: Option<usize>) -> Result<()> {
    let repository = PgLinkRepository::new(Arc::new(pool.clone()));
    let links = repository.list_all().await?;

    if links.is_empty() {
        println!("{}", "No links stored".yellow());
        return Ok(());
    }

    println!(
        "{:<12} {:>7}  {:<20}  {}",
        "CODE".bold(),
        "CLICKS".bold(),
        "CREATED".bold(),
        "URL".bold()
    );

    for link in links.iter().take(limit.unwrap_or(usize::MAX)) {
        println!(
            "{:<12} {:>7}  {:<20}  {}",
            link.code.bright_cyan(),
            link.clicks.to_string().bright_green(),
            link.created_at.format("%Y-%m-%d %H:%M:%S"),
            link.original_url
        );
    }

    Ok(())
}

/// Prints link and click totals.
async fn handle_stats(pool: &PgPool) -> Result<()> {
    println!("{}", "Statistics".bright_blue().bold());
    println!();

    let (links_count, clicks_count): (i64, i64) =
        sqlx::query_as("SELECT COUNT(*), COALESCE(SUM(clicks), 0)::BIGINT FROM links")
            .fetch_one(pool)
            .await?;

    let oldest: Option<chrono::DateTime<Utc>> =
        sqlx::query_scalar("SELECT MIN(created_at) FROM links")
            .fetch_one(pool)
            .await?;

    println!(
        "  Links:         {}",
        links_count.to_string().bright_green().bold()
    );
    println!(
        "  Clicks:        {}",
        clicks_count.to_string().bright_green().bold()
    );
    if let Some(oldest) = oldest {
        println!(
            "  Oldest link:   {}",
            oldest.format("%Y-%m-%d %H:%M:%S UTC").to_string().bright_white()
        );
    }
    println!();

    Ok(())
}

/// Runs the retention policy once.
async fn handle_purge(pool: &PgPool, ttl_seconds: i64, yes: bool) -> Result<()> {
    let (retention, cutoff) = retention_cutoff(ttl_seconds, Utc::now())?;

    if !yes {
        let confirmed = Confirm::new()
            .with_prompt(format!(
                "Delete all links created before {}?",
                cutoff.format("%Y-%m-%d %H:%M:%S UTC")
            ))
            .default(false)
            .interact()?;

        if !confirmed {
            println!("{}", "Aborted".yellow());
            return Ok(());
        }
    }

    let repository = PgLinkRepository::new(Arc::new(pool.clone()));
    let purged = sweep_once(&repository, retention).await?;

    println!(
        "{} {}",
        "Purged links:".green().bold(),
        purged.to_string().bright_white()
    );

    Ok(())
}

/// Converts `--ttl-seconds` into a retention window and the matching cutoff.
fn retention_cutoff(ttl_seconds: i64, now: DateTime<Utc>) -> Result<(Duration, DateTime<Utc>)> {
    if ttl_seconds <= 0 {
        anyhow::bail!("Retention window must be positive, got {ttl_seconds}");
    }

    let retention = Duration::try_seconds(ttl_seconds)
        .with_context(|| format!("Retention window of {ttl_seconds} seconds is too large"))?;
    let cutoff = now
        .checked_sub_signed(retention)
        .with_context(|| format!("Retention window of {ttl_seconds} seconds is too large"))?;

    Ok((retention, cutoff))
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

            println!("  PostgreSQL: {}", version.bright_white());
            println!();
        }
    }

    Ok(())
}
