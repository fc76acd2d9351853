//! CLI administration tool for hashed-shortener.
//!
//! Provides maintenance commands and an offline view of the code generator
//! without requiring HTTP API access.
//!
//! # Usage
//!
//! ```bash
//! # Delete expired links
//! cargo run --bin admin -- cleanup
//!
//! # View statistics
//! cargo run --bin admin -- stats
//!
//! # Check database connection
//! cargo run --bin admin -- db check
//!
//! # Show every candidate code for a URL (no database needed)
//! cargo run --bin admin -- codegen https://example.com/a/very/long/path
//! ```
//!
//! # Environment Variables
//!
//! - `DATABASE_URL` (required except for `codegen`): PostgreSQL connection string

use hashed_shortener::codegen::{CodeGenerator, HashMode, MAX_ATTEMPTS};
use hashed_shortener::domain::repositories::LinkRepository;
use hashed_shortener::infrastructure::persistence::PgLinkRepository;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::Confirm;
use sqlx::PgPool;
use std::sync::Arc;

const TOP_LINKS_SHOWN: i64 = 5;

/// CLI tool for managing hashed-shortener.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Delete expired links
    Cleanup {
        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },

    /// Show statistics
    Stats,

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },

    /// Print the candidate codes for a URL
    Codegen {
        /// Long URL to hash
        url: String,
    },
}

#[derive(Subcommand)]
enum DbAction {
    /// Check database connection
    Check,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    if let Commands::Codegen { url } = &cli.command {
        return show_candidates(url);
    }

    let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL must be set")?;
    let pool = PgPool::connect(&database_url)
        .await
        .context("Failed to connect to database")?;

    match cli.command {
        Commands::Cleanup { yes } => cleanup(&pool, yes).await?,
        Commands::Stats => handle_stats(&pool).await?,
        Commands::Db { action } => handle_db_action(action, &pool).await?,
        Commands::Codegen { .. } => {}
    }

    Ok(())
}

/// Deletes expired links after confirmation.
///
/// Clicks of deleted links go with them (`ON DELETE CASCADE`).
async fn cleanup(pool: &PgPool, skip_confirm: bool) -> Result<()> {
    println!("{}", "🧹 Cleanup expired links".bright_blue().bold());
    println!();

    let expired: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM links WHERE expires_at IS NOT NULL AND expires_at <= NOW()",
    )
    .fetch_one(pool)
    .await?;

    if expired == 0 {
        println!("{}", "  No expired links".yellow());
        return Ok(());
    }

    println!(
        "  Expired links: {}",
        expired.to_string().bright_yellow().bold()
    );
    println!();

    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt("Delete them?")
            .default(false)
            .interact()?;

        if !confirmed {
            println!("{}", "❌ Cancelled".red());
            return Ok(());
        }
    }

    let repo = PgLinkRepository::new(Arc::new(pool.clone()));
    let deleted = repo
        .delete_expired()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to delete expired links: {}", e))?;

    println!();
    println!(
        "{} {}",
        "✅ Deleted".green().bold(),
        deleted.to_string().bright_white().bold()
    );
    println!();

    Ok(())
}

/// Displays link and click counts plus the most visited active links.
async fn handle_stats(pool: &PgPool) -> Result<()> {
    println!("{}", "📊 Statistics".bright_blue().bold());
    println!();

    let repo = PgLinkRepository::new(Arc::new(pool.clone()));

    let links_count = repo
        .count()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to count links: {}", e))?;

    let clicks_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM link_clicks")
        .fetch_one(pool)
        .await?;

    let weak_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM links WHERE strength = 'weak'")
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
    let weak = weak_count.to_string();
    println!(
        "  Weak codes:    {}",
        if weak_count > 0 {
            weak.bright_yellow().bold()
        } else {
            weak.bright_green().bold()
        }
    );
    println!();

    let top = repo
        .top_active(TOP_LINKS_SHOWN)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to load top links: {}", e))?;

    if top.is_empty() {
        return Ok(());
    }

    println!("{}", "  Top links".bright_white().bold());
    println!("  {}", "─".repeat(75).bright_black());
    for link in &top {
        println!(
            "  {:<10} {:>8}  {}",
            link.code.cyan(),
            link.click_count.to_string().bright_white(),
            link.long_url.bright_black()
        );
    }
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
    }

    Ok(())
}

/// Prints every strong candidate in probe order, then the first weak code.
fn show_candidates(url: &str) -> Result<()> {
    if url.is_empty() {
        anyhow::bail!("URL must not be empty");
    }

    let generator = CodeGenerator::new(HashMode::Strong);

    println!("{}", "🔢 Candidate codes".bright_blue().bold());
    println!("  URL: {}", url.cyan());
    println!();

    for attempt in 0..MAX_ATTEMPTS {
        let code = generator
            .strong_candidate(url, attempt)
            .map_err(|e| anyhow::anyhow!("{}", e))?;
        println!(
            "  {:<8} {:<6} {}",
            format!("#{attempt}").bright_black(),
            "strong".green(),
            code.bright_white().bold()
        );
    }

    println!(
        "  {:<8} {:<6} {}",
        "#0".bright_black(),
        "weak".yellow(),
        generator.weak_candidate(url, 0).bright_white().bold()
    );
    println!();

    Ok(())
}
