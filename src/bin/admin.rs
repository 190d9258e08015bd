//! CLI administration tool for tinylink.
//!
//! Manages short links directly in PostgreSQL without going through the
//! HTTP API.
//!
//! # Usage
//!
//! ```bash
//! # List all links
//! cargo run --bin admin -- links list
//!
//! # Show one link
//! cargo run --bin admin -- links show docs123
//!
//! # Create a link, optionally with a custom code
//! cargo run --bin admin -- links create example.com --code docs123
//!
//! # Delete a link
//! cargo run --bin admin -- links delete docs123
//!
//! # Check database connection
//! cargo run --bin admin -- db check
//! ```
//!
//! # Environment Variables
//!
//! - `DATABASE_URL` or `DB_HOST`/`DB_USER`/`DB_PASSWORD`/`DB_NAME` (required)

use tinylink::config::{self, Config};
use tinylink::prelude::{Link, LinkService, PgLinkRepository};
use tinylink::server::connect_pool;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::Confirm;
use sqlx::PgPool;
use std::sync::Arc;

/// CLI tool for managing tinylink.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage short links
    Links {
        #[command(subcommand)]
        action: LinkAction,
    },

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

#[derive(Subcommand)]
enum LinkAction {
    /// List all links, newest first
    List,

    /// Show a single link
    Show {
        /// Short code
        code: String,
    },

    /// Create a short link
    Create {
        /// Target URL (`https://` is added to bare domains)
        url: String,

        /// Custom code, 6-8 letters or digits
        #[arg(short, long)]
        code: Option<String>,
    },

    /// Delete a short link
    Delete {
        /// Short code
        code: String,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },
}

#[derive(Subcommand)]
enum DbAction {
    /// Check database connection and show totals
    Check,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let config = config::load_from_env()?;
    let pool = connect(&config).await?;

    match cli.command {
        Commands::Links { action } => handle_link_action(action, pool).await?,
        Commands::Db { action } => handle_db_action(action, &pool).await?,
    }

    Ok(())
}

async fn connect(config: &Config) -> Result<PgPool> {
    let database_url = config
        .database_url
        .as_deref()
        .context("DATABASE_URL (or DB_HOST and friends) must be set")?;

    connect_pool(config, database_url).await
}

/// Dispatches link management commands.
async fn handle_link_action(action: LinkAction, pool: PgPool) -> Result<()> {
    let repository = PgLinkRepository::new(Arc::new(pool));
    repository
        .migrate()
        .await
        .context("Failed to run migrations")?;
    let service = LinkService::new(Arc::new(repository));

    match action {
        LinkAction::List => list_links(&service).await?,
        LinkAction::Show { code } => show_link(&service, &code).await?,
        LinkAction::Create { url, code } => create_link(&service, &url, code).await?,
        LinkAction::Delete { code, yes } => delete_link(&service, &code, yes).await?,
    }

    Ok(())
}

/// Lists all links.
///
/// # Output Format
///
/// ```text
/// 🔗 Links
///
///   Code      Clicks  Created           URL
///   ────────────────────────────────────────────────────────────
///   docs123   4       2025-01-15 10:30  https://example.com/docs
/// ```
async fn list_links(service: &LinkService) -> Result<()> {
    println!("{}", "🔗 Links".bright_blue().bold());
    println!();

    let links = service
        .list_links()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to list links: {}", e))?;

    if links.is_empty() {
        println!("{}", "  No links found".yellow());
        println!();
        println!(
            "  Create one with: {} admin links create <url>",
            "cargo run --bin".bright_cyan()
        );
        return Ok(());
    }

    println!(
        "  {:<9} {:<7} {:<17} {}",
        "Code".bright_white().bold(),
        "Clicks".bright_white().bold(),
        "Created".bright_white().bold(),
        "URL".bright_white().bold()
    );
    println!("  {}", "─".repeat(75).bright_black());

    for link in &links {
        let clicks = if link.was_clicked() {
            link.clicks.to_string().bright_green()
        } else {
            link.clicks.to_string().bright_black()
        };

        println!(
            "  {:<9} {:<7} {:<17} {}",
            link.code.cyan(),
            clicks,
            link.created_at
                .format("%Y-%m-%d %H:%M")
                .to_string()
                .bright_black(),
            link.url
        );
    }

    println!();
    println!("  Total: {}", links.len().to_string().bright_white().bold());
    println!();

    Ok(())
}

async fn show_link(service: &LinkService, code: &str) -> Result<()> {
    let link = service
        .get_link(code)
        .await
        .map_err(|e| anyhow::anyhow!("{}", e))?;

    print_link(&link);
    Ok(())
}

async fn create_link(service: &LinkService, url: &str, code: Option<String>) -> Result<()> {
    println!("{}", "✨ Create Short Link".bright_blue().bold());
    println!();

    let link = service
        .create_link(url, code, None)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to create link: {}", e))?;

    println!("{}", "✅ Link created successfully!".green().bold());
    println!();
    print_link(&link);

    Ok(())
}

/// Deletes a link after confirmation (default: No) unless `--yes` is given.
async fn delete_link(service: &LinkService, code: &str, skip_confirm: bool) -> Result<()> {
    println!("{}", "🗑  Delete Short Link".bright_blue().bold());
    println!();

    let link = service
        .get_link(code)
        .await
        .map_err(|e| anyhow::anyhow!("{}", e))?;
    print_link(&link);

    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt("Delete this link?")
            .default(false)
            .interact()?;

        if !confirmed {
            println!("{}", "❌ Cancelled".red());
            return Ok(());
        }
    }

    service
        .delete_link(code)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to delete link: {}", e))?;

    println!();
    println!("{}", "✅ Link deleted".green().bold());
    println!();

    Ok(())
}

fn print_link(link: &Link) {
    let last_clicked = link
        .last_clicked
        .map(|at| at.format("%Y-%m-%d %H:%M:%S").to_string())
        .unwrap_or_else(|| "never".to_string());

    println!("  Code:         {}", link.code.cyan());
    println!("  URL:          {}", link.url.bright_white());
    println!("  Clicks:       {}", link.clicks.to_string().bright_green());
    println!(
        "  Created:      {}",
        link.created_at.format("%Y-%m-%d %H:%M:%S").to_string().bright_black()
    );
    println!("  Last clicked: {}", last_clicked.bright_black());
    println!();
}

/// Handles database diagnostic commands.
async fn handle_db_action(action: DbAction, pool: &PgPool) -> Result<()> {
    match action {
        DbAction::Check => {
            println!("{}", "🔍 Checking database connection...".bright_blue());

            sqlx::query("SELECT 1").fetch_one(pool).await?;

            println!("{}", "✅ Database connection OK".green().bold());
            println!();

            let links_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM links")
                .fetch_one(pool)
                .await
                .context("Schema missing, start the server once to apply migrations")?;

            let clicks_count: i64 =
                sqlx::query_scalar("SELECT COALESCE(SUM(clicks), 0)::BIGINT FROM links")
                    .fetch_one(pool)
                    .await?;

            println!("  Links:  {}", links_count.to_string().bright_green().bold());
            println!("  Clicks: {}", clicks_count.to_string().bright_green().bold());
            println!();
        }
    }

    Ok(())
}
