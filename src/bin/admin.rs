//! CLI administration tool for domain-purchase.
//!
//! Inspects domain mappings, issues anti-forgery tokens for manual testing
//! and generates secrets without going through the HTTP API.
//!
//! # Usage
//!
//! ```bash
//! # List the domains mapped onto a site
//! cargo run --bin admin -- mappings list --site 7
//!
//! # Issue a nonce for a user and an action
//! cargo run --bin admin -- nonce create --user 5 --action check_domain
//!
//! # Generate a value for NONCE_SECRET
//! cargo run --bin admin -- secret generate
//!
//! # Check database connection
//! cargo run --bin admin -- db check
//! ```
//!
//! # Environment Variables
//!
//! - `DATABASE_URL`: for `mappings` and `db`
//! - `NONCE_SECRET`, `NONCE_LIFETIME_SECONDS`: for `nonce`

use domain_purchase::application::services::NonceService;
use domain_purchase::domain::action::AjaxAction;
use domain_purchase::domain::repositories::MappingRepository;
use domain_purchase::infrastructure::persistence::PgMappingRepository;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use sqlx::PgPool;
use std::sync::Arc;
use std::time::Duration;

/// Bytes of entropy in a generated secret.
const SECRET_BYTES: usize = 32;

/// CLI tool for managing domain-purchase.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Inspect domain mappings
    Mappings {
        #[command(subcommand)]
        action: MappingsAction,
    },

    /// Issue anti-forgery tokens
    Nonce {
        #[command(subcommand)]
        action: NonceAction,
    },

    /// Generate secrets
    Secret {
        #[command(subcommand)]
        action: SecretAction,
    },

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

#[derive(Subcommand)]
enum MappingsAction {
    /// List the domains mapped onto a site
    List {
        /// Site ID
        #[arg(short, long)]
        site: i64,
    },
}

#[derive(Subcommand)]
enum NonceAction {
    /// Create a nonce valid for one user and one action
    Create {
        /// User ID the nonce is bound to
        #[arg(short, long)]
        user: i64,

        /// Action name, full (`domainmapping_check_domain`) or short (`check_domain`)
        #[arg(short, long)]
        action: AjaxAction,
    },
}

#[derive(Subcommand)]
enum SecretAction {
    /// Print a random hex secret suitable for NONCE_SECRET
    Generate,
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

    match cli.command {
        Commands::Mappings { action } => handle_mappings_action(action).await?,
        Commands::Nonce { action } => handle_nonce_action(action)?,
        Commands::Secret { action } => handle_secret_action(action),
        Commands::Db { action } => handle_db_action(action).await?,
    }

    Ok(())
}

async fn connect() -> Result<PgPool> {
    let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL must be set")?;

    PgPool::connect(&database_url)
        .await
        .context("Failed to connect to database")
}

async fn handle_mappings_action(action: MappingsAction) -> Result<()> {
    let pool = connect().await?;
    let repo = PgMappingRepository::new(Arc::new(pool));

    match action {
        MappingsAction::List { site } => list_mappings(&repo, site).await,
    }
}

/// Lists the mappings of a site.
///
/// # Output Format
///
/// ```text
/// 🌐 Domain mappings of site 7
///
///   ID  Domain                         Created              Status
///   ───────────────────────────────────────────────────────────────────
///   1   example.com                    2025-01-15 10:30     ACTIVE
/// ```
async fn list_mappings(repo: &PgMappingRepository, site_id: i64) -> Result<()> {
    println!(
        "{}",
        format!("🌐 Domain mappings of site {}", site_id)
            .bright_blue()
            .bold()
    );
    println!();

    let mappings = repo
        .list_for_site(site_id)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to list mappings: {}", e))?;

    if mappings.is_empty() {
        println!("{}", "  No mappings found".yellow());
        return Ok(());
    }

    println!(
        "  {:<5} {:<30} {:<20} {:<10}",
        "ID".bright_white().bold(),
        "Domain".bright_white().bold(),
        "Created".bright_white().bold(),
        "Status".bright_white().bold()
    );
    println!("  {}", "─".repeat(67).bright_black());

    for mapping in &mappings {
        let status = if mapping.active {
            "ACTIVE".green()
        } else {
            "INACTIVE".red()
        };

        println!(
            "  {:<5} {:<30} {:<20} {}",
            mapping.id.to_string().bright_black(),
            mapping.domain.cyan(),
            mapping
                .created_at
                .format("%Y-%m-%d %H:%M")
                .to_string()
                .bright_black(),
            status
        );
    }

    println!();
    println!(
        "  Total: {}",
        mappings.len().to_string().bright_white().bold()
    );
    println!();

    Ok(())
}

fn handle_nonce_action(action: NonceAction) -> Result<()> {
    match action {
        NonceAction::Create { user, action } => {
            let secret = std::env::var("NONCE_SECRET").context("NONCE_SECRET must be set")?;
            anyhow::ensure!(!secret.is_empty(), "NONCE_SECRET must not be empty");
            anyhow::ensure!(user > 0, "User ID must be positive");

            let lifetime = std::env::var("NONCE_LIFETIME_SECONDS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(86_400);

            let nonces = NonceService::new(secret, Duration::from_secs(lifetime));
            let nonce = nonces.create(action, user);

            println!("{}", "🔑 Nonce created".bright_blue().bold());
            println!();
            println!("  User:   {}", user.to_string().cyan());
            println!("  Action: {}", action.as_str().cyan());
            println!("  Nonce:  {}", nonce.bright_yellow().bold());
            println!();
            println!(
                "{}",
                format!(
                    "Valid for {}s to {}s from now.",
                    lifetime / 2,
                    lifetime
                )
                .bright_black()
            );
        }
    }

    Ok(())
}

fn handle_secret_action(action: SecretAction) {
    match action {
        SecretAction::Generate => {
            let bytes: [u8; SECRET_BYTES] = rand::random();
            println!("{}", hex::encode(bytes));
        }
    }
}

/// Handles database diagnostic commands.
async fn handle_db_action(action: DbAction) -> Result<()> {
    match action {
        DbAction::Check => {
            println!("{}", "🔍 Checking database connection...".bright_blue());
            let pool = connect().await?;
            let repo = PgMappingRepository::new(Arc::new(pool));
            repo.ping()
                .await
                .map_err(|e| anyhow::anyhow!("Database check failed: {}", e))?;
            println!("{}", "✅ Database connection OK".green().bold());
        }
    }

    Ok(())
}
