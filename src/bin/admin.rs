//! CLI administration tool for gry.
//!
//! Manages the TOTP secret and edits redirects directly in the filesystem
//! store, without going through the HTTP API.
//!
//! # Usage
//!
//! ```bash
//! # Generate a secret for GRY_TOTP_SECRET
//! cargo run --bin gry-admin -- secret generate
//!
//! # Print the code currently accepted by the server
//! cargo run --bin gry-admin -- secret code
//!
//! # Inspect and edit redirects
//! cargo run --bin gry-admin -- link get rust
//! cargo run --bin gry-admin -- link create rust https://www.rust-lang.org
//! cargo run --bin gry-admin -- link update rust https://doc.rust-lang.org
//! cargo run --bin gry-admin -- link delete rust
//! ```
//!
//! # Environment Variables
//!
//! - `GRY_TOTP_SECRET`: required by `secret code`
//! - `GRY_STORAGE_PATH` / `GRY_FOLDER`: storage root used by `link` commands
//!
//! Link commands take the same per-slug guarantees as the server only within
//! this process; across processes creation stays exclusive.

use gry::application::services::RedirectService;
use gry::config::{Config, StorageBackend};
use gry::domain::entities::Slug;
use gry::infrastructure::auth::{TotpAuthorizer, generate_secret};
use gry::infrastructure::persistence::FsRedirectStore;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::Confirm;
use std::sync::Arc;

/// CLI tool for managing gry.
#[derive(Parser)]
#[command(name = "gry-admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Top-level command groups.
#[derive(Subcommand)]
enum Commands {
    /// Manage the TOTP secret
    Secret {
        #[command(subcommand)]
        action: SecretAction,
    },

    /// Manage redirects in the filesystem store
    Link {
        #[command(subcommand)]
        action: LinkAction,
    },
}

#[derive(Subcommand)]
enum SecretAction {
    /// Generate a new base32 secret
    Generate {
        /// Print only the secret
        #[arg(short, long)]
        quiet: bool,
    },

    /// Print the current one-time code for GRY_TOTP_SECRET
    Code,
}

#[derive(Subcommand)]
enum LinkAction {
    /// Show the target of a slug
    Get { slug: String },

    /// Create a new redirect (the target is trimmed, as over HTTP)
    Create { slug: String, target: String },

    /// Replace the target of an existing redirect (trimmed, as over HTTP)
    Update { slug: String, target: String },

    /// Delete a redirect
    Delete {
        slug: String,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Commands::Secret { action } => handle_secret_action(action)?,
        Commands::Link { action } => handle_link_action(action).await?,
    }

    Ok(())
}

fn handle_secret_action(action: SecretAction) -> Result<()> {
    match action {
        SecretAction::Generate { quiet } => {
            let secret = generate_secret();

            if quiet {
                println!("{secret}");
                return Ok(());
            }

            println!("{}", "🔑 New TOTP secret".bright_blue().bold());
            println!();
            println!("  {}", secret.bright_yellow().bold());
            println!();
            println!("{}", "Add this to your environment:".bright_white());
            println!("  {}={}", "GRY_TOTP_SECRET".bright_cyan(), secret);
            println!();
            println!(
                "{}",
                "⚠️  Anyone holding this secret can change your redirects.".red()
            );
        }
        SecretAction::Code => {
            let secret =
                std::env::var("GRY_TOTP_SECRET").context("GRY_TOTP_SECRET must be set")?;
            let authorizer =
                TotpAuthorizer::from_base32(&secret).context("Invalid GRY_TOTP_SECRET")?;

            println!("{}", authorizer.current_code()?);
        }
    }

    Ok(())
}

/// Dispatches link commands against the configured filesystem store.
async fn handle_link_action(action: LinkAction) -> Result<()> {
    let config = Config::from_env()?;

    if config.storage_backend == StorageBackend::Memory {
        anyhow::bail!("link commands need the filesystem store, but GRY_STORAGE is 'memory'");
    }

    let store = FsRedirectStore::new(&config.storage_path)
        .await
        .with_context(|| {
            format!(
                "Failed to open storage at {}",
                config.storage_path.display()
            )
        })?;
    let service = RedirectService::new(Arc::new(store));

    match action {
        LinkAction::Get { slug } => {
            let slug = parse_slug(&slug)?;
            let target = service.resolve(&slug).await?;

            println!("  {} → {}", slug.as_str().cyan(), target.bright_white());
        }
        LinkAction::Create { slug, target } => {
            let slug = parse_slug(&slug)?;
            service.create(&slug, target.trim()).await?;

            println!("{}", "✅ Redirect created".green().bold());
            println!("  {} → {}", slug.as_str().cyan(), target.trim());
        }
        LinkAction::Update { slug, target } => {
            let slug = parse_slug(&slug)?;
            service.update(&slug, target.trim()).await?;

            println!("{}", "✅ Redirect updated".green().bold());
            println!("  {} → {}", slug.as_str().cyan(), target.trim());
        }
        LinkAction::Delete { slug, yes } => {
            let slug = parse_slug(&slug)?;
            let target = service.resolve(&slug).await?;

            println!("  {} → {}", slug.as_str().cyan(), target.bright_black());
            println!();

            if !yes {
                let confirmed = Confirm::new()
                    .with_prompt("Delete this redirect?")
                    .default(false)
                    .interact()?;

                if !confirmed {
                    println!("{}", "❌ Cancelled".red());
                    return Ok(());
                }
            }

            service.delete(&slug).await?;

            println!("{}", "✅ Redirect deleted".green().bold());
        }
    }

    Ok(())
}

fn parse_slug(raw: &str) -> Result<Slug> {
    Slug::parse(raw).with_context(|| format!("Invalid slug '{raw}'"))
}
