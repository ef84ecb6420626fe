//! FashionReels CLI - database migrations.
//!
//! # Usage
//!
//! ```bash
//! # Create the storefront session table
//! fr-cli migrate storefront
//!
//! # Create the admin session table
//! fr-cli migrate admin
//!
//! # Both
//! fr-cli migrate all
//! ```
//!
//! The services never migrate on startup; this tool is the only place the
//! session schema is created.

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "fr-cli")]
#[command(author, version, about = "FashionReels CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run database migrations
    Migrate {
        #[command(subcommand)]
        target: MigrateTarget,
    },
}

#[derive(Subcommand)]
enum MigrateTarget {
    /// Create the storefront session schema
    Storefront,
    /// Create the admin session schema
    Admin,
    /// Run all migrations
    All,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Migrate { target } => match target {
            MigrateTarget::Storefront => commands::migrate::storefront().await?,
            MigrateTarget::Admin => commands::migrate::admin().await?,
            MigrateTarget::All => {
                commands::migrate::storefront().await?;
                commands::migrate::admin().await?;
            }
        },
    }
    Ok(())
}
