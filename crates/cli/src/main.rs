//! Partfinder CLI - Database migrations and batch tools.
//!
//! # Usage
//!
//! ```bash
//! # Apply database migrations
//! partfinder migrate
//!
//! # Load a snapshot into an empty store (no-op if the store has data)
//! partfinder import static/data/products.json
//!
//! # Destructive: drop the schema, recreate the bootstrap admin, reload
//! partfinder import static/data/products.json --reset
//!
//! # Regenerate the snapshot from the store
//! partfinder export static/data/products.json
//!
//! # Derive part numbers inside a snapshot (pure file-to-file transform)
//! partfinder derive products.json products_updated.json
//!
//! # Create an admin account (password from PARTFINDER_ADMIN_PASSWORD)
//! partfinder admin create -u admin
//! ```
//!
//! # Environment Variables
//!
//! - `PARTFINDER_DATABASE_URL` - `SQLite` connection string
//! - `PARTFINDER_ADMIN_PASSWORD` - password for `admin create` and `--reset`

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "partfinder")]
#[command(author, version, about = "Partfinder CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Apply database migrations
    Migrate,
    /// Load a products.json snapshot into the store
    Import {
        /// Snapshot file to load
        file: PathBuf,

        /// Drop and recreate the schema (and bootstrap admin) first
        #[arg(long)]
        reset: bool,
    },
    /// Regenerate the products.json snapshot from the store
    Export {
        /// Snapshot file to write
        file: PathBuf,
    },
    /// Derive part numbers inside a snapshot file
    Derive {
        /// Input snapshot
        input: PathBuf,

        /// Output snapshot
        output: PathBuf,
    },
    /// Manage admin accounts
    Admin {
        #[command(subcommand)]
        action: AdminAction,
    },
}

#[derive(Subcommand)]
enum AdminAction {
    /// Create a new admin account
    Create {
        /// Admin username
        #[arg(short, long)]
        username: String,
    },
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    // Load .env file if present
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Migrate => commands::migrate::run().await?,
        Commands::Import { file, reset } => commands::import::run(&file, reset).await?,
        Commands::Export { file } => commands::export::run(&file).await?,
        Commands::Derive { input, output } => commands::derive::run(&input, &output)?,
        Commands::Admin { action } => match action {
            AdminAction::Create { username } => commands::admin::create_user(&username).await?,
        },
    }
    Ok(())
}
