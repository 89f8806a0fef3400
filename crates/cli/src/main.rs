//! Coffee & Wifi CLI - Database migrations and management tools.
//!
//! # Usage
//!
//! ```bash
//! # Apply database schema migrations
//! cw-cli migrate
//!
//! # Insert a handful of sample cafes
//! cw-cli seed
//!
//! # Create a user (the first account created holds the admin identifier)
//! cw-cli user create -n "Site Admin" -e admin@example.com -p <password>
//! ```
//!
//! # Commands
//!
//! - `migrate` - Run database migrations
//! - `seed` - Seed the catalogue with sample cafes
//! - `user create` - Create a user account

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "cw-cli")]
#[command(author, version, about = "Coffee & Wifi CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run database migrations
    Migrate,
    /// Seed the catalogue with sample cafes
    Seed,
    /// Manage user accounts
    User {
        #[command(subcommand)]
        action: UserAction,
    },
}

#[derive(Subcommand)]
enum UserAction {
    /// Create a new user account
    Create {
        /// Display name shown as the cafe contributor
        #[arg(short, long)]
        name: String,

        /// Login email address
        #[arg(short, long)]
        email: String,

        /// Plaintext password (hashed before storage)
        #[arg(short, long)]
        password: String,
    },
}

#[tokio::main]
async fn main() {
    // Initialize tracing
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
        Commands::Migrate => commands::migrate::run().await?,
        Commands::Seed => commands::seed::run().await?,
        Commands::User { action } => match action {
            UserAction::Create {
                name,
                email,
                password,
            } => {
                commands::user::create(&name, &email, &password).await?;
            }
        },
    }
    Ok(())
}
