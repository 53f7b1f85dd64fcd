//! Rolodex CLI - Database migrations and account management.
//!
//! # Usage
//!
//! ```bash
//! # Run database migrations
//! rolodex-cli migrate
//!
//! # Create an account
//! rolodex-cli user create -u alice -n "Alice W" -p "s3cret-pass"
//!
//! # Remove expired sessions
//! rolodex-cli session sweep
//! ```
//!
//! # Commands
//!
//! - `migrate` - Run database migrations
//! - `user create` - Create accounts
//! - `session sweep` - Remove expired sessions

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "rolodex-cli")]
#[command(author, version, about = "Rolodex CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run database migrations
    Migrate,
    /// Manage accounts
    User {
        #[command(subcommand)]
        action: UserAction,
    },
    /// Manage login sessions
    Session {
        #[command(subcommand)]
        action: SessionAction,
    },
}

#[derive(Subcommand)]
enum SessionAction {
    /// Remove expired sessions
    Sweep,
}

#[derive(Subcommand)]
enum UserAction {
    /// Create an account
    Create {
        /// Login name
        #[arg(short, long)]
        username: String,
        /// Display name
        #[arg(short, long)]
        name: String,
        /// Password (hashed before storage)
        #[arg(short, long)]
        password: String,
    },
}

#[tokio::main]
async fn main() -> Result<(), commands::CliError> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "rolodex_cli=info,rolodex_server=info".into()),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Migrate => commands::migrate::run().await,
        Commands::User {
            action:
                UserAction::Create {
                    username,
                    name,
                    password,
                },
        } => commands::user::create(&username, &name, &password).await,
        Commands::Session {
            action: SessionAction::Sweep,
        } => commands::session::sweep().await,
    }
}
