//! Nour CLI - session management from the terminal.
//!
//! # Usage
//!
//! ```bash
//! # Log the administrator in
//! nour admin login -e admin@nour.org -p admin123
//!
//! # Log a donor in (a name marks a first-time registrant)
//! nour donor login --phone 01000000000 --name "فاعل خير"
//!
//! # Show who is logged in
//! nour status
//!
//! # Send an authorized request to the backend
//! nour request GET donations
//! nour request POST donations --body '{"amount": "250.00"}'
//! ```
//!
//! # Commands
//!
//! - `admin login|logout|photo` - Manage the admin session
//! - `donor login|logout` - Manage the donor session
//! - `status` - Show both roles
//! - `request` - Send a request through the authorized pipeline
//!
//! Sessions persist in `NOUR_STORE_PATH` (default `.nour/session.json`),
//! the same file the portal reads.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod commands;

use commands::CliError;

#[derive(Parser)]
#[command(name = "nour")]
#[command(author, version, about = "Nour session tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage the admin session
    Admin {
        #[command(subcommand)]
        action: AdminAction,
    },
    /// Manage the donor session
    Donor {
        #[command(subcommand)]
        action: DonorAction,
    },
    /// Show which roles are logged in
    Status,
    /// Send an authorized request to the backend API
    Request {
        /// HTTP method (GET, POST, PUT, DELETE, ...)
        method: String,

        /// Path relative to `NOUR_API_BASE_URL`
        path: String,

        /// JSON request body
        #[arg(short, long)]
        body: Option<String>,
    },
}

#[derive(Subcommand)]
enum AdminAction {
    /// Log the administrator in
    Login {
        /// Admin email address
        #[arg(short, long)]
        email: String,

        /// Admin password
        #[arg(short, long)]
        password: String,
    },
    /// Log the administrator out
    Logout,
    /// Replace the administrator's profile photo
    Photo {
        /// Image file (png, jpeg, webp or gif)
        file: PathBuf,
    },
}

#[derive(Subcommand)]
enum DonorAction {
    /// Log a donor in
    Login {
        /// Verified phone number
        #[arg(long)]
        phone: String,

        /// Arabic display name (marks a first-time registrant)
        #[arg(long)]
        name: Option<String>,

        /// English display name
        #[arg(long)]
        name_en: Option<String>,

        /// Contact email
        #[arg(long)]
        email: Option<String>,
    },
    /// Log the donor out
    Logout,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let config = nour_session::SessionConfig::from_env()?;

    match cli.command {
        Commands::Admin { action } => {
            let sessions = commands::open_sessions(&config)?;
            match action {
                AdminAction::Login { email, password } => {
                    commands::session::admin_login(&sessions, &email, &password)?;
                }
                AdminAction::Logout => commands::session::admin_logout(&sessions)?,
                AdminAction::Photo { file } => commands::session::admin_photo(&sessions, &file)?,
            }
        }
        Commands::Donor { action } => {
            let sessions = commands::open_sessions(&config)?;
            match action {
                DonorAction::Login {
                    phone,
                    name,
                    name_en,
                    email,
                } => {
                    commands::session::donor_login(
                        &sessions,
                        &phone,
                        name,
                        name_en,
                        email.as_deref(),
                    )?;
                }
                DonorAction::Logout => commands::session::donor_logout(&sessions)?,
            }
        }
        Commands::Status => {
            let sessions = commands::open_sessions(&config)?;
            commands::session::status(&sessions);
        }
        Commands::Request { method, path, body } => {
            let sessions = commands::open_sessions(&config)?;
            commands::request::send(&config, sessions, &method, &path, body.as_deref()).await?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_admin_login() {
        let cli = Cli::try_parse_from([
            "nour", "admin", "login", "-e", "admin@nour.org", "-p", "admin123",
        ])
        .map_err(|e| e.to_string());

        assert!(matches!(
            cli.map(|c| c.command),
            Ok(Commands::Admin {
                action: AdminAction::Login { .. }
            })
        ));
    }

    #[test]
    fn test_parses_request_with_body() {
        let cli = Cli::try_parse_from([
            "nour", "request", "POST", "donations", "--body", "{}",
        ]);

        let Ok(Cli {
            command: Commands::Request { method, path, body },
        }) = cli
        else {
            panic!("expected request command");
        };
        assert_eq!(method, "POST");
        assert_eq!(path, "donations");
        assert_eq!(body.as_deref(), Some("{}"));
    }

    #[test]
    fn test_donor_login_requires_phone() {
        assert!(Cli::try_parse_from(["nour", "donor", "login", "--name", "X"]).is_err());
    }
}
