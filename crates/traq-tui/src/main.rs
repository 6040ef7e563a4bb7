//! # traq
//!
//! Terminal client for the task backend: task CRUD, title search, and
//! clock-in/clock-out time tracking over HTTP with a stored bearer session.
//!
//! Running with no subcommand opens the TUI; `login`, `logout`, and
//! `register` run headless.

#![deny(unsafe_code)]

mod app;
mod auth_view;
mod ui;
mod view;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use traq_api::{ApiClient, RegisterRequest};
use traq_auth::{clear_session, save_session, session_file_path, SessionStorage, UserProfile};
use traq_settings::{data_dir, load_settings, TraqSettings};

/// Terminal client for the task backend.
#[derive(Parser, Debug)]
#[command(name = "traq", about = "Terminal task tracker", version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Store a provider-issued access token as the active session.
    Login {
        /// Access token from the identity provider.
        #[arg(long)]
        token: String,
        /// Display name to show in the top bar.
        #[arg(long)]
        name: Option<String>,
        /// Email to show when no name is set.
        #[arg(long)]
        email: Option<String>,
    },
    /// Remove the stored session.
    Logout,
    /// Register a new account with the backend.
    Register {
        /// Display name.
        #[arg(long)]
        name: String,
        /// Email address.
        #[arg(long)]
        email: String,
        /// Password.
        #[arg(long)]
        password: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Cli::parse();

    // Settings before logging: the log filter must not depend on anything
    // the settings file could change, but failures loading it should still
    // be reported, so fall back to defaults and warn after init.
    let settings = load_settings();
    init_logging();
    let settings = match settings {
        Ok(settings) => settings,
        Err(e) => {
            tracing::warn!(error = %e, "failed to load settings, using defaults");
            TraqSettings::default()
        }
    };

    let dir = data_dir();
    match args.command {
        Some(Command::Login { token, name, email }) => {
            let mut session = SessionStorage::new(token);
            if name.is_some() || email.is_some() {
                session = session.with_user(UserProfile { name, email });
            }
            let path = session_file_path(&dir);
            save_session(&path, &mut session).context("failed to store session")?;
            println!("Signed in as {}.", session.display_name());
        }
        Some(Command::Logout) => {
            clear_session(&session_file_path(&dir)).context("failed to clear session")?;
            println!("Signed out.");
        }
        Some(Command::Register {
            name,
            email,
            password,
        }) => {
            let api = ApiClient::new(
                settings.backend.base_url.clone(),
                settings.backend.timeout_ms,
            );
            let user = api
                .register(&RegisterRequest {
                    name,
                    email,
                    password,
                })
                .await
                .context("registration failed")?;
            let label = user.name.or(user.email).unwrap_or_default();
            println!("Registered {label}.");
        }
        None => app::run(settings, dir).await?,
    }

    Ok(())
}

/// Logging goes to stderr so the alternate screen stays clean; redirect
/// stderr to a file to capture it.
fn init_logging() {
    let filter =
        EnvFilter::try_from_env("TRAQ_LOG").unwrap_or_else(|_| EnvFilter::new("traq=info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
