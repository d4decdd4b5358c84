//! Study Buddy CLI - flashcards from study notes in the terminal
//!
//! Drives the same session, notification and flashcard controllers as the
//! web page, with the saved session kept in a local JSON file.

mod cli;
mod commands;
mod dialogs;
mod error;
mod render;

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use studybuddy_core::auth::SignupForm;
use studybuddy_core::contact::ContactForm;
use studybuddy_core::storage::{default_storage_path, FileStore};
use studybuddy_core::{ClientConfig, StudyBuddy};
use tracing_subscriber::filter::Directive;
use tracing_subscriber::EnvFilter;

use crate::cli::{Cli, Commands};
use crate::commands::account::{
    run_login, run_logout, run_profile, run_remove_account, run_signup, run_status,
};
use crate::commands::contact::run_contact;
use crate::commands::generate::run_generate;
use crate::dialogs::TerminalDialogs;
use crate::error::CliError;

const ENV_STORAGE_PATH: &str = "STUDYBUDDY_STORAGE_PATH";

#[tokio::main]
async fn main() {
    match run().await {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(error) => {
            eprintln!("Error: {error}");
            std::process::exit(1);
        }
    }
}

/// Returns whether the interaction succeeded.
async fn run() -> Result<bool, CliError> {
    dotenvy::dotenv().ok();

    let directive = "studybuddy=info"
        .parse::<Directive>()
        .map_err(|error| CliError::Config(format!("invalid log directive: {error}")))?;
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::from_default_env().add_directive(directive))
        .init();

    let cli = Cli::parse();
    let config = ClientConfig::from_env(cli.api_url)?;
    let storage_path = resolve_storage_path(cli.storage, std::env::var(ENV_STORAGE_PATH).ok());
    tracing::debug!(api = %config.api_base_url, storage = %storage_path.display(), "Starting");

    let app = StudyBuddy::new(
        &config,
        Arc::new(FileStore::new(storage_path)),
        Arc::new(TerminalDialogs::new(cli.yes)),
    )?;
    app.start();

    let succeeded = match cli.command {
        Commands::Generate { notes, file } => {
            run_generate(&app, &config, &notes, file.as_deref()).await?
        }
        Commands::Login { email, password } => run_login(&app, email, password).await,
        Commands::Signup {
            name,
            email,
            password,
            confirm_password,
            avatar,
        } => {
            let form = SignupForm {
                name,
                email,
                password,
                confirm_password,
            };
            run_signup(&app, &form, avatar.as_deref()).await
        }
        Commands::Logout => run_logout(&app),
        Commands::Status => run_status(&app),
        Commands::RemoveAccount => run_remove_account(&app).await,
        Commands::Profile {
            avatar,
            new_password,
        } => run_profile(&app, avatar.as_deref(), new_password.as_deref()).await,
        Commands::Contact {
            name,
            email,
            message,
        } => {
            let form = ContactForm {
                name,
                email,
                message,
            };
            run_contact(&app, &form).await
        }
    };

    Ok(succeeded)
}

/// Flag, then environment, then the platform data directory.
fn resolve_storage_path(flag: Option<PathBuf>, env_path: Option<String>) -> PathBuf {
    flag.or_else(|| {
        env_path
            .map(|path| path.trim().to_string())
            .filter(|path| !path.is_empty())
            .map(PathBuf::from)
    })
    .unwrap_or_else(default_storage_path)
}
