use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "studybuddy")]
#[command(about = "Turn study notes into flashcards from the command line")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Backend base URL (defaults to STUDYBUDDY_API_URL, then http://localhost:5000)
    #[arg(long, global = true, value_name = "URL")]
    pub api_url: Option<String>,

    /// Path to the saved session file
    #[arg(long, global = true, value_name = "PATH")]
    pub storage: Option<PathBuf>,

    /// Answer yes to confirmation prompts
    #[arg(short, long, global = true)]
    pub yes: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate flashcards from study notes
    Generate {
        /// Notes text (stdin when omitted)
        notes: Vec<String>,
        /// Read notes from a file
        #[arg(short, long, value_name = "PATH", conflicts_with = "notes")]
        file: Option<PathBuf>,
    },
    /// Sign in with email and password
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Create an account
    Signup {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
        #[arg(long)]
        confirm_password: String,
        /// Profile picture
        #[arg(long, value_name = "PATH")]
        avatar: Option<PathBuf>,
    },
    /// Forget the saved session
    Logout,
    /// Show who is signed in
    Status,
    /// Permanently delete the signed-in account
    RemoveAccount,
    /// Change the profile picture or password
    Profile {
        /// New profile picture
        #[arg(long, value_name = "PATH")]
        avatar: Option<PathBuf>,
        #[arg(long, value_name = "PASSWORD")]
        new_password: Option<String>,
    },
    /// Send a message to support
    Contact {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        message: String,
    },
}
