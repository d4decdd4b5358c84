use std::io::{self, BufRead, IsTerminal, Write};

use studybuddy_core::view::Dialogs;

/// Alerts printed to stdout, confirmations read from the terminal.
///
/// Without a terminal to ask, confirmations are declined unless `--yes` was
/// given.
#[derive(Debug, Clone, Copy)]
pub struct TerminalDialogs {
    assume_yes: bool,
}

impl TerminalDialogs {
    pub const fn new(assume_yes: bool) -> Self {
        Self { assume_yes }
    }
}

impl Dialogs for TerminalDialogs {
    fn alert(&self, message: &str) {
        println!("{}", format_alert(message));
    }

    fn confirm(&self, message: &str) -> bool {
        if self.assume_yes {
            println!("{message} [y/N] y");
            return true;
        }

        let stdin = io::stdin();
        if !stdin.is_terminal() {
            tracing::warn!("No terminal to confirm with; pass --yes to proceed");
            return false;
        }

        print!("{message} [y/N] ");
        if io::stdout().flush().is_err() {
            return false;
        }
        let mut answer = String::new();
        match stdin.lock().read_line(&mut answer) {
            Ok(_) => is_affirmative(&answer),
            Err(error) => {
                tracing::error!("Failed to read confirmation: {}", error);
                false
            }
        }
    }
}

pub fn format_alert(message: &str) -> String {
    format!("! {message}")
}

pub fn is_affirmative(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}
