use std::io::{self, IsTerminal, Read};
use std::path::Path;

use studybuddy_core::{ClientConfig, StudyBuddy};

use crate::error::CliError;
use crate::render::{format_panel_lines, panel_failed};

pub async fn run_generate(
    app: &StudyBuddy,
    config: &ClientConfig,
    notes_parts: &[String],
    file: Option<&Path>,
) -> Result<bool, CliError> {
    let notes = resolve_notes(notes_parts, file).await?;

    app.flashcards.set_notes(notes);
    app.flashcards.generate().await;

    let panel = app.view.flashcards();
    for line in format_panel_lines(&panel, config) {
        println!("{line}");
    }
    Ok(!panel_failed(&panel))
}

/// Notes from the arguments, then the file, then piped stdin.
///
/// Blank input is passed through so the page's own empty-notes alert fires.
pub async fn resolve_notes(
    notes_parts: &[String],
    file: Option<&Path>,
) -> Result<String, CliError> {
    let joined = notes_parts.join(" ");
    if !joined.trim().is_empty() {
        return Ok(joined);
    }

    if let Some(path) = file {
        return Ok(tokio::fs::read_to_string(path).await?);
    }

    Ok(read_piped_stdin()?.unwrap_or_default())
}

fn read_piped_stdin() -> Result<Option<String>, CliError> {
    let stdin = io::stdin();
    if stdin.is_terminal() {
        return Ok(None);
    }

    let mut buffer = String::new();
    stdin.lock().read_to_string(&mut buffer)?;
    Ok(Some(buffer))
}
