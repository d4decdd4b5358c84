use std::io;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Core(#[from] studybuddy_core::Error),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error("Configuration error: {0}")]
    Config(String),
}
