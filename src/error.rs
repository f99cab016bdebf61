// ABOUTME: Error types with structured exit codes for CLI
// ABOUTME: Maps fetch, resolve, and write failures to specific exit codes

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Authentication failed: {0}")]
    Auth(String),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("API error {status} on {endpoint}: {message}")]
    Api {
        endpoint: String,
        status: u16,
        message: String,
    },

    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Page {page_id} is missing required property '{property}'")]
    MissingField { page_id: String, property: String },

    #[error("Failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Filesystem error: {0}")]
    Filesystem(#[from] std::io::Error),

    #[error("Sync incomplete: {failed} of {total} pages failed")]
    Incomplete { failed: usize, total: usize },
}

impl Error {
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::Auth(_) => 2,
            Error::Network(_) => 3,
            Error::Api { .. } => 4,
            Error::Parse(_) => 5,
            Error::MissingField { .. } => 6,
            Error::Write { .. } => 7,
            Error::Filesystem(_) => 8,
            Error::Incomplete { .. } => 9,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
