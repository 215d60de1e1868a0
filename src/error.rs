//! Error type shared by every stage of the rebase pipeline.

use std::path::PathBuf;

use thiserror::Error;

/// Every way a rebase run can fail. Each stage returns one of these and
/// the binary reports it once at the top level.
#[derive(Debug, Error)]
pub enum RebaseError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("failed to read confirmation input: {0}")]
    Prompt(#[source] std::io::Error),

    #[error("request for query '{query}' failed: {source}")]
    Transport {
        query: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("server returned {status} for query '{query}'")]
    HttpStatus {
        status: reqwest::StatusCode,
        query: String,
    },

    #[error("malformed response for query '{query}': {reason}")]
    MalformedResponse { query: String, reason: String },

    #[error("sample for '{record}' is missing label '{label}'")]
    MissingLabel { label: String, record: String },

    #[error("failed to serialize rule file: {0}")]
    Serialize(#[from] serde_yaml::Error),

    #[error("failed to write '{}': {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl From<figment::Error> for RebaseError {
    fn from(e: figment::Error) -> Self {
        RebaseError::Config(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, RebaseError>;
