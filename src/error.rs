//! Error taxonomy for a feed generation run.
//!
//! Every failure is fatal to the run. Missing optional fields inside a
//! scraped block are not errors and never reach this type.

use std::path::PathBuf;
use thiserror::Error;

/// Everything that can stop a run before the feed file is committed.
#[derive(Debug, Error)]
pub enum FeedError {
    /// Required configuration is missing or unreadable.
    #[error("configuration error: {0}")]
    Config(String),

    /// A URL could not be parsed.
    #[error("invalid URL {url}: {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    /// The URL's host is outside the allow-list.
    #[error("domain not allowed: {host} ({url})")]
    DomainNotAllowed { url: String, host: String },

    /// Transport failure (connect, timeout, body read).
    #[error("fetch of {url} failed: {source}")]
    Fetch {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The server answered with a non-2xx status.
    #[error("fetch of {url} returned HTTP {status}")]
    HttpStatus {
        url: String,
        status: reqwest::StatusCode,
    },

    #[error("failed to serialize feed: {0}")]
    Serialize(#[from] serde_json::Error),

    /// Filesystem failure while committing the feed.
    #[error("failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl FeedError {
    /// Process exit code for this error kind.
    ///
    /// | Kind | Code |
    /// |------|------|
    /// | configuration | 2 |
    /// | domain not allowed | 3 |
    /// | fetch (URL, transport, status) | 4 |
    /// | write (serialize, filesystem) | 5 |
    pub fn exit_code(&self) -> u8 {
        match self {
            FeedError::Config(_) => 2,
            FeedError::DomainNotAllowed { .. } => 3,
            FeedError::InvalidUrl { .. } | FeedError::Fetch { .. } | FeedError::HttpStatus { .. } => 4,
            FeedError::Serialize(_) | FeedError::Write { .. } => 5,
        }
    }
}
