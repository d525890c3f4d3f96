// src/error.rs
// =============================================================================
// Error types for the feed finder library.
//
// Only a few of these ever reach the caller of find_feeds():
// - validation errors (bad depth, blank seed URL)
// - setup errors (bad config, HTTP client that cannot be built)
//
// FetchError and ExtractError are per-URL errors. The crawler logs them and
// moves on to the next URL, they never abort a crawl.
// =============================================================================

use reqwest::StatusCode;
use thiserror::Error;

use crate::config::ConfigError;

// Errors that make a whole find_feeds() call fail
#[derive(Error, Debug)]
pub enum FinderError {
    #[error("max depth must be at least 1, got {0}")]
    InvalidDepth(usize),

    #[error("initial URL is blank")]
    BlankUrl,

    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("invalid feed hint pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error("failed to build HTTP client: {0}")]
    HttpClient(#[source] reqwest::Error),
}

impl FinderError {
    /// True for the errors reported before any network activity because the
    /// arguments themselves are unusable.
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::InvalidDepth(_) | Self::BlankUrl)
    }
}

pub type Result<T> = std::result::Result<T, FinderError>;

// A single failed fetch. Network failures, timeouts and non-OK statuses all
// collapse into this one type, there is no retry.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("HTTP response status {0}")]
    Status(StatusCode),
}

// Failure while tokenizing a fetched body
#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("failed to read body: {0}")]
    Read(#[from] std::io::Error),

    #[error("failed to tokenize body: {0}")]
    Tokenize(#[from] lol_html::errors::RewritingError),
}
