// src/error.rs
use thiserror::Error;

/// Everything a fetch or an extraction can fail with.
///
/// `NotFound` is an expected outcome (unknown id, empty search result page);
/// `Malformed` means the site template no longer matches the specs and the
/// selectors need updating.
#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("not found: {0}")]
    NotFound(String),

    #[error("malformed page: {0}")]
    Malformed(String),

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("login failed: {0}")]
    Login(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("bad URL: {0}")]
    Url(#[from] url::ParseError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl ScrapeError {
    pub fn not_found(what: impl Into<String>) -> Self {
        Self::NotFound(what.into())
    }

    pub fn malformed(what: impl Into<String>) -> Self {
        Self::Malformed(what.into())
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

pub type Result<T> = std::result::Result<T, ScrapeError>;
