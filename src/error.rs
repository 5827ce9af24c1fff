//! Typed errors for the scraper.

use thiserror::Error;

/// Failures while pulling fields out of listing or detail markup.
#[derive(Debug, Error)]
pub enum ExtractError {
    /// A header cell was found but no value cell follows it.
    #[error("no value cell next to header {header:?}")]
    MissingValueCell { header: String },

    /// The "Application ID" cell carries no link.
    #[error("application id cell has no link")]
    MissingLink,

    /// A record reached completion with a field still unset.
    #[error("notice {council_reference:?} is missing {field}")]
    Incomplete {
        council_reference: Option<String>,
        field: &'static str,
    },
}

/// Failures from the fetch collaborator.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP {status} from {url}")]
    Status { url: String, status: u16 },
}

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("cannot open database {url}: {source}")]
    Open {
        url: String,
        #[source]
        source: sqlx::Error,
    },

    #[error("query failed: {0}")]
    Query(#[from] sqlx::Error),
}

/// Anything that aborts a scrape run.
#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("fetch failed: {0}")]
    Fetch(#[from] FetchError),

    #[error("extraction failed: {0}")]
    Extract(#[from] ExtractError),

    #[error("storage failed: {0}")]
    Storage(#[from] StorageError),
}

pub type ExtractResult<T> = std::result::Result<T, ExtractError>;

pub type FetchResult<T> = std::result::Result<T, FetchError>;

pub type StorageResult<T> = std::result::Result<T, StorageError>;

pub type Result<T> = std::result::Result<T, ScrapeError>;
