// crates/tariffdb-core/src/error.rs
use thiserror::Error;

/// Errors produced while reading a feed, writing the store or answering
/// a suggestion query.
#[derive(Debug, Error)]
pub enum TariffError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The feed is not valid CSV or a required column is missing.
    #[error("Feed error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Store error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid data: {0}")]
    InvalidData(String),
}

pub type Result<T> = std::result::Result<T, TariffError>;
