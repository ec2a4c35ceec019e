use table::TableError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Error object returned by the chart API itself.
    #[error("API error {code}: {description}")]
    Api { code: String, description: String },

    #[error("malformed chart response: {0}")]
    Json(#[from] serde_json::Error),

    #[error("malformed chart response: {0}")]
    Payload(String),

    #[error("no price data for {ticker} between {start} and {end}")]
    Empty {
        ticker: String,
        start: String,
        end: String,
    },

    #[error(transparent)]
    Table(#[from] TableError),
}

pub type Result<T> = std::result::Result<T, FetchError>;
