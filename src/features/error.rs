use table::TableError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FeatureError {
    /// No recognised closing-price column in the input.
    #[error("no price column found (expected one of {expected:?}); available columns: {available:?}")]
    MissingPriceColumn {
        expected: Vec<String>,
        available: Vec<String>,
    },

    /// A stage needs a column an earlier stage did not produce.
    #[error("missing column: {0}")]
    MissingColumn(String),

    #[error("dates out of order at row {row}: '{date}' does not follow '{previous}'")]
    UnorderedDates {
        row: usize,
        date: String,
        previous: String,
    },

    #[error("invalid feature configuration: {0}")]
    InvalidConfig(String),

    #[error("cannot parse feature configuration: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Table(TableError),
}

impl From<TableError> for FeatureError {
    fn from(err: TableError) -> Self {
        match err {
            TableError::MissingColumn(name) => FeatureError::MissingColumn(name),
            other => FeatureError::Table(other),
        }
    }
}

pub type Result<T> = std::result::Result<T, FeatureError>;
