use table::TableError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("column '{0}' not found in feature table")]
    UnknownColumn(String),

    #[error("not enough rows: need at least {needed}, have {available}")]
    NotEnoughRows { needed: usize, available: usize },

    #[error("degenerate input: {0}")]
    Degenerate(String),

    #[error(transparent)]
    Table(#[from] TableError),
}

pub type Result<T> = std::result::Result<T, ModelError>;
