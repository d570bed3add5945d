use thiserror::Error;

#[derive(Error, Debug)]
pub enum TiliError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("No usable transactions found in the input")]
    NoUsableData,

    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, TiliError>;
