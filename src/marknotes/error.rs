use thiserror::Error;

#[derive(Error, Debug)]
pub enum MarknotesError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Store error: {0}")]
    Store(String),

    #[error("Api Error: {0}")]
    Api(String),

    #[error("Failed to import notes. Please check the file format. ({0})")]
    Import(String),
}

pub type Result<T> = std::result::Result<T, MarknotesError>;
