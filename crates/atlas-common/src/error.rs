use thiserror::Error;

#[derive(Debug, Error)]
pub enum AtlasError {
    #[error("Malformed workspace payload: {0}")]
    Payload(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid workspace route: {0}")]
    Route(String),
}

pub type Result<T> = std::result::Result<T, AtlasError>;
