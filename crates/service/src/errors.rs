use models::ValidationFailed;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error(transparent)]
    Validation(#[from] ValidationFailed),
    #[error("product {0} not found")]
    NotFound(i64),
    #[error("storage corrupt: {0}")]
    StorageCorrupt(String),
    #[error("storage error: {0}")]
    Storage(String),
}

impl ServiceError {
    pub fn storage(err: impl std::fmt::Display) -> Self { Self::Storage(err.to_string()) }
    pub fn corrupt(err: impl std::fmt::Display) -> Self { Self::StorageCorrupt(err.to_string()) }
}
