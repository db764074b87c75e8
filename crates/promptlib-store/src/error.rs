use thiserror::Error;

use crate::storage::StorageError;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Invalid saved-prompt data: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Saved prompt not found: {0}")]
    NotFound(String),

    #[error("Expected a list of saved prompts")]
    NotAList,
}
