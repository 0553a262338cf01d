use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, PantryError>;

#[derive(Error, Debug)]
pub enum PantryError {
    #[error("Storage error at {path}: {source}")]
    Storage {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to encode pantry: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("Invalid storage key: {0}")]
    InvalidKey(String),

    #[error("Ingredient name must not be empty")]
    EmptyName,
}
