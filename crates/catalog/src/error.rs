use thiserror::Error;

pub type Result<T> = std::result::Result<T, CatalogError>;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Failed to read catalog: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse catalog: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Recipe at position {index} has an empty id")]
    EmptyId { index: usize },

    #[error("Recipe '{id}' has an empty name")]
    EmptyName { id: String },

    #[error("Recipe '{id}' has no ingredients")]
    NoIngredients { id: String },

    #[error("Recipe '{id}' has an ingredient with an empty name at position {position}")]
    EmptyIngredientName { id: String, position: usize },

    #[error("Duplicate recipe id '{0}'")]
    DuplicateId(String),
}
