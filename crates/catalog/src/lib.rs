//! Recipe store: the immutable cocktail catalog every query reads from.

mod error;
mod source;
mod store;
mod types;

pub use error::{CatalogError, Result};
pub use source::{RecipeSource, StaticRecipeSource};
pub use store::{RecipeStore, CATALOG_SCHEMA_VERSION};
pub use types::{Ingredient, Recipe};
