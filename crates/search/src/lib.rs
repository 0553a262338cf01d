//! Query engine: pure lookups over an immutable [`RecipeStore`].
//!
//! Ingredient matching follows a single policy everywhere: a recipe matches a
//! selection when every one of its own ingredients is in the selection
//! (case-insensitive, whitespace-trimmed name equality). An empty selection
//! matches every recipe.
//!
//! [`RecipeStore`]: mixbook_catalog::RecipeStore

mod coverage;
mod engine;
mod names;
mod observer;

pub use coverage::{RecipeCoverage, StockReport};
pub use engine::QueryEngine;
pub use names::{normalize_name, IngredientSet};
pub use observer::{LogObserver, MatchObserver, NoopObserver};
