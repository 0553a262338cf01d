use mixbook_catalog::Recipe;
use serde::{Deserialize, Serialize};

/// How much of one recipe the owned ingredients cover.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipeCoverage {
    pub recipe_id: String,
    pub owned: usize,
    pub total: usize,
    /// Missing ingredient names in recipe order.
    pub missing: Vec<String>,
    pub has_all: bool,
    /// Rounded down to a whole percent.
    pub percent: u32,
}

impl RecipeCoverage {
    pub(crate) fn new(recipe: &Recipe, owned: usize, missing: Vec<String>) -> Self {
        let total = recipe.ingredient_count();
        let percent = if total == 0 {
            0
        } else {
            (owned * 100 / total) as u32
        };
        Self {
            recipe_id: recipe.id.clone(),
            owned,
            total,
            has_all: missing.is_empty(),
            missing,
            percent,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockReport {
    pub owned_count: usize,
    pub vocabulary_size: usize,
    pub in_stock: Vec<String>,
    pub missing: Vec<String>,
}
