use crate::{CatalogError, Recipe, Result};
use std::collections::{HashMap, HashSet};
use std::path::Path;

pub const CATALOG_SCHEMA_VERSION: u32 = 1;

const BUILTIN_CATALOG: &str = include_str!("../data/cocktails.json");

/// Immutable collection of recipes. Nothing mutates it after construction.
#[derive(Debug, Clone)]
pub struct RecipeStore {
    recipes: Vec<Recipe>,
    by_id: HashMap<String, usize>,
}

impl RecipeStore {
    /// The catalog bundled with the binary.
    pub fn bundled() -> Result<Self> {
        Self::from_json(BUILTIN_CATALOG)
    }

    pub fn from_json(raw: &str) -> Result<Self> {
        let recipes: Vec<Recipe> = serde_json::from_str(raw)?;
        Self::new(recipes)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        let store = Self::from_json(&raw)?;
        log::debug!("Loaded {} recipes from {}", store.len(), path.display());
        Ok(store)
    }

    pub fn new(recipes: Vec<Recipe>) -> Result<Self> {
        validate(&recipes)?;
        let by_id = recipes
            .iter()
            .enumerate()
            .map(|(idx, recipe)| (recipe.id.clone(), idx))
            .collect();
        Ok(Self { recipes, by_id })
    }

    /// All recipes in authoring order.
    pub fn all(&self) -> &[Recipe] {
        &self.recipes
    }

    /// Unknown ids are a normal outcome, not an error.
    pub fn get(&self, id: &str) -> Option<&Recipe> {
        self.by_id.get(id).map(|&idx| &self.recipes[idx])
    }

    pub fn len(&self) -> usize {
        self.recipes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.recipes.is_empty()
    }
}

fn validate(recipes: &[Recipe]) -> Result<()> {
    let mut seen = HashSet::new();
    for (index, recipe) in recipes.iter().enumerate() {
        if recipe.id.trim().is_empty() {
            return Err(CatalogError::EmptyId { index });
        }
        if recipe.name.trim().is_empty() {
            return Err(CatalogError::EmptyName {
                id: recipe.id.clone(),
            });
        }
        if recipe.ingredients.is_empty() {
            return Err(CatalogError::NoIngredients {
                id: recipe.id.clone(),
            });
        }
        if let Some(position) = recipe
            .ingredients
            .iter()
            .position(|ing| ing.name.trim().is_empty())
        {
            return Err(CatalogError::EmptyIngredientName {
                id: recipe.id.clone(),
                position,
            });
        }
        if !seen.insert(recipe.id.as_str()) {
            return Err(CatalogError::DuplicateId(recipe.id.clone()));
        }
    }
    Ok(())
}
