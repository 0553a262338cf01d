use crate::coverage::{RecipeCoverage, StockReport};
use crate::names::{normalize_name, IngredientSet};
use crate::observer::{MatchObserver, NoopObserver};
use mixbook_catalog::{Recipe, RecipeStore};
use once_cell::sync::OnceCell;
use std::collections::BTreeSet;
use std::sync::Arc;

pub struct QueryEngine {
    store: Arc<RecipeStore>,
    observer: Arc<dyn MatchObserver>,
    vocabulary: OnceCell<Vec<String>>,
}

impl QueryEngine {
    pub fn new(store: Arc<RecipeStore>) -> Self {
        Self {
            store,
            observer: Arc::new(NoopObserver),
            vocabulary: OnceCell::new(),
        }
    }

    #[must_use]
    pub fn with_observer(mut self, observer: Arc<dyn MatchObserver>) -> Self {
        self.observer = observer;
        self
    }

    pub fn store(&self) -> &RecipeStore {
        &self.store
    }

    pub fn recipe_by_id(&self, id: &str) -> Option<&Recipe> {
        self.store.get(id)
    }

    /// Recipes whose name or any ingredient name contains `query`.
    /// Blank queries return the whole store. Results keep store order.
    pub fn search_recipes(&self, query: &str) -> Vec<&Recipe> {
        let needle = normalize_name(query);
        if needle.is_empty() {
            return self.store.all().iter().collect();
        }

        self.store
            .all()
            .iter()
            .filter(|recipe| {
                normalize_name(&recipe.name).contains(&needle)
                    || recipe
                        .ingredient_names()
                        .any(|name| normalize_name(name).contains(&needle))
            })
            .collect()
    }

    /// Distinct ingredient names exactly as authored, sorted ascending.
    pub fn ingredient_vocabulary(&self) -> &[String] {
        self.vocabulary.get_or_init(|| {
            self.store
                .all()
                .iter()
                .flat_map(Recipe::ingredient_names)
                .map(str::to_string)
                .collect::<BTreeSet<_>>()
                .into_iter()
                .collect()
        })
    }

    /// Vocabulary entries containing `query`, compared case-insensitively.
    pub fn filter_vocabulary(&self, query: &str) -> Vec<&str> {
        let needle = query.to_lowercase();
        self.ingredient_vocabulary()
            .iter()
            .filter(|name| name.to_lowercase().contains(&needle))
            .map(String::as_str)
            .collect()
    }

    /// Recipes that can be made from `selected`: every ingredient the recipe
    /// requires must be selected. An empty selection returns every recipe.
    pub fn find_recipes_containing_all<S: AsRef<str>>(&self, selected: &[S]) -> Vec<&Recipe> {
        let selection = IngredientSet::from_names(selected);
        self.recipes_makeable_from(&selection)
    }

    pub fn recipes_makeable_from(&self, selection: &IngredientSet) -> Vec<&Recipe> {
        if selection.is_empty() {
            let all: Vec<_> = self.store.all().iter().collect();
            self.observer.on_complete(0, all.len());
            return all;
        }

        let matched: Vec<_> = self
            .store
            .all()
            .iter()
            .filter(|recipe| {
                let missing = missing_from(recipe, selection);
                self.observer.on_evaluated(recipe, &missing);
                missing.is_empty()
            })
            .collect();
        self.observer.on_complete(selection.len(), matched.len());
        matched
    }

    pub fn coverage(&self, recipe: &Recipe, owned: &IngredientSet) -> RecipeCoverage {
        let missing = missing_from(recipe, owned);
        RecipeCoverage::new(
            recipe,
            recipe.ingredient_count() - missing.len(),
            missing.into_iter().map(str::to_string).collect(),
        )
    }

    /// Splits the vocabulary into owned and missing entries.
    pub fn stock_report(&self, owned: &IngredientSet) -> StockReport {
        let vocabulary = self.ingredient_vocabulary();
        let (in_stock, missing): (Vec<_>, Vec<_>) = vocabulary
            .iter()
            .cloned()
            .partition(|name| owned.contains(name));
        StockReport {
            owned_count: owned.len(),
            vocabulary_size: vocabulary.len(),
            in_stock,
            missing,
        }
    }
}

fn missing_from<'r>(recipe: &'r Recipe, selection: &IngredientSet) -> Vec<&'r str> {
    recipe
        .ingredient_names()
        .filter(|name| !selection.contains(name))
        .collect()
}
