use crate::{Recipe, RecipeStore};
use async_trait::async_trait;
use std::sync::Arc;

/// Asynchronous access to recipes, so a remote catalog can replace the
/// bundled one without touching callers.
#[async_trait]
pub trait RecipeSource: Send + Sync {
    async fn get_all(&self) -> Vec<Recipe>;

    async fn get_by_id(&self, id: &str) -> Option<Recipe>;
}

/// Resolves immediately from an in-memory store.
#[derive(Debug, Clone)]
pub struct StaticRecipeSource {
    store: Arc<RecipeStore>,
}

impl StaticRecipeSource {
    pub fn new(store: Arc<RecipeStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl RecipeSource for StaticRecipeSource {
    async fn get_all(&self) -> Vec<Recipe> {
        self.store.all().to_vec()
    }

    async fn get_by_id(&self, id: &str) -> Option<Recipe> {
        self.store.get(id).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn static_source_mirrors_store() {
        let store = Arc::new(RecipeStore::bundled().unwrap());
        let source = StaticRecipeSource::new(store.clone());

        assert_eq!(source.get_all().await.len(), store.len());
        assert_eq!(
            source.get_by_id("3").await.map(|r| r.name),
            Some("Negroni".to_string())
        );
        assert!(source.get_by_id("99").await.is_none());
    }
}
