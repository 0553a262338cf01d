mod capabilities;
mod catalog;
mod pantry;
mod query;

use crate::command::domain::{CommandAction, CommandOutcome};
use anyhow::Result;
use mixbook_catalog::{RecipeStore, StaticRecipeSource};
use mixbook_pantry::Pantry;
use mixbook_search::{IngredientSet, MatchObserver, QueryEngine};
use serde_json::Value;
use std::sync::Arc;

pub struct Services {
    capabilities: capabilities::CapabilitiesService,
    catalog: catalog::CatalogService,
    query: query::QueryService,
    pantry_service: pantry::PantryService,
    engine: QueryEngine,
    pantry: Pantry,
}

impl Services {
    pub fn new(
        store: Arc<RecipeStore>,
        pantry: Pantry,
        observer: Option<Arc<dyn MatchObserver>>,
    ) -> Self {
        let mut engine = QueryEngine::new(store.clone());
        if let Some(observer) = observer {
            engine = engine.with_observer(observer);
        }

        Self {
            capabilities: capabilities::CapabilitiesService,
            catalog: catalog::CatalogService::new(StaticRecipeSource::new(store)),
            query: query::QueryService,
            pantry_service: pantry::PantryService,
            engine,
            pantry,
        }
    }

    pub fn pantry(&self) -> &Pantry {
        &self.pantry
    }

    pub fn catalog_size(&self) -> usize {
        self.engine.store().len()
    }

    pub async fn route(&mut self, action: CommandAction, payload: Value) -> Result<CommandOutcome> {
        match action {
            CommandAction::Capabilities => self.capabilities.run(),
            CommandAction::List => self.catalog.list(payload).await,
            CommandAction::Get => {
                self.catalog
                    .get(payload, &self.engine, &owned_set(&self.pantry))
                    .await
            }
            CommandAction::Search => self.query.search(payload, &self.engine),
            CommandAction::Ingredients => {
                self.query
                    .ingredients(payload, &self.engine, &owned_set(&self.pantry))
            }
            CommandAction::Match => self.query.matches(payload, &self.engine),
            CommandAction::Coverage => {
                self.query
                    .coverage(payload, &self.engine, &owned_set(&self.pantry))
            }
            CommandAction::Bar => self.pantry_service.bar(&self.engine, &self.pantry),
            CommandAction::Toggle => {
                self.pantry_service
                    .toggle(payload, &self.engine, &mut self.pantry)
            }
        }
    }
}

fn owned_set(pantry: &Pantry) -> IngredientSet {
    IngredientSet::from_names(pantry.names())
}
