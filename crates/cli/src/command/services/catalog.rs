use crate::command::domain::{
    parse_payload, CommandAction, CommandOutcome, EmptyPayload, GetOutput, GetPayload, HintKind,
    ListOutput, RecipeSummary,
};
use anyhow::{anyhow, Result};
use mixbook_catalog::{RecipeSource, StaticRecipeSource};
use mixbook_protocol::{Redirect, ToolNextAction};
use mixbook_search::{IngredientSet, QueryEngine};
use serde_json::Value;

pub(crate) struct CatalogService {
    source: StaticRecipeSource,
}

impl CatalogService {
    pub fn new(source: StaticRecipeSource) -> Self {
        Self { source }
    }

    pub async fn list(&self, payload: Value) -> Result<CommandOutcome> {
        let _: EmptyPayload = parse_payload(payload)?;
        let recipes = self.source.get_all().await;
        CommandOutcome::from_value(ListOutput {
            recipes: recipes.iter().map(RecipeSummary::from).collect(),
        })
    }

    pub async fn get(
        &self,
        payload: Value,
        engine: &QueryEngine,
        owned: &IngredientSet,
    ) -> Result<CommandOutcome> {
        let payload: GetPayload = parse_payload(payload)?;
        let id = payload.id.trim().to_string();
        if id.is_empty() {
            return Err(anyhow!("Recipe id must not be empty"));
        }

        let Some(recipe) = self.source.get_by_id(&id).await else {
            return not_found(id);
        };

        let coverage = engine.coverage(&recipe, owned);
        let mut outcome = CommandOutcome::from_value(GetOutput {
            id,
            found: true,
            recipe: Some(recipe),
            coverage: Some(coverage),
            redirect: None,
        })?;
        if owned.is_empty() {
            outcome.hint(
                HintKind::Info,
                "Pantry is empty; toggle ingredients to track what you own.",
            );
        }
        Ok(outcome)
    }
}

/// Unknown ids are not errors: the caller is sent back to the listing.
pub(super) fn not_found(id: String) -> Result<CommandOutcome> {
    let redirect = Redirect::to_listing(&id);
    let mut outcome = CommandOutcome::from_value(GetOutput {
        id: id.clone(),
        found: false,
        recipe: None,
        coverage: None,
        redirect: Some(redirect.clone()),
    })?;
    outcome.hint(HintKind::Info, format!("Recipe '{id}' not found; showing all recipes."));
    outcome.next_actions.push(ToolNextAction {
        tool: CommandAction::List.as_str().to_string(),
        args: serde_json::json!({}),
        reason: redirect.reason,
    });
    Ok(outcome)
}
