use crate::command::domain::{
    parse_payload, BarOutput, CommandOutcome, HintKind, RecipeSummary, ToggleOutput,
    TogglePayload,
};
use anyhow::{Context, Result};
use mixbook_pantry::Pantry;
use mixbook_protocol::MATCHING_POLICY;
use mixbook_search::{normalize_name, IngredientSet, QueryEngine};
use serde_json::Value;

pub(crate) struct PantryService;

impl PantryService {
    /// Stock report plus the recipes makeable from the pantry.
    pub fn bar(&self, engine: &QueryEngine, pantry: &Pantry) -> Result<CommandOutcome> {
        let owned = IngredientSet::from_names(pantry.names());
        let stock = engine.stock_report(&owned);
        let makeable: Vec<RecipeSummary> = engine
            .recipes_makeable_from(&owned)
            .into_iter()
            .map(RecipeSummary::from)
            .collect();

        let mut outcome = CommandOutcome::from_value(BarOutput {
            policy: MATCHING_POLICY.to_string(),
            stock,
            makeable,
        })?;
        if pantry.is_empty() {
            outcome.hint(
                HintKind::Info,
                "Pantry is empty, so every recipe is listed; toggle ingredients you own to narrow it down.",
            );
        }
        Ok(outcome)
    }

    pub fn toggle(
        &self,
        payload: Value,
        engine: &QueryEngine,
        pantry: &mut Pantry,
    ) -> Result<CommandOutcome> {
        let payload: TogglePayload = parse_payload(payload)?;
        let wanted = normalize_name(&payload.ingredient);
        // Known ingredients are stored with their catalog spelling.
        let known = engine
            .ingredient_vocabulary()
            .iter()
            .find(|name| normalize_name(name) == wanted);
        let ingredient = match known {
            Some(name) => name.clone(),
            None => payload.ingredient.trim().to_string(),
        };
        let owned = pantry
            .toggle(&ingredient)
            .context("Failed to update pantry")?;
        let mut outcome = CommandOutcome::from_value(ToggleOutput {
            ingredient: ingredient.clone(),
            owned,
            owned_count: pantry.len(),
        })?;
        if known.is_none() {
            outcome.hint(
                HintKind::Warn,
                format!("'{ingredient}' does not appear in any recipe."),
            );
        }
        Ok(outcome)
    }
}
