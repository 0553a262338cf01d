use crate::command::domain::{
    parse_payload, CommandAction, CommandOutcome, CoverageOutput, GetPayload, HintKind,
    IngredientEntry, IngredientsOutput, IngredientsPayload, MatchOutput, MatchPayload,
    RecipeSummary, SearchOutput, SearchPayload,
};
use anyhow::Result;
use mixbook_pantry::Selection;
use mixbook_protocol::{Redirect, ToolNextAction, MATCHING_POLICY};
use mixbook_search::{IngredientSet, QueryEngine};
use serde_json::Value;

pub(crate) struct QueryService;

impl QueryService {
    pub fn search(&self, payload: Value, engine: &QueryEngine) -> Result<CommandOutcome> {
        let payload: SearchPayload = parse_payload(payload)?;
        let results: Vec<RecipeSummary> = engine
            .search_recipes(&payload.query)
            .into_iter()
            .map(RecipeSummary::from)
            .collect();

        let empty = results.is_empty();
        let mut outcome = CommandOutcome::from_value(SearchOutput {
            query: payload.query.clone(),
            results,
        })?;
        if empty {
            outcome.hint(
                HintKind::Info,
                format!(
                    "No recipe name or ingredient contains '{}'.",
                    payload.query.trim()
                ),
            );
        }
        Ok(outcome)
    }

    pub fn ingredients(
        &self,
        payload: Value,
        engine: &QueryEngine,
        owned: &IngredientSet,
    ) -> Result<CommandOutcome> {
        let payload: IngredientsPayload = parse_payload(payload)?;
        let names = match payload.filter.as_deref() {
            Some(filter) => engine.filter_vocabulary(filter),
            None => engine
                .ingredient_vocabulary()
                .iter()
                .map(String::as_str)
                .collect(),
        };

        CommandOutcome::from_value(IngredientsOutput {
            filter: payload.filter.clone(),
            vocabulary_size: engine.ingredient_vocabulary().len(),
            ingredients: names
                .into_iter()
                .map(|name| IngredientEntry {
                    name: name.to_string(),
                    owned: owned.contains(name),
                })
                .collect(),
        })
    }

    pub fn matches(&self, payload: Value, engine: &QueryEngine) -> Result<CommandOutcome> {
        let payload: MatchPayload = parse_payload(payload)?;
        let selection = Selection::from_names(&payload.ingredients);
        let results: Vec<RecipeSummary> = engine
            .find_recipes_containing_all(selection.names())
            .into_iter()
            .map(RecipeSummary::from)
            .collect();

        let empty_selection = selection.is_empty();
        let no_results = results.is_empty();
        let mut outcome = CommandOutcome::from_value(MatchOutput {
            policy: MATCHING_POLICY.to_string(),
            selected: selection.names().to_vec(),
            results,
        })?;
        if empty_selection {
            outcome.hint(
                HintKind::Info,
                "No ingredients selected; every recipe is listed.",
            );
        } else if no_results {
            outcome.hint(
                HintKind::Info,
                "No recipe can be made from only these ingredients; try adding more.",
            );
        }
        Ok(outcome)
    }

    pub fn coverage(
        &self,
        payload: Value,
        engine: &QueryEngine,
        owned: &IngredientSet,
    ) -> Result<CommandOutcome> {
        let payload: GetPayload = parse_payload(payload)?;
        let id = payload.id.trim().to_string();

        let Some(recipe) = engine.recipe_by_id(&id) else {
            let redirect = Redirect::to_listing(&id);
            let mut outcome = CommandOutcome::from_value(CoverageOutput {
                id,
                found: false,
                coverage: None,
                redirect: Some(redirect.clone()),
            })?;
            outcome.next_actions.push(ToolNextAction {
                tool: CommandAction::List.as_str().to_string(),
                args: serde_json::json!({}),
                reason: redirect.reason,
            });
            return Ok(outcome);
        };

        CommandOutcome::from_value(CoverageOutput {
            id,
            found: true,
            coverage: Some(engine.coverage(recipe, owned)),
            redirect: None,
        })
    }
}
