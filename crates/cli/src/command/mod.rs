pub mod domain;
mod services;

#[allow(unused_imports)]
pub use domain::{
    classify_error, BarOutput, CommandAction, CommandRequest, CommandResponse, CommandStatus,
    CoverageOutput, GetOutput, GetPayload, Hint, HintKind, IngredientsOutput, IngredientsPayload,
    ListOutput, MatchOutput, MatchPayload, RecipeSummary, ResponseMeta, SearchOutput,
    SearchPayload, ToggleOutput, TogglePayload,
};

use domain::CommandOutcome;
use mixbook_catalog::RecipeStore;
use mixbook_pantry::{Pantry, PantryLoad};
use mixbook_protocol::ErrorEnvelope;
use mixbook_search::MatchObserver;
use services::Services;
use std::sync::Arc;
use std::time::Instant;

/// Routes Command API requests to the query engine and pantry.
pub struct CommandHandler {
    services: Services,
}

impl CommandHandler {
    pub fn new(store: Arc<RecipeStore>, pantry: Pantry) -> Self {
        Self {
            services: Services::new(store, pantry, None),
        }
    }

    pub fn with_observer(
        store: Arc<RecipeStore>,
        pantry: Pantry,
        observer: Arc<dyn MatchObserver>,
    ) -> Self {
        Self {
            services: Services::new(store, pantry, Some(observer)),
        }
    }

    pub async fn execute(&mut self, request: CommandRequest) -> CommandResponse {
        let started = Instant::now();
        let CommandRequest { action, payload } = request;
        log::debug!("command action={}", action.as_str());

        let outcome: anyhow::Result<CommandOutcome> = self.services.route(action, payload).await;
        let recovered = matches!(
            self.services.pantry().load_status(),
            PantryLoad::Recovered { .. }
        );

        let mut response = match outcome {
            Ok(mut outcome) => {
                outcome.meta.duration_ms = outcome
                    .meta
                    .duration_ms
                    .or_else(|| Some(started.elapsed().as_millis() as u64));

                CommandResponse {
                    status: CommandStatus::Ok,
                    message: None,
                    error: None,
                    hints: outcome.hints,
                    next_actions: outcome.next_actions,
                    data: outcome.data,
                    meta: outcome.meta,
                }
            }
            Err(err) => error_response(err, Some(action), started.elapsed().as_millis() as u64),
        };

        if recovered {
            response.meta.pantry_recovered = Some(true);
            response.hints.push(Hint {
                kind: HintKind::Warn,
                text: "Stored pantry data was unreadable; starting from an empty pantry. It is replaced on the next toggle."
                    .to_string(),
            });
        }
        response.meta.catalog_recipes = Some(self.services.catalog_size());
        response.meta.pantry_size = Some(self.services.pantry().len());
        response
    }
}

/// Response for input that never decoded into a `CommandRequest`.
pub fn request_error(err: anyhow::Error) -> CommandResponse {
    error_response(err, None, 0)
}

fn error_response(
    err: anyhow::Error,
    action: Option<CommandAction>,
    duration_ms: u64,
) -> CommandResponse {
    let message = format!("{err:#}");
    log::debug!("command failed: {message}");
    let classification = classify_error(&message, action);
    let hints = classification.hints;
    let hint = classification
        .hint
        .or_else(|| hints.first().map(|h| h.text.clone()));
    let error = ErrorEnvelope {
        code: classification.code,
        message: message.clone(),
        details: None,
        hint,
        next_actions: classification.next_actions.clone(),
    };
    CommandResponse {
        status: CommandStatus::Error,
        message: Some(message),
        error: Some(error),
        hints,
        next_actions: classification.next_actions,
        data: serde_json::Value::Null,
        meta: ResponseMeta {
            duration_ms: Some(duration_ms),
            ..Default::default()
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mixbook_pantry::{MemoryStorage, PANTRY_STORAGE_KEY};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn handler_with(storage: MemoryStorage) -> CommandHandler {
        let store = Arc::new(RecipeStore::bundled().unwrap());
        CommandHandler::new(store, Pantry::open(Box::new(storage)))
    }

    fn request(action: CommandAction, payload: serde_json::Value) -> CommandRequest {
        CommandRequest { action, payload }
    }

    #[tokio::test]
    async fn search_returns_store_order() {
        let mut handler = handler_with(MemoryStorage::new());
        let response = handler
            .execute(request(CommandAction::Search, json!({ "query": "LIME" })))
            .await;
        assert_eq!(response.status, CommandStatus::Ok);
        let out: SearchOutput = serde_json::from_value(response.data).unwrap();
        let names: Vec<_> = out.results.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["Mojito", "Daiquiri", "Margarita"]);
        assert_eq!(response.meta.catalog_recipes, Some(6));
    }

    #[tokio::test]
    async fn unknown_id_redirects_instead_of_failing() {
        let mut handler = handler_with(MemoryStorage::new());
        let response = handler
            .execute(request(CommandAction::Get, json!({ "id": "nonexistent" })))
            .await;
        assert_eq!(response.status, CommandStatus::Ok);
        let out: GetOutput = serde_json::from_value(response.data).unwrap();
        assert!(!out.found);
        assert!(out.recipe.is_none());
        assert_eq!(out.redirect.unwrap().to, "list");
        assert_eq!(response.next_actions[0].tool, "list");
    }

    #[tokio::test]
    async fn bad_payload_is_invalid_request() {
        let mut handler = handler_with(MemoryStorage::new());
        let response = handler
            .execute(request(CommandAction::Get, json!({ "identifier": 1 })))
            .await;
        assert!(response.is_error());
        assert_eq!(response.error.unwrap().code, "invalid_request");
    }

    #[tokio::test]
    async fn toggle_then_bar_uses_same_policy_as_match() {
        let mut handler = handler_with(MemoryStorage::new());
        for name in ["White rum", "Lime juice", "Simple syrup"] {
            let response = handler
                .execute(request(CommandAction::Toggle, json!({ "ingredient": name })))
                .await;
            assert_eq!(response.status, CommandStatus::Ok);
        }

        let bar = handler.execute(request(CommandAction::Bar, json!({}))).await;
        let bar: BarOutput = serde_json::from_value(bar.data).unwrap();

        let matched = handler
            .execute(request(
                CommandAction::Match,
                json!({ "ingredients": ["White rum", "Lime juice", "Simple syrup"] }),
            ))
            .await;
        let matched: MatchOutput = serde_json::from_value(matched.data).unwrap();

        assert_eq!(bar.makeable, matched.results);
        assert_eq!(bar.policy, matched.policy);
        assert_eq!(bar.stock.owned_count, 3);
        assert_eq!(matched.results.len(), 1);
        assert_eq!(matched.results[0].name, "Daiquiri");
    }

    #[tokio::test]
    async fn empty_pantry_bar_lists_same_recipes_as_empty_match() {
        let mut handler = handler_with(MemoryStorage::new());
        let bar = handler.execute(request(CommandAction::Bar, json!({}))).await;
        let bar: BarOutput = serde_json::from_value(bar.data).unwrap();

        let matched = handler.execute(request(CommandAction::Match, json!({}))).await;
        let matched: MatchOutput = serde_json::from_value(matched.data).unwrap();

        assert_eq!(bar.stock.owned_count, 0);
        assert_eq!(bar.makeable.len(), 6);
        assert_eq!(bar.makeable, matched.results);
    }

    #[tokio::test]
    async fn pantry_size_tracks_case_insensitive_toggles() {
        let mut handler = handler_with(MemoryStorage::new());
        for name in ["Gin", "gin", "GIN"] {
            handler
                .execute(request(CommandAction::Toggle, json!({ "ingredient": name })))
                .await;
        }
        let bar = handler.execute(request(CommandAction::Bar, json!({}))).await;
        assert_eq!(bar.meta.pantry_size, Some(1));
        let out: BarOutput = serde_json::from_value(bar.data).unwrap();
        assert_eq!(out.stock.owned_count, 1);
    }

    #[test]
    fn undecodable_request_is_invalid_request() {
        let err = serde_json::from_str::<CommandRequest>(r#"{"action":"shake"}"#).unwrap_err();
        let response = request_error(anyhow::Error::new(err).context("Invalid request"));
        assert!(response.is_error());
        assert_eq!(response.error.unwrap().code, "invalid_request");
    }

    #[tokio::test]
    async fn corrupt_pantry_is_reported_not_fatal() {
        let storage = MemoryStorage::with_value(PANTRY_STORAGE_KEY, "[[[");
        let mut handler = handler_with(storage);
        let response = handler.execute(request(CommandAction::Bar, json!({}))).await;
        assert_eq!(response.status, CommandStatus::Ok);
        assert_eq!(response.meta.pantry_recovered, Some(true));
        assert_eq!(response.meta.pantry_size, Some(0));
        assert!(response.hints.iter().any(|h| h.kind == HintKind::Warn));
        let out: BarOutput = serde_json::from_value(response.data).unwrap();
        assert_eq!(out.makeable.len(), 6);
    }
}
