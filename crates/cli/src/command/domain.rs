use anyhow::{Context, Result};
use mixbook_catalog::Recipe;
use mixbook_protocol::{ErrorEnvelope, Redirect, ToolNextAction};
use mixbook_search::{RecipeCoverage, StockReport};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct CommandRequest {
    pub action: CommandAction,
    #[serde(default = "empty_payload")]
    pub payload: Value,
}

fn empty_payload() -> Value {
    Value::Object(Default::default())
}

impl CommandRequest {
    pub fn new<T: Serialize>(action: CommandAction, payload: T) -> Result<Self> {
        Ok(Self {
            action,
            payload: serde_json::to_value(payload)?,
        })
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum CommandAction {
    Capabilities,
    List,
    Get,
    Search,
    Ingredients,
    Match,
    Bar,
    Toggle,
    Coverage,
}

impl CommandAction {
    pub const ALL: [CommandAction; 9] = [
        CommandAction::Capabilities,
        CommandAction::List,
        CommandAction::Get,
        CommandAction::Search,
        CommandAction::Ingredients,
        CommandAction::Match,
        CommandAction::Bar,
        CommandAction::Toggle,
        CommandAction::Coverage,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            CommandAction::Capabilities => "capabilities",
            CommandAction::List => "list",
            CommandAction::Get => "get",
            CommandAction::Search => "search",
            CommandAction::Ingredients => "ingredients",
            CommandAction::Match => "match",
            CommandAction::Bar => "bar",
            CommandAction::Toggle => "toggle",
            CommandAction::Coverage => "coverage",
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct CommandResponse {
    pub status: CommandStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorEnvelope>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub hints: Vec<Hint>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub next_actions: Vec<ToolNextAction>,
    #[serde(default)]
    pub data: Value,
    #[serde(default)]
    pub meta: ResponseMeta,
}

impl CommandResponse {
    pub fn is_error(&self) -> bool {
        matches!(self.status, CommandStatus::Error)
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum CommandStatus {
    Ok,
    Error,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Hint {
    #[serde(rename = "type")]
    pub kind: HintKind,
    pub text: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum HintKind {
    Info,
    Action,
    Warn,
}

#[derive(Debug, Clone)]
pub struct ErrorClassification {
    pub code: String,
    pub hint: Option<String>,
    pub hints: Vec<Hint>,
    pub next_actions: Vec<ToolNextAction>,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct ResponseMeta {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_ms: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub catalog_recipes: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pantry_size: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pantry_recovered: Option<bool>,
}

pub struct CommandOutcome {
    pub data: Value,
    pub hints: Vec<Hint>,
    pub meta: ResponseMeta,
    pub next_actions: Vec<ToolNextAction>,
}

impl CommandOutcome {
    pub fn from_value<T: Serialize>(value: T) -> Result<Self> {
        Ok(Self {
            data: serde_json::to_value(value)?,
            hints: Vec::new(),
            meta: ResponseMeta::default(),
            next_actions: Vec::new(),
        })
    }

    pub fn hint(&mut self, kind: HintKind, text: impl Into<String>) {
        self.hints.push(Hint {
            kind,
            text: text.into(),
        });
    }
}

pub fn parse_payload<T: DeserializeOwned>(payload: Value) -> Result<T> {
    serde_json::from_value(payload).context("Invalid payload")
}

// ---- payloads ----

#[derive(Debug, Serialize, Deserialize, Default)]
pub struct EmptyPayload {}

#[derive(Debug, Serialize, Deserialize)]
pub struct GetPayload {
    pub id: String,
}

#[derive(Debug, Serialize, Deserialize, Default)]
pub struct SearchPayload {
    #[serde(default)]
    pub query: String,
}

#[derive(Debug, Serialize, Deserialize, Default)]
pub struct IngredientsPayload {
    #[serde(default)]
    pub filter: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Default)]
pub struct MatchPayload {
    #[serde(default)]
    pub ingredients: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TogglePayload {
    pub ingredient: String,
}

// ---- outputs ----

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct RecipeSummary {
    pub id: String,
    pub name: String,
    pub image: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub glass: Option<String>,
    pub ingredient_count: usize,
}

impl From<&Recipe> for RecipeSummary {
    fn from(recipe: &Recipe) -> Self {
        Self {
            id: recipe.id.clone(),
            name: recipe.name.clone(),
            image: recipe.image.clone(),
            category: recipe.category.clone(),
            glass: recipe.glass.clone(),
            ingredient_count: recipe.ingredient_count(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ListOutput {
    pub recipes: Vec<RecipeSummary>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct GetOutput {
    pub id: String,
    pub found: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recipe: Option<Recipe>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coverage: Option<RecipeCoverage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub redirect: Option<Redirect>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SearchOutput {
    pub query: String,
    pub results: Vec<RecipeSummary>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct IngredientEntry {
    pub name: String,
    pub owned: bool,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct IngredientsOutput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter: Option<String>,
    pub vocabulary_size: usize,
    pub ingredients: Vec<IngredientEntry>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MatchOutput {
    pub policy: String,
    pub selected: Vec<String>,
    pub results: Vec<RecipeSummary>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct BarOutput {
    pub policy: String,
    pub stock: StockReport,
    pub makeable: Vec<RecipeSummary>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ToggleOutput {
    pub ingredient: String,
    pub owned: bool,
    pub owned_count: usize,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CoverageOutput {
    pub id: String,
    pub found: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coverage: Option<RecipeCoverage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub redirect: Option<Redirect>,
}

/// Context strings attached where the catalog is loaded.
const CATALOG_LOAD_CONTEXTS: [&str; 2] = ["failed to load catalog", "bundled catalog"];

pub fn classify_error(message: &str, action: Option<CommandAction>) -> ErrorClassification {
    let mut hints = Vec::new();
    let mut next_actions = Vec::new();
    let mut hint = None;
    let lower = message.to_lowercase();

    let code = if CATALOG_LOAD_CONTEXTS.iter().any(|ctx| lower.contains(ctx)) {
        let text = "Catalog could not be loaded; check --catalog / MIXBOOK_CATALOG or drop it to use the bundled recipes.";
        hint = Some(text.to_string());
        hints.push(Hint {
            kind: HintKind::Warn,
            text: text.to_string(),
        });
        "catalog_error"
    } else if lower.contains("storage error") || lower.contains("invalid storage key") {
        let text = "Pantry storage is not writable; check --storage-dir / MIXBOOK_STORAGE_DIR permissions.";
        hint = Some(text.to_string());
        hints.push(Hint {
            kind: HintKind::Warn,
            text: text.to_string(),
        });
        "storage_error"
    } else if lower.contains("invalid payload")
        || lower.contains("invalid request")
        || lower.contains("must not be empty")
    {
        let text = match action {
            Some(action) => format!(
                "Check the payload fields for action={}; call action=capabilities to list actions.",
                action.as_str()
            ),
            None => "Check the request payload; call action=capabilities to list actions."
                .to_string(),
        };
        hint = Some(text.clone());
        hints.push(Hint {
            kind: HintKind::Action,
            text,
        });
        next_actions.push(ToolNextAction {
            tool: CommandAction::Capabilities.as_str().to_string(),
            args: json!({}),
            reason: "List supported actions and the matching policy.".to_string(),
        });
        "invalid_request"
    } else {
        "internal"
    };

    ErrorClassification {
        code: code.to_string(),
        hint,
        hints,
        next_actions,
    }
}
