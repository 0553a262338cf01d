use anyhow::Result;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

pub const CAPABILITIES_SCHEMA_VERSION: u32 = 1;

/// Storage key under which the owned-ingredient list is persisted.
pub const PANTRY_STORAGE_KEY: &str = "userIngredients";

/// Matching policy identifier reported to clients so every surface can agree on it.
pub const MATCHING_POLICY: &str = "recipe_subset_of_selection";

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, JsonSchema)]
pub struct ToolNextAction {
    pub tool: String,
    pub args: serde_json::Value,
    pub reason: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, JsonSchema)]
pub struct ErrorEnvelope {
    pub code: String,
    pub message: String,
    pub details: Option<serde_json::Value>,
    pub hint: Option<String>,
    #[serde(default)]
    pub next_actions: Vec<ToolNextAction>,
}

#[derive(Debug, Serialize, Deserialize, Clone, JsonSchema)]
pub struct CapabilitiesServer {
    pub name: String,
    pub version: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, JsonSchema)]
pub struct CapabilitiesVersions {
    pub command_api: String,
    pub catalog_schema: u32,
}

#[derive(Debug, Serialize, Deserialize, Clone, JsonSchema)]
pub struct Capabilities {
    pub schema_version: u32,
    pub server: CapabilitiesServer,
    pub versions: CapabilitiesVersions,
    pub matching_policy: String,
    pub pantry_storage_key: String,
    pub actions: Vec<String>,
    pub start_route: ToolNextAction,
}

/// Navigation instruction for a recipe id that does not resolve.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, JsonSchema)]
pub struct Redirect {
    pub to: String,
    pub reason: String,
}

impl Redirect {
    pub fn to_listing(missing_id: &str) -> Self {
        Self {
            to: "list".to_string(),
            reason: format!("recipe '{missing_id}' not found"),
        }
    }
}

pub fn serialize_json<T: Serialize>(value: &T) -> Result<String> {
    serde_json::to_string(value).map_err(Into::into)
}

pub fn serialize_json_pretty<T: Serialize>(value: &T) -> Result<String> {
    serde_json::to_string_pretty(value).map_err(Into::into)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn redirect_points_at_listing() {
        let redirect = Redirect::to_listing("42");
        assert_eq!(redirect.to, "list");
        assert!(redirect.reason.contains("'42'"));
    }

    #[test]
    fn error_envelope_defaults_next_actions() {
        let raw = r#"{"code":"internal","message":"boom","details":null,"hint":null}"#;
        let envelope: ErrorEnvelope = serde_json::from_str(raw).unwrap();
        assert_eq!(envelope.code, "internal");
        assert!(envelope.next_actions.is_empty());
    }
}
