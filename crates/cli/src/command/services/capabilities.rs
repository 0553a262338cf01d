use crate::command::domain::{CommandAction, CommandOutcome};
use anyhow::Result;
use mixbook_catalog::CATALOG_SCHEMA_VERSION;
use mixbook_protocol::{
    Capabilities, CapabilitiesServer, CapabilitiesVersions, ToolNextAction,
    CAPABILITIES_SCHEMA_VERSION, MATCHING_POLICY, PANTRY_STORAGE_KEY,
};

pub(crate) struct CapabilitiesService;

impl CapabilitiesService {
    pub fn run(&self) -> Result<CommandOutcome> {
        let output = Capabilities {
            schema_version: CAPABILITIES_SCHEMA_VERSION,
            server: CapabilitiesServer {
                name: "mixbook".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
            versions: CapabilitiesVersions {
                command_api: "v1".to_string(),
                catalog_schema: CATALOG_SCHEMA_VERSION,
            },
            matching_policy: MATCHING_POLICY.to_string(),
            pantry_storage_key: PANTRY_STORAGE_KEY.to_string(),
            actions: CommandAction::ALL
                .iter()
                .map(|action| action.as_str().to_string())
                .collect(),
            start_route: ToolNextAction {
                tool: CommandAction::List.as_str().to_string(),
                args: serde_json::json!({}),
                reason: "Browse the catalog, then open a recipe with action=get.".to_string(),
            },
        };

        CommandOutcome::from_value(output)
    }
}
