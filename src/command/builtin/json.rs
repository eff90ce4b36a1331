//! `/json`: constrain the next reply to a JSON schema

use crate::command::{CommandAction, CommandContext, CommandResult};
use async_trait::async_trait;
use serde_json::json;

/// Name of the tool the host runs to constrain the next reply.
pub const JSON_MODE_TOOL: &str = "json_mode";

/// Action behind `/json <schema>`: ask the host to constrain the next reply
/// to a JSON schema.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonAction;

#[async_trait]
impl CommandAction for JsonAction {
    async fn execute(&self, ctx: &CommandContext) -> CommandResult {
        if ctx.invocation.args.is_empty() {
            return CommandResult::error(
                "Usage: /json <json schema>\nExample: /json '{\"type\":\"object\"}'",
            );
        }

        let schema_text = ctx.invocation.args_line();
        match serde_json::from_str::<serde_json::Value>(&schema_text) {
            Ok(schema) => CommandResult::Tool {
                name: JSON_MODE_TOOL.to_string(),
                args: json!({ "schema": schema }),
            },
            Err(e) => CommandResult::error(format!("Invalid JSON schema: {e}")),
        }
    }
}
