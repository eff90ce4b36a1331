//! `/models`: list saved models with their protection tags

use crate::command::{CommandAction, CommandContext, CommandResult};
use crate::models::{SavedModelEntry, protection};
use async_trait::async_trait;
use std::fmt::Write as _;

/// Action behind `/models`: list saved models, marking the active one and
/// any that are protected from deletion.
#[derive(Debug, Clone, Copy, Default)]
pub struct ModelsAction;

#[async_trait]
impl CommandAction for ModelsAction {
    async fn execute(&self, ctx: &CommandContext) -> CommandResult {
        let config = match ctx.services.config() {
            Ok(config) => config,
            Err(e) => return CommandResult::from_error(&e),
        };

        let saved = ctx.services.settings.saved_models();
        if saved.is_empty() {
            return CommandResult::info("No saved models.");
        }

        let active = config.get_model();
        let mut out = String::from("Saved models:");
        for entry in &saved {
            out.push('\n');
            out.push_str(&format_entry(entry, &active));
        }
        CommandResult::info(out)
    }
}

fn format_entry(entry: &SavedModelEntry, active: &str) -> String {
    let marker = if entry.is_active(active) { '*' } else { ' ' };
    let mut line = format!("{marker} {}", entry.id);
    if let Some(label) = &entry.label {
        let _ = write!(line, " - {label}");
    }
    if let Some(reason) = protection(entry, active) {
        let _ = write!(line, " [{}]", reason.tag());
    }
    line
}
