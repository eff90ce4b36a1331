//! `/model`: switch the active model or open the picker

use crate::command::{CommandAction, CommandContext, CommandResult, DialogKind, Services};
use crate::error::CommandError;
use crate::models::SavedModelEntry;
use crate::settings::SettingScope;
use async_trait::async_trait;

/// Action behind `/model [model-id]`.
///
/// Without an argument the host is asked to open the model picker. With one,
/// the matching saved model becomes active and is remembered in the user
/// settings.
#[derive(Debug, Clone, Copy, Default)]
pub struct ModelAction;

#[async_trait]
impl CommandAction for ModelAction {
    async fn execute(&self, ctx: &CommandContext) -> CommandResult {
        let result = match ctx.invocation.args.first() {
            None => open_picker(&ctx.services),
            Some(id) => switch_model(&ctx.services, id),
        };
        result.unwrap_or_else(CommandResult::from)
    }
}

fn open_picker(services: &Services) -> Result<CommandResult, CommandError> {
    services.config()?;
    if services.settings.saved_models().is_empty() {
        return Err(CommandError::NoSavedEntries);
    }
    Ok(CommandResult::dialog(DialogKind::ModelSelect))
}

/// Make the saved model `id` (matched by id or runtime id) active.
///
/// # Errors
///
/// Returns an error if there is no configuration, no such saved model, or
/// the choice cannot be persisted.
pub(crate) fn switch_model(services: &Services, id: &str) -> Result<CommandResult, CommandError> {
    let config = services.config()?;
    let saved = services.settings.saved_models();
    let entry: &SavedModelEntry = saved
        .iter()
        .find(|e| e.id == id)
        .or_else(|| saved.iter().find(|e| e.runtime_id() == id))
        .ok_or_else(|| CommandError::ModelNotFound(id.to_string()))?;

    services
        .settings
        .set_model_name(SettingScope::User, entry.runtime_id())
        .map_err(CommandError::Persist)?;
    config.set_model(entry.runtime_id());

    Ok(CommandResult::info(format!(
        "Switched to model: {}",
        entry.display_name()
    )))
}
