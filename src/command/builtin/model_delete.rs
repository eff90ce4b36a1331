//! `/model-delete`: open the delete picker if anything can be deleted

use crate::command::{CommandAction, CommandContext, CommandResult, DialogKind, Services};
use crate::error::CommandError;
use crate::models::{SavedModelEntry, deletable_models};
use async_trait::async_trait;
use tracing::debug;

/// Saved models the user may delete right now, in settings order.
///
/// Checks run in a fixed order: configuration first, then whether any
/// models are saved, then whether any survive the deletion guard.
///
/// # Errors
///
/// - [`CommandError::ConfigUnavailable`] without a configuration service
/// - [`CommandError::NoSavedEntries`] if nothing is saved
/// - [`CommandError::NoDeletableEntries`] if everything is protected
pub fn deletable_entries(services: &Services) -> Result<Vec<SavedModelEntry>, CommandError> {
    let config = services.config()?;

    let saved = services.settings.saved_models();
    if saved.is_empty() {
        return Err(CommandError::NoSavedEntries);
    }

    let active = config.get_model();
    let deletable: Vec<SavedModelEntry> = deletable_models(&saved, &active)
        .into_iter()
        .cloned()
        .collect();
    debug!(
        saved = saved.len(),
        deletable = deletable.len(),
        active = %active,
        "Computed deletable models"
    );

    if deletable.is_empty() {
        return Err(CommandError::NoDeletableEntries);
    }
    Ok(deletable)
}

/// Action behind `/model-delete`. Never deletes anything itself.
#[derive(Debug, Clone, Copy, Default)]
pub struct ModelDeleteAction;

#[async_trait]
impl CommandAction for ModelDeleteAction {
    async fn execute(&self, ctx: &CommandContext) -> CommandResult {
        match deletable_entries(&ctx.services) {
            Ok(_) => CommandResult::dialog(DialogKind::ModelDelete),
            Err(e) => CommandResult::from_error(&e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::builtin::test_support::{context, entries};
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn test_missing_config_short_circuits() {
        // Even an empty collection reports the config problem first.
        let ctx = context(Vec::new(), None);
        let result = ModelDeleteAction.execute(&ctx).await;
        assert_eq!(result, CommandResult::error("Configuration not available."));
    }

    #[tokio::test]
    async fn test_empty_collection() {
        let ctx = context(Vec::new(), Some("z"));
        let result = ModelDeleteAction.execute(&ctx).await;
        assert_eq!(
            result,
            CommandResult::error("No saved models found. Nothing to delete.")
        );
    }

    #[tokio::test]
    async fn test_all_protected() {
        let ctx = context(entries(&["kolosal-x"]), Some("kolosal-x"));
        let result = ModelDeleteAction.execute(&ctx).await;
        assert_eq!(
            result,
            CommandResult::error(CommandError::NoDeletableEntries.to_string())
        );
        assert_ne!(
            result,
            CommandResult::error(CommandError::NoSavedEntries.to_string())
        );
    }

    #[tokio::test]
    async fn test_only_active_model_saved() {
        let ctx = context(entries(&["mine"]), Some("mine"));
        let result = ModelDeleteAction.execute(&ctx).await;
        assert!(result.is_error());
    }

    #[tokio::test]
    async fn test_happy_path_opens_dialog() -> Result<(), Box<dyn std::error::Error>> {
        let ctx = context(entries(&["a", "kolosal-b"]), Some("z"));
        let result = ModelDeleteAction.execute(&ctx).await;
        assert_eq!(result, CommandResult::dialog(DialogKind::ModelDelete));

        let deletable = deletable_entries(&ctx.services)?;
        assert_eq!(deletable, entries(&["a"]));
        Ok(())
    }

    #[tokio::test]
    async fn test_action_does_not_mutate_settings() {
        let ctx = context(entries(&["a", "b"]), Some("z"));
        let _ = ModelDeleteAction.execute(&ctx).await;
        assert_eq!(ctx.services.settings.saved_models(), entries(&["a", "b"]));
    }
}
