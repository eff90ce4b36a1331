//! Delete-model dialog: pick a deletable model, then confirm

use super::PickerState;
use crate::command::Services;
use crate::command::builtin::deletable_entries;
use crate::error::CommandError;
use crate::models::{SavedModelEntry, protection};
use tracing::{info, warn};

/// State of an open delete-model dialog.
///
/// The list shown is a snapshot taken when the dialog opened. It is only a
/// hint: [`ModelDeleteDialog::confirm`] checks protection again against the
/// current settings and active model.
#[derive(Debug, Clone)]
pub struct ModelDeleteDialog {
    /// Selection over the deletable snapshot
    pub picker: PickerState,
}

impl ModelDeleteDialog {
    /// Open the dialog over the models deletable right now
    ///
    /// # Errors
    ///
    /// Same failures as the `/model-delete` command.
    pub fn open(services: &Services) -> Result<Self, CommandError> {
        Ok(Self {
            picker: PickerState::new(deletable_entries(services)?),
        })
    }

    /// Delete the highlighted model
    ///
    /// # Errors
    ///
    /// Returns an error if nothing is selected or [`delete_saved_model`] fails.
    pub fn confirm(&self, services: &Services) -> Result<SavedModelEntry, CommandError> {
        let entry = self
            .picker
            .selected_entry()
            .ok_or(CommandError::NothingSelected)?;
        delete_saved_model(services, &entry.id)
    }
}

/// Remove the saved model `id` after re-checking that it is deletable.
///
/// # Errors
///
/// - [`CommandError::ConfigUnavailable`] without a configuration service
/// - [`CommandError::ModelNotFound`] if `id` is no longer saved
/// - [`CommandError::ModelProtected`] if it is managed or now active
/// - [`CommandError::Persist`] if settings cannot be written
pub fn delete_saved_model(services: &Services, id: &str) -> Result<SavedModelEntry, CommandError> {
    let active = services.config()?.get_model();

    let removed = services.settings.remove_saved_model_checked(id, |entry| {
        match protection(entry, &active) {
            Some(reason) => {
                warn!(id = %entry.id, reason = reason.tag(), "Refusing to delete protected model");
                Err(CommandError::ModelProtected {
                    id: entry.id.clone(),
                    reason,
                })
            }
            None => Ok(()),
        }
    })?;

    info!("Deleted saved model {}", removed.id);
    Ok(removed)
}
