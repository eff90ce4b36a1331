//! Model picker opened by `/model` without arguments

use super::PickerState;
use crate::command::builtin::switch_model;
use crate::command::{CommandResult, Services};
use crate::error::CommandError;

/// State of an open model-select dialog
#[derive(Debug, Clone)]
pub struct ModelSelectDialog {
    /// Selection over all saved models, starting on the active one
    pub picker: PickerState,
}

impl ModelSelectDialog {
    /// Open the picker with the active model highlighted
    ///
    /// # Errors
    ///
    /// Returns [`CommandError::ConfigUnavailable`] without a configuration
    /// service and [`CommandError::NoSavedEntries`] if nothing is saved.
    pub fn open(services: &Services) -> Result<Self, CommandError> {
        let active = services.config()?.get_model();
        let saved = services.settings.saved_models();
        if saved.is_empty() {
            return Err(CommandError::NoSavedEntries);
        }

        let active_id = saved
            .iter()
            .find(|e| e.is_active(&active))
            .map(|e| e.id.clone());
        let mut picker = PickerState::new(saved);
        if let Some(id) = active_id {
            picker.select_id(&id);
        }
        Ok(Self { picker })
    }

    /// Switch to the highlighted model
    ///
    /// # Errors
    ///
    /// Returns an error if nothing is selected or the switch fails.
    pub fn confirm(&self, services: &Services) -> Result<CommandResult, CommandError> {
        let entry = self
            .picker
            .selected_entry()
            .ok_or(CommandError::NothingSelected)?;
        switch_model(services, &entry.id)
    }
}
