//! Failure kinds surfaced by slash commands
//!
//! Every variant renders as exactly one line of user-facing text. Actions
//! never let these escape: they are folded into an error message result via
//! [`CommandResult::from_error`](crate::command::CommandResult::from_error).

use crate::models::Protection;
use thiserror::Error;

/// Errors a command action or dialog flow can report to the host.
#[derive(Debug, Error)]
pub enum CommandError {
    /// The configuration service is not wired into the command context.
    #[error("Configuration not available.")]
    ConfigUnavailable,

    /// There are no saved models at all.
    #[error("No saved models found. Nothing to delete.")]
    NoSavedEntries,

    /// Saved models exist but every one of them is protected.
    #[error(
        "No deletable models found. The currently active model cannot be deleted. Switch to a different model first."
    )]
    NoDeletableEntries,

    /// The input could not be split into a command name.
    #[error("Invalid command format")]
    InvalidInput,

    /// No registered command matches the given name or alias.
    #[error("Unknown command: /{0}\nType /help to see available commands.")]
    UnknownCommand(String),

    /// A command with this name or alias is already registered.
    #[error("Command name already registered: {0}")]
    DuplicateCommand(String),

    /// Command descriptors must have a non-empty name.
    #[error("Command name must not be empty")]
    EmptyCommandName,

    /// A model id does not refer to any saved model.
    #[error("Unknown model: {0}")]
    ModelNotFound(String),

    /// A dialog was confirmed with nothing highlighted.
    #[error("No model selected.")]
    NothingSelected,

    /// A model is protected from deletion at confirmation time.
    #[error("Model {id} cannot be deleted: {reason}")]
    ModelProtected {
        /// Id of the protected model.
        id: String,
        /// Why the guard refused the deletion.
        reason: Protection,
    },

    /// A saved model with this id already exists.
    #[error("A saved model with id {0} already exists")]
    DuplicateModel(String),

    /// Reading or writing settings failed.
    #[error("Failed to save settings: {0}")]
    Persist(#[source] anyhow::Error),
}
