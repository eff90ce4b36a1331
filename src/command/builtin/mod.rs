//! Commands shipped with the CLI

mod help;
mod json;
mod model;
mod model_delete;
mod models;
mod quit;

pub use help::HelpAction;
pub use json::JsonAction;
pub use model::ModelAction;
pub use model_delete::{ModelDeleteAction, deletable_entries};
pub(crate) use model::switch_model;
pub use models::ModelsAction;
pub use quit::QuitAction;

use super::{CommandKind, SlashCommand};

/// Every built-in command, unregistered
#[must_use]
pub fn all() -> Vec<SlashCommand> {
    vec![
        SlashCommand::new(
            "help",
            "Show available commands",
            CommandKind::BuiltIn,
            HelpAction,
        )
        .with_alt_names(["?"])
        .with_usage("/help [command]"),
        SlashCommand::new("quit", "Exit the chat session", CommandKind::BuiltIn, QuitAction)
            .with_alt_names(["exit"]),
        SlashCommand::new(
            "models",
            "List saved models",
            CommandKind::BuiltIn,
            ModelsAction,
        ),
        SlashCommand::new(
            "model",
            "Switch the active model",
            CommandKind::BuiltIn,
            ModelAction,
        )
        .with_usage("/model [model-id]"),
        SlashCommand::new(
            "model-delete",
            "Delete a saved custom model",
            CommandKind::BuiltIn,
            ModelDeleteAction,
        )
        .with_alt_names(["delete-model"]),
        SlashCommand::new(
            "json",
            "Send next message with JSON constraints",
            CommandKind::BuiltIn,
            JsonAction,
        )
        .with_usage("/json <json schema>"),
    ]
}
