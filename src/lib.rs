//! Kolosal - slash commands for the Kolosal chat CLI
//!
//! Commands resolve to a [`CommandResult`] the host dispatches on. Saved
//! models are guarded so Kolosal Cloud entries and the active model can never
//! be deleted.

pub mod command;
pub mod config;
pub mod dialog;
pub mod error;
pub mod models;
pub mod paths;
pub mod phrases;
pub mod settings;
pub mod shell;

pub use command::{CommandRegistry, CommandResult, Services};
pub use config::Config;
pub use error::CommandError;
pub use models::SavedModelEntry;
pub use settings::{LoadedSettings, Settings, SettingsService};
pub use shell::Shell;
