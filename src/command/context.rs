//! What a command action gets to see when it runs

use super::CommandInfo;
use crate::config::Config;
use crate::error::CommandError;
use crate::settings::SettingsService;
use std::sync::Arc;

/// Services a command may read through
#[derive(Debug, Clone)]
pub struct Services {
    /// Runtime configuration; `None` when the host has not wired one up
    pub config: Option<Arc<Config>>,
    /// Settings, always present
    pub settings: Arc<SettingsService>,
}

impl Services {
    /// Bundle the services
    #[must_use]
    pub const fn new(config: Option<Arc<Config>>, settings: Arc<SettingsService>) -> Self {
        Self { config, settings }
    }

    /// The configuration service, or [`CommandError::ConfigUnavailable`]
    ///
    /// # Errors
    ///
    /// Returns an error if no configuration is wired up.
    pub fn config(&self) -> Result<&Config, CommandError> {
        self.config
            .as_deref()
            .ok_or(CommandError::ConfigUnavailable)
    }
}

/// The parsed slash command being run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Invocation {
    /// Input as typed
    pub raw: String,
    /// Command name as typed (may be an alias)
    pub name: String,
    /// Remaining arguments
    pub args: Vec<String>,
}

impl Invocation {
    /// Arguments joined back with single spaces
    #[must_use]
    pub fn args_line(&self) -> String {
        self.args.join(" ")
    }
}

/// Execution context for one command invocation
#[derive(Debug, Clone)]
pub struct CommandContext {
    /// Services to read through
    pub services: Services,
    /// What was typed
    pub invocation: Invocation,
    /// Metadata of every registered command, sorted by name
    pub commands: Vec<CommandInfo>,
}

impl CommandContext {
    /// Context with no invocation details and an empty command list
    #[must_use]
    pub fn new(services: Services) -> Self {
        Self {
            services,
            invocation: Invocation::default(),
            commands: Vec::new(),
        }
    }

    /// Attach the invocation
    #[must_use]
    pub fn with_invocation(mut self, invocation: Invocation) -> Self {
        self.invocation = invocation;
        self
    }

    /// Attach the command catalogue
    #[must_use]
    pub fn with_commands(mut self, commands: Vec<CommandInfo>) -> Self {
        self.commands = commands;
        self
    }
}
