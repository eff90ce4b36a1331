//! Slash commands: descriptors, results and the registry that runs them

pub mod builtin;
mod context;
mod file;
mod registry;
mod result;

pub use context::{CommandContext, Invocation, Services};
pub use file::{
    ARGS_PLACEHOLDER, FilePromptAction, load_file_commands, user_commands_dir,
    workspace_commands_dir,
};
pub use registry::{CommandRegistry, is_command, parse_invocation};
pub use result::{CommandResult, DialogKind, MessageType};

use async_trait::async_trait;
use std::fmt;
use std::sync::Arc;

/// Where a command comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandKind {
    /// Shipped with the CLI
    BuiltIn,
    /// Defined by the user in a command file
    File,
}

/// Behaviour of a command.
///
/// Implementations may await services but must always produce exactly one
/// result; failures are reported as error messages, never propagated.
#[async_trait]
pub trait CommandAction: Send + Sync {
    /// Run the command
    async fn execute(&self, ctx: &CommandContext) -> CommandResult;
}

/// Static metadata describing a command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandInfo {
    /// Primary name, without the leading `/`
    pub name: String,
    /// Alternate names; may be empty
    pub alt_names: Vec<String>,
    /// One-line description for listings
    pub description: String,
    /// Usage line shown by `/help <command>`
    pub usage: String,
    /// Where the command comes from
    pub kind: CommandKind,
}

impl CommandInfo {
    /// Whether `name` is this command's name or one of its aliases
    #[must_use]
    pub fn answers_to(&self, name: &str) -> bool {
        self.name == name || self.alt_names.iter().any(|alt| alt == name)
    }
}

/// A registered command: metadata plus its action
#[derive(Clone)]
pub struct SlashCommand {
    /// Metadata
    pub info: CommandInfo,
    action: Arc<dyn CommandAction>,
}

impl fmt::Debug for SlashCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SlashCommand")
            .field("info", &self.info)
            .finish_non_exhaustive()
    }
}

impl SlashCommand {
    /// Describe a command; usage defaults to `/<name>`
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        kind: CommandKind,
        action: impl CommandAction + 'static,
    ) -> Self {
        let name = name.into();
        Self {
            info: CommandInfo {
                usage: format!("/{name}"),
                name,
                alt_names: Vec::new(),
                description: description.into(),
                kind,
            },
            action: Arc::new(action),
        }
    }

    /// Set alternate names
    #[must_use]
    pub fn with_alt_names<I, S>(mut self, alt_names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.info.alt_names = alt_names.into_iter().map(Into::into).collect();
        self
    }

    /// Set the usage line
    #[must_use]
    pub fn with_usage(mut self, usage: impl Into<String>) -> Self {
        self.info.usage = usage.into();
        self
    }

    /// Primary name
    #[must_use]
    pub fn name(&self) -> &str {
        &self.info.name
    }

    /// Run the action
    pub async fn run(&self, ctx: &CommandContext) -> CommandResult {
        self.action.execute(ctx).await
    }
}
