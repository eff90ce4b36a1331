//! Command registration, lookup and execution

use super::{CommandContext, CommandInfo, CommandResult, Invocation, Services, SlashCommand};
use crate::error::CommandError;
use tracing::{debug, warn};

/// Whether `input` looks like a slash command
#[must_use]
pub fn is_command(input: &str) -> bool {
    input.trim_start().starts_with('/')
}

/// Split `/name arg...` into an invocation.
///
/// Arguments use Unix shell-style quoting.
///
/// # Errors
///
/// Returns [`CommandError::InvalidInput`] if the input is not a command, the
/// quoting is unbalanced, or there is no name after the `/`.
pub fn parse_invocation(input: &str) -> Result<Invocation, CommandError> {
    let trimmed = input.trim();
    let Some(body) = trimmed.strip_prefix('/') else {
        return Err(CommandError::InvalidInput);
    };

    let mut argv = shell_words::split(body).map_err(|e| {
        debug!("Failed to split command line {trimmed:?}: {e}");
        CommandError::InvalidInput
    })?;
    if argv.is_empty() || argv[0].is_empty() {
        return Err(CommandError::InvalidInput);
    }

    let name = argv.remove(0);
    Ok(Invocation {
        raw: trimmed.to_string(),
        name,
        args: argv,
    })
}

/// All known slash commands
#[derive(Debug, Default, Clone)]
pub struct CommandRegistry {
    commands: Vec<SlashCommand>,
}

impl CommandRegistry {
    /// Empty registry
    #[must_use]
    pub const fn new() -> Self {
        Self {
            commands: Vec::new(),
        }
    }

    /// Registry holding every built-in command
    #[must_use]
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        registry.register_all(super::builtin::all());
        registry
    }

    /// Add a command.
    ///
    /// # Errors
    ///
    /// Returns an error if the name is empty or the name or any alias is
    /// already taken by another command.
    pub fn register(&mut self, command: SlashCommand) -> Result<(), CommandError> {
        if command.info.name.is_empty() {
            return Err(CommandError::EmptyCommandName);
        }

        let names = std::iter::once(&command.info.name).chain(&command.info.alt_names);
        for name in names {
            if self.resolve(name).is_some() {
                return Err(CommandError::DuplicateCommand(name.clone()));
            }
        }

        debug!("Registered command /{}", command.name());
        self.commands.push(command);
        Ok(())
    }

    /// Register user-defined commands, skipping any whose name or alias is
    /// already taken. Returns how many were added.
    pub fn register_all(&mut self, commands: impl IntoIterator<Item = SlashCommand>) -> usize {
        let mut added = 0;
        for command in commands {
            let name = command.name().to_string();
            match self.register(command) {
                Ok(()) => added += 1,
                Err(e) => warn!("Skipping command /{name}: {e}"),
            }
        }
        added
    }

    /// Find a command by primary name, then by alias
    #[must_use]
    pub fn resolve(&self, name: &str) -> Option<&SlashCommand> {
        self.commands
            .iter()
            .find(|c| c.info.name == name)
            .or_else(|| {
                self.commands
                    .iter()
                    .find(|c| c.info.alt_names.iter().any(|alt| alt == name))
            })
    }

    /// Metadata of every command, sorted by name
    #[must_use]
    pub fn commands(&self) -> Vec<&CommandInfo> {
        let mut infos: Vec<_> = self.commands.iter().map(|c| &c.info).collect();
        infos.sort_by(|a, b| a.name.cmp(&b.name));
        infos
    }

    /// Number of registered commands
    #[must_use]
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// Whether no commands are registered
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Commands whose name or alias starts with what follows the `/` in
    /// `partial`. Empty if `partial` is not a command.
    #[must_use]
    pub fn suggestions(&self, partial: &str) -> Vec<&CommandInfo> {
        let Some(prefix) = partial.trim_start().strip_prefix('/') else {
            return Vec::new();
        };

        self.commands()
            .into_iter()
            .filter(|info| {
                info.name.starts_with(prefix)
                    || info.alt_names.iter().any(|alt| alt.starts_with(prefix))
            })
            .collect()
    }

    /// Resolve `input` and run the matching action.
    ///
    /// Never fails: parse errors and unknown commands come back as error
    /// messages.
    pub async fn execute(&self, input: &str, services: &Services) -> CommandResult {
        let invocation = match parse_invocation(input) {
            Ok(invocation) => invocation,
            Err(e) => return CommandResult::from_error(&e),
        };

        let Some(command) = self.resolve(&invocation.name) else {
            debug!("Unknown command /{}", invocation.name);
            return CommandResult::from_error(&CommandError::UnknownCommand(invocation.name));
        };

        debug!(
            command = command.name(),
            args = invocation.args.len(),
            "Running command"
        );
        let ctx = CommandContext::new(services.clone())
            .with_invocation(invocation)
            .with_commands(self.commands().into_iter().cloned().collect());
        command.run(&ctx).await
    }
}
