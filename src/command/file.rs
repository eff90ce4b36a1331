//! User-defined commands loaded from JSON files
//!
//! Each `<name>.json` file in a commands directory defines `/<name>`:
//!
//! ```json
//! { "description": "Review a diff", "prompt": "Review this change: {{args}}" }
//! ```

use super::{CommandAction, CommandContext, CommandKind, CommandResult, SlashCommand};
use crate::paths;
use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Placeholder replaced by the invocation arguments.
pub const ARGS_PLACEHOLDER: &str = "{{args}}";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FileCommandDef {
    #[serde(default)]
    description: Option<String>,
    prompt: String,
    #[serde(default)]
    alt_names: Vec<String>,
}

/// Action of a file command: submit its prompt with the arguments filled in
#[derive(Debug, Clone)]
pub struct FilePromptAction {
    prompt: String,
}

impl FilePromptAction {
    /// Action for a prompt template
    #[must_use]
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
        }
    }

    /// Expand the template. Without a placeholder, arguments are appended
    /// after a blank line.
    #[must_use]
    pub fn render(&self, args: &str) -> String {
        if self.prompt.contains(ARGS_PLACEHOLDER) {
            self.prompt.replace(ARGS_PLACEHOLDER, args)
        } else if args.is_empty() {
            self.prompt.clone()
        } else {
            format!("{}\n\n{args}", self.prompt)
        }
    }
}

#[async_trait]
impl CommandAction for FilePromptAction {
    async fn execute(&self, ctx: &CommandContext) -> CommandResult {
        CommandResult::SubmitPrompt {
            content: self.render(&ctx.invocation.args_line()),
        }
    }
}

/// Directory holding the user's command files
#[must_use]
pub fn user_commands_dir() -> PathBuf {
    paths::user_data_dir().join("commands")
}

/// Directory holding a workspace's command files
#[must_use]
pub fn workspace_commands_dir(root: &Path) -> PathBuf {
    paths::workspace_data_dir(root).join("commands")
}

/// Load every `*.json` command in `dir`, sorted by file name.
///
/// A missing directory yields no commands. Files that cannot be parsed are
/// skipped with a warning.
///
/// # Errors
///
/// Returns an error if the directory exists but cannot be listed.
pub fn load_file_commands(dir: &Path) -> Result<Vec<SlashCommand>> {
    if !dir.is_dir() {
        debug!("Commands directory {:?} not found", dir);
        return Ok(Vec::new());
    }

    let mut files: Vec<PathBuf> = fs::read_dir(dir)
        .with_context(|| format!("Failed to list commands in {}", dir.display()))?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| path.extension().is_some_and(|ext| ext == "json"))
        .collect();
    files.sort();

    let mut commands = Vec::with_capacity(files.len());
    for path in files {
        match load_file_command(&path) {
            Ok(command) => commands.push(command),
            Err(e) => warn!("Skipping command file: {e:#}"),
        }
    }
    Ok(commands)
}

fn load_file_command(path: &Path) -> Result<SlashCommand> {
    let name = path
        .file_stem()
        .and_then(|s| s.to_str())
        .filter(|s| !s.is_empty() && !s.contains(char::is_whitespace))
        .with_context(|| format!("Invalid command file name {}", path.display()))?
        .to_string();

    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read command from {}", path.display()))?;
    let def: FileCommandDef = serde_json::from_str(&contents)
        .with_context(|| format!("Failed to parse command from {}", path.display()))?;

    let description = def
        .description
        .unwrap_or_else(|| format!("Custom command from {}", path.display()));
    Ok(SlashCommand::new(
        name.clone(),
        description,
        CommandKind::File,
        FilePromptAction::new(def.prompt),
    )
    .with_alt_names(def.alt_names)
    .with_usage(format!("/{name} [args]")))
}
