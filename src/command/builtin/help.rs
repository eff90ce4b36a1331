//! `/help`: list commands or describe one

use crate::command::{CommandAction, CommandContext, CommandResult};
use async_trait::async_trait;
use std::fmt::Write as _;

/// Action behind `/help [command]`.
#[derive(Debug, Clone, Copy, Default)]
pub struct HelpAction;

#[async_trait]
impl CommandAction for HelpAction {
    async fn execute(&self, ctx: &CommandContext) -> CommandResult {
        let Some(target) = ctx.invocation.args.first() else {
            return CommandResult::info(overview(ctx));
        };

        let name = target.trim_start_matches('/');
        let Some(info) = ctx.commands.iter().find(|c| c.answers_to(name)) else {
            return CommandResult::error(format!("Unknown command: /{name}"));
        };

        let mut out = format!("Command: /{}\n", info.name);
        if !info.alt_names.is_empty() {
            let aliases: Vec<_> = info.alt_names.iter().map(|a| format!("/{a}")).collect();
            let _ = writeln!(out, "Aliases: {}", aliases.join(", "));
        }
        let _ = writeln!(out, "Description: {}", info.description);
        let _ = write!(out, "Usage: {}", info.usage);
        CommandResult::info(out)
    }
}

fn overview(ctx: &CommandContext) -> String {
    if ctx.commands.is_empty() {
        return "No commands available.".to_string();
    }

    let mut out = String::from("Available commands:\n\n");
    for info in &ctx.commands {
        let _ = writeln!(out, "{:<15} - {}", format!("/{}", info.name), info.description);
    }
    out.push_str("\nType '/help <command>' for detailed usage of a specific command.");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::builtin::test_support::{context, with_args};
    use crate::command::{CommandRegistry, MessageType};

    fn ctx(args: &[&str]) -> CommandContext {
        let registry = CommandRegistry::with_builtins();
        let ctx = context(Vec::new(), Some("z"))
            .with_commands(registry.commands().into_iter().cloned().collect());
        with_args(ctx, "help", args)
    }

    fn content(result: CommandResult) -> (MessageType, String) {
        match result {
            CommandResult::Message {
                message_type,
                content,
            } => (message_type, content),
            other => (MessageType::Error, format!("unexpected result: {other:?}")),
        }
    }

    #[tokio::test]
    async fn test_overview_lists_every_command() {
        let (kind, text) = content(HelpAction.execute(&ctx(&[])).await);
        assert_eq!(kind, MessageType::Info);
        assert!(text.starts_with("Available commands:"));
        for name in ["/help", "/model-delete", "/models", "/quit"] {
            assert!(text.contains(name), "missing {name}");
        }
        assert!(text.contains("Delete a saved custom model"));
    }

    #[tokio::test]
    async fn test_details_by_alias() {
        let (kind, text) = content(HelpAction.execute(&ctx(&["/delete-model"])).await);
        assert_eq!(kind, MessageType::Info);
        assert!(text.starts_with("Command: /model-delete"));
        assert!(text.contains("Aliases: /delete-model"));
        assert!(text.contains("Usage: /model-delete"));
    }

    #[tokio::test]
    async fn test_unknown_target() {
        let (kind, text) = content(HelpAction.execute(&ctx(&["bogus"])).await);
        assert_eq!(kind, MessageType::Error);
        assert_eq!(text, "Unknown command: /bogus");
    }
}
