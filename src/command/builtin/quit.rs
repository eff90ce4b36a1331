//! `/quit`: end the session

use crate::command::{CommandAction, CommandContext, CommandResult};
use async_trait::async_trait;

/// Action behind `/quit`.
#[derive(Debug, Clone, Copy, Default)]
pub struct QuitAction;

#[async_trait]
impl CommandAction for QuitAction {
    async fn execute(&self, _ctx: &CommandContext) -> CommandResult {
        CommandResult::Quit {
            message: "Goodbye!".to_string(),
        }
    }
}
