//! Outcomes a command action hands back to its host

use crate::error::CommandError;
use serde::Serialize;
use std::fmt;

/// Severity of a message result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageType {
    /// Informational output
    Info,
    /// Something worth attention that did not fail
    Warning,
    /// The command failed
    Error,
}

/// Interactive pickers the host knows how to open
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DialogKind {
    /// Pick a saved model to delete
    ModelDelete,
    /// Pick a saved model to make active
    ModelSelect,
}

impl DialogKind {
    /// Wire identifier of the dialog
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ModelDelete => "model_delete",
            Self::ModelSelect => "model_select",
        }
    }
}

impl fmt::Display for DialogKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The single outcome of one command invocation.
///
/// Hosts must match this exhaustively so a new variant forces every
/// dispatcher to be revisited.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case", rename_all_fields = "camelCase")]
pub enum CommandResult {
    /// Show text to the user; nothing else to do
    Message {
        /// Severity
        message_type: MessageType,
        /// Text to display
        content: String,
    },
    /// Open an interactive picker; the dialog owns what happens next
    Dialog {
        /// Which dialog to open
        dialog: DialogKind,
    },
    /// End the session
    Quit {
        /// Farewell text
        message: String,
    },
    /// Forward text to the model as if the user had typed it
    SubmitPrompt {
        /// Prompt text
        content: String,
    },
    /// Schedule a tool call
    Tool {
        /// Tool name
        name: String,
        /// Tool arguments
        args: serde_json::Value,
    },
}

impl CommandResult {
    /// Informational message
    #[must_use]
    pub fn info(content: impl Into<String>) -> Self {
        Self::Message {
            message_type: MessageType::Info,
            content: content.into(),
        }
    }

    /// Warning message
    #[must_use]
    pub fn warning(content: impl Into<String>) -> Self {
        Self::Message {
            message_type: MessageType::Warning,
            content: content.into(),
        }
    }

    /// Error message
    #[must_use]
    pub fn error(content: impl Into<String>) -> Self {
        Self::Message {
            message_type: MessageType::Error,
            content: content.into(),
        }
    }

    /// Open a dialog
    #[must_use]
    pub const fn dialog(dialog: DialogKind) -> Self {
        Self::Dialog { dialog }
    }

    /// Fold a failure into an error message
    #[must_use]
    pub fn from_error(error: &CommandError) -> Self {
        Self::error(error.to_string())
    }

    /// Whether this is an error message
    #[must_use]
    pub const fn is_error(&self) -> bool {
        matches!(
            self,
            Self::Message {
                message_type: MessageType::Error,
                ..
            }
        )
    }
}

impl From<CommandError> for CommandResult {
    fn from(error: CommandError) -> Self {
        Self::from_error(&error)
    }
}
