//! Line-oriented host for slash commands
//!
//! Reads commands from any [`BufRead`], renders results to any [`Write`],
//! and runs dialogs as numbered pickers on the same streams.

use crate::command::{
    CommandRegistry, CommandResult, DialogKind, MessageType, Services, is_command,
};
use crate::dialog::{ModelDeleteDialog, ModelSelectDialog, PickerState};
use crate::phrases::PhraseCycler;
use anyhow::{Context, Result};
use std::io::{BufRead, Write};
use tracing::{debug, info};

/// Prompt printed before each command
pub const PROMPT: &str = "> ";

/// Whether the session continues after a line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    /// Read the next line
    Continue,
    /// Stop the session
    Quit,
}

/// Interactive command session
#[derive(Debug)]
pub struct Shell<R, W> {
    registry: CommandRegistry,
    services: Services,
    input: R,
    output: W,
    phrases: PhraseCycler,
}

impl<R: BufRead, W: Write> Shell<R, W> {
    /// Create a session over the given streams
    pub fn new(registry: CommandRegistry, services: Services, input: R, output: W) -> Self {
        Self {
            registry,
            services,
            input,
            output,
            phrases: PhraseCycler::new(),
        }
    }

    /// The output stream
    pub const fn output(&self) -> &W {
        &self.output
    }

    /// Read and handle lines until `/quit` or end of input
    ///
    /// # Errors
    ///
    /// Returns an error if reading input or writing output fails.
    pub async fn run(&mut self) -> Result<()> {
        info!("Shell started with {} commands", self.registry.len());
        loop {
            write!(self.output, "{PROMPT}")?;
            self.output.flush()?;

            let Some(line) = self.read_line()? else {
                writeln!(self.output)?;
                break;
            };
            if self.handle_line(&line).await? == Flow::Quit {
                break;
            }
        }
        info!("Shell exited");
        Ok(())
    }

    /// Handle one line of input
    ///
    /// # Errors
    ///
    /// Returns an error if writing output or reading dialog input fails.
    pub async fn handle_line(&mut self, line: &str) -> Result<Flow> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(Flow::Continue);
        }
        if !is_command(line) {
            writeln!(
                self.output,
                "Only slash commands are supported here. Type /help to see available commands."
            )?;
            return Ok(Flow::Continue);
        }

        let result = self.execute(line).await;
        self.render(result)
    }

    async fn execute(&mut self, line: &str) -> CommandResult {
        self.phrases.set_state(true, false);
        debug!(phrase = self.phrases.current(), "Executing {line}");
        let result = self.registry.execute(line, &self.services).await;
        self.phrases.set_state(false, false);
        result
    }

    fn render(&mut self, result: CommandResult) -> Result<Flow> {
        match result {
            CommandResult::Message {
                message_type,
                content,
            } => {
                self.write_message(message_type, &content)?;
            }
            CommandResult::Dialog { dialog } => {
                self.run_dialog(dialog)?;
            }
            CommandResult::Quit { message } => {
                writeln!(self.output, "{message}")?;
                return Ok(Flow::Quit);
            }
            CommandResult::SubmitPrompt { content } => {
                debug!("Prompt submission of {} bytes not supported", content.len());
                return self.render(CommandResult::warning(
                    "Sending prompts to a model is not supported in this shell.",
                ));
            }
            CommandResult::Tool { name, args } => {
                debug!(tool = %name, %args, "Tool call not supported");
                return self.render(CommandResult::warning(format!(
                    "Tool {name} is not supported in this shell."
                )));
            }
        }
        Ok(Flow::Continue)
    }

    fn write_message(&mut self, message_type: MessageType, content: &str) -> Result<()> {
        match message_type {
            MessageType::Info => writeln!(self.output, "{content}")?,
            MessageType::Warning => writeln!(self.output, "Warning: {content}")?,
            MessageType::Error => writeln!(self.output, "Error: {content}")?,
        }
        Ok(())
    }

    fn run_dialog(&mut self, kind: DialogKind) -> Result<()> {
        debug!("Opening {kind} dialog");
        self.phrases.set_state(false, true);
        let outcome = match kind {
            DialogKind::ModelDelete => self.model_delete_dialog(),
            DialogKind::ModelSelect => self.model_select_dialog(),
        };
        self.phrases.set_state(false, false);
        outcome
    }

    fn model_delete_dialog(&mut self) -> Result<()> {
        let mut dialog = match ModelDeleteDialog::open(&self.services) {
            Ok(dialog) => dialog,
            Err(e) => return self.write_message(MessageType::Error, &e.to_string()),
        };
        if !self.pick(&mut dialog.picker, "Select a model to delete")? {
            return self.write_message(MessageType::Info, "Cancelled.");
        }

        match dialog.confirm(&self.services) {
            Ok(removed) => self.write_message(
                MessageType::Info,
                &format!("Deleted model: {}", removed.display_name()),
            ),
            Err(e) => self.write_message(MessageType::Error, &e.to_string()),
        }
    }

    fn model_select_dialog(&mut self) -> Result<()> {
        let mut dialog = match ModelSelectDialog::open(&self.services) {
            Ok(dialog) => dialog,
            Err(e) => return self.write_message(MessageType::Error, &e.to_string()),
        };
        if !self.pick(&mut dialog.picker, "Select a model")? {
            return self.write_message(MessageType::Info, "Cancelled.");
        }

        match dialog.confirm(&self.services) {
            Ok(result) => {
                self.render(result)?;
                Ok(())
            }
            Err(e) => self.write_message(MessageType::Error, &e.to_string()),
        }
    }

    /// Ask for a number until one is valid. Other text filters the list.
    /// Returns `false` if the user cancels with an empty line or EOF.
    fn pick(&mut self, picker: &mut PickerState, title: &str) -> Result<bool> {
        writeln!(self.output, "{}", self.phrases.current())?;
        loop {
            let visible = picker.filtered();
            writeln!(self.output, "{title}:")?;
            if visible.is_empty() {
                writeln!(self.output, "  (no models match {:?})", picker.filter)?;
            }
            for (i, entry) in visible.iter().enumerate() {
                let marker = if i == picker.selected { '>' } else { ' ' };
                writeln!(self.output, "{marker} {}) {}", i + 1, entry.display_name())?;
            }
            write!(self.output, "Number, text to filter, or empty to cancel: ")?;
            self.output.flush()?;

            let Some(answer) = self.read_line()? else {
                return Ok(false);
            };
            let answer = answer.trim();
            if answer.is_empty() {
                return Ok(false);
            }

            if let Ok(number) = answer.parse::<usize>() {
                if number > 0 && picker.select(number - 1) {
                    return Ok(true);
                }
                writeln!(self.output, "Invalid selection: {number}")?;
                continue;
            }

            picker.filter.clear();
            for c in answer.chars() {
                picker.handle_filter_char(c);
            }
        }
    }

    fn read_line(&mut self) -> Result<Option<String>> {
        let mut line = String::new();
        let read = self
            .input
            .read_line(&mut line)
            .context("Failed to read input")?;
        Ok((read > 0).then_some(line))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::builtin::test_support::{context, entries};
    use crate::phrases::WAITING_PHRASE;
    use pretty_assertions::assert_eq;
    use std::io::Cursor;

    type TestShell = Shell<Cursor<Vec<u8>>, Vec<u8>>;

    fn shell(ids: &[&str], active: Option<&str>, input: &str) -> TestShell {
        let ctx = context(entries(ids), active);
        Shell::new(
            CommandRegistry::with_builtins(),
            ctx.services,
            Cursor::new(input.as_bytes().to_vec()),
            Vec::new(),
        )
    }

    fn output(shell: &TestShell) -> String {
        String::from_utf8_lossy(shell.output()).into_owned()
    }

    #[tokio::test]
    async fn test_run_until_quit() -> Result<(), Box<dyn std::error::Error>> {
        let mut shell = shell(&[], Some("m"), "/models\n/quit\n/models\n");
        shell.run().await?;

        let out = output(&shell);
        assert!(out.contains("No saved models."));
        assert!(out.ends_with("Goodbye!\n"));
        assert_eq!(out.matches("No saved models.").count(), 1);
        Ok(())
    }

    #[tokio::test]
    async fn test_run_stops_at_eof() -> Result<(), Box<dyn std::error::Error>> {
        let mut shell = shell(&[], Some("m"), "");
        shell.run().await?;
        assert_eq!(output(&shell), format!("{PROMPT}\n"));
        Ok(())
    }

    #[tokio::test]
    async fn test_errors_and_plain_text() -> Result<(), Box<dyn std::error::Error>> {
        let mut shell = shell(&[], None, "");
        assert_eq!(shell.handle_line("hello").await?, Flow::Continue);
        assert_eq!(shell.handle_line("/model-delete").await?, Flow::Continue);
        assert_eq!(shell.handle_line("/nope").await?, Flow::Continue);

        let out = output(&shell);
        assert!(out.contains("Only slash commands are supported here."));
        assert!(out.contains("Error: Configuration not available."));
        assert!(out.contains("Error: Unknown command: /nope"));
        Ok(())
    }

    #[tokio::test]
    async fn test_delete_dialog_removes_choice() -> Result<(), Box<dyn std::error::Error>> {
        let mut shell = shell(&["a", "kolosal-b", "c"], Some("z"), "2\n");
        shell.handle_line("/delete-model").await?;

        let out = output(&shell);
        assert!(out.contains(WAITING_PHRASE));
        assert!(out.contains("> 1) a"));
        assert!(out.contains("  2) c"));
        assert!(!out.contains("kolosal-b"));
        assert!(out.contains("Deleted model: c"));
        assert_eq!(shell.services.settings.saved_models(), entries(&["a", "kolosal-b"]));
        assert!(!shell.phrases.is_rotating());
        Ok(())
    }

    #[tokio::test]
    async fn test_delete_dialog_filter_then_cancel() -> Result<(), Box<dyn std::error::Error>> {
        let mut shell = shell(&["alpha", "beta"], Some("z"), "bet\n9\n\n");
        shell.handle_line("/model-delete").await?;

        let out = output(&shell);
        assert!(out.contains("> 1) beta"));
        assert!(out.contains("Invalid selection: 9"));
        assert!(out.ends_with("Cancelled.\n"));
        assert_eq!(shell.services.settings.saved_models().len(), 2);
        Ok(())
    }

    #[tokio::test]
    async fn test_delete_nothing_deletable() -> Result<(), Box<dyn std::error::Error>> {
        let mut shell = shell(&["kolosal-a", "b"], Some("b"), "");
        shell.handle_line("/model-delete").await?;
        assert!(output(&shell).contains("Error: No deletable models found."));
        Ok(())
    }

    #[tokio::test]
    async fn test_select_dialog_switches_model() -> Result<(), Box<dyn std::error::Error>> {
        let mut shell = shell(&["a", "b"], Some("a"), "2\n");
        shell.handle_line("/model").await?;

        assert!(output(&shell).contains("Switched to model: b"));
        let active = shell.services.config()?.get_model();
        assert_eq!(active, "b");
        Ok(())
    }

    #[tokio::test]
    async fn test_unsupported_results_warn() -> Result<(), Box<dyn std::error::Error>> {
        let mut shell = shell(&[], Some("m"), "");
        shell.handle_line(r#"/json '{"type":"object"}'"#).await?;
        assert!(output(&shell).contains("Warning: Tool json_mode is not supported"));
        Ok(())
    }
}
