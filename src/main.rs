//! Kolosal - slash commands for saved models

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand};
use kolosal::command::{
    CommandRegistry, Services, load_file_commands, user_commands_dir, workspace_commands_dir,
};
use kolosal::config::Config;
use kolosal::paths;
use kolosal::settings::{LoadedSettings, Settings, SettingsService};
use kolosal::shell::Shell;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{info, warn};

/// Slash commands for managing Kolosal models
#[derive(Parser, Debug)]
#[command(name = "kolosal")]
#[command(author, version, long_about = None)]
#[command(about = "Slash commands for managing Kolosal models")]
struct Cli {
    /// Model to use for this session
    #[arg(short, long)]
    model: Option<String>,

    /// User settings file (defaults to $KOLOSAL_SETTINGS_PATH or the data directory)
    #[arg(long, value_name = "PATH")]
    settings: Option<PathBuf>,

    /// Workspace settings file (defaults to ./.kolosal/settings.json)
    #[arg(long, value_name = "PATH")]
    workspace_settings: Option<PathBuf>,

    /// Ignore settings files and command files
    #[arg(long, conflicts_with_all = ["settings", "workspace_settings"])]
    no_config: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
enum Commands {
    /// Run a single slash command and exit
    Run {
        /// Command line, e.g. "/models"
        line: String,
    },
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    init_logging();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            // Let --help and --version exit normally
            if e.kind() == clap::error::ErrorKind::DisplayHelp
                || e.kind() == clap::error::ErrorKind::DisplayVersion
            {
                e.exit();
            }
            // For actual errors, show error + help
            eprintln!("error: {}\n", e.kind());
            Cli::command().print_help()?;
            std::process::exit(1);
        }
    };

    let cwd = std::env::current_dir().context("Failed to read current directory")?;
    let settings = Arc::new(load_settings(&cli, &cwd));
    let config = Arc::new(Config::resolve(cli.model.as_deref(), &settings.merged()));
    info!("Active model: {}", config.get_model());

    let registry = build_registry(&cli, &cwd);
    let services = Services::new(Some(config), settings);
    let mut shell = Shell::new(registry, services, io::stdin().lock(), io::stdout().lock());

    match cli.command {
        Some(Commands::Run { line }) => {
            shell.handle_line(&line).await?;
        }
        None => shell.run().await?,
    }
    Ok(())
}

fn init_logging() {
    let log_path = paths::log_path();

    // Clear the log file on startup
    if let Err(e) = std::fs::write(&log_path, "") {
        eprintln!("Warning: Failed to clear log file: {e}");
    }

    // Set DEBUG=0-3 to control verbosity (0=off, 1=warn, 2=info, 3=debug)
    let debug_level = std::env::var("DEBUG")
        .ok()
        .and_then(|v| v.parse::<u8>().ok())
        .unwrap_or(0);

    if debug_level > 0 {
        let level = match debug_level {
            1 => tracing::Level::WARN,
            2 => tracing::Level::INFO,
            _ => tracing::Level::DEBUG,
        };

        let (Some(dir), Some(file_name)) = (log_path.parent(), log_path.file_name()) else {
            return;
        };
        let file_appender = tracing_appender::rolling::never(dir, file_name);
        tracing_subscriber::fmt()
            .with_writer(file_appender)
            .with_max_level(level)
            .with_ansi(false)
            .init();
    }
}

fn load_settings(cli: &Cli, cwd: &Path) -> SettingsService {
    if cli.no_config {
        return SettingsService::in_memory(Settings::default());
    }

    let user_path = cli.settings.clone().unwrap_or_else(Settings::user_path);
    let workspace_path = cli
        .workspace_settings
        .clone()
        .unwrap_or_else(|| Settings::workspace_path(cwd));
    info!(
        "Loading settings from {} and {}",
        user_path.display(),
        workspace_path.display()
    );
    SettingsService::new(LoadedSettings::load(user_path, Some(workspace_path)))
}

fn build_registry(cli: &Cli, cwd: &Path) -> CommandRegistry {
    let mut registry = CommandRegistry::with_builtins();
    if cli.no_config {
        return registry;
    }

    // Workspace commands shadow user commands with the same name.
    for dir in [workspace_commands_dir(cwd), user_commands_dir()] {
        match load_file_commands(&dir) {
            Ok(commands) => {
                let added = registry.register_all(commands);
                info!("Loaded {added} commands from {}", dir.display());
            }
            Err(e) => warn!("Failed to load commands: {e:#}"),
        }
    }
    registry
}
