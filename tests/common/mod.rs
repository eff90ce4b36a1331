//! Common test utilities shared across integration tests

use kolosal::command::Services;
use kolosal::config::Config;
use kolosal::models::SavedModelEntry;
use kolosal::settings::{LoadedSettings, ModelSettings, Settings, SettingsService};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tempfile::TempDir;

/// Settings files in a temporary directory
pub struct SettingsFixture {
    temp_dir: TempDir,
    /// User settings file
    pub user_path: PathBuf,
    /// Workspace settings file
    pub workspace_path: PathBuf,
}

impl SettingsFixture {
    /// Fixture whose user file holds `entries` and no workspace file
    pub fn new(entries: Vec<SavedModelEntry>) -> Result<Self, Box<dyn std::error::Error>> {
        let temp_dir = TempDir::new()?;
        let user_path = temp_dir.path().join("user").join("settings.json");
        let workspace_path = Settings::workspace_path(&temp_dir.path().join("workspace"));

        let settings = Settings {
            model: Some(ModelSettings {
                name: None,
                saved_models: Some(entries),
            }),
        };
        settings.save_to(&user_path)?;

        Ok(Self {
            temp_dir,
            user_path,
            workspace_path,
        })
    }

    /// Root of the temporary directory
    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Services over the fixture files with `active` as the active model
    pub fn services(&self, active: &str) -> Services {
        let loaded =
            LoadedSettings::load(self.user_path.clone(), Some(self.workspace_path.clone()));
        Services::new(
            Some(Arc::new(Config::new(active))),
            Arc::new(SettingsService::new(loaded)),
        )
    }

    /// Saved model ids as currently written in the user file
    pub fn user_ids_on_disk(&self) -> Result<Vec<String>, Box<dyn std::error::Error>> {
        let settings = Settings::load_from(&self.user_path)?;
        Ok(settings.saved_models().iter().map(|e| e.id.clone()).collect())
    }
}

/// Entries with plain ids
pub fn entries(ids: &[&str]) -> Vec<SavedModelEntry> {
    ids.iter().map(|id| SavedModelEntry::new(*id)).collect()
}
