//! User and workspace settings persistence
//!
//! Settings live in two JSON files: a per-user file and an optional
//! per-workspace file. Commands only ever see the merged view, where any
//! field set in the workspace file overrides the user file.

use crate::error::CommandError;
use crate::models::SavedModelEntry;
use crate::paths;
use anyhow::{Context, Result};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Environment variable overriding the user settings path.
pub const SETTINGS_PATH_ENV: &str = "KOLOSAL_SETTINGS_PATH";

/// Model-related settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelSettings {
    /// Model selected for inference
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// User-configured model aliases, in display order
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub saved_models: Option<Vec<SavedModelEntry>>,
}

/// Contents of one settings file
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    /// Model settings
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<ModelSettings>,
}

impl Settings {
    /// Path of the user settings file.
    ///
    /// `KOLOSAL_SETTINGS_PATH` wins over the platform data directory.
    #[must_use]
    pub fn user_path() -> PathBuf {
        if let Some(path) = std::env::var_os(SETTINGS_PATH_ENV) {
            return PathBuf::from(path);
        }
        paths::user_data_dir().join("settings.json")
    }

    /// Path of the workspace settings file under `root`.
    #[must_use]
    pub fn workspace_path(root: &Path) -> PathBuf {
        paths::workspace_data_dir(root).join("settings.json")
    }

    /// Load settings from a specific path
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings from {}", path.display()))?;
        let mut settings: Self = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse settings from {}", path.display()))?;
        settings.normalize();
        Ok(settings)
    }

    /// Load settings, returning defaults if the file is missing or broken
    #[must_use]
    pub fn load_or_default(path: &Path) -> Self {
        if !path.exists() {
            debug!("Settings file {:?} not found, using defaults", path);
            return Self::default();
        }

        match Self::load_from(path) {
            Ok(settings) => {
                debug!("Loaded settings from {:?}", path);
                settings
            }
            Err(e) => {
                warn!("{e:#}");
                Self::default()
            }
        }
    }

    /// Save settings to a specific path
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created or the file cannot be written
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create settings directory {}", parent.display())
            })?;
        }
        let contents =
            serde_json::to_string_pretty(self).context("Failed to serialize settings")?;
        fs::write(path, contents)
            .with_context(|| format!("Failed to write settings to {}", path.display()))?;
        debug!("Saved settings to {:?}", path);
        Ok(())
    }

    /// Saved models, empty if none are configured
    #[must_use]
    pub fn saved_models(&self) -> &[SavedModelEntry] {
        self.model
            .as_ref()
            .and_then(|m| m.saved_models.as_deref())
            .unwrap_or_default()
    }

    /// Configured model name, if any
    #[must_use]
    pub fn model_name(&self) -> Option<&str> {
        self.model.as_ref().and_then(|m| m.name.as_deref())
    }

    /// Find a saved model by id
    #[must_use]
    pub fn find_saved_model(&self, id: &str) -> Option<&SavedModelEntry> {
        self.saved_models().iter().find(|e| e.id == id)
    }

    /// Append a saved model, keeping ids unique
    ///
    /// # Errors
    ///
    /// Returns [`CommandError::DuplicateModel`] if the id is taken.
    pub fn add_saved_model(&mut self, entry: SavedModelEntry) -> Result<(), CommandError> {
        if self.find_saved_model(&entry.id).is_some() {
            return Err(CommandError::DuplicateModel(entry.id));
        }
        self.model
            .get_or_insert_with(ModelSettings::default)
            .saved_models
            .get_or_insert_with(Vec::new)
            .push(entry);
        Ok(())
    }

    /// Remove a saved model by id, returning it if it was present
    pub fn remove_saved_model(&mut self, id: &str) -> Option<SavedModelEntry> {
        let models = self.model.as_mut()?.saved_models.as_mut()?;
        let pos = models.iter().position(|e| e.id == id)?;
        Some(models.remove(pos))
    }

    /// Overlay `workspace` on top of `user`, field by field.
    #[must_use]
    pub fn merge(user: &Self, workspace: &Self) -> Self {
        let Some(ws_model) = workspace.model.as_ref() else {
            return user.clone();
        };
        let user_model = user.model.clone().unwrap_or_default();

        Self {
            model: Some(ModelSettings {
                name: ws_model.name.clone().or(user_model.name),
                saved_models: ws_model.saved_models.clone().or(user_model.saved_models),
            }),
        }
    }

    /// Drop entries with an empty id and repeated ids (first one wins).
    fn normalize(&mut self) {
        let Some(entries) = self
            .model
            .as_mut()
            .and_then(|m| m.saved_models.as_mut().map(std::mem::take))
        else {
            return;
        };

        for entry in entries {
            if entry.id.is_empty() {
                warn!("Ignoring saved model with empty id");
                continue;
            }
            if let Err(e) = self.add_saved_model(entry) {
                warn!("Ignoring saved model: {e}");
            }
        }
    }
}

/// Which settings file a value came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingScope {
    /// Per-user settings file
    User,
    /// Per-workspace settings file
    Workspace,
}

/// One settings scope and where it is persisted
#[derive(Debug, Clone, Default)]
pub struct SettingsFile {
    /// Backing file; `None` keeps the scope in memory only
    pub path: Option<PathBuf>,
    /// Parsed contents
    pub settings: Settings,
}

impl SettingsFile {
    /// Load a scope from disk, falling back to defaults
    #[must_use]
    pub fn load(path: PathBuf) -> Self {
        let settings = Settings::load_or_default(&path);
        Self {
            path: Some(path),
            settings,
        }
    }

    /// A scope that is never written to disk
    #[must_use]
    pub const fn in_memory(settings: Settings) -> Self {
        Self {
            path: None,
            settings,
        }
    }

    /// Persist `settings`, then adopt them. On failure the scope keeps
    /// its previous contents.
    fn commit(&mut self, settings: Settings) -> Result<()> {
        match &self.path {
            Some(path) => settings.save_to(path)?,
            None => debug!("In-memory settings scope, skipping save"),
        }
        self.settings = settings;
        Ok(())
    }

    fn remove_saved_model(&mut self, id: &str) -> Result<Option<SavedModelEntry>> {
        let mut updated = self.settings.clone();
        let Some(entry) = updated.remove_saved_model(id) else {
            return Ok(None);
        };
        self.commit(updated)?;
        Ok(Some(entry))
    }
}

/// User and workspace scopes plus their merged view
#[derive(Debug, Clone, Default)]
pub struct LoadedSettings {
    /// Per-user scope
    pub user: SettingsFile,
    /// Per-workspace scope, if a workspace file is in play
    pub workspace: Option<SettingsFile>,
    merged: Settings,
}

impl LoadedSettings {
    /// Build from explicit scopes
    #[must_use]
    pub fn new(user: SettingsFile, workspace: Option<SettingsFile>) -> Self {
        let mut loaded = Self {
            user,
            workspace,
            merged: Settings::default(),
        };
        loaded.recompute();
        loaded
    }

    /// Load both scopes from disk
    #[must_use]
    pub fn load(user_path: PathBuf, workspace_path: Option<PathBuf>) -> Self {
        Self::new(
            SettingsFile::load(user_path),
            workspace_path.map(SettingsFile::load),
        )
    }

    /// Merged view of all scopes
    #[must_use]
    pub const fn merged(&self) -> &Settings {
        &self.merged
    }

    fn recompute(&mut self) {
        self.merged = match &self.workspace {
            Some(ws) => Settings::merge(&self.user.settings, &ws.settings),
            None => self.user.settings.clone(),
        };
    }

    /// Remove a saved model from every scope that contains it and persist
    /// the scopes that changed.
    ///
    /// Each scope only changes in memory once its file is written, and the
    /// merged view is rebuilt even on failure. The user scope goes first, so
    /// a failed removal stays visible in the merged view and can be retried.
    ///
    /// # Errors
    ///
    /// Returns an error if a changed scope cannot be written.
    pub fn remove_saved_model(&mut self, id: &str) -> Result<Option<SavedModelEntry>> {
        let outcome = self.remove_from_scopes(id);
        self.recompute();

        let removed = outcome?;
        if removed.is_some() {
            info!("Removed saved model {id}");
        }
        Ok(removed)
    }

    fn remove_from_scopes(&mut self, id: &str) -> Result<Option<SavedModelEntry>> {
        let from_user = self.user.remove_saved_model(id)?;
        let from_workspace = match self.workspace.as_mut() {
            Some(ws) => ws.remove_saved_model(id)?,
            None => None,
        };
        Ok(from_workspace.or(from_user))
    }

    /// Set the model name in a scope and persist it
    ///
    /// # Errors
    ///
    /// Returns an error if the scope does not exist or cannot be written.
    pub fn set_model_name(&mut self, scope: SettingScope, name: &str) -> Result<()> {
        let file = match scope {
            SettingScope::User => &mut self.user,
            SettingScope::Workspace => self
                .workspace
                .as_mut()
                .context("No workspace settings file is loaded")?,
        };
        let mut updated = file.settings.clone();
        updated.model.get_or_insert_with(ModelSettings::default).name = Some(name.to_string());
        file.commit(updated)?;
        self.recompute();
        Ok(())
    }
}

/// Shared, lockable settings handed to commands
#[derive(Debug, Default)]
pub struct SettingsService {
    inner: RwLock<LoadedSettings>,
}

impl SettingsService {
    /// Wrap loaded settings
    #[must_use]
    pub fn new(loaded: LoadedSettings) -> Self {
        Self {
            inner: RwLock::new(loaded),
        }
    }

    /// Settings held in memory only, as a single user scope
    #[must_use]
    pub fn in_memory(settings: Settings) -> Self {
        Self::new(LoadedSettings::new(SettingsFile::in_memory(settings), None))
    }

    /// Snapshot of the merged settings
    #[must_use]
    pub fn merged(&self) -> Settings {
        self.inner.read().merged().clone()
    }

    /// Snapshot of the merged saved models
    #[must_use]
    pub fn saved_models(&self) -> Vec<SavedModelEntry> {
        self.inner.read().merged().saved_models().to_vec()
    }

    /// Remove a saved model only if `check` accepts the current entry.
    ///
    /// The check and the removal happen under one write lock, so the entry
    /// checked is the entry removed.
    ///
    /// # Errors
    ///
    /// Returns [`CommandError::ModelNotFound`] if no such model is saved, the
    /// error from `check`, or [`CommandError::Persist`] if saving fails.
    pub fn remove_saved_model_checked<F>(
        &self,
        id: &str,
        check: F,
    ) -> Result<SavedModelEntry, CommandError>
    where
        F: FnOnce(&SavedModelEntry) -> Result<(), CommandError>,
    {
        let mut inner = self.inner.write();
        let entry = inner
            .merged()
            .find_saved_model(id)
            .ok_or_else(|| CommandError::ModelNotFound(id.to_string()))?;
        check(entry)?;

        inner
            .remove_saved_model(id)
            .map_err(CommandError::Persist)?
            .ok_or_else(|| CommandError::ModelNotFound(id.to_string()))
    }

    /// See [`LoadedSettings::set_model_name`]
    ///
    /// # Errors
    ///
    /// Returns an error if the settings cannot be written.
    pub fn set_model_name(&self, scope: SettingScope, name: &str) -> Result<()> {
        self.inner.write().set_model_name(scope, name)
    }
}
