//! Runtime configuration: the active model

use crate::settings::Settings;
use parking_lot::RwLock;
use tracing::info;

/// Model used when neither the command line nor settings name one.
pub const DEFAULT_MODEL: &str = "kolosal-qwen3-8b";

/// Runtime configuration shared with commands
#[derive(Debug)]
pub struct Config {
    model: RwLock<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self::new(DEFAULT_MODEL)
    }
}

impl Config {
    /// Create a configuration with the given active model
    #[must_use]
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: RwLock::new(model.into()),
        }
    }

    /// Resolve the active model at startup.
    ///
    /// Order: explicit override, then `model.name` from settings, then the
    /// first saved model, then [`DEFAULT_MODEL`].
    #[must_use]
    pub fn resolve(model_override: Option<&str>, settings: &Settings) -> Self {
        let model = model_override
            .or_else(|| settings.model_name())
            .or_else(|| settings.saved_models().first().map(|e| e.runtime_id()))
            .unwrap_or(DEFAULT_MODEL);
        Self::new(model)
    }

    /// Identifier of the model currently serving requests
    #[must_use]
    pub fn get_model(&self) -> String {
        self.model.read().clone()
    }

    /// Switch the active model
    pub fn set_model(&self, model: impl Into<String>) {
        let model = model.into();
        info!("Active model set to {model}");
        *self.model.write() = model;
    }
}
