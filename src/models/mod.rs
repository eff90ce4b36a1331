//! Saved model entries and the reserved provider they may belong to

mod guard;

pub use guard::{Protection, deletable_models, protection};

use serde::{Deserialize, Serialize};

/// Id prefix used by models provisioned through Kolosal Cloud.
pub const KOLOSAL_ID_PREFIX: &str = "kolosal-";

/// Label suffix attached to models provisioned through Kolosal Cloud.
pub const KOLOSAL_LABEL_SUFFIX: &str = "(Kolosal Cloud)";

/// Base URL of the Kolosal Cloud API.
pub const KOLOSAL_API_BASE_URL: &str = "https://api.kolosal.ai/v1";

/// One user-configured model alias, as persisted in settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedModelEntry {
    /// Stable identifier, unique within the owning collection.
    pub id: String,

    /// Human-readable display name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,

    /// Endpoint URL the model is served from.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,

    /// Identifier used when comparing against the active model.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub runtime_model_id: Option<String>,
}

impl SavedModelEntry {
    /// Create an entry with only an id.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: None,
            base_url: None,
            runtime_model_id: None,
        }
    }

    /// Set the display label.
    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Set the endpoint URL.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Set the runtime model id.
    #[must_use]
    pub fn with_runtime_model_id(mut self, runtime_model_id: impl Into<String>) -> Self {
        self.runtime_model_id = Some(runtime_model_id.into());
        self
    }

    /// The id compared against the active model (`runtime_model_id`, else `id`).
    #[must_use]
    pub fn runtime_id(&self) -> &str {
        self.runtime_model_id.as_deref().unwrap_or(&self.id)
    }

    /// Label if set, else the id.
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.label.as_deref().unwrap_or(&self.id)
    }

    /// Whether this entry is provisioned and managed by Kolosal Cloud.
    ///
    /// Any one of the id prefix, the label suffix or the exact base URL is
    /// enough. None of them is canonical, so all three are checked.
    #[must_use]
    pub fn is_kolosal_cloud(&self) -> bool {
        self.id.starts_with(KOLOSAL_ID_PREFIX)
            || self
                .label
                .as_deref()
                .is_some_and(|label| label.ends_with(KOLOSAL_LABEL_SUFFIX))
            || self.base_url.as_deref() == Some(KOLOSAL_API_BASE_URL)
    }

    /// Whether this entry is the model currently serving requests.
    #[must_use]
    pub fn is_active(&self, active_model: &str) -> bool {
        self.runtime_id() == active_model
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_runtime_id_defaults_to_id() {
        let entry = SavedModelEntry::new("llama");
        assert_eq!(entry.runtime_id(), "llama");

        let entry = entry.with_runtime_model_id("llama-3.1-8b");
        assert_eq!(entry.runtime_id(), "llama-3.1-8b");
    }

    #[test]
    fn test_display_name_prefers_label() {
        let entry = SavedModelEntry::new("qwen");
        assert_eq!(entry.display_name(), "qwen");
        assert_eq!(entry.with_label("Qwen 2.5").display_name(), "Qwen 2.5");
    }

    #[test]
    fn test_kolosal_cloud_by_id_prefix() {
        assert!(SavedModelEntry::new("kolosal-gemma").is_kolosal_cloud());
        assert!(!SavedModelEntry::new("gemma-kolosal-").is_kolosal_cloud());
    }

    #[test]
    fn test_kolosal_cloud_by_label_suffix() {
        let entry = SavedModelEntry::new("gemma").with_label("Gemma 3 (Kolosal Cloud)");
        assert!(entry.is_kolosal_cloud());

        let entry = SavedModelEntry::new("gemma").with_label("(Kolosal Cloud) Gemma");
        assert!(!entry.is_kolosal_cloud());
    }

    #[test]
    fn test_kolosal_cloud_by_exact_base_url() {
        let entry = SavedModelEntry::new("gemma").with_base_url(KOLOSAL_API_BASE_URL);
        assert!(entry.is_kolosal_cloud());

        let entry = SavedModelEntry::new("gemma").with_base_url("https://api.kolosal.ai/v1/");
        assert!(!entry.is_kolosal_cloud());

        let entry = SavedModelEntry::new("gemma").with_base_url("http://localhost:8080/v1");
        assert!(!entry.is_kolosal_cloud());
    }

    #[test]
    fn test_serde_uses_camel_case() -> Result<(), Box<dyn std::error::Error>> {
        let json = r#"{"id":"a","baseUrl":"http://x","runtimeModelId":"b"}"#;
        let entry: SavedModelEntry = serde_json::from_str(json)?;
        assert_eq!(entry.base_url.as_deref(), Some("http://x"));
        assert_eq!(entry.runtime_model_id.as_deref(), Some("b"));
        assert_eq!(entry.label, None);

        let written = serde_json::to_string(&SavedModelEntry::new("a"))?;
        assert_eq!(written, r#"{"id":"a"}"#);
        Ok(())
    }
}
