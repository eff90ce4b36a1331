//! Deletion guard: which saved models may be removed

use super::SavedModelEntry;
use std::fmt;
use tracing::debug;

/// Why an entry is protected from deletion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Protection {
    /// Provisioned by Kolosal Cloud; removing it locally would desync the
    /// managed inventory.
    Managed,
    /// The model currently serving requests.
    Active,
}

impl Protection {
    /// Short tag shown next to protected entries in listings.
    #[must_use]
    pub const fn tag(self) -> &'static str {
        match self {
            Self::Managed => "managed",
            Self::Active => "active",
        }
    }
}

impl fmt::Display for Protection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Managed => f.write_str("it is managed by Kolosal Cloud"),
            Self::Active => f.write_str("it is the currently active model"),
        }
    }
}

/// Classify a single entry. `None` means it may be deleted.
///
/// The managed check wins when both apply.
#[must_use]
pub fn protection(entry: &SavedModelEntry, active_model: &str) -> Option<Protection> {
    if entry.is_kolosal_cloud() {
        Some(Protection::Managed)
    } else if entry.is_active(active_model) {
        Some(Protection::Active)
    } else {
        None
    }
}

/// The ordered subsequence of `entries` that is safe to delete.
///
/// An empty result is not an error; callers decide what it means.
#[must_use]
pub fn deletable_models<'a>(
    entries: &'a [SavedModelEntry],
    active_model: &str,
) -> Vec<&'a SavedModelEntry> {
    entries
        .iter()
        .filter(|entry| match protection(entry, active_model) {
            Some(reason) => {
                debug!(id = %entry.id, reason = reason.tag(), "Model protected from deletion");
                false
            }
            None => true,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::KOLOSAL_API_BASE_URL;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;
    use rstest::rstest;

    fn ids<'a>(entries: &[&'a SavedModelEntry]) -> Vec<&'a str> {
        entries.iter().map(|e| e.id.as_str()).collect()
    }

    #[test]
    fn test_empty_collection_yields_empty() {
        assert!(deletable_models(&[], "anything").is_empty());
    }

    #[test]
    fn test_excludes_reserved_and_keeps_others() {
        let entries = vec![SavedModelEntry::new("a"), SavedModelEntry::new("kolosal-b")];
        let deletable = deletable_models(&entries, "z");
        assert_eq!(ids(&deletable), vec!["a"]);
    }

    #[test]
    fn test_all_protected_yields_empty() {
        let entries = vec![SavedModelEntry::new("kolosal-x")];
        assert!(deletable_models(&entries, "kolosal-x").is_empty());
    }

    #[test]
    fn test_active_model_matched_by_runtime_id() {
        let entries = vec![
            SavedModelEntry::new("local").with_runtime_model_id("llama-3"),
            SavedModelEntry::new("llama-3"),
            SavedModelEntry::new("other"),
        ];
        let deletable = deletable_models(&entries, "llama-3");
        // `llama-3` entry has no runtime id so its id is compared too.
        assert_eq!(ids(&deletable), vec!["other"]);
    }

    #[test]
    fn test_runtime_id_shadows_id() {
        let entries = vec![SavedModelEntry::new("alias").with_runtime_model_id("real")];
        assert_eq!(ids(&deletable_models(&entries, "alias")), vec!["alias"]);
        assert!(deletable_models(&entries, "real").is_empty());
    }

    #[rstest]
    #[case::id_prefix(SavedModelEntry::new("kolosal-gemma"))]
    #[case::label_suffix(SavedModelEntry::new("gemma").with_label("Gemma (Kolosal Cloud)"))]
    #[case::base_url(SavedModelEntry::new("gemma").with_base_url(KOLOSAL_API_BASE_URL))]
    fn test_each_reserved_heuristic_protects(#[case] entry: SavedModelEntry) {
        assert_eq!(protection(&entry, "unrelated"), Some(Protection::Managed));
    }

    #[test]
    fn test_managed_wins_over_active() {
        let entry = SavedModelEntry::new("kolosal-x");
        assert_eq!(protection(&entry, "kolosal-x"), Some(Protection::Managed));
    }

    #[test]
    fn test_protection_display() {
        assert!(Protection::Active.to_string().contains("active"));
        assert_eq!(Protection::Managed.tag(), "managed");
    }

    fn arb_entry() -> impl Strategy<Value = SavedModelEntry> {
        (
            prop_oneof![Just(String::new()), Just("kolosal-".to_string())],
            "[a-c]{1,2}",
            proptest::option::of(prop_oneof![
                Just("Local".to_string()),
                Just("Hosted (Kolosal Cloud)".to_string()),
            ]),
            proptest::option::of(prop_oneof![
                Just("http://localhost:8080/v1".to_string()),
                Just(KOLOSAL_API_BASE_URL.to_string()),
            ]),
            proptest::option::of("[a-c]{1,2}"),
        )
            .prop_map(|(prefix, id, label, base_url, runtime)| SavedModelEntry {
                id: format!("{prefix}{id}"),
                label,
                base_url,
                runtime_model_id: runtime,
            })
    }

    proptest! {
        #[test]
        fn prop_guard_is_pure_and_order_preserving(
            entries in proptest::collection::vec(arb_entry(), 0..12),
            active in "[a-c]{1,2}",
        ) {
            let before = entries.clone();
            let first = deletable_models(&entries, &active);
            let second = deletable_models(&entries, &active);
            prop_assert_eq!(&first, &second);
            prop_assert_eq!(&entries, &before);

            // Survivors appear in the same relative order as the input.
            let mut cursor = 0;
            for kept in &first {
                let offset = entries[cursor..]
                    .iter()
                    .position(|e| std::ptr::eq(e, *kept));
                prop_assert!(offset.is_some());
                cursor += offset.unwrap_or(0) + 1;
            }
        }

        #[test]
        fn prop_reserved_prefix_always_excluded(
            entries in proptest::collection::vec(arb_entry(), 0..12),
            active in "[a-c]{1,2}",
        ) {
            for kept in deletable_models(&entries, &active) {
                prop_assert!(!kept.id.starts_with("kolosal-"));
                prop_assert!(kept.runtime_id() != active);
            }
        }

        #[test]
        fn prop_unprotected_always_included(
            entries in proptest::collection::vec(arb_entry(), 0..12),
            active in "[a-c]{1,2}",
        ) {
            let kept = deletable_models(&entries, &active);
            let expected = entries
                .iter()
                .filter(|e| !e.is_kolosal_cloud() && e.runtime_id() != active)
                .count();
            prop_assert_eq!(kept.len(), expected);
        }
    }
}
