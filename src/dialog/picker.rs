//! Filterable list selection shared by the model dialogs

use crate::models::SavedModelEntry;

/// Selection state over a fixed list of saved models
#[derive(Debug, Default, Clone)]
pub struct PickerState {
    entries: Vec<SavedModelEntry>,

    /// Current filter text
    pub filter: String,

    /// Currently selected index in the filtered list
    pub selected: usize,
}

impl PickerState {
    /// Create a picker over `entries`
    #[must_use]
    pub const fn new(entries: Vec<SavedModelEntry>) -> Self {
        Self {
            entries,
            filter: String::new(),
            selected: 0,
        }
    }

    /// All entries, unfiltered
    #[must_use]
    pub fn entries(&self) -> &[SavedModelEntry] {
        &self.entries
    }

    /// Entries whose id or label contains the filter (case-insensitive)
    #[must_use]
    pub fn filtered(&self) -> Vec<&SavedModelEntry> {
        let filter_lower = self.filter.to_lowercase();
        self.entries
            .iter()
            .filter(|e| {
                filter_lower.is_empty()
                    || e.id.to_lowercase().contains(&filter_lower)
                    || e
                        .label
                        .as_deref()
                        .is_some_and(|l| l.to_lowercase().contains(&filter_lower))
            })
            .collect()
    }

    /// Select next item in filtered list
    pub fn select_next(&mut self) {
        let count = self.filtered().len();
        if count > 0 {
            self.selected = (self.selected + 1) % count;
        }
    }

    /// Select previous item in filtered list
    pub fn select_prev(&mut self) {
        let count = self.filtered().len();
        if count > 0 {
            self.selected = self.selected.checked_sub(1).unwrap_or(count - 1);
        }
    }

    /// Select an index in the filtered list; `false` if out of range
    pub fn select(&mut self, index: usize) -> bool {
        if index < self.filtered().len() {
            self.selected = index;
            true
        } else {
            false
        }
    }

    /// Highlight the entry with this id if it is visible
    pub fn select_id(&mut self, id: &str) {
        if let Some(pos) = self.filtered().iter().position(|e| e.id == id) {
            self.selected = pos;
        }
    }

    /// The highlighted entry
    #[must_use]
    pub fn selected_entry(&self) -> Option<&SavedModelEntry> {
        self.filtered().get(self.selected).copied()
    }

    /// Handle character input in filter
    pub fn handle_filter_char(&mut self, c: char) {
        self.filter.push(c);
        self.selected = 0;
    }

    /// Handle backspace in filter
    pub fn handle_filter_backspace(&mut self) {
        self.filter.pop();
        self.selected = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn picker() -> PickerState {
        PickerState::new(vec![
            SavedModelEntry::new("llama").with_label("Llama 3"),
            SavedModelEntry::new("qwen"),
            SavedModelEntry::new("gemma").with_label("Gemma Local"),
        ])
    }

    fn selected_id(picker: &PickerState) -> Option<&str> {
        picker.selected_entry().map(|e| e.id.as_str())
    }

    #[test]
    fn test_navigation_wraps() {
        let mut picker = picker();
        assert_eq!(selected_id(&picker), Some("llama"));
        picker.select_prev();
        assert_eq!(selected_id(&picker), Some("gemma"));
        picker.select_next();
        assert_eq!(selected_id(&picker), Some("llama"));
        picker.select_next();
        assert_eq!(selected_id(&picker), Some("qwen"));
    }

    #[test]
    fn test_filter_matches_id_or_label() {
        let mut picker = picker();
        for c in "LOCAL".chars() {
            picker.handle_filter_char(c);
        }
        let ids: Vec<_> = picker.filtered().iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["gemma"]);

        picker.filter.clear();
        picker.handle_filter_char('q');
        assert_eq!(selected_id(&picker), Some("qwen"));
        picker.handle_filter_backspace();
        assert_eq!(picker.filtered().len(), 3);
    }

    #[test]
    fn test_select_bounds_and_id() {
        let mut picker = picker();
        assert!(picker.select(2));
        assert!(!picker.select(3));
        assert_eq!(selected_id(&picker), Some("gemma"));

        picker.select_id("qwen");
        assert_eq!(selected_id(&picker), Some("qwen"));
        picker.select_id("missing");
        assert_eq!(selected_id(&picker), Some("qwen"));
    }

    #[test]
    fn test_empty_picker() {
        let mut picker = PickerState::default();
        picker.select_next();
        picker.select_prev();
        assert!(picker.selected_entry().is_none());
        assert!(picker.entries().is_empty());
    }
}
