use std::collections::HashMap;

use tracing::debug;

use crate::domain::entities::filter::{Category, LookupOption};
use crate::usecase::ports::backend::{BackendError, RosterBackend};

/// Per-category option lists, fetched on first use and kept until cleared.
#[derive(Debug, Clone, Default)]
pub struct OptionCache {
    options: HashMap<Category, Vec<LookupOption>>,
}

impl OptionCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cached(&self, category: Category) -> Option<&[LookupOption]> {
        self.options.get(&category).map(Vec::as_slice)
    }

    pub fn get_or_fetch(
        &mut self,
        backend: &dyn RosterBackend,
        category: Category,
    ) -> Result<&[LookupOption], BackendError> {
        if !self.options.contains_key(&category) {
            let fetched = backend.lookup(category)?;
            debug!(category = category.label(), count = fetched.len(), "lookup cached");
            self.options.insert(category, fetched);
        }
        Ok(self.cached(category).unwrap_or(&[]))
    }

    pub fn clear(&mut self) {
        self.options.clear();
    }
}

/// Value picker for one criterion. A text query narrows the visible options
/// and the selection follows the first visible match.
#[derive(Debug, Clone, PartialEq)]
pub struct OptionPicker {
    category: Category,
    options: Vec<LookupOption>,
    query: String,
    visible: Vec<usize>,
    selected: Option<i32>,
}

impl OptionPicker {
    pub fn new(category: Category, options: Vec<LookupOption>) -> Self {
        let visible = (0..options.len()).collect();
        let selected = options.first().map(|option| option.id);
        Self {
            category,
            options,
            query: String::new(),
            visible,
            selected,
        }
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn selected(&self) -> Option<i32> {
        self.selected
    }

    pub fn selected_label(&self) -> Option<&str> {
        let selected = self.selected?;
        self.options
            .iter()
            .find(|option| option.id == selected)
            .map(|option| option.label.as_str())
    }

    pub fn visible_options(&self) -> impl Iterator<Item = &LookupOption> {
        self.visible.iter().filter_map(|idx| self.options.get(*idx))
    }

    /// Case-insensitive substring filter. When nothing matches the previous
    /// selection is kept.
    pub fn set_query(&mut self, query: &str) -> Option<i32> {
        self.query = query.to_string();
        let needle = query.trim().to_lowercase();
        self.visible = self
            .options
            .iter()
            .enumerate()
            .filter(|(_, option)| needle.is_empty() || option.label.to_lowercase().contains(&needle))
            .map(|(idx, _)| idx)
            .collect();

        let first_id = self.visible_options().next().map(|first| first.id);
        if let Some(first_id) = first_id {
            self.selected = Some(first_id);
        }
        self.selected
    }

    /// Selects an option by id; unknown ids are ignored.
    pub fn select(&mut self, id: i32) -> bool {
        if self.options.iter().any(|option| option.id == id) {
            self.selected = Some(id);
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn nations() -> Vec<LookupOption> {
        vec![
            LookupOption::new(1, "Canada"),
            LookupOption::new(2, "Finland"),
            LookupOption::new(3, "Sweden"),
            LookupOption::new(4, "Switzerland"),
        ]
    }

    #[test]
    fn new_picker_selects_first_option() {
        let picker = OptionPicker::new(Category::Nationality, nations());
        assert_eq!(picker.selected(), Some(1));
        assert_eq!(picker.selected_label(), Some("Canada"));
        assert_eq!(picker.visible_options().count(), 4);
    }

    #[test]
    fn query_narrows_and_auto_selects_first_match() {
        let mut picker = OptionPicker::new(Category::Nationality, nations());

        assert_eq!(picker.set_query("SW"), Some(3));
        let visible: Vec<_> = picker.visible_options().map(|o| o.id).collect();
        assert_eq!(visible, vec![3, 4]);

        assert_eq!(picker.set_query("itz"), Some(4));
        assert_eq!(picker.set_query(""), Some(1));
    }

    #[test]
    fn unmatched_query_keeps_previous_selection() {
        let mut picker = OptionPicker::new(Category::Nationality, nations());
        picker.set_query("fin");

        assert_eq!(picker.set_query("zzz"), Some(2));
        assert_eq!(picker.visible_options().count(), 0);
    }

    #[test]
    fn select_rejects_unknown_ids() {
        let mut picker = OptionPicker::new(Category::Nationality, nations());
        assert!(picker.select(4));
        assert!(!picker.select(40));
        assert_eq!(picker.selected(), Some(4));
    }

    #[test]
    fn empty_option_list_has_no_selection() {
        let mut picker = OptionPicker::new(Category::ClubPlaying, Vec::new());
        assert_eq!(picker.selected(), None);
        assert_eq!(picker.set_query("a"), None);
    }
}
