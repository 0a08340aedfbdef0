//! Test point selection for bulk actions.
//!
//! The set outlives the page it was made on: ids that are not visible on the current page
//! stay selected. It is only cleared when the filter changes or a bulk mutation succeeds.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionResetReason {
    FilterChanged,
    BatchMutationSucceeded,
}

impl fmt::Display for SelectionResetReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FilterChanged => write!(f, "filter_changed"),
            Self::BatchMutationSucceeded => write!(f, "batch_mutation_succeeded"),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionSet {
    ids: BTreeSet<i64>,
}

impl SelectionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flips one id; returns whether it is selected afterwards.
    pub fn toggle(&mut self, id: i64) -> bool {
        if self.ids.remove(&id) {
            false
        } else {
            self.ids.insert(id);
            true
        }
    }

    /// Adds or removes all `ids`.
    pub fn batch_set(&mut self, ids: &[i64], selected: bool) {
        if selected {
            self.ids.extend(ids.iter().copied());
        } else {
            for id in ids {
                self.ids.remove(id);
            }
        }
    }

    pub fn contains(&self, id: i64) -> bool {
        self.ids.contains(&id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Ascending snapshot of the selected ids.
    pub fn ids(&self) -> Vec<i64> {
        self.ids.iter().copied().collect()
    }

    pub fn current_page_selected_count(&self, visible_ids: &[i64]) -> usize {
        let visible: BTreeSet<i64> = visible_ids.iter().copied().collect();
        visible.iter().filter(|id| self.ids.contains(id)).count()
    }

    pub fn is_all_visible_selected(&self, visible_ids: &[i64]) -> bool {
        let visible_count = distinct_count(visible_ids);
        visible_count > 0 && self.current_page_selected_count(visible_ids) == visible_count
    }

    pub fn is_indeterminate(&self, visible_ids: &[i64]) -> bool {
        let selected = self.current_page_selected_count(visible_ids);
        selected > 0 && selected < distinct_count(visible_ids)
    }

    pub fn reset(&mut self, reason: SelectionResetReason) {
        if !self.ids.is_empty() {
            debug!(reason = %reason, cleared = self.ids.len(), "Clearing test point selection");
        }
        self.ids.clear();
    }
}

fn distinct_count(ids: &[i64]) -> usize {
    ids.iter().copied().collect::<BTreeSet<i64>>().len()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_is_symmetric_difference() {
        let mut selection = SelectionSet::new();
        assert!(selection.toggle(5));
        assert!(selection.contains(5));
        assert!(!selection.toggle(5));
        assert!(selection.is_empty());
    }

    #[test]
    fn test_batch_set_is_visible_in_one_step() {
        let mut selection = SelectionSet::new();
        selection.batch_set(&[1, 2, 3], true);
        assert_eq!(selection.current_page_selected_count(&[1, 2, 3, 4]), 3);
        assert!(selection.is_indeterminate(&[1, 2, 3, 4]));
        assert!(!selection.is_all_visible_selected(&[1, 2, 3, 4]));
    }

    #[test]
    fn test_batch_unselect_keeps_other_pages() {
        let mut selection = SelectionSet::new();
        selection.batch_set(&[1, 2, 3, 40, 41], true);
        selection.batch_set(&[1, 2, 3], false);
        assert_eq!(selection.ids(), vec![40, 41]);
        assert_eq!(selection.current_page_selected_count(&[1, 2, 3]), 0);
        assert!(!selection.is_indeterminate(&[1, 2, 3]));
    }

    #[test]
    fn test_all_visible_selected() {
        let mut selection = SelectionSet::new();
        selection.batch_set(&[7, 8], true);
        assert!(selection.is_all_visible_selected(&[7, 8]));
        assert!(!selection.is_indeterminate(&[7, 8]));
        assert!(!selection.is_all_visible_selected(&[]));
    }

    #[test]
    fn test_hidden_ids_are_not_an_error() {
        let mut selection = SelectionSet::new();
        selection.toggle(99);
        assert_eq!(selection.current_page_selected_count(&[1, 2]), 0);
        assert_eq!(selection.len(), 1);
    }

    #[test]
    fn test_duplicate_visible_ids_count_once() {
        let mut selection = SelectionSet::new();
        selection.toggle(1);
        assert_eq!(selection.current_page_selected_count(&[1, 1, 2]), 1);
        assert!(selection.is_indeterminate(&[1, 1, 2]));
    }

    #[test]
    fn test_reset_clears() {
        let mut selection = SelectionSet::new();
        selection.batch_set(&[5, 9], true);
        selection.reset(SelectionResetReason::FilterChanged);
        assert!(selection.is_empty());
    }
}
