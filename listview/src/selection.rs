//! Selection state for list rows.
//!
//! Selection uses string ids so it survives page changes and re-renders.
//! It is never pruned when the data changes; the host clears it when needed.

use std::collections::HashSet;

/// Tri-state of the header "select all" checkbox.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CheckState {
    #[default]
    Unchecked,
    /// Some, but not all, rows of the page are selected.
    Partial,
    Checked,
}

/// ID-based selection state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    selected: HashSet<String>,
}

impl Selection {
    /// Create a new empty selection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get all selected IDs (sorted for deterministic ordering).
    pub fn selected(&self) -> Vec<String> {
        let mut ids: Vec<_> = self.selected.iter().cloned().collect();
        ids.sort();
        ids
    }

    /// Check if an ID is selected.
    pub fn is_selected(&self, id: &str) -> bool {
        self.selected.contains(id)
    }

    /// Get the number of selected items.
    pub fn len(&self) -> usize {
        self.selected.len()
    }

    /// Check if nothing is selected.
    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    /// Toggle selection of an ID.
    /// Returns true if the ID is now selected.
    pub fn toggle(&mut self, id: &str) -> bool {
        if self.selected.remove(id) {
            false
        } else {
            self.selected.insert(id.to_string());
            true
        }
    }

    /// Select exactly the rows of the current page, or clear everything if
    /// they are already all selected.
    ///
    /// Only the rendered page is considered; rows on other pages cannot be
    /// selected through this control.
    pub fn select_all(&mut self, page_ids: &[String]) {
        if self.all_selected(page_ids) {
            self.selected.clear();
        } else {
            self.selected = page_ids.iter().cloned().collect();
        }
    }

    /// Clear all selection. Returns true if anything was selected.
    pub fn clear(&mut self) -> bool {
        let changed = !self.selected.is_empty();
        self.selected.clear();
        changed
    }

    /// Header checkbox state for the given page.
    pub fn check_state(&self, page_ids: &[String]) -> CheckState {
        let count = page_ids.iter().filter(|id| self.is_selected(id)).count();
        if count == 0 {
            CheckState::Unchecked
        } else if count == page_ids.len() {
            CheckState::Checked
        } else {
            CheckState::Partial
        }
    }

    fn all_selected(&self, page_ids: &[String]) -> bool {
        page_ids.iter().all(|id| self.selected.contains(id))
    }
}
