//! Selection manager: a set of row identities spanning pages.

use std::collections::HashSet;

/// Header checkbox state derived from the current page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HeaderCheckState {
    /// Every row on the page is selected.
    pub all_selected: bool,
    /// Some, but not all, rows on the page are selected.
    pub some_selected: bool,
}

/// Tracks selected row ids.
///
/// Selection survives paging, sorting and data changes; ids of rows that
/// disappeared stay selected until the host clears them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionManager {
    selected: HashSet<String>,
}

impl SelectionManager {
    /// Create an empty selection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a selection from existing ids.
    pub fn from_ids(ids: HashSet<String>) -> Self {
        Self { selected: ids }
    }

    /// The selected ids.
    pub fn ids(&self) -> &HashSet<String> {
        &self.selected
    }

    /// Check if `id` is selected.
    pub fn is_selected(&self, id: &str) -> bool {
        self.selected.contains(id)
    }

    /// Number of selected ids.
    pub fn len(&self) -> usize {
        self.selected.len()
    }

    /// Check if nothing is selected.
    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    /// Selection after flipping `id`.
    pub fn toggled(&self, id: &str) -> Self {
        let mut next = self.clone();
        if !next.selected.remove(id) {
            next.selected.insert(id.to_string());
        }
        next
    }

    /// Selection after the header checkbox changes.
    ///
    /// Checking adds the current page's ids to the existing set. Unchecking
    /// clears the whole set, including ids from other pages.
    pub fn with_all(&self, checked: bool, page_ids: &[String]) -> Self {
        if !checked {
            return Self::new();
        }
        let mut next = self.clone();
        next.selected.extend(page_ids.iter().cloned());
        next
    }

    /// Header checkbox state for the current page.
    pub fn header_state(&self, page_ids: &[String]) -> HeaderCheckState {
        let selected_on_page = page_ids.iter().filter(|id| self.is_selected(id)).count();
        let all_selected = !page_ids.is_empty() && selected_on_page == page_ids.len();
        HeaderCheckState {
            all_selected,
            some_selected: selected_on_page > 0 && !all_selected,
        }
    }
}
