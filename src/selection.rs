//! In-memory row selection for the orders table.

use std::collections::HashSet;

/// Set of selected row identifiers.
///
/// Held only for the lifetime of the table view; the presenter clears it
/// whenever the displayed row set changes.
#[derive(Clone, Debug, Default)]
pub struct SelectionModel {
    selected: HashSet<String>,
}

impl SelectionModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_selected(&self, id: &str) -> bool {
        self.selected.contains(id)
    }

    pub fn len(&self) -> usize {
        self.selected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    /// Selected identifiers in no particular order.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.selected.iter().map(String::as_str)
    }

    /// Adds `id` if absent, removes it if present.
    pub fn toggle(&mut self, id: &str) {
        if !self.selected.remove(id) {
            self.selected.insert(id.to_string());
        }
    }

    /// Header-checkbox semantics: if every given id is already selected,
    /// clears the set; otherwise replaces it with the given ids. Stale ids
    /// from a previous page do not block the clear.
    pub fn select_all<I, S>(&mut self, ids: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let ids: HashSet<String> = ids.into_iter().map(Into::into).collect();

        if !ids.is_empty() && ids.iter().all(|id| self.selected.contains(id)) {
            self.selected.clear();
        } else {
            self.selected = ids;
        }
    }

    pub fn clear(&mut self) {
        self.selected.clear();
    }

    /// Replaces the set wholesale, regardless of its current contents.
    pub fn replace<I, S>(&mut self, ids: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.selected = ids.into_iter().map(Into::into).collect();
    }
}
