//! Rows allowed to reorder while global reordering is suppressed.
//!
//! The three sets are keyed differently: added and heads-up rows by
//! [`RowHandle`], priority changes by [`EntryKey`]. All of them live until the
//! next reorder pass finishes.

use std::collections::HashSet;

use steady_types::{EntryKey, RowHandle};

#[derive(Debug, Default, Clone)]
pub struct ExemptionSets {
    added_rows: HashSet<RowHandle>,
    priority_changes: HashSet<EntryKey>,
    heads_up_rows: HashSet<RowHandle>,
}

impl ExemptionSets {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_row(&mut self, row: RowHandle) {
        if self.added_rows.insert(row) {
            tracing::trace!(%row, "Row added; exempt until next reorder pass");
        }
    }

    pub fn add_priority_change(&mut self, entry: EntryKey) {
        if self.priority_changes.insert(entry) {
            tracing::trace!(%entry, "Priority class changed; exempt until next reorder pass");
        }
    }

    pub fn remove_priority_change(&mut self, entry: EntryKey) {
        self.priority_changes.remove(&entry);
    }

    pub fn add_heads_up_row(&mut self, row: RowHandle) {
        if self.heads_up_rows.insert(row) {
            tracing::trace!(%row, "Heads-up row; exempt while out of view");
        }
    }

    #[must_use]
    pub fn contains_added_row(&self, row: RowHandle) -> bool {
        self.added_rows.contains(&row)
    }

    #[must_use]
    pub fn contains_priority_change(&self, entry: EntryKey) -> bool {
        self.priority_changes.contains(&entry)
    }

    #[must_use]
    pub fn contains_heads_up_row(&self, row: RowHandle) -> bool {
        self.heads_up_rows.contains(&row)
    }

    /// Total number of exemptions across all sets.
    #[must_use]
    pub fn len(&self) -> usize {
        self.added_rows.len() + self.priority_changes.len() + self.heads_up_rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.added_rows.is_empty()
            && self.priority_changes.is_empty()
            && self.heads_up_rows.is_empty()
    }

    /// Drop every exemption. Returns how many were cleared.
    pub fn clear(&mut self) -> usize {
        let cleared = self.len();
        self.added_rows.clear();
        self.priority_changes.clear();
        self.heads_up_rows.clear();
        cleared
    }
}
