//! Snapshots of notification entries and the rows presenting them.

use crate::{EntryKey, RowHandle};

/// A row together with the entry it currently presents.
///
/// Per-item reorder queries need both identities: newly added rows and
/// heads-up rows are tracked by [`RowHandle`], priority changes by
/// [`EntryKey`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RowRef {
    pub handle: RowHandle,
    pub entry: EntryKey,
}

impl RowRef {
    #[must_use]
    pub fn new(handle: RowHandle, entry: EntryKey) -> Self {
        Self { handle, entry }
    }
}

/// An entry as seen by update and heads-up events.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationEntry {
    key: EntryKey,
    row: RowHandle,
    /// Low-priority classification recorded on the entry before the update.
    ambient: bool,
    /// Low-priority classification currently applied to the row.
    row_low_priority: bool,
}

impl NotificationEntry {
    #[must_use]
    pub fn new(key: EntryKey, row: RowHandle) -> Self {
        Self {
            key,
            row,
            ambient: false,
            row_low_priority: false,
        }
    }

    #[must_use]
    pub fn with_ambient(mut self, ambient: bool) -> Self {
        self.ambient = ambient;
        self
    }

    #[must_use]
    pub fn with_row_low_priority(mut self, low_priority: bool) -> Self {
        self.row_low_priority = low_priority;
        self
    }

    #[must_use]
    pub fn key(&self) -> EntryKey {
        self.key
    }

    #[must_use]
    pub fn row(&self) -> RowHandle {
        self.row
    }

    #[must_use]
    pub fn ambient(&self) -> bool {
        self.ambient
    }

    #[must_use]
    pub fn row_low_priority(&self) -> bool {
        self.row_low_priority
    }

    #[must_use]
    pub fn row_ref(&self) -> RowRef {
        RowRef::new(self.row, self.key)
    }

    /// Whether the entry's priority class differs from the one its row shows.
    #[must_use]
    pub fn priority_changed(&self) -> bool {
        self.ambient != self.row_low_priority
    }
}
