//! Shared test utilities and fixtures
//!
//! Common infrastructure for integration tests.

#![allow(dead_code)]

use std::cell::Cell;
use std::fs;
use std::path::PathBuf;
use std::rc::Rc;

use steady_core::{StabilityGate, WaiterHandle};
use steady_types::{EntryKey, NotificationEntry, RowHandle, RowRef, Signals};

/// Screen on with the panel expanded: the user is reading the list.
pub fn watching() -> Signals {
    Signals {
        screen_on: true,
        panel_expanded: true,
        pulsing: false,
    }
}

pub fn row(handle: u64, entry: u64) -> RowRef {
    RowRef::new(RowHandle::new(handle), EntryKey::new(entry))
}

pub fn entry_for(row: RowRef) -> NotificationEntry {
    NotificationEntry::new(row.entry, row.handle)
}

/// A waiter that counts how often it fired.
pub fn counting_waiter() -> (WaiterHandle, Rc<Cell<usize>>) {
    let count = Rc::new(Cell::new(0));
    let seen = Rc::clone(&count);
    let waiter: WaiterHandle = Rc::new(move |_: &mut StabilityGate| seen.set(seen.get() + 1));
    (waiter, count)
}

/// Write `content` to a file inside a fresh temp dir.
pub fn write_temp(name: &str, content: &str) -> (tempfile::TempDir, PathBuf) {
    let dir = tempfile::tempdir().expect("create temp dir");
    let path = dir.path().join(name);
    fs::write(&path, content).expect("write temp file");
    (dir, path)
}
