//! Core domain types for Steady.
//!
//! This crate contains pure domain types with no IO, no async, and minimal dependencies.
//! Everything here can be used from any layer of the application.

mod entry;
mod ids;
mod signals;

pub use entry::{NotificationEntry, RowRef};
pub use ids::{EntryKey, RowHandle};
pub use signals::Signals;
