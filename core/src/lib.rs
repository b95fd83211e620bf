//! Visual stability for the notification list.
//!
//! [`StabilityGate`] decides whether the list may reorder right now and which
//! individual rows are exempt while it may not. It is single-threaded: one
//! gate per presentation session, driven from the UI event loop.

mod events;
mod exemptions;
mod gate;
mod visibility;
mod waiters;

pub use events::{
    EntryDispatcher, EntryEvent, EntryEventSource, EntryListener, SharedEntryListener,
};
pub use exemptions::ExemptionSets;
pub use gate::StabilityGate;
pub use visibility::VisibilityLocationProvider;
pub use waiters::{ReorderingAllowedCallback, WaiterHandle, WaiterRegistry};
