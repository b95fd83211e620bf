//! The visual stability gate.
//!
//! Keeps the notification list visually stable while the user is looking at
//! it. Reordering is suppressed while the panel is expanded on a lit screen
//! or while the ambient display pulses, and regained once neither holds.
//! Individual rows may still reorder while suppressed:
//!
//! - rows added since the last reorder pass,
//! - entries whose priority class changed since the last reorder pass,
//! - heads-up rows that are currently out of view.
//!
//! The layout pass calls [`StabilityGate::on_reordering_finished`] after it
//! applies a reorder, which discards every per-row exemption.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use steady_types::{EntryKey, NotificationEntry, RowHandle, RowRef, Signals};

use crate::events::{EntryEventSource, EntryListener, SharedEntryListener};
use crate::exemptions::ExemptionSets;
use crate::visibility::VisibilityLocationProvider;
use crate::waiters::{WaiterHandle, WaiterRegistry};

pub struct StabilityGate {
    signals: Signals,
    reordering_allowed: bool,
    waiters: WaiterRegistry,
    exemptions: ExemptionSets,
    visibility: Option<Box<dyn VisibilityLocationProvider>>,
}

impl StabilityGate {
    /// Create a gate whose permission is derived from `signals`.
    #[must_use]
    pub fn new(signals: Signals) -> Self {
        Self {
            signals,
            reordering_allowed: signals.allows_reordering(),
            waiters: WaiterRegistry::new(),
            exemptions: ExemptionSets::new(),
            visibility: None,
        }
    }

    /// Create a gate and subscribe it to `source` for entry events.
    ///
    /// The returned handle is shared with the source; callers drive commands
    /// and queries through it.
    pub fn subscribe<S>(source: &mut S, signals: Signals) -> Rc<RefCell<Self>>
    where
        S: EntryEventSource + ?Sized,
    {
        let gate = Rc::new(RefCell::new(Self::new(signals)));
        let listener: SharedEntryListener = gate.clone();
        source.add_entry_listener(listener);
        gate
    }

    /// Register a waiter to run the next time reordering becomes allowed.
    ///
    /// Registering a waiter that is already pending has no effect.
    pub fn add_reordering_allowed_callback(&mut self, waiter: WaiterHandle) {
        self.waiters.add(waiter);
    }

    pub fn set_panel_expanded(&mut self, expanded: bool) {
        self.signals.panel_expanded = expanded;
        self.update_reordering_allowed();
    }

    pub fn set_screen_on(&mut self, screen_on: bool) {
        self.signals.screen_on = screen_on;
        self.update_reordering_allowed();
    }

    /// Whether the ambient display is currently pulsing a notification.
    pub fn set_pulsing(&mut self, pulsing: bool) {
        if self.signals.pulsing == pulsing {
            return;
        }
        self.signals.pulsing = pulsing;
        self.update_reordering_allowed();
    }

    fn update_reordering_allowed(&mut self) {
        let allowed = self.signals.allows_reordering();
        let regained = allowed && !self.reordering_allowed;
        if allowed != self.reordering_allowed {
            tracing::debug!(
                allowed,
                screen_on = self.signals.screen_on,
                panel_expanded = self.signals.panel_expanded,
                pulsing = self.signals.pulsing,
                "Reordering permission changed"
            );
        }
        self.reordering_allowed = allowed;
        if regained {
            self.notify_waiters();
        }
    }

    fn notify_waiters(&mut self) {
        // Waiters registered while this batch runs wait for the next transition.
        let waiters = self.waiters.take();
        if waiters.is_empty() {
            return;
        }
        tracing::debug!(count = waiters.len(), "Notifying reordering waiters");
        for waiter in &waiters {
            waiter.on_reordering_allowed(self);
        }
    }

    /// Whether reordering is currently allowed in general.
    #[must_use]
    pub fn is_reordering_allowed(&self) -> bool {
        self.reordering_allowed
    }

    /// Whether `row` may reorder right now.
    ///
    /// True whenever reordering is allowed in general; otherwise only for
    /// newly added rows, entries whose priority class changed, and heads-up
    /// rows the visibility provider reports as out of view.
    #[must_use]
    pub fn can_reorder_notification(&self, row: RowRef) -> bool {
        if self.reordering_allowed {
            return true;
        }
        if self.exemptions.contains_added_row(row.handle) {
            return true;
        }
        if self.exemptions.contains_priority_change(row.entry) {
            return true;
        }
        self.exemptions.contains_heads_up_row(row.handle)
            && !self.is_in_visible_location(row.entry)
    }

    fn is_in_visible_location(&self, entry: EntryKey) -> bool {
        debug_assert!(
            self.visibility.is_some(),
            "visibility location provider must be set before heads-up rows are queried"
        );
        match self.visibility.as_deref() {
            Some(provider) => provider.is_in_visible_location(entry),
            None => {
                tracing::warn!(
                    %entry,
                    "No visibility location provider; treating row as out of view"
                );
                false
            }
        }
    }

    pub fn set_visibility_location_provider<P>(&mut self, provider: P)
    where
        P: VisibilityLocationProvider + 'static,
    {
        self.visibility = Some(Box::new(provider));
    }

    /// Called by the layout pass once a reorder has been applied.
    pub fn on_reordering_finished(&mut self) {
        let cleared = self.exemptions.clear();
        if cleared > 0 {
            tracing::debug!(cleared, "Reorder pass finished; exemptions cleared");
        }
    }

    /// A new row was added and may reorder during the next pass.
    pub fn notify_view_addition(&mut self, row: RowHandle) {
        self.exemptions.add_row(row);
    }

    #[must_use]
    pub fn signals(&self) -> Signals {
        self.signals
    }

    #[must_use]
    pub fn pending_waiters(&self) -> usize {
        self.waiters.len()
    }

    #[must_use]
    pub fn exemptions(&self) -> &ExemptionSets {
        &self.exemptions
    }
}

impl Default for StabilityGate {
    fn default() -> Self {
        Self::new(Signals::default())
    }
}

impl EntryListener for StabilityGate {
    fn on_pre_entry_updated(&mut self, entry: &NotificationEntry) {
        if entry.priority_changed() {
            self.exemptions.add_priority_change(entry.key());
        }
    }

    fn on_post_entry_updated(&mut self, entry: &NotificationEntry) {
        // The layout pass normally finishes a reorder before this arrives.
        self.exemptions.remove_priority_change(entry.key());
    }

    fn on_heads_up_state_changed(&mut self, entry: &NotificationEntry, is_heads_up: bool) {
        if is_heads_up {
            self.exemptions.add_heads_up_row(entry.row());
        }
    }
}

impl fmt::Debug for StabilityGate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StabilityGate")
            .field("signals", &self.signals)
            .field("reordering_allowed", &self.reordering_allowed)
            .field("waiters", &self.waiters)
            .field("exemptions", &self.exemptions)
            .field("has_visibility_provider", &self.visibility.is_some())
            .finish()
    }
}
