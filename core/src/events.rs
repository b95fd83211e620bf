//! Entry update events and the listener seam between the entry pipeline and
//! its consumers.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use steady_types::NotificationEntry;

/// Events produced by the notification entry pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryEvent {
    /// The entry is about to be re-inflated with new content.
    PreUpdate(NotificationEntry),
    /// The entry's update has been applied.
    PostUpdate(NotificationEntry),
    /// The entry entered or left heads-up presentation.
    HeadsUpChanged {
        entry: NotificationEntry,
        is_heads_up: bool,
    },
}

/// Consumer of entry pipeline events. Every hook defaults to a no-op.
pub trait EntryListener {
    fn on_pre_entry_updated(&mut self, _entry: &NotificationEntry) {}

    fn on_post_entry_updated(&mut self, _entry: &NotificationEntry) {}

    fn on_heads_up_state_changed(&mut self, _entry: &NotificationEntry, _is_heads_up: bool) {}

    /// Route an event to the matching hook.
    fn on_entry_event(&mut self, event: &EntryEvent) {
        match event {
            EntryEvent::PreUpdate(entry) => self.on_pre_entry_updated(entry),
            EntryEvent::PostUpdate(entry) => self.on_post_entry_updated(entry),
            EntryEvent::HeadsUpChanged { entry, is_heads_up } => {
                self.on_heads_up_state_changed(entry, *is_heads_up);
            }
        }
    }
}

pub type SharedEntryListener = Rc<RefCell<dyn EntryListener>>;

/// Anything a listener can subscribe to for entry events.
pub trait EntryEventSource {
    fn add_entry_listener(&mut self, listener: SharedEntryListener);
}

/// In-process fan-out of entry events to subscribed listeners, in
/// subscription order.
#[derive(Default)]
pub struct EntryDispatcher {
    listeners: Vec<SharedEntryListener>,
}

impl EntryDispatcher {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Deliver `event` to every listener.
    ///
    /// # Panics
    ///
    /// Panics if a listener is already mutably borrowed, i.e. when an event is
    /// dispatched from inside a listener hook.
    pub fn dispatch(&self, event: &EntryEvent) {
        for listener in &self.listeners {
            listener.borrow_mut().on_entry_event(event);
        }
    }

    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }
}

impl EntryEventSource for EntryDispatcher {
    fn add_entry_listener(&mut self, listener: SharedEntryListener) {
        self.listeners.push(listener);
    }
}

impl fmt::Debug for EntryDispatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EntryDispatcher")
            .field("listeners", &self.listeners.len())
            .finish()
    }
}
