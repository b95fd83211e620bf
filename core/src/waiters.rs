//! One-shot waiters notified when reordering becomes allowed again.

use std::fmt;
use std::mem;
use std::rc::Rc;

use crate::StabilityGate;

/// Invoked once when reordering is allowed again.
///
/// The callback receives the gate that fired it, so it may register again or
/// change signals while the drain is still running.
pub trait ReorderingAllowedCallback {
    fn on_reordering_allowed(&self, gate: &mut StabilityGate);
}

impl<F> ReorderingAllowedCallback for F
where
    F: Fn(&mut StabilityGate),
{
    fn on_reordering_allowed(&self, gate: &mut StabilityGate) {
        self(gate);
    }
}

/// Shared handle to a waiter. Two handles are the same waiter when they point
/// at the same allocation.
pub type WaiterHandle = Rc<dyn ReorderingAllowedCallback>;

/// Registered waiters in registration order, without duplicates.
#[derive(Default)]
pub struct WaiterRegistry {
    waiters: Vec<WaiterHandle>,
}

impl WaiterRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a waiter. Returns `false` if it was already registered.
    pub fn add(&mut self, waiter: WaiterHandle) -> bool {
        if self.contains(&waiter) {
            return false;
        }
        self.waiters.push(waiter);
        true
    }

    #[must_use]
    pub fn contains(&self, waiter: &WaiterHandle) -> bool {
        self.waiters
            .iter()
            .any(|registered| Rc::ptr_eq(registered, waiter))
    }

    /// Take every registered waiter, leaving the registry empty.
    ///
    /// Waiters added after this call land in the fresh registry and are not
    /// part of the returned batch.
    pub fn take(&mut self) -> Vec<WaiterHandle> {
        mem::take(&mut self.waiters)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.waiters.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.waiters.is_empty()
    }
}

impl fmt::Debug for WaiterRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WaiterRegistry")
            .field("len", &self.waiters.len())
            .finish()
    }
}
