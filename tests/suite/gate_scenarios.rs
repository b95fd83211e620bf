//! End-to-end gate behavior driven through the entry dispatcher.

use std::cell::Cell;
use std::rc::Rc;

use steady_core::{EntryDispatcher, EntryEvent, StabilityGate};
use steady_types::{EntryKey, Signals};

use crate::common::{counting_waiter, entry_for, row, watching};

#[test]
fn added_row_reorders_while_list_is_watched() {
    let mut gate = StabilityGate::new(watching());
    assert!(!gate.is_reordering_allowed());

    let x = row(1, 10);
    let y = row(2, 20);
    gate.notify_view_addition(x.handle);

    assert!(gate.can_reorder_notification(x));
    assert!(!gate.can_reorder_notification(y));
}

#[test]
fn pulsing_blip_while_watched_fires_nothing() {
    let mut gate = StabilityGate::new(watching());
    let (waiter, count) = counting_waiter();
    gate.add_reordering_allowed_callback(waiter);

    gate.set_pulsing(true);
    assert!(!gate.is_reordering_allowed());
    gate.set_pulsing(false);
    assert!(!gate.is_reordering_allowed());

    assert_eq!(count.get(), 0);
    assert_eq!(gate.pending_waiters(), 1);
}

#[test]
fn collapsing_panel_fires_waiter_once_per_registration() {
    let mut gate = StabilityGate::new(watching());
    let (waiter, count) = counting_waiter();
    gate.add_reordering_allowed_callback(Rc::clone(&waiter));

    gate.set_panel_expanded(false);
    assert!(gate.is_reordering_allowed());
    assert_eq!(count.get(), 1);
    assert_eq!(gate.pending_waiters(), 0);

    gate.add_reordering_allowed_callback(waiter);
    gate.set_panel_expanded(true);
    gate.set_screen_on(false);
    assert_eq!(count.get(), 2);
}

#[test]
fn heads_up_row_follows_visibility() {
    let mut dispatcher = EntryDispatcher::new();
    let gate = StabilityGate::subscribe(&mut dispatcher, watching());
    let visible = Rc::new(Cell::new(false));
    let oracle = Rc::clone(&visible);
    gate.borrow_mut()
        .set_visibility_location_provider(move |_: EntryKey| oracle.get());

    let h = row(5, 50);
    dispatcher.dispatch(&EntryEvent::HeadsUpChanged {
        entry: entry_for(h),
        is_heads_up: true,
    });

    assert!(gate.borrow().can_reorder_notification(h));
    visible.set(true);
    assert!(!gate.borrow().can_reorder_notification(h));
}

#[test]
fn every_exemption_kind_clears_at_checkpoint() {
    let mut dispatcher = EntryDispatcher::new();
    let gate = StabilityGate::subscribe(&mut dispatcher, watching());
    gate.borrow_mut()
        .set_visibility_location_provider(|_: EntryKey| false);

    let added = row(1, 10);
    let reprioritized = row(2, 20);
    let heads_up = row(3, 30);

    gate.borrow_mut().notify_view_addition(added.handle);
    dispatcher.dispatch(&EntryEvent::PreUpdate(
        entry_for(reprioritized).with_ambient(true),
    ));
    dispatcher.dispatch(&EntryEvent::HeadsUpChanged {
        entry: entry_for(heads_up),
        is_heads_up: true,
    });

    {
        let gate = gate.borrow();
        for r in [added, reprioritized, heads_up] {
            assert!(gate.can_reorder_notification(r), "{r:?}");
        }
    }

    gate.borrow_mut().on_reordering_finished();
    gate.borrow_mut().on_reordering_finished();

    let gate = gate.borrow();
    assert!(gate.exemptions().is_empty());
    for r in [added, reprioritized, heads_up] {
        assert_eq!(
            gate.can_reorder_notification(r),
            gate.is_reordering_allowed()
        );
    }
}

#[test]
fn reordering_allowed_short_circuits_queries() {
    let gate = StabilityGate::new(Signals::default());
    assert!(gate.is_reordering_allowed());
    assert!(gate.can_reorder_notification(row(9, 90)));
}
