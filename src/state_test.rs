use std::cell::RefCell;
use std::rc::Rc;

use super::*;

#[test]
fn update_returns_previous_and_next() {
    let mut cell = StateCell::new(1);
    let t = cell.update(|v| *v += 4);
    assert_eq!(t, Transition { prev: 1, next: 5 });
    assert!(t.changed());
    assert_eq!(*cell.get(), 5);
}

#[test]
fn subscribers_receive_each_transition_in_order() {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let mut cell = StateCell::new(0);

    let a = Rc::clone(&seen);
    cell.subscribe(move |prev, next| a.borrow_mut().push(("a", *prev, *next)));
    let b = Rc::clone(&seen);
    cell.subscribe(move |prev, next| b.borrow_mut().push(("b", *prev, *next)));

    cell.set(3);
    cell.set(7);

    assert_eq!(*seen.borrow(), vec![("a", 0, 3), ("b", 0, 3), ("a", 3, 7), ("b", 3, 7)]);
}

#[test]
fn unchanged_update_still_notifies() {
    let hits = Rc::new(RefCell::new(0));
    let mut cell = StateCell::new("x");
    let h = Rc::clone(&hits);
    cell.subscribe(move |_, _| *h.borrow_mut() += 1);

    let t = cell.update(|_| {});
    assert!(!t.changed());
    assert_eq!(*hits.borrow(), 1);
}

#[test]
fn unsubscribe_stops_notifications() {
    let hits = Rc::new(RefCell::new(0));
    let mut cell = StateCell::new(0);
    let h = Rc::clone(&hits);
    let id = cell.subscribe(move |_, _| *h.borrow_mut() += 1);

    cell.set(1);
    assert!(cell.unsubscribe(id));
    assert!(!cell.unsubscribe(id));
    cell.set(2);

    assert_eq!(*hits.borrow(), 1);
    assert_eq!(cell.subscriber_count(), 0);
}

#[test]
fn subscription_ids_are_unique() {
    let mut cell: StateCell<u8> = StateCell::default();
    let a = cell.subscribe(|_, _| {});
    let b = cell.subscribe(|_, _| {});
    assert_ne!(a, b);
}

#[test]
fn debug_reports_subscriber_count() {
    let mut cell = StateCell::new(9);
    cell.subscribe(|_, _| {});
    assert_eq!(format!("{cell:?}"), "StateCell { value: 9, subscribers: 1 }");
}
