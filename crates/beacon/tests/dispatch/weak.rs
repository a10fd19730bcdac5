//! Tests for weak subscriber attachment — lifetime discipline and pruning.

use std::sync::{Arc, Mutex};

use beacon::Signal;

/// A listening object whose lifetime the signal must never extend.
struct Subscriber {
    seen: Mutex<Vec<i32>>,
}

impl Subscriber {
    fn new() -> Arc<Self> {
        Arc::new(Self {
            seen: Mutex::new(Vec::new()),
        })
    }
}

// ============================================================================
// Delivery while the subscriber is alive
// ============================================================================

#[test]
fn weak_listener_runs_while_subscriber_is_alive() {
    let signal: Signal<i32> = Signal::new();
    let subscriber = Subscriber::new();

    signal
        .attach_weak(&subscriber, |s: &Subscriber, e: &i32| {
            s.seen.lock().unwrap().push(*e);
        })
        .unwrap();

    signal.fire(1).unwrap();
    signal.fire(2).unwrap();

    assert_eq!(*subscriber.seen.lock().unwrap(), vec![1, 2]);
}

#[test]
fn attach_weak_does_not_extend_subscriber_lifetime() {
    let signal: Signal<i32> = Signal::new();
    let subscriber = Subscriber::new();

    signal
        .attach_weak(&subscriber, |s: &Subscriber, e: &i32| {
            s.seen.lock().unwrap().push(*e);
        })
        .unwrap();

    assert_eq!(
        Arc::strong_count(&subscriber),
        1,
        "the registry must hold the subscriber weakly"
    );
}

// ============================================================================
// Dead subscriber — safe no-op, then pruned
// ============================================================================

#[test]
fn dropped_subscriber_makes_delivery_a_no_op_and_prunes_the_entry() {
    let signal: Signal<i32> = Signal::new();
    let subscriber = Subscriber::new();

    signal
        .attach_weak(&subscriber, |s: &Subscriber, e: &i32| {
            s.seen.lock().unwrap().push(*e);
        })
        .unwrap();
    assert_eq!(signal.listener_count(), 1);

    drop(subscriber);

    // No fault, nothing delivered, and the dead entry is gone afterwards.
    signal.fire(7).unwrap();
    assert_eq!(signal.listener_count(), 0);
}

// ============================================================================
// Detach by subscriber
// ============================================================================

#[test]
fn detach_subscriber_removes_all_of_its_listeners() {
    let signal: Signal<i32> = Signal::new();
    let subscriber = Subscriber::new();
    let other = Subscriber::new();
    let log = Arc::new(Mutex::new(Vec::new()));

    signal
        .attach_weak(&subscriber, |s: &Subscriber, e: &i32| {
            s.seen.lock().unwrap().push(*e);
        })
        .unwrap();
    signal
        .attach_weak(&subscriber, |s: &Subscriber, e: &i32| {
            s.seen.lock().unwrap().push(-e);
        })
        .unwrap();
    signal
        .attach_weak(&other, |s: &Subscriber, e: &i32| {
            s.seen.lock().unwrap().push(*e);
        })
        .unwrap();
    {
        let log = Arc::clone(&log);
        signal
            .attach(move |e: &i32| log.lock().unwrap().push(*e))
            .unwrap();
    }

    let removed = signal.detach_subscriber(&subscriber);
    assert_eq!(removed, 2);
    assert_eq!(signal.listener_count(), 2);

    signal.fire(5).unwrap();

    assert!(
        subscriber.seen.lock().unwrap().is_empty(),
        "detached subscriber must not hear anything"
    );
    assert_eq!(*other.seen.lock().unwrap(), vec![5]);
    assert_eq!(*log.lock().unwrap(), vec![5]);
}

#[test]
fn detach_subscriber_ignores_plain_closures() {
    let signal: Signal<i32> = Signal::new();
    let subscriber = Subscriber::new();
    let log = Arc::new(Mutex::new(Vec::new()));

    {
        let log = Arc::clone(&log);
        signal
            .attach(move |e: &i32| log.lock().unwrap().push(*e))
            .unwrap();
    }

    assert_eq!(signal.detach_subscriber(&subscriber), 0);
    signal.fire(3).unwrap();
    assert_eq!(*log.lock().unwrap(), vec![3]);
}
