#![allow(clippy::unwrap_used)]

use std::sync::{
    Arc,
    atomic::{AtomicUsize, Ordering},
};

use super::*;

fn counting_handler(counter: &Arc<AtomicUsize>) -> Handler<u32> {
    let counter = Arc::clone(counter);
    Handler::new(move |value: &u32| {
        counter.fetch_add(*value as usize, Ordering::SeqCst);
    })
}

#[test]
fn emit_reaches_only_matching_signal() {
    let emitter = Arc::new(Emitter::<u32>::new());
    let hits = Arc::new(AtomicUsize::new(0));

    emitter.connect("size-changed", counting_handler(&hits));

    assert_eq!(emitter.emit("theme-changed", &5), 0);
    assert_eq!(emitter.emit("size-changed", &5), 1);
    assert_eq!(hits.load(Ordering::SeqCst), 5);
}

#[test]
fn handler_may_disconnect_itself_while_emitting() {
    let emitter = Arc::new(Emitter::<u32>::new());
    let slot = Arc::new(std::sync::Mutex::new(None));

    let weak = Arc::downgrade(&emitter);
    let slot_in_handler = Arc::clone(&slot);
    let id = emitter.connect(
        "tick",
        Handler::new(move |_| {
            if let (Some(emitter), Some(id)) = (weak.upgrade(), *slot_in_handler.lock().unwrap()) {
                emitter.disconnect(id);
            }
        }),
    );
    *slot.lock().unwrap() = Some(id);

    assert_eq!(emitter.emit("tick", &1), 1);
    assert_eq!(emitter.handler_count("tick"), 0);
}

#[test]
fn tracker_unsubscribes_first_match_only() {
    let emitter = Arc::new(Emitter::<u32>::new());
    let hits = Arc::new(AtomicUsize::new(0));
    let handler = counting_handler(&hits);
    let mut tracker = SignalTracker::new();

    tracker
        .subscribe(&emitter, "tick", handler.clone(), "clock")
        .unwrap();
    tracker
        .subscribe(&emitter, "tick", handler.clone(), "clock")
        .unwrap();
    assert_eq!(emitter.handler_count("tick"), 2);

    assert!(tracker.unsubscribe(&emitter, "tick", &handler, "clock"));
    assert_eq!(tracker.len(), 1);
    assert_eq!(emitter.handler_count("tick"), 1);
}

#[test]
fn tracker_ignores_non_matching_tuple() {
    let emitter = Arc::new(Emitter::<u32>::new());
    let other = Arc::new(Emitter::<u32>::new());
    let hits = Arc::new(AtomicUsize::new(0));
    let handler = counting_handler(&hits);
    let stranger = counting_handler(&hits);
    let mut tracker = SignalTracker::new();

    tracker
        .subscribe(&emitter, "tick", handler.clone(), "clock")
        .unwrap();

    assert!(!tracker.unsubscribe(&other, "tick", &handler, "clock"));
    assert!(!tracker.unsubscribe(&emitter, "tock", &handler, "clock"));
    assert!(!tracker.unsubscribe(&emitter, "tick", &stranger, "clock"));
    assert!(!tracker.unsubscribe(&emitter, "tick", &handler, "settings"));
    assert_eq!(tracker.len(), 1);
    assert_eq!(emitter.handler_count("tick"), 1);
}

#[test]
fn dispose_releases_everything_and_rejects_new_bindings() {
    let emitter = Arc::new(Emitter::<u32>::new());
    let hits = Arc::new(AtomicUsize::new(0));
    let mut tracker = SignalTracker::new();

    tracker
        .subscribe(&emitter, "a", counting_handler(&hits), "clock")
        .unwrap();
    tracker
        .subscribe(&emitter, "b", counting_handler(&hits), "clock")
        .unwrap();

    tracker.dispose();
    tracker.dispose();

    assert!(tracker.is_disposed());
    assert!(tracker.is_empty());
    assert_eq!(emitter.emit("a", &1) + emitter.emit("b", &1), 0);
    assert!(matches!(
        tracker.subscribe(&emitter, "a", counting_handler(&hits), "clock"),
        Err(SignalError::Disposed { .. })
    ));
}

#[test]
fn dropping_tracker_releases_bindings() {
    let emitter = Arc::new(Emitter::<u32>::new());
    let hits = Arc::new(AtomicUsize::new(0));

    {
        let mut tracker = SignalTracker::new();
        tracker
            .subscribe(&emitter, "tick", counting_handler(&hits), "clock")
            .unwrap();
        assert_eq!(emitter.handler_count("tick"), 1);
    }

    assert_eq!(emitter.handler_count("tick"), 0);
}
