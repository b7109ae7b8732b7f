use crate::bridge::lifecycle::ListenerSet;

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

/// **VALUE**: Verifies registration adds a handler the snapshot can run, and
/// the guard removes exactly that handler.
///
/// **WHY THIS MATTERS**: Close interceptors and menu listeners both ride on
/// this set; a guard that removes the wrong entry silently disables someone
/// else's handler.
///
/// **BUG THIS CATCHES**: Would catch guards capturing the wrong key or the
/// snapshot skipping registered handlers.
#[test]
fn given_registered_handlers_when_guard_unregisters_then_only_that_one_removed() {
    // GIVEN: Two registered handlers
    let set: ListenerSet<Arc<dyn Fn() + Send + Sync>> = ListenerSet::new();
    let first_calls = Arc::new(AtomicUsize::new(0));
    let second_calls = Arc::new(AtomicUsize::new(0));

    let counted = Arc::clone(&first_calls);
    let first_guard = set.register(Arc::new(move || {
        counted.fetch_add(1, Ordering::Relaxed);
    }));
    let counted = Arc::clone(&second_calls);
    let _second_guard = set.register(Arc::new(move || {
        counted.fetch_add(1, Ordering::Relaxed);
    }));
    assert_eq!(set.len(), 2);

    // WHEN: Unregistering the first and fanning out
    first_guard.unregister();
    for handler in set.snapshot() {
        handler();
    }

    // THEN: Only the surviving handler ran
    assert_eq!(first_calls.load(Ordering::Relaxed), 0);
    assert_eq!(second_calls.load(Ordering::Relaxed), 1);
    assert_eq!(set.len(), 1);
}

/// **VALUE**: Verifies unregistering twice is harmless.
///
/// **WHY THIS MATTERS**: Teardown paths often run the same cleanup from two
/// directions; the guard contract promises idempotence.
///
/// **BUG THIS CATCHES**: Would catch a second unregister panicking or
/// removing a reused id.
#[test]
fn given_unregistered_guard_when_unregistered_again_then_no_effect() {
    let set: ListenerSet<Arc<dyn Fn() + Send + Sync>> = ListenerSet::new();
    let guard = set.register(Arc::new(|| {}));

    guard.unregister();
    guard.unregister();

    assert!(set.is_empty());
}

/// **VALUE**: Verifies guards work when registration and unregistration
/// happen on different threads.
///
/// **WHY THIS MATTERS**: The dispatch loop snapshots handlers on a runtime
/// worker while embedder code registers and unregisters from anywhere, so
/// the set and its guards must stay usable across threads for every handler
/// type the bridge stores.
///
/// **BUG THIS CATCHES**: Would catch the registration path losing its `Send`
/// bound, which previously failed to build for generic handler types.
#[test]
fn given_guard_moved_to_another_thread_when_unregistered_then_handler_removed() {
    let set: Arc<ListenerSet<Arc<dyn Fn() + Send + Sync>>> = Arc::new(ListenerSet::new());

    let registrar = Arc::clone(&set);
    let guard = std::thread::spawn(move || registrar.register(Arc::new(|| {})))
        .join()
        .unwrap_or_else(|_| panic!("registration thread panicked"));
    assert_eq!(set.len(), 1);

    std::thread::spawn(move || guard.unregister())
        .join()
        .unwrap_or_else(|_| panic!("unregistration thread panicked"));

    assert!(set.is_empty());
}

/// **VALUE**: Verifies a detached guard leaves its handler registered.
///
/// **WHY THIS MATTERS**: Fire-and-forget listeners detach their guard at the
/// registration site; dropping must not double as unregistration.
///
/// **BUG THIS CATCHES**: Would catch a `Drop` impl sneaking onto the guard
/// and silently killing detached listeners.
#[test]
fn given_detached_guard_when_dropped_then_handler_survives() {
    let set: ListenerSet<Arc<dyn Fn() + Send + Sync>> = ListenerSet::new();

    set.register(Arc::new(|| {})).detach();

    assert_eq!(set.len(), 1);
}
