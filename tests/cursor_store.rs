//! CursorStore lifecycle and concurrency tests.

use std::sync::Arc;
use std::thread;

use framebatch::{CursorStore, JobKey};

// ── Lifecycle ──────────────────────────────────────────────────────

#[test]
fn unseen_key_initialises_to_zero() {
    let store = CursorStore::new();
    let key = JobKey::from_raw(1);

    assert_eq!(store.cursor(key), None);
    assert_eq!(store.get_or_init(key, false), 0);
    assert_eq!(store.cursor(key), Some(0));
}

#[test]
fn advance_overwrites_and_persists() {
    let store = CursorStore::new();
    let key = JobKey::from_raw(2);

    store.get_or_init(key, false);
    store.advance(key, 24);
    assert_eq!(store.get_or_init(key, false), 24);
    store.advance(key, 48);
    assert_eq!(store.get_or_init(key, false), 48);
}

#[test]
fn reset_discards_stored_cursor() {
    let store = CursorStore::new();
    let key = JobKey::from_raw(3);

    store.advance(key, 77);
    assert_eq!(store.get_or_init(key, true), 0);
    assert_eq!(store.cursor(key), Some(0));
}

#[test]
fn complete_removes_entry() {
    let store = CursorStore::new();
    let key = JobKey::from_raw(4);

    store.advance(key, 100);
    store.complete(key);
    assert_eq!(store.cursor(key), None);
    // The key now behaves as brand new.
    assert_eq!(store.get_or_init(key, false), 0);
}

#[test]
fn complete_on_absent_key_is_a_no_op() {
    let store = CursorStore::new();
    store.complete(JobKey::from_raw(5));
    assert_eq!(store.active_jobs(), 0);
}

#[test]
fn active_jobs_counts_tracked_keys() {
    let store = CursorStore::new();
    store.get_or_init(JobKey::from_raw(10), false);
    store.get_or_init(JobKey::from_raw(11), false);
    assert_eq!(store.active_jobs(), 2);

    store.complete(JobKey::from_raw(10));
    assert_eq!(store.active_jobs(), 1);
}

#[test]
fn keys_are_independent() {
    let store = CursorStore::new();
    let a = JobKey::from_raw(20);
    let b = JobKey::from_raw(21);

    store.advance(a, 50);
    assert_eq!(store.get_or_init(b, false), 0);
    assert_eq!(store.cursor(a), Some(50));
}

// ── Concurrency across keys ────────────────────────────────────────

#[test]
fn concurrent_access_from_different_keys() {
    let store = Arc::new(CursorStore::new());

    let handles: Vec<_> = (0..8u64)
        .map(|worker| {
            let store = Arc::clone(&store);
            thread::spawn(move || {
                let key = JobKey::from_raw(worker);
                for step in 1..=100 {
                    store.get_or_init(key, false);
                    store.advance(key, step);
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().expect("worker thread panicked");
    }

    assert_eq!(store.active_jobs(), 8);
    for worker in 0..8u64 {
        assert_eq!(store.cursor(JobKey::from_raw(worker)), Some(100));
    }
}

// ── Job keys ───────────────────────────────────────────────────────

#[test]
fn path_keys_are_stable_and_distinct() {
    let a = JobKey::from_path("clips/a.mp4");
    let b = JobKey::from_path("clips/a.mp4");
    let c = JobKey::from_path("clips/b.mp4");

    assert_eq!(a, b);
    assert_ne!(a, c);
    assert_eq!(a.as_u64(), b.as_u64());
}
