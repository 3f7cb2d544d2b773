//! Producer and consumer flows through the public queue API
//!
//! The scenario functions take any store so the Redis tests can run the
//! same flows against a live server.

use crate::common::{memory_store, strings, unique_path};
use requeues::queue::api::*;
use std::sync::Arc;
use std::thread;

pub fn fifo_round_trip(store: SharedStore) {
    let queue = OrderedQueue::open(store, unique_path("fifo"), QueueOptions::default()).unwrap();

    assert_eq!(queue.push("egg", QueueEnd::Tail).unwrap(), 1);
    assert_eq!(queue.push_batch(["bacon", "spam"], QueueEnd::Tail).unwrap(), 3);
    assert_eq!(queue.push("  42\n", QueueEnd::Head).unwrap(), 4);

    assert_eq!(queue.elements().unwrap(), strings(&["42", "egg", "bacon", "spam"]));
    assert_eq!(queue.range(-2, -1).unwrap(), strings(&["bacon", "spam"]));

    let mut drained = Vec::new();
    while let Some(element) = queue.pop(QueueEnd::Head).unwrap() {
        drained.push(element);
    }
    assert_eq!(drained, strings(&["42", "egg", "bacon", "spam"]));
    assert!(queue.is_empty().unwrap());
    assert!(!queue.delete().unwrap());
}

pub fn chunked_head_batch_keeps_order(store: SharedStore) {
    let options = QueueOptions::default().block_size(BlockSize::limited(2).unwrap());
    let queue = OrderedQueue::open(store, unique_path("head"), options).unwrap();
    queue.push("tail", QueueEnd::Tail).unwrap();

    let length = queue
        .push_batch(["a", "b", "c", "d", "e"], QueueEnd::Head)
        .unwrap();

    assert_eq!(length, 6);
    assert_eq!(queue.elements().unwrap(), strings(&["a", "b", "c", "d", "e", "tail"]));
    assert!(queue.delete().unwrap());
}

pub fn dedup_window(store: SharedStore) {
    let path = unique_path("dedup");
    let queue = DeduplicatingQueue::open(store.clone(), path.clone(), QueueOptions::default())
        .unwrap();

    let outcome = queue
        .push_batch(
            ["egg", "bacon", "spam", "spam", "spam", "42", "spam"],
            QueueEnd::Tail,
        )
        .unwrap();
    assert_eq!(outcome, BatchOutcome { admitted: 4, length: 4 });
    assert_eq!(queue.first_n(3).unwrap(), strings(&["egg", "bacon", "spam"]));

    // Popping does not reopen the window
    assert_eq!(queue.pop(QueueEnd::Head).unwrap().as_deref(), Some("egg"));
    assert_eq!(queue.push("egg", QueueEnd::Tail).unwrap(), 0);

    // A second handle on the same identity shares the window
    let other = DeduplicatingQueue::open(store.clone(), path.clone(), QueueOptions::default())
        .unwrap();
    assert_eq!(other.push("bacon", QueueEnd::Head).unwrap(), 0);
    assert_eq!(other.length().unwrap(), 3);

    // Reopening with Discard resets both keys
    let fresh = DeduplicatingQueue::open(
        store,
        path,
        QueueOptions::default().keep_previous(KeepPrevious::Discard),
    )
    .unwrap();
    assert!(fresh.is_empty().unwrap());
    assert_eq!(fresh.push("egg", QueueEnd::Tail).unwrap(), 1);
    assert!(fresh.delete().unwrap());
}

pub fn concurrent_dedup_admits_once(store: SharedStore) {
    let path = unique_path("race");
    let handles: Vec<_> = (0..8)
        .map(|_| {
            let store = store.clone();
            let path = path.clone();
            thread::spawn(move || {
                let queue =
                    DeduplicatingQueue::open(store, path, QueueOptions::default()).unwrap();
                queue.push("egg", QueueEnd::Tail).unwrap()
            })
        })
        .collect();

    let admitted = handles
        .into_iter()
        .map(|h| h.join().unwrap())
        .filter(|length| *length > 0)
        .count();
    assert_eq!(admitted, 1);

    let queue = DeduplicatingQueue::open(store, path, QueueOptions::default()).unwrap();
    assert_eq!(queue.elements().unwrap(), strings(&["egg"]));
    assert!(queue.delete().unwrap());
}

#[test]
fn test_fifo_round_trip() {
    fifo_round_trip(memory_store());
}

#[test]
fn test_chunked_head_batch_keeps_order() {
    chunked_head_batch_keeps_order(memory_store());
}

#[test]
fn test_dedup_window() {
    dedup_window(memory_store());
}

#[test]
fn test_concurrent_dedup_admits_once() {
    concurrent_dedup_admits_once(memory_store());
}

#[test]
fn test_queue_variants_do_not_collide() {
    let store = memory_store();
    let path = unique_path("shared");
    let plain = OrderedQueue::open(store.clone(), path.clone(), QueueOptions::default()).unwrap();
    let smart =
        DeduplicatingQueue::open(store.clone(), path.clone(), QueueOptions::default()).unwrap();
    let bucket = MembershipBucket::open(store, path, QueueOptions::default()).unwrap();

    plain.push("egg", QueueEnd::Tail).unwrap();
    assert_eq!(smart.push("egg", QueueEnd::Tail).unwrap(), 1);
    assert!(bucket.add_if_absent("egg").unwrap());

    assert_ne!(plain.key(), smart.key());
    assert_ne!(smart.keys()[1], bucket.key());
}

#[test]
fn test_queue_handles_are_send_and_sync() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<OrderedQueue>();
    assert_send_sync::<DeduplicatingQueue>();
    assert_send_sync::<MembershipBucket>();
    assert_send_sync::<Arc<MemoryStore>>();
}
