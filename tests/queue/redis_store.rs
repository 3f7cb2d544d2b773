//! Live Redis runs of the workflow scenarios
//!
//! Skipped unless `REQUEUES_TEST_REDIS_URL` names a server. Every test uses
//! keys unique to the process and removes them afterwards.

use super::workflow;
use crate::common::{redis_store, unique_path};
use requeues::queue::api::*;
use serial_test::serial;

macro_rules! with_redis {
    ($scenario:path) => {
        match redis_store() {
            Some(store) => $scenario(store),
            None => eprintln!("skipping: REQUEUES_TEST_REDIS_URL not set"),
        }
    };
}

#[test]
#[serial]
fn test_redis_fifo_round_trip() {
    with_redis!(workflow::fifo_round_trip);
}

#[test]
#[serial]
fn test_redis_chunked_head_batch_keeps_order() {
    with_redis!(workflow::chunked_head_batch_keeps_order);
}

#[test]
#[serial]
fn test_redis_dedup_window() {
    with_redis!(workflow::dedup_window);
}

#[test]
#[serial]
fn test_redis_concurrent_dedup_admits_once() {
    with_redis!(workflow::concurrent_dedup_admits_once);
}

#[test]
#[serial]
fn test_redis_wrong_type_is_reported() {
    let Some(store) = redis_store() else {
        eprintln!("skipping: REQUEUES_TEST_REDIS_URL not set");
        return;
    };
    let path = unique_path("wrongtype");
    let bucket = MembershipBucket::open(store.clone(), path.clone(), QueueOptions::default())
        .unwrap();
    bucket.add_if_absent("egg").unwrap();

    // Point an ordered queue at the bucket's set key
    let identity = QueueIdentity::new(path, "elements", "bucket");
    assert_eq!(&identity.key(), bucket.key());
    let err = store.list_length(identity.key().as_str()).unwrap_err();
    assert!(err.to_string().to_lowercase().contains("wrong"), "got: {}", err);

    assert!(bucket.delete().unwrap());
}
