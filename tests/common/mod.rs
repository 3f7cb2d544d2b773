//! Common test utilities and helpers

#![allow(dead_code)]

use requeues::queue::SharedStore;
use requeues::store::{MemoryStore, RedisStore};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Environment variable naming a Redis server the tests may write to
pub const REDIS_URL_VAR: &str = "REQUEUES_TEST_REDIS_URL";

static NEXT_ID: AtomicUsize = AtomicUsize::new(0);

pub fn memory_store() -> SharedStore {
    Arc::new(MemoryStore::new())
}

/// Redis store for integration runs, `None` when no server is configured
pub fn redis_store() -> Option<SharedStore> {
    let url = std::env::var(REDIS_URL_VAR).ok()?;
    let store = RedisStore::connect(&url)
        .unwrap_or_else(|e| panic!("{} is set but {} is unreachable: {}", REDIS_URL_VAR, url, e));
    Some(Arc::new(store))
}

/// Identifier path unique to this process and call
pub fn unique_path(name: &str) -> Vec<String> {
    vec![
        "requeues-test".to_string(),
        format!("{}-{}", std::process::id(), NEXT_ID.fetch_add(1, Ordering::Relaxed)),
        name.to_string(),
    ]
}

pub fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}
