//! Test modules for the queue system
//!
//! Tests are organized by functional area. Every suite runs against the
//! in-memory store; failure paths use [`FailingStore`].


use crate::store::{MemoryStore, Store, StoreCommand, StoreError, StoreReply, StoreResult};
use std::collections::HashSet;
use std::sync::{Arc, Mutex};

pub(super) const ELEMENT_EGG: &str = "egg";
pub(super) const ELEMENT_BACON: &str = "bacon";
pub(super) const ELEMENT_SPAM: &str = "spam";
pub(super) const ELEMENT_42: &str = "42";

/// Seven elements, four of them distinct
pub(super) fn some_elements() -> Vec<&'static str> {
    vec![
        ELEMENT_EGG,
        ELEMENT_BACON,
        ELEMENT_SPAM,
        ELEMENT_SPAM,
        ELEMENT_SPAM,
        ELEMENT_42,
        ELEMENT_SPAM,
    ]
}

pub(super) fn memory_store() -> Arc<MemoryStore> {
    Arc::new(MemoryStore::new())
}

/// Store wrapper that fails selected commands by wire name
///
/// Pipelines apply commands up to the first failing one, leaving the
/// earlier ones applied, the way a real pipeline would.
#[derive(Default)]
pub(super) struct FailingStore {
    inner: MemoryStore,
    failing: Mutex<HashSet<&'static str>>,
    pipeline_limit: Mutex<Option<usize>>,
}

impl FailingStore {
    pub(super) fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub(super) fn fail(&self, command: &'static str) {
        self.failing.lock().unwrap().insert(command);
    }

    /// Let pipelines apply only their first `n` commands, then fail
    pub(super) fn fail_pipeline_after(&self, n: usize) {
        *self.pipeline_limit.lock().unwrap() = Some(n);
    }

    pub(super) fn recover(&self) {
        self.failing.lock().unwrap().clear();
        *self.pipeline_limit.lock().unwrap() = None;
    }

    pub(super) fn inner(&self) -> &MemoryStore {
        &self.inner
    }

    fn check(&self, command: &'static str) -> StoreResult<()> {
        if self.failing.lock().unwrap().contains(command) {
            return Err(StoreError::Unavailable {
                message: format!("injected {} failure", command),
            });
        }
        Ok(())
    }
}

impl Store for FailingStore {
    fn list_push_head(&self, key: &str, values: &[String]) -> StoreResult<u64> {
        self.check("LPUSH")?;
        self.inner.list_push_head(key, values)
    }

    fn list_push_tail(&self, key: &str, values: &[String]) -> StoreResult<u64> {
        self.check("RPUSH")?;
        self.inner.list_push_tail(key, values)
    }

    fn list_pop_head(&self, key: &str) -> StoreResult<Option<String>> {
        self.check("LPOP")?;
        self.inner.list_pop_head(key)
    }

    fn list_pop_tail(&self, key: &str) -> StoreResult<Option<String>> {
        self.check("RPOP")?;
        self.inner.list_pop_tail(key)
    }

    fn list_length(&self, key: &str) -> StoreResult<u64> {
        self.check("LLEN")?;
        self.inner.list_length(key)
    }

    fn list_range(&self, key: &str, from: i64, to: i64) -> StoreResult<Vec<String>> {
        self.check("LRANGE")?;
        self.inner.list_range(key, from, to)
    }

    fn set_add(&self, key: &str, value: &str) -> StoreResult<u64> {
        self.check("SADD")?;
        self.inner.set_add(key, value)
    }

    fn delete_keys(&self, keys: &[String]) -> StoreResult<u64> {
        self.check("DEL")?;
        self.inner.delete_keys(keys)
    }

    fn pipeline(&self, commands: &[StoreCommand]) -> StoreResult<Vec<StoreReply>> {
        let limit = *self.pipeline_limit.lock().unwrap();
        commands
            .iter()
            .enumerate()
            .map(|(index, command)| {
                if limit.is_some_and(|limit| index >= limit) {
                    return Err(StoreError::Unavailable {
                        message: format!("injected pipeline failure at command {}", index),
                    });
                }
                self.check(command.name())?;
                self.inner.execute(command)
            })
            .collect()
    }
}
