//! Queue construction from settings
//!
//! The factory owns the shared store handle and the configured queue
//! options, so every queue it opens uses the same connection, element
//! kind, block size and keep-previous policy.

use crate::app::cli::Settings;
use crate::app::error::AppError;
use crate::queue::{
    DeduplicatingQueue, MembershipBucket, OrderedQueue, QueueOptions, QueueResult, SharedStore,
};
use crate::store::{MemoryStore, RedisStore};
use std::sync::Arc;

/// URL scheme selecting the in-process store
pub const MEMORY_STORE_URL: &str = "memory://";

#[derive(Clone)]
pub struct QueueFactory {
    store: SharedStore,
    options: QueueOptions,
}

impl QueueFactory {
    /// Open the configured store and capture the queue options
    pub fn from_settings(settings: &Settings) -> Result<Self, AppError> {
        settings.validate()?;
        let options = settings.queue_options()?;
        let store = open_store(&settings.store.url)?;
        Ok(Self::with_store(store, options))
    }

    /// Build a factory over an existing store handle
    pub fn with_store(store: SharedStore, options: QueueOptions) -> Self {
        Self { store, options }
    }

    pub fn store(&self) -> &SharedStore {
        &self.store
    }

    pub fn options(&self) -> &QueueOptions {
        &self.options
    }

    pub fn ordered<I, S>(&self, id_path: I) -> QueueResult<OrderedQueue>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        OrderedQueue::open(self.store.clone(), id_path, self.options.clone())
    }

    pub fn deduplicating<I, S>(&self, id_path: I) -> QueueResult<DeduplicatingQueue>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        DeduplicatingQueue::open(self.store.clone(), id_path, self.options.clone())
    }

    pub fn bucket<I, S>(&self, id_path: I) -> QueueResult<MembershipBucket>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        MembershipBucket::open(self.store.clone(), id_path, self.options.clone())
    }
}

impl std::fmt::Debug for QueueFactory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QueueFactory")
            .field("options", &self.options)
            .finish()
    }
}

fn open_store(url: &str) -> Result<SharedStore, AppError> {
    if url == MEMORY_STORE_URL {
        log::debug!("Using in-process memory store");
        return Ok(Arc::new(MemoryStore::new()));
    }

    let store = RedisStore::connect(url).map_err(|source| AppError::StoreOpen {
        url: url.to_string(),
        source,
    })?;
    Ok(Arc::new(store))
}
