//! OrderedQueue - list-backed FIFO/LIFO queue
//!
//! All state lives in the store under one derived key. The queue object
//! itself only carries the key, the store handle and the default block
//! size, so it is cheap to clone and safe to share between threads.

use crate::queue::batch::{slice, BlockSize};
use crate::queue::error::{QueueError, QueueResult};
use crate::queue::keys::{QueueIdentity, StoreKey, SIMPLE_QUEUE_TYPE};
use crate::queue::types::{KeepPrevious, QueueEnd, QueueOptions, SharedStore};
use crate::store::{StoreCommand, StoreError};

/// Ordered queue of string elements stored under a single key
///
/// # Example
///
/// ```rust
/// use requeues::queue::{OrderedQueue, QueueEnd, QueueOptions};
/// use requeues::store::MemoryStore;
/// use std::sync::Arc;
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let queue = OrderedQueue::open(
///     Arc::new(MemoryStore::new()),
///     ["crawler", "urls"],
///     QueueOptions::default(),
/// )?;
///
/// queue.push("https://example.org", QueueEnd::Tail)?;
/// queue.push_batch(["a", "b", "c"], QueueEnd::Tail)?;
///
/// assert_eq!(queue.length()?, 4);
/// assert_eq!(queue.pop(QueueEnd::Head)?.as_deref(), Some("https://example.org"));
/// # Ok(())
/// # }
/// # example().unwrap();
/// ```
#[derive(Clone)]
pub struct OrderedQueue {
    store: SharedStore,
    identity: QueueIdentity,
    key: StoreKey,
    block_size: BlockSize,
}

impl OrderedQueue {
    /// Open the plain queue identified by `id_path`
    ///
    /// With `KeepPrevious::Discard` the queue's key is deleted before the
    /// queue is returned.
    pub fn open<I, S>(store: SharedStore, id_path: I, options: QueueOptions) -> QueueResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let identity = QueueIdentity::new(id_path, options.element_kind, SIMPLE_QUEUE_TYPE);
        let queue = Self::with_identity(store, identity, options.block_size);
        if options.keep_previous == KeepPrevious::Discard {
            queue.delete()?;
        }
        Ok(queue)
    }

    /// Build a queue over an explicit identity without touching the store
    pub(crate) fn with_identity(
        store: SharedStore,
        identity: QueueIdentity,
        block_size: BlockSize,
    ) -> Self {
        let key = identity.key();
        Self {
            store,
            identity,
            key,
            block_size,
        }
    }

    pub fn identity(&self) -> &QueueIdentity {
        &self.identity
    }

    pub fn key(&self) -> &StoreKey {
        &self.key
    }

    pub fn block_size(&self) -> BlockSize {
        self.block_size
    }

    /// Push one element, trimmed of surrounding whitespace
    ///
    /// Returns the queue length after the push.
    pub fn push(&self, element: &str, end: QueueEnd) -> QueueResult<u64> {
        let values = [element.trim().to_string()];
        let result = match end {
            QueueEnd::Head => self.store.list_push_head(self.key.as_str(), &values),
            QueueEnd::Tail => self.store.list_push_tail(self.key.as_str(), &values),
        };
        let length = result.map_err(QueueError::store("push", self.key.as_str()))?;
        log::debug!("Pushed to {:?} of {}, length now {}", end, self.key, length);
        Ok(length)
    }

    /// Push many elements using the queue's default block size
    pub fn push_batch<I, S>(&self, elements: I, end: QueueEnd) -> QueueResult<u64>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.push_batch_with_block_size(elements, end, self.block_size)
    }

    /// Push many elements in chunks of at most `block_size`, one pipeline
    ///
    /// Elements keep the order they are given in, whichever end they go
    /// to. Head pushes reverse the batch before chunking because each
    /// multi-value head insert reverses its own values in the store.
    ///
    /// Returns the length reported by the last chunk. A failure part way
    /// through may leave earlier chunks applied.
    pub fn push_batch_with_block_size<I, S>(
        &self,
        elements: I,
        end: QueueEnd,
        block_size: BlockSize,
    ) -> QueueResult<u64>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut elements: Vec<String> = elements.into_iter().map(Into::into).collect();
        if elements.is_empty() {
            return self.length();
        }
        if end == QueueEnd::Head {
            elements.reverse();
        }

        let key = self.key.as_str();
        let commands: Vec<StoreCommand> = slice(elements.len(), block_size)
            .into_iter()
            .map(|range| {
                log::trace!("Chunk {:?} of {} elements for {}", range, elements.len(), key);
                let values = elements[range].to_vec();
                match end {
                    QueueEnd::Head => StoreCommand::ListPushHead {
                        key: key.to_string(),
                        values,
                    },
                    QueueEnd::Tail => StoreCommand::ListPushTail {
                        key: key.to_string(),
                        values,
                    },
                }
            })
            .collect();

        let replies = self
            .store
            .pipeline(&commands)
            .map_err(QueueError::store("push_batch", key))?;

        let length = replies
            .into_iter()
            .last()
            .ok_or(StoreError::UnexpectedReply {
                command: "pipeline",
                expected: "one reply per command",
            })
            .and_then(|reply| reply.into_count("push_batch"))
            .map_err(QueueError::store("push_batch", key))?;

        log::debug!(
            "Pushed {} elements in {} chunks to {:?} of {}, length now {}",
            elements.len(),
            commands.len(),
            end,
            self.key,
            length
        );
        Ok(length)
    }

    /// Pop one element; `None` when the queue is empty
    pub fn pop(&self, end: QueueEnd) -> QueueResult<Option<String>> {
        let result = match end {
            QueueEnd::Head => self.store.list_pop_head(self.key.as_str()),
            QueueEnd::Tail => self.store.list_pop_tail(self.key.as_str()),
        };
        result.map_err(QueueError::store("pop", self.key.as_str()))
    }

    /// Number of queued elements, queried from the store every time
    pub fn length(&self) -> QueueResult<u64> {
        self.store
            .list_length(self.key.as_str())
            .map_err(QueueError::store("length", self.key.as_str()))
    }

    pub fn is_empty(&self) -> QueueResult<bool> {
        Ok(self.length()? == 0)
    }

    pub fn is_not_empty(&self) -> QueueResult<bool> {
        Ok(!self.is_empty()?)
    }

    /// Read elements `from..=to` without removing them
    ///
    /// Indices follow the store's list convention: 0-based from the head,
    /// negative values count back from the tail, `-1` is the last element.
    pub fn range(&self, from: i64, to: i64) -> QueueResult<Vec<String>> {
        self.store
            .list_range(self.key.as_str(), from, to)
            .map_err(QueueError::store("range", self.key.as_str()))
    }

    /// Every queued element, head first
    pub fn elements(&self) -> QueueResult<Vec<String>> {
        self.range(0, -1)
    }

    /// The first `n` queued elements, head first
    pub fn first_n(&self, n: usize) -> QueueResult<Vec<String>> {
        if n == 0 {
            return Ok(Vec::new());
        }
        let to = i64::try_from(n).map_or(-1, |n| n - 1);
        self.range(0, to)
    }

    /// Remove the whole queue; `true` if the key existed
    pub fn delete(&self) -> QueueResult<bool> {
        let removed = self
            .store
            .delete_keys(&[self.key.to_string()])
            .map_err(QueueError::store("delete", self.key.as_str()))?;
        log::debug!("Deleted {} ({} key removed)", self.key, removed);
        Ok(removed == 1)
    }

    /// Human readable description, e.g. `<OrderedQueue: queue:a:type:simple:of:elements (3)>`
    pub fn summary(&self) -> QueueResult<String> {
        Ok(format!("<OrderedQueue: {} ({})>", self.key, self.length()?))
    }
}

impl std::fmt::Debug for OrderedQueue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OrderedQueue")
            .field("key", &self.key)
            .field("block_size", &self.block_size)
            .finish()
    }
}
