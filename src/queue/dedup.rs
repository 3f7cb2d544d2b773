//! DeduplicatingQueue - ordered queue gated by a membership bucket
//!
//! Each distinct element is admitted at most once per dedup window, the
//! lifetime of the bucket key. Pushes go through the bucket first and only
//! reach the ordered queue when the bucket reports the element as new.
//! Reads never consult the bucket.
//!
//! A push that is admitted by the bucket but then fails to reach the
//! ordered queue leaves the element marked as seen. The failure is
//! reported to the caller and nothing is retried.

use crate::queue::batch::BlockSize;
use crate::queue::bucket::MembershipBucket;
use crate::queue::error::{QueueError, QueueResult};
use crate::queue::keys::{QueueIdentity, StoreKey, SMART_BUCKET_TYPE, SMART_QUEUE_TYPE};
use crate::queue::ordered::OrderedQueue;
use crate::queue::types::{BatchOutcome, KeepPrevious, QueueEnd, QueueOptions, SharedStore};

/// Queue that admits each distinct element once
///
/// # Example
///
/// ```rust
/// use requeues::queue::{DeduplicatingQueue, QueueEnd, QueueOptions};
/// use requeues::store::MemoryStore;
/// use std::sync::Arc;
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let queue = DeduplicatingQueue::open(
///     Arc::new(MemoryStore::new()),
///     ["crawler", "seen"],
///     QueueOptions::default(),
/// )?;
///
/// assert_eq!(queue.push("egg", QueueEnd::Tail)?, 1);
/// assert_eq!(queue.push("egg", QueueEnd::Tail)?, 0);
///
/// let outcome = queue.push_batch(["bacon", "egg", "spam", "spam"], QueueEnd::Tail)?;
/// assert_eq!(outcome.admitted, 2);
/// assert_eq!(outcome.length, 3);
/// # Ok(())
/// # }
/// # example().unwrap();
/// ```
#[derive(Clone)]
pub struct DeduplicatingQueue {
    store: SharedStore,
    queue: OrderedQueue,
    bucket: MembershipBucket,
}

impl DeduplicatingQueue {
    /// Open the deduplicating queue identified by `id_path`
    ///
    /// With `KeepPrevious::Discard` both the ordered queue and the bucket
    /// are reset before the queue is returned.
    pub fn open<I, S>(store: SharedStore, id_path: I, options: QueueOptions) -> QueueResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let identity = QueueIdentity::new(id_path, options.element_kind, SMART_QUEUE_TYPE);
        let bucket_identity = identity.with_queue_type(SMART_BUCKET_TYPE);

        let queue = Self {
            queue: OrderedQueue::with_identity(store.clone(), identity, options.block_size),
            bucket: MembershipBucket::with_identity(store.clone(), bucket_identity),
            store,
        };

        if options.keep_previous == KeepPrevious::Discard {
            queue.delete()?;
        }
        Ok(queue)
    }

    pub fn identity(&self) -> &QueueIdentity {
        self.queue.identity()
    }

    /// Key of the ordered list
    pub fn key(&self) -> &StoreKey {
        self.queue.key()
    }

    /// Key of the ordered list and key of the membership set
    pub fn keys(&self) -> [&StoreKey; 2] {
        [self.queue.key(), self.bucket.key()]
    }

    /// Push `element` unless it was admitted before
    ///
    /// The element is trimmed first, so the bucket and the list always hold
    /// the same value. Returns 0 when the element was already seen,
    /// otherwise the queue length after the push. Elements that are empty
    /// after trimming are rejected before the store is touched.
    pub fn push(&self, element: &str, end: QueueEnd) -> QueueResult<u64> {
        let element = element.trim();
        if element.is_empty() {
            return Err(QueueError::EmptyElement);
        }

        if !self.bucket.add_if_absent(element)? {
            log::debug!("Rejected duplicate element for {}", self.queue.key());
            return Ok(0);
        }

        self.queue.push(element, end).inspect_err(|e| {
            log::warn!(
                "Element admitted to {} but not queued in {}: {}",
                self.bucket.key(),
                self.queue.key(),
                e
            );
        })
    }

    /// Push the not-yet-seen subset of `elements` with the default block size
    pub fn push_batch<I, S>(&self, elements: I, end: QueueEnd) -> QueueResult<BatchOutcome>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.push_batch_with_block_size(elements, end, self.queue.block_size())
    }

    /// Push the not-yet-seen subset of `elements`
    ///
    /// Membership is probed per element, then the admitted elements are
    /// forwarded to the ordered queue in their original relative order.
    /// Any empty element rejects the whole batch before the store is
    /// touched.
    pub fn push_batch_with_block_size<I, S>(
        &self,
        elements: I,
        end: QueueEnd,
        block_size: BlockSize,
    ) -> QueueResult<BatchOutcome>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let elements: Vec<String> = elements.into_iter().map(Into::into).collect();
        if elements.iter().any(String::is_empty) {
            return Err(QueueError::EmptyElement);
        }

        let statuses = self.bucket.add_all_if_absent(&elements)?;
        let admitted: Vec<String> = elements
            .into_iter()
            .zip(statuses)
            .filter_map(|(element, added)| added.then_some(element))
            .collect();
        let admitted_count = admitted.len();

        let length = self
            .queue
            .push_batch_with_block_size(admitted, end, block_size)
            .inspect_err(|e| {
                log::warn!(
                    "{} elements admitted to {} but not queued in {}: {}",
                    admitted_count,
                    self.bucket.key(),
                    self.queue.key(),
                    e
                );
            })?;

        Ok(BatchOutcome {
            admitted: admitted_count,
            length,
        })
    }

    pub fn pop(&self, end: QueueEnd) -> QueueResult<Option<String>> {
        self.queue.pop(end)
    }

    pub fn length(&self) -> QueueResult<u64> {
        self.queue.length()
    }

    pub fn is_empty(&self) -> QueueResult<bool> {
        self.queue.is_empty()
    }

    pub fn is_not_empty(&self) -> QueueResult<bool> {
        self.queue.is_not_empty()
    }

    pub fn range(&self, from: i64, to: i64) -> QueueResult<Vec<String>> {
        self.queue.range(from, to)
    }

    pub fn elements(&self) -> QueueResult<Vec<String>> {
        self.queue.elements()
    }

    pub fn first_n(&self, n: usize) -> QueueResult<Vec<String>> {
        self.queue.first_n(n)
    }

    /// Reset the queue and its dedup window together
    ///
    /// Both keys go out in one pipelined delete. Returns `true` only when
    /// exactly two keys were removed.
    pub fn delete(&self) -> QueueResult<bool> {
        let keys = vec![self.queue.key().to_string(), self.bucket.key().to_string()];
        let removed = self
            .store
            .delete_keys(&keys)
            .map_err(QueueError::store("delete", keys.join(",")))?;
        log::debug!("Deleted {} ({} of 2 keys removed)", self.queue.key(), removed);
        Ok(removed == 2)
    }

    /// Human readable description, e.g. `<DeduplicatingQueue: queue:a:type:smart:of:elements (3)>`
    pub fn summary(&self) -> QueueResult<String> {
        Ok(format!(
            "<DeduplicatingQueue: {} ({})>",
            self.queue.key(),
            self.length()?
        ))
    }
}

impl std::fmt::Debug for DeduplicatingQueue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DeduplicatingQueue")
            .field("queue", &self.queue)
            .field("bucket", &self.bucket)
            .finish()
    }
}
