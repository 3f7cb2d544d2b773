//! MembershipBucket - add-if-absent over a store set
//!
//! Atomicity comes entirely from the store's set-add: when several callers
//! race to add the same element exactly one of them sees `true`. There is
//! no client-side locking and no read-then-write.

use crate::queue::error::{QueueError, QueueResult};
use crate::queue::keys::{QueueIdentity, StoreKey, BUCKET_TYPE};
use crate::queue::types::{KeepPrevious, QueueOptions, SharedStore};
use crate::store::StoreCommand;

/// Set of elements ever admitted under one key
#[derive(Clone)]
pub struct MembershipBucket {
    store: SharedStore,
    identity: QueueIdentity,
    key: StoreKey,
}

impl MembershipBucket {
    /// Open the standalone bucket identified by `id_path`
    pub fn open<I, S>(store: SharedStore, id_path: I, options: QueueOptions) -> QueueResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let identity = QueueIdentity::new(id_path, options.element_kind, BUCKET_TYPE);
        let bucket = Self::with_identity(store, identity);
        if options.keep_previous == KeepPrevious::Discard {
            bucket.delete()?;
        }
        Ok(bucket)
    }

    pub(crate) fn with_identity(store: SharedStore, identity: QueueIdentity) -> Self {
        let key = identity.key();
        Self {
            store,
            identity,
            key,
        }
    }

    pub fn identity(&self) -> &QueueIdentity {
        &self.identity
    }

    pub fn key(&self) -> &StoreKey {
        &self.key
    }

    /// Add `element`; `true` only if it was not a member yet
    pub fn add_if_absent(&self, element: &str) -> QueueResult<bool> {
        let added = self
            .store
            .set_add(self.key.as_str(), element)
            .map_err(QueueError::store("add_if_absent", self.key.as_str()))?;
        Ok(added == 1)
    }

    /// Add every element, one result per input in input order
    ///
    /// The store has no batched add that reports per-member results, so
    /// this pipelines one set-add per element: O(n) commands in a single
    /// round trip. Each add is atomic on its own; the batch as a whole is
    /// not. A repeated element within the batch is admitted only at its
    /// first occurrence.
    pub fn add_all_if_absent<S: AsRef<str>>(&self, elements: &[S]) -> QueueResult<Vec<bool>> {
        if elements.is_empty() {
            return Ok(Vec::new());
        }

        let commands: Vec<StoreCommand> = elements
            .iter()
            .map(|element| StoreCommand::SetAdd {
                key: self.key.to_string(),
                value: element.as_ref().to_string(),
            })
            .collect();

        let replies = self
            .store
            .pipeline(&commands)
            .map_err(QueueError::store("add_all_if_absent", self.key.as_str()))?;

        let statuses = replies
            .into_iter()
            .map(|reply| reply.into_count("SADD").map(|added| added == 1))
            .collect::<Result<Vec<bool>, _>>()
            .map_err(QueueError::store("add_all_if_absent", self.key.as_str()))?;

        log::debug!(
            "Bucket {} admitted {} of {} elements",
            self.key,
            statuses.iter().filter(|added| **added).count(),
            statuses.len()
        );
        Ok(statuses)
    }

    /// Forget every member; `true` if the key existed
    pub fn delete(&self) -> QueueResult<bool> {
        let removed = self
            .store
            .delete_keys(&[self.key.to_string()])
            .map_err(QueueError::store("delete", self.key.as_str()))?;
        Ok(removed == 1)
    }
}

impl std::fmt::Debug for MembershipBucket {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MembershipBucket")
            .field("key", &self.key)
            .finish()
    }
}
