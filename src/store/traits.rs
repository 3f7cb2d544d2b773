//! The store capability interface
//!
//! Queues only ever talk to the store through this trait. Implementations
//! own their connection handling; queues receive an `Arc<dyn Store>` and
//! never open or close connections themselves.

use crate::store::command::{StoreCommand, StoreReply};
use crate::store::error::StoreResult;

/// List, set and pipeline primitives of a Redis-style key-value store
///
/// Every method is one synchronous request/response. `pipeline` sends all
/// of its commands in a single round trip; commands are applied in order
/// but the batch as a whole is not atomic, so a failure part way through
/// leaves the earlier commands applied.
///
/// # Example
///
/// ```rust
/// use requeues::store::{MemoryStore, Store, StoreCommand, StoreReply};
///
/// let store = MemoryStore::new();
/// let replies = store
///     .pipeline(&[
///         StoreCommand::ListPushTail { key: "k".into(), values: vec!["a".into()] },
///         StoreCommand::ListLength { key: "k".into() },
///     ])
///     .unwrap();
/// assert_eq!(replies, vec![StoreReply::Count(1), StoreReply::Count(1)]);
/// ```
pub trait Store: Send + Sync {
    /// Insert `values` at the head, one at a time; returns the new length
    fn list_push_head(&self, key: &str, values: &[String]) -> StoreResult<u64>;

    /// Append `values` at the tail; returns the new length
    fn list_push_tail(&self, key: &str, values: &[String]) -> StoreResult<u64>;

    fn list_pop_head(&self, key: &str) -> StoreResult<Option<String>>;

    fn list_pop_tail(&self, key: &str) -> StoreResult<Option<String>>;

    /// Length of the list, zero when the key does not exist
    fn list_length(&self, key: &str) -> StoreResult<u64>;

    /// Inclusive range read; negative indices count from the tail
    fn list_range(&self, key: &str, from: i64, to: i64) -> StoreResult<Vec<String>>;

    /// 1 if `value` was newly added to the set, 0 if it was already a member
    fn set_add(&self, key: &str, value: &str) -> StoreResult<u64>;

    /// Number of keys that existed and were removed
    fn delete_keys(&self, keys: &[String]) -> StoreResult<u64>;

    /// Run `commands` in one round trip, replies in command order
    fn pipeline(&self, commands: &[StoreCommand]) -> StoreResult<Vec<StoreReply>>;

    /// Run a single command through the typed methods
    fn execute(&self, command: &StoreCommand) -> StoreResult<StoreReply> {
        let reply = match command {
            StoreCommand::ListPushHead { key, values } => {
                StoreReply::Count(self.list_push_head(key, values)?)
            }
            StoreCommand::ListPushTail { key, values } => {
                StoreReply::Count(self.list_push_tail(key, values)?)
            }
            StoreCommand::ListPopHead { key } => StoreReply::Element(self.list_pop_head(key)?),
            StoreCommand::ListPopTail { key } => StoreReply::Element(self.list_pop_tail(key)?),
            StoreCommand::ListLength { key } => StoreReply::Count(self.list_length(key)?),
            StoreCommand::ListRange { key, from, to } => {
                StoreReply::Elements(self.list_range(key, *from, *to)?)
            }
            StoreCommand::SetAdd { key, value } => StoreReply::Count(self.set_add(key, value)?),
            StoreCommand::DeleteKeys { keys } => StoreReply::Count(self.delete_keys(keys)?),
        };
        Ok(reply)
    }
}
