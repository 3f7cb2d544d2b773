//! Store-backed queues
//!
//! Two queue variants built on a Redis-style list and set store:
//!
//! - **OrderedQueue**: a plain queue under one list key. Push and pop at
//!   either end, range reads, chunked pipelined batch pushes.
//! - **DeduplicatingQueue**: an ordered queue gated by a membership set.
//!   Each distinct element is admitted once for the lifetime of the set.
//!
//! A standalone **MembershipBucket** is exposed too.
//!
//! # Architecture
//!
//! ```text
//!          push / push_batch                 pop / range / length
//!                 │                                  │
//! ┌───────────────┼──────────────────────────────────┼───┐
//! │               ▼      DeduplicatingQueue          │   │
//! │     ┌──────────────────┐  admitted  ┌──────────────┐ │
//! │     │ MembershipBucket │──────────► │ OrderedQueue │ │
//! │     └────────┬─────────┘            └──────┬───────┘ │
//! └──────────────┼─────────────────────────────┼─────────┘
//!                │ SADD                        │ LPUSH RPUSH LPOP RPOP LRANGE LLEN
//!                ▼                             ▼
//!   queue:<path>:type:smart_bucket:of:<kind>   queue:<path>:type:smart:of:<kind>
//! ```
//!
//! Keys are derived by [`keys::derive_key`]; batches are chunked by
//! [`batch::slice`] and sent as one pipeline.
//!
//! # Example Usage
//!
//! ```rust
//! use requeues::queue::{DeduplicatingQueue, QueueEnd, QueueOptions};
//! use requeues::store::MemoryStore;
//! use std::sync::Arc;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let store = Arc::new(MemoryStore::new());
//! let queue = DeduplicatingQueue::open(store, ["test", "testing"], QueueOptions::default())?;
//!
//! let outcome = queue.push_batch(
//!     ["egg", "bacon", "spam", "spam", "spam", "42", "spam"],
//!     QueueEnd::Tail,
//! )?;
//! assert_eq!(outcome.length, 4);
//! assert_eq!(queue.first_n(3)?, vec!["egg", "bacon", "spam"]);
//!
//! while let Some(element) = queue.pop(QueueEnd::Head)? {
//!     println!("Got: {}", element);
//! }
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```

pub mod api;
pub mod batch;
mod bucket;
mod dedup;
mod error;
pub mod keys;
mod ordered;
mod types;

pub use batch::BlockSize;
pub use bucket::MembershipBucket;
pub use dedup::DeduplicatingQueue;
pub use error::{QueueError, QueueResult};
pub use keys::{QueueIdentity, StoreKey};
pub use ordered::OrderedQueue;
pub use types::{BatchOutcome, KeepPrevious, QueueEnd, QueueOptions, SharedStore};

#[cfg(test)]
mod tests;
