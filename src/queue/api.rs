//! Public API for the queue system
//!
//! External modules should import from here rather than directly from internal modules.
//! See module documentation for complete usage examples and architecture details.

// Queue variants
pub use crate::queue::bucket::MembershipBucket;
pub use crate::queue::dedup::DeduplicatingQueue;
pub use crate::queue::ordered::OrderedQueue;

// Construction options and results
pub use crate::queue::batch::BlockSize;
pub use crate::queue::types::{BatchOutcome, KeepPrevious, QueueEnd, QueueOptions, SharedStore};

// Key derivation
pub use crate::queue::keys::{derive_key, QueueIdentity, StoreKey};

// Error handling
pub use crate::queue::error::{QueueError, QueueResult};

// Store capability
pub use crate::store::{MemoryStore, RedisStore, Store};
