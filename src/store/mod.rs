//! Store capability layer
//!
//! The queues never speak a wire protocol themselves. They drive a
//! [`Store`]: atomic list push/pop, list range reads, set add with
//! added-count feedback, key deletion and pipelined batches.
//!
//! Two implementations ship with the crate:
//!
//! - [`RedisStore`] talks to a Redis server over one synchronous connection
//! - [`MemoryStore`] keeps everything in process with the same list and set
//!   semantics, which makes it the store of choice for tests

mod command;
mod error;
mod memory;
mod redis_store;
mod traits;

pub use command::{StoreCommand, StoreReply};
pub use error::{StoreError, StoreResult};
pub use memory::MemoryStore;
pub use redis_store::RedisStore;
pub use traits::Store;
