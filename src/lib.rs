//! Plain and deduplicating queues on top of a Redis-style list and set store
//!
//! - [`queue`]: `OrderedQueue`, `MembershipBucket`, `DeduplicatingQueue`
//! - [`store`]: the `Store` capability with Redis and in-memory backends
//! - [`app`]: configuration, queue factory and the `requeues` binary
//! - [`core`]: logging, error reporting and build metadata

pub mod app;
pub mod core;
pub mod queue;
pub mod store;
