//! Queue integration test modules

pub mod redis_store;
pub mod workflow;
