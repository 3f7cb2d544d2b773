//! Type definitions for the queue system
//!
//! Options and small value types shared by the ordered queue, the
//! membership bucket and the deduplicating queue.

use crate::queue::batch::BlockSize;
use crate::queue::keys::DEFAULT_ELEMENT_KIND;
use crate::store::Store;
use std::sync::Arc;

/// Shared handle to the store every queue is built on
pub type SharedStore = Arc<dyn Store>;

/// Which end of the list an operation works on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum QueueEnd {
    /// Front of the queue, the next element to be popped by default
    Head,
    /// Back of the queue, where pushes go by default
    #[default]
    Tail,
}

/// What to do with existing contents when a queue is opened
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum KeepPrevious {
    /// Reuse whatever the store already holds under the queue's keys
    #[default]
    Keep,
    /// Delete the queue's keys before handing the queue out
    Discard,
}

impl From<bool> for KeepPrevious {
    fn from(keep: bool) -> Self {
        if keep {
            KeepPrevious::Keep
        } else {
            KeepPrevious::Discard
        }
    }
}

/// Construction options common to every queue variant
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueueOptions {
    /// Element kind tag, part of the derived key
    pub element_kind: String,
    /// Existing contents policy applied on open
    pub keep_previous: KeepPrevious,
    /// Block size used by batch pushes unless overridden per call
    pub block_size: BlockSize,
}

impl Default for QueueOptions {
    fn default() -> Self {
        Self {
            element_kind: DEFAULT_ELEMENT_KIND.to_string(),
            keep_previous: KeepPrevious::Keep,
            block_size: BlockSize::Unbounded,
        }
    }
}

impl QueueOptions {
    pub fn element_kind(mut self, element_kind: impl Into<String>) -> Self {
        self.element_kind = element_kind.into();
        self
    }

    pub fn keep_previous(mut self, keep_previous: KeepPrevious) -> Self {
        self.keep_previous = keep_previous;
        self
    }

    pub fn block_size(mut self, block_size: BlockSize) -> Self {
        self.block_size = block_size;
        self
    }
}

/// Result of a deduplicating batch push
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchOutcome {
    /// Elements newly admitted and appended to the ordered queue
    pub admitted: usize,
    /// Length of the ordered queue once the batch was applied
    pub length: u64,
}
