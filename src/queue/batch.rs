//! Block slicing for chunked pipelined writes
//!
//! A large batch push is split into contiguous index ranges, each sent as
//! one store command inside a single pipeline. Ranges are produced in
//! increasing order and must be submitted in that order so the list keeps
//! the caller's ordering.

use std::num::NonZeroUsize;
use std::ops::Range;

/// Maximum number of elements sent in one store command
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BlockSize {
    /// The whole batch goes out as a single command
    #[default]
    Unbounded,
    /// At most this many elements per command
    Limited(NonZeroUsize),
}

impl BlockSize {
    /// Limited block size, or `None` when `size` is zero
    pub fn limited(size: usize) -> Option<Self> {
        NonZeroUsize::new(size).map(BlockSize::Limited)
    }

    /// Block size from an optional configured value; absent means unbounded
    pub fn from_config(size: Option<usize>) -> Option<Self> {
        match size {
            None => Some(BlockSize::Unbounded),
            Some(size) => Self::limited(size),
        }
    }
}

/// Split `[0, total)` into half-open ranges no longer than `block_size`.
///
/// `total == 0` yields no ranges at all, never a single empty range.
pub fn slice(total: usize, block_size: BlockSize) -> Vec<Range<usize>> {
    if total == 0 {
        return Vec::new();
    }

    match block_size {
        BlockSize::Unbounded => vec![0..total],
        BlockSize::Limited(size) => {
            let size = size.get();
            (0..total)
                .step_by(size)
                .map(|start| start..(start + size).min(total))
                .collect()
        }
    }
}
