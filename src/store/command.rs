//! Pipelined store commands and their replies

use crate::store::error::{StoreError, StoreResult};

/// One store command, as queued into a pipeline
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreCommand {
    ListPushHead { key: String, values: Vec<String> },
    ListPushTail { key: String, values: Vec<String> },
    ListPopHead { key: String },
    ListPopTail { key: String },
    ListLength { key: String },
    ListRange { key: String, from: i64, to: i64 },
    SetAdd { key: String, value: String },
    DeleteKeys { keys: Vec<String> },
}

impl StoreCommand {
    /// Wire name of the command, used in logs and error messages
    pub fn name(&self) -> &'static str {
        match self {
            StoreCommand::ListPushHead { .. } => "LPUSH",
            StoreCommand::ListPushTail { .. } => "RPUSH",
            StoreCommand::ListPopHead { .. } => "LPOP",
            StoreCommand::ListPopTail { .. } => "RPOP",
            StoreCommand::ListLength { .. } => "LLEN",
            StoreCommand::ListRange { .. } => "LRANGE",
            StoreCommand::SetAdd { .. } => "SADD",
            StoreCommand::DeleteKeys { .. } => "DEL",
        }
    }
}

/// Reply to a single store command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreReply {
    /// Lengths and counts
    Count(u64),
    /// A popped element, if there was one
    Element(Option<String>),
    /// A range of elements
    Elements(Vec<String>),
}

impl StoreReply {
    pub fn into_count(self, command: &'static str) -> StoreResult<u64> {
        match self {
            StoreReply::Count(count) => Ok(count),
            _ => Err(StoreError::UnexpectedReply {
                command,
                expected: "count",
            }),
        }
    }

    pub fn into_element(self, command: &'static str) -> StoreResult<Option<String>> {
        match self {
            StoreReply::Element(element) => Ok(element),
            _ => Err(StoreError::UnexpectedReply {
                command,
                expected: "element",
            }),
        }
    }

    pub fn into_elements(self, command: &'static str) -> StoreResult<Vec<String>> {
        match self {
            StoreReply::Elements(elements) => Ok(elements),
            _ => Err(StoreError::UnexpectedReply {
                command,
                expected: "elements",
            }),
        }
    }
}
