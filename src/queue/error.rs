//! Queue Error Types

use crate::core::error_handling::ContextualError;
use crate::store::StoreError;

#[derive(Debug, thiserror::Error)]
pub enum QueueError {
    #[error("Cannot push an empty element")]
    EmptyElement,

    #[error("Store operation {operation} failed on {key}: {source}")]
    StoreOperation {
        operation: &'static str,
        key: String,
        #[source]
        source: StoreError,
    },
}

impl QueueError {
    /// Adapter for `map_err` that tags a store failure with its operation and key
    pub(crate) fn store(
        operation: &'static str,
        key: impl Into<String>,
    ) -> impl FnOnce(StoreError) -> Self {
        let key = key.into();
        move |source| QueueError::StoreOperation {
            operation,
            key,
            source,
        }
    }
}

impl ContextualError for QueueError {
    fn is_user_actionable(&self) -> bool {
        matches!(self, QueueError::EmptyElement)
    }

    fn user_message(&self) -> Option<&str> {
        match self {
            QueueError::EmptyElement => Some("Elements must not be empty"),
            QueueError::StoreOperation { .. } => None,
        }
    }
}

/// Result type for queue operations
pub type QueueResult<T> = Result<T, QueueError>;
