//! Store Error Types

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Redis command failed: {0}")]
    Redis(#[from] redis::RedisError),

    #[error("Key {key} holds a value of the wrong kind")]
    WrongType { key: String },

    #[error("Wrong number of arguments for {command}")]
    WrongArity { command: &'static str },

    #[error("Unexpected reply to {command}: expected {expected}")]
    UnexpectedReply {
        command: &'static str,
        expected: &'static str,
    },

    #[error("Store unavailable: {message}")]
    Unavailable { message: String },
}

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;
