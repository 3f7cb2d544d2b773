//! Application Error Types

use crate::app::cli::ConfigError;
use crate::core::error_handling::ContextualError;
use crate::queue::QueueError;
use crate::store::StoreError;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Cannot open store at {url}: {source}")]
    StoreOpen {
        url: String,
        #[source]
        source: StoreError,
    },

    #[error(transparent)]
    Queue(#[from] QueueError),

    #[error("No queue given, use --queue <SEGMENTS>")]
    MissingQueue,

    #[error("Cannot write output: {0}")]
    Output(#[from] std::io::Error),
}

impl ContextualError for AppError {
    fn is_user_actionable(&self) -> bool {
        match self {
            AppError::Config(e) => e.is_user_actionable(),
            AppError::Queue(e) => e.is_user_actionable(),
            AppError::MissingQueue => true,
            AppError::StoreOpen { .. } | AppError::Output(_) => false,
        }
    }

    fn user_message(&self) -> Option<&str> {
        match self {
            AppError::Config(e) => e.user_message(),
            AppError::Queue(e) => e.user_message(),
            AppError::MissingQueue => Some("No queue given, use --queue <SEGMENTS>"),
            AppError::StoreOpen { .. } | AppError::Output(_) => None,
        }
    }
}
