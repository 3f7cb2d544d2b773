//! Error reporting for the binary
//!
//! Library errors carry full context. At the top level the binary decides
//! how much of it a user sees: errors the user can fix print their own
//! message, store and I/O failures print the operation that failed and
//! leave the detail to debug logging.

/// Errors that know whether the user can act on them
///
/// When `is_user_actionable()` returns `true`, `user_message()` must return
/// `Some(message)`. Otherwise it returns `None`.
pub trait ContextualError: std::error::Error {
    /// True for errors such as empty elements or invalid configuration
    fn is_user_actionable(&self) -> bool;

    fn user_message(&self) -> Option<&str>;
}

/// Log a fatal error with the detail level its kind calls for
///
/// # Examples
/// ```rust,no_run
/// use requeues::core::error_handling::log_error_with_context;
/// use requeues::queue::QueueError;
///
/// log_error_with_context(&QueueError::EmptyElement, "Pushing elements");
/// // Logs: "FATAL: Elements must not be empty"
/// ```
pub fn log_error_with_context<E: ContextualError + std::fmt::Display + std::fmt::Debug>(
    error: &E,
    operation_context: &str,
) {
    match error.user_message() {
        Some(user_msg) if error.is_user_actionable() => log::error!("FATAL: {}", user_msg),
        _ => log::error!("FATAL: {}", operation_context),
    }
    log::debug!("DETAIL: {}", error);
    log::debug!("DEBUG_DETAILS: {:?}", error);
}
