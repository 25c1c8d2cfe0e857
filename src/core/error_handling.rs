//! Generic error handling utilities
//!
//! Errors across the crate report whether they carry a message the operator
//! can act on (a missing setting, a bad config file) or whether they are
//! system failures best summarised by the operation that failed.

/// Trait for errors that can distinguish between user-actionable and system errors
///
/// When `is_user_actionable()` returns `true`, `user_message()` must return
/// `Some(message)`; otherwise it returns `None`.
pub trait ContextualError: std::error::Error {
    /// True when the error carries a specific message the operator can fix
    ///
    /// Configuration problems are user-actionable; I/O failures while
    /// delivering batches are not.
    fn is_user_actionable(&self) -> bool;

    fn user_message(&self) -> Option<&str>;
}

fn headline<'a, E: ContextualError>(error: &'a E, operation_context: &'a str) -> &'a str {
    if error.is_user_actionable() {
        error.user_message().unwrap_or(operation_context)
    } else {
        operation_context
    }
}

/// Log an error that stops the current operation
///
/// The primary line is the user message when there is one, otherwise the
/// operation context. The full error goes to debug level.
///
/// ```rust,no_run
/// # use reqevents::core::error_handling::log_error_with_context;
/// # use reqevents::config::ConfigError;
/// let err = ConfigError::MissingProjectId;
/// log_error_with_context(&err, "Loading configuration");
/// // Logs: "FATAL: Analytics project id is not configured"
/// ```
pub fn log_error_with_context<E: ContextualError + std::fmt::Debug>(
    error: &E,
    operation_context: &str,
) {
    log::error!("FATAL: {}", headline(error, operation_context));
    log::debug!("DETAIL: {}", error);
    log::debug!("DEBUG_DETAILS: {:?}", error);
}

/// Log an error that only disables an optional feature
///
/// Unlike `log_error_with_context`, the full message is shown at warn level
/// since it usually explains how to enable the feature.
pub fn log_warning_with_context<E: ContextualError + std::fmt::Debug>(
    error: &E,
    operation_context: &str,
) {
    log::warn!("{}: {}", headline(error, operation_context), error);
    log::debug!("DEBUG_DETAILS: {:?}", error);
}
