//! Feed collaborator error types.

/// Error raised by the disclosure feed collaborator.
///
/// Feed failures are transient: an attempt that fails produces nothing and is
/// naturally retried on the next scheduled pass.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Feed Error: {} at line {} in {}", message, line, file)]
pub struct FeedError {
    /// Error message
    pub message: String,
    /// Line number where the error occurred
    pub line: u32,
    /// File where the error occurred
    pub file: &'static str,
}

impl FeedError {
    /// Create a new FeedError with the given message at the current location.
    #[track_caller]
    pub fn new(message: impl Into<String>) -> Self {
        let location = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: location.line(),
            file: location.file(),
        }
    }
}
