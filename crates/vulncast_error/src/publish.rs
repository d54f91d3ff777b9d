//! Publishing error types.

/// Kinds of publishing failures.
///
/// The platform rejects a submission for a handful of reasons; the scheduler
/// treats them all as "abort the rest of this thread", but operators want the
/// distinction in the logs.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum PublishErrorKind {
    /// Platform rate limit hit
    #[display("Rate limited: {}", _0)]
    RateLimited(String),
    /// Content rejected by platform policy
    #[display("Policy rejection: {}", _0)]
    Policy(String),
    /// Authentication or authorization failure
    #[display("Authentication failure: {}", _0)]
    Auth(String),
    /// Network or service transport failure
    #[display("Transport failure: {}", _0)]
    Transport(String),
}

/// Publishing error with location tracking.
///
/// # Examples
///
/// ```
/// use vulncast_error::{PublishError, PublishErrorKind};
///
/// let err = PublishError::new(PublishErrorKind::RateLimited("429".to_string()));
/// assert!(format!("{}", err).contains("Rate limited"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Publish Error: {} at line {} in {}", kind, line, file)]
pub struct PublishError {
    /// The kind of error that occurred
    pub kind: PublishErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl PublishError {
    /// Create a new publishing error with automatic location tracking.
    #[track_caller]
    pub fn new(kind: PublishErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
