//! Top-level error wrapper types.

use crate::{ConfigError, FeedError, GenerationError, PublishError, StoreError};

/// Foundation error enum covering every collaborator boundary in the
/// workspace.
///
/// # Examples
///
/// ```
/// use vulncast_error::{VulncastError, FeedError};
///
/// let feed_err = FeedError::new("Connection failed");
/// let err: VulncastError = feed_err.into();
/// assert!(format!("{}", err).contains("Feed Error"));
/// ```
#[derive(Debug, derive_more::From, derive_more::Display, derive_more::Error)]
pub enum VulncastErrorKind {
    /// Configuration error
    #[from(ConfigError)]
    Config(ConfigError),
    /// Disclosure feed error
    #[from(FeedError)]
    Feed(FeedError),
    /// Text-generation service error
    #[from(GenerationError)]
    Generation(GenerationError),
    /// Publishing platform error
    #[from(PublishError)]
    Publish(PublishError),
    /// Store error
    #[from(StoreError)]
    Store(StoreError),
}

/// Vulncast error with kind discrimination.
///
/// # Examples
///
/// ```
/// use vulncast_error::{VulncastResult, ConfigError};
///
/// fn might_fail() -> VulncastResult<()> {
///     Err(ConfigError::new("Missing field"))?
/// }
///
/// match might_fail() {
///     Ok(_) => println!("Success"),
///     Err(e) => println!("Error: {}", e),
/// }
/// ```
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("Vulncast Error: {}", _0)]
pub struct VulncastError(Box<VulncastErrorKind>);

impl VulncastError {
    /// Create a new error from a kind.
    pub fn new(kind: VulncastErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &VulncastErrorKind {
        &self.0
    }
}

// Generic From implementation for any type that converts to VulncastErrorKind
impl<T> From<T> for VulncastError
where
    T: Into<VulncastErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

/// Result type for Vulncast operations.
///
/// # Examples
///
/// ```
/// use vulncast_error::{VulncastResult, StoreError, StoreErrorKind};
///
/// fn lookup() -> VulncastResult<String> {
///     Err(StoreError::new(StoreErrorKind::NotFound("post 42".to_string())))?
/// }
/// ```
pub type VulncastResult<T> = std::result::Result<T, VulncastError>;
