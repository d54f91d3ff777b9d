//! Generation outcome types.
//!
//! The generation service performs its own self-validation (accuracy, style,
//! length) and reports the result through an explicit `valid` flag rather
//! than an error: failed validation is a decision, not a fault. The
//! orchestrator treats an invalid or empty outcome identically to a transport
//! failure.

use serde::{Deserialize, Serialize};

/// Outcome of a thread-generation request.
///
/// # Examples
///
/// ```
/// use vulncast_interface::GeneratedThread;
///
/// let outcome = GeneratedThread {
///     valid: true,
///     posts: vec!["1/ intro".to_string(), "2/ details".to_string()],
/// };
/// assert!(outcome.valid);
/// assert_eq!(outcome.posts.len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedThread {
    /// Whether the service's self-validation passed
    pub valid: bool,
    /// The thread posts in publish order
    pub posts: Vec<String>,
}

/// Outcome of a single-post generation request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedPost {
    /// Whether the service's self-validation passed
    pub valid: bool,
    /// The post text
    pub content: String,
}
