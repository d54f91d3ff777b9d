//! Normalized vulnerability disclosure records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A normalized vulnerability disclosure.
///
/// Created at the feed boundary, which is responsible for reducing upstream
/// severity metrics to a single numeric score and splitting reference URLs
/// into general references and technical writeups. The orchestrator flips
/// `processed` once it has consumed the record; nothing else mutates it.
///
/// # Examples
///
/// ```
/// use vulncast_core::DisclosureRecord;
/// use chrono::Utc;
///
/// let record = DisclosureRecord {
///     id: "CVE-2024-0001".to_string(),
///     published_at: Utc::now(),
///     description: "Remote code execution in the frobnicator".to_string(),
///     references: vec![],
///     technical_writeups: vec!["https://example.com/writeup".to_string()],
///     severity: Some(9.8),
///     interesting_factors: vec![],
///     processed: false,
/// };
///
/// assert!(!record.processed);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisclosureRecord {
    /// Stable unique identifier (e.g. "CVE-2024-0001")
    pub id: String,
    /// Upstream publication timestamp
    pub published_at: DateTime<Utc>,
    /// Free-text description of the vulnerability
    pub description: String,
    /// General reference URLs
    pub references: Vec<String>,
    /// URLs pointing at technical writeups
    pub technical_writeups: Vec<String>,
    /// Normalized numeric severity score, when the upstream record carried one
    pub severity: Option<f64>,
    /// Reasons the classifier found this disclosure interesting
    pub interesting_factors: Vec<String>,
    /// Whether the orchestrator has already consumed this record
    pub processed: bool,
}
