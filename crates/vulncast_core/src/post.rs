//! Post records produced by the orchestrator and consumed by the scheduler.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A social post awaiting or past publication.
///
/// Created unpublished by the orchestrator and mutated exactly once by the
/// scheduler, which sets `published` and `external_id` after a successful
/// submission.
///
/// Invariant: when `is_thread` is true, `thread_position` is set and unique
/// within the thread group. Thread membership is keyed on a shared
/// `created_at` batch timestamp; position order is publish order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostRecord {
    /// Store-assigned identity
    pub id: i64,
    /// Post text
    pub content: String,
    /// Creation timestamp; shared by every member of a thread batch
    pub created_at: DateTime<Utc>,
    /// When the scheduler should publish this post
    pub scheduled_at: Option<DateTime<Utc>>,
    /// Whether the post has been delivered to the platform
    pub published: bool,
    /// Platform-assigned identifier, set after a successful publish
    pub external_id: Option<String>,
    /// Whether this post belongs to a thread
    pub is_thread: bool,
    /// 1-based position within the thread, when `is_thread` is set
    pub thread_position: Option<u32>,
    /// Identifier of the originating disclosure, when there is one
    pub disclosure_id: Option<String>,
    /// Estimated technical depth on a 1-5 scale
    pub technical_depth: u8,
    /// Technical concepts covered by the post
    pub key_concepts: Vec<String>,
    /// Parenthetical explanations extracted from the post text
    pub prerequisites_explained: Vec<String>,
}

impl PostRecord {
    /// True when this record and `other` belong to the same thread batch.
    pub fn same_thread(&self, other: &PostRecord) -> bool {
        self.is_thread && other.is_thread && self.created_at == other.created_at
    }
}
