//! Trait definitions for the collaborators the orchestration layer depends on.

use crate::{GeneratedPost, GeneratedThread};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use vulncast_core::{DisclosureRecord, PostRecord};
use vulncast_error::VulncastResult;

/// Contract for the upstream disclosure feed.
///
/// Implementations own the HTTP fetch, pagination, and field parsing, and
/// must normalize upstream records before handing them over: severity metrics
/// reduced to a single numeric score, reference URLs split into general
/// references and technical writeups.
#[async_trait]
pub trait FeedSource: Send + Sync {
    /// Fetch disclosures published within the last `window_hours`.
    async fn recent_disclosures(&self, window_hours: u32) -> VulncastResult<Vec<DisclosureRecord>>;

    /// Fetch full details for a single disclosure, if the upstream knows it.
    async fn disclosure_details(&self, id: &str) -> VulncastResult<Option<DisclosureRecord>>;
}

/// Contract for the text-generation service.
#[async_trait]
pub trait Generator: Send + Sync {
    /// Generate a multi-post thread covering a disclosure, given recent post
    /// history as context.
    async fn generate_thread(
        &self,
        disclosure: &DisclosureRecord,
        history: &[PostRecord],
    ) -> VulncastResult<GeneratedThread>;

    /// Generate a single post on a topic, given recent post history as
    /// context.
    async fn generate_single_post(
        &self,
        topic: &str,
        history: &[PostRecord],
    ) -> VulncastResult<GeneratedPost>;
}

/// Contract for the publishing platform.
#[async_trait]
pub trait Publisher: Send + Sync {
    /// Submit one post, optionally as a reply to a previously returned
    /// external identifier. Returns the platform identifier of the new post.
    ///
    /// # Errors
    ///
    /// Fails with a [`vulncast_error::PublishError`] when the platform
    /// rejects the submission (rate limit, policy, auth, transport).
    async fn publish(&self, content: &str, reply_to: Option<&str>) -> VulncastResult<String>;
}

/// Contract for the record store.
///
/// The orchestration layer needs only this operation set; how the records are
/// persisted is the implementation's business. The store is expected to
/// serialize its own writes.
#[async_trait]
pub trait ContentStore: Send + Sync {
    /// Insert a disclosure record.
    async fn add_disclosure(&self, record: DisclosureRecord) -> VulncastResult<()>;

    /// Flip the `processed` flag on a disclosure.
    async fn mark_disclosure_processed(&self, id: &str) -> VulncastResult<()>;

    /// All disclosures not yet consumed by the orchestrator.
    async fn unprocessed_disclosures(&self) -> VulncastResult<Vec<DisclosureRecord>>;

    /// Insert a post record, returning the assigned identity.
    async fn add_post(&self, record: PostRecord) -> VulncastResult<i64>;

    /// The most recent posts, newest first, up to `limit`.
    async fn recent_posts(&self, limit: usize) -> VulncastResult<Vec<PostRecord>>;

    /// Posts whose scheduled time falls within `[start, end]`, both ends
    /// inclusive.
    async fn posts_in_timeframe(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> VulncastResult<Vec<PostRecord>>;

    /// Record a successful publish: sets the published flag and the
    /// platform-assigned external identifier.
    async fn mark_post_published(&self, id: i64, external_id: &str) -> VulncastResult<()>;
}
