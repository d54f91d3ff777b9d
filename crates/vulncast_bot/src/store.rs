//! In-process content store.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use vulncast_core::{DisclosureRecord, PostRecord};
use vulncast_error::{StoreError, StoreErrorKind, VulncastResult};
use vulncast_interface::ContentStore;

/// In-memory [`ContentStore`] implementation.
///
/// Backs a single-process deployment and the integration tests. Writes are
/// serialized by the interior mutex; the orchestration layer accepts
/// last-writer-wins on the rare overlapping write and does not ask for more.
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: Mutex<MemoryStoreInner>,
}

#[derive(Debug, Default)]
struct MemoryStoreInner {
    disclosures: Vec<DisclosureRecord>,
    posts: Vec<PostRecord>,
    next_post_id: i64,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ContentStore for MemoryStore {
    async fn add_disclosure(&self, record: DisclosureRecord) -> VulncastResult<()> {
        let mut inner = self.inner.lock();
        if inner.disclosures.iter().any(|d| d.id == record.id) {
            return Err(StoreError::new(StoreErrorKind::Duplicate(record.id)).into());
        }
        inner.disclosures.push(record);
        Ok(())
    }

    async fn mark_disclosure_processed(&self, id: &str) -> VulncastResult<()> {
        let mut inner = self.inner.lock();
        let disclosure = inner
            .disclosures
            .iter_mut()
            .find(|d| d.id == id)
            .ok_or_else(|| StoreError::new(StoreErrorKind::NotFound(id.to_string())))?;
        disclosure.processed = true;
        Ok(())
    }

    async fn unprocessed_disclosures(&self) -> VulncastResult<Vec<DisclosureRecord>> {
        let inner = self.inner.lock();
        Ok(inner
            .disclosures
            .iter()
            .filter(|d| !d.processed)
            .cloned()
            .collect())
    }

    async fn add_post(&self, mut record: PostRecord) -> VulncastResult<i64> {
        let mut inner = self.inner.lock();
        inner.next_post_id += 1;
        record.id = inner.next_post_id;
        let id = record.id;
        inner.posts.push(record);
        Ok(id)
    }

    async fn recent_posts(&self, limit: usize) -> VulncastResult<Vec<PostRecord>> {
        let inner = self.inner.lock();
        let mut posts: Vec<PostRecord> = inner.posts.clone();
        posts.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        posts.truncate(limit);
        Ok(posts)
    }

    async fn posts_in_timeframe(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> VulncastResult<Vec<PostRecord>> {
        let inner = self.inner.lock();
        Ok(inner
            .posts
            .iter()
            .filter(|p| {
                p.scheduled_at
                    .is_some_and(|at| start <= at && at <= end)
            })
            .cloned()
            .collect())
    }

    async fn mark_post_published(&self, id: i64, external_id: &str) -> VulncastResult<()> {
        let mut inner = self.inner.lock();
        let post = inner
            .posts
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| StoreError::new(StoreErrorKind::NotFound(format!("post {}", id))))?;
        post.published = true;
        post.external_id = Some(external_id.to_string());
        Ok(())
    }
}
