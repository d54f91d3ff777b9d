use crate::config::ContentConfig;
use chrono::{DateTime, Datelike, Utc, Weekday};
use rand::seq::SliceRandom;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, error, info, instrument, warn};
use vulncast_core::{CadenceState, DisclosureRecord, PostRecord, annotate, classify};
use vulncast_error::{ConfigError, VulncastResult};
use vulncast_interface::{ContentStore, Generator};

/// How many recent posts to scan when excluding already-covered topics.
const TOPIC_EXCLUSION_WINDOW: usize = 20;

/// Turns classifier-approved disclosures into validated, metadata-enriched
/// post records under daily cadence and quota policy.
///
/// Owns the process-local [`CadenceState`]. The caller must not run two
/// generation passes concurrently; the periodic trigger awaits each pass
/// before scheduling the next.
pub struct ContentOrchestrator<S, G> {
    config: ContentConfig,
    store: Arc<S>,
    generator: Arc<G>,
    cadence: CadenceState,
}

impl<S: ContentStore, G: Generator> ContentOrchestrator<S, G> {
    /// Creates a new orchestrator with fresh cadence state.
    pub fn new(config: ContentConfig, store: Arc<S>, generator: Arc<G>) -> Self {
        Self::with_cadence(config, store, generator, CadenceState::default())
    }

    /// Creates an orchestrator with explicit cadence state.
    ///
    /// Useful in tests that need to start mid-day or mid-quota.
    pub fn with_cadence(
        config: ContentConfig,
        store: Arc<S>,
        generator: Arc<G>,
        cadence: CadenceState,
    ) -> Self {
        Self {
            config,
            store,
            generator,
            cadence,
        }
    }

    /// Current cadence counters.
    pub fn cadence(&self) -> &CadenceState {
        &self.cadence
    }

    /// Runs one generation pass.
    ///
    /// Returns true iff a new post or thread was committed to the store.
    /// Never propagates an error: every fault degrades to a logged `false`.
    #[instrument(skip(self))]
    pub async fn generate_content(&mut self) -> bool {
        self.generate_content_at(Utc::now()).await
    }

    /// Runs one generation pass as of `now`.
    ///
    /// Split out from [`generate_content`](Self::generate_content) so tests
    /// can pin the clock for the weekday and quota gates.
    pub async fn generate_content_at(&mut self, now: DateTime<Utc>) -> bool {
        match self.run_pass(now).await {
            Ok(committed) => committed,
            Err(e) => {
                error!(error = %e, "Content generation pass failed");
                false
            }
        }
    }

    async fn run_pass(&mut self, now: DateTime<Utc>) -> VulncastResult<bool> {
        self.cadence.roll_over(now);

        // Quota check comes before any generation call
        if self.cadence.daily_posts >= self.config.max_daily_posts {
            info!("Daily post limit reached");
            return Ok(false);
        }

        let backlog = self.approved_backlog().await?;
        if backlog.is_empty() {
            info!("No interesting disclosures in backlog");
            return Ok(false);
        }

        if self.thread_eligible(now) && self.try_thread(&backlog, now).await? {
            return Ok(true);
        }

        self.try_single_post(now).await
    }

    /// Up to `backlog_size` unprocessed disclosures the classifier approves,
    /// in store-return order.
    async fn approved_backlog(&self) -> VulncastResult<Vec<DisclosureRecord>> {
        let unprocessed = self.store.unprocessed_disclosures().await?;
        debug!(count = unprocessed.len(), "Fetched unprocessed disclosures");

        Ok(unprocessed
            .into_iter()
            .filter(|record| classify(record).interesting)
            .take(self.config.backlog_size)
            .collect())
    }

    /// Whether a thread may be committed right now: none yet today, UTC
    /// weekday, and at least the configured gap since the previous thread.
    fn thread_eligible(&self, now: DateTime<Utc>) -> bool {
        if self.cadence.daily_threads >= 1 {
            return false;
        }

        if matches!(now.weekday(), Weekday::Sat | Weekday::Sun) {
            return false;
        }

        match self.cadence.hours_since_last_thread(now) {
            Some(hours) if hours < self.config.min_hours_between_threads => false,
            _ => true,
        }
    }

    /// Tries each backlog candidate until one yields an accepted thread.
    ///
    /// A failing candidate never aborts the loop; its error is logged and the
    /// next candidate is tried.
    async fn try_thread(
        &mut self,
        backlog: &[DisclosureRecord],
        now: DateTime<Utc>,
    ) -> VulncastResult<bool> {
        for disclosure in backlog {
            match self.try_thread_candidate(disclosure, now).await {
                Ok(true) => return Ok(true),
                Ok(false) => {}
                Err(e) => {
                    error!(disclosure = %disclosure.id, error = %e, "Thread candidate failed");
                }
            }
        }

        debug!("Thread backlog exhausted without an accepted thread");
        Ok(false)
    }

    async fn try_thread_candidate(
        &mut self,
        disclosure: &DisclosureRecord,
        now: DateTime<Utc>,
    ) -> VulncastResult<bool> {
        // Consumed whether or not the attempt succeeds; rejected candidates
        // are not retried on later passes
        self.store.mark_disclosure_processed(&disclosure.id).await?;

        let history = self
            .store
            .recent_posts(self.config.history_context_size)
            .await?;
        let outcome = self.generator.generate_thread(disclosure, &history).await?;

        if !outcome.valid {
            warn!(disclosure = %disclosure.id, "Generated thread failed validation");
            return Ok(false);
        }
        if outcome.posts.is_empty() {
            warn!(disclosure = %disclosure.id, "No posts generated");
            return Ok(false);
        }
        if outcome.posts.len() > self.config.max_thread_length {
            warn!(
                disclosure = %disclosure.id,
                posts = outcome.posts.len(),
                "Generated thread too long"
            );
            return Ok(false);
        }

        self.commit_thread(disclosure, &outcome.posts, now).await?;
        info!(disclosure = %disclosure.id, posts = outcome.posts.len(), "Committed thread");
        Ok(true)
    }

    /// Persists an accepted thread: one record per post with a 1-based
    /// position and a shared batch timestamp, then advances the cadence.
    async fn commit_thread(
        &mut self,
        disclosure: &DisclosureRecord,
        posts: &[String],
        batch: DateTime<Utc>,
    ) -> VulncastResult<()> {
        for (index, content) in posts.iter().enumerate() {
            let annotation = annotate(content);
            let record = PostRecord {
                id: 0,
                content: content.clone(),
                created_at: batch,
                scheduled_at: Some(batch),
                published: false,
                external_id: None,
                is_thread: true,
                thread_position: Some(index as u32 + 1),
                disclosure_id: Some(disclosure.id.clone()),
                technical_depth: annotation.technical_depth,
                key_concepts: annotation.key_concepts,
                prerequisites_explained: annotation.prerequisites,
            };
            self.store.add_post(record).await?;
        }

        self.cadence.record_thread(posts.len() as u32, batch);
        Ok(())
    }

    /// Falls back to a single post on a topic not covered recently.
    async fn try_single_post(&mut self, now: DateTime<Utc>) -> VulncastResult<bool> {
        let topic = self.choose_topic().await?;
        let history = self
            .store
            .recent_posts(self.config.history_context_size)
            .await?;
        let outcome = self
            .generator
            .generate_single_post(&topic, &history)
            .await?;

        if !outcome.valid || outcome.content.is_empty() {
            warn!(topic = %topic, "Generated post rejected");
            return Ok(false);
        }

        let annotation = annotate(&outcome.content);
        let record = PostRecord {
            id: 0,
            content: outcome.content,
            created_at: now,
            scheduled_at: Some(now),
            published: false,
            external_id: None,
            is_thread: false,
            thread_position: None,
            disclosure_id: None,
            technical_depth: annotation.technical_depth,
            key_concepts: annotation.key_concepts,
            prerequisites_explained: annotation.prerequisites,
        };
        self.store.add_post(record).await?;
        self.cadence.record_post();

        info!(topic = %topic, "Committed single post");
        Ok(true)
    }

    /// Picks a topic from the configured pool, excluding topics tagged as key
    /// concepts in the most recent posts. An exclusion that empties the pool
    /// falls back to the full pool; topic exhaustion is not an error.
    async fn choose_topic(&self) -> VulncastResult<String> {
        let recent = self.store.recent_posts(TOPIC_EXCLUSION_WINDOW).await?;
        let covered: HashSet<&str> = recent
            .iter()
            .flat_map(|post| post.key_concepts.iter().map(String::as_str))
            .collect();

        let mut pool: Vec<&String> = self
            .config
            .topics
            .iter()
            .filter(|topic| !covered.contains(topic.as_str()))
            .collect();
        if pool.is_empty() {
            pool = self.config.topics.iter().collect();
        }

        pool.choose(&mut rand::thread_rng())
            .map(|topic| (*topic).clone())
            .ok_or_else(|| ConfigError::new("Topic pool is empty").into())
    }
}
