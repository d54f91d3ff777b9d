use crate::config::PostingConfig;
use crate::metrics::BotMetrics;
use chrono::{DateTime, Duration as ChronoDuration, NaiveTime, Utc};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, error, info, instrument};
use vulncast_core::PostRecord;
use vulncast_error::{ConfigError, VulncastResult};
use vulncast_interface::{ContentStore, Publisher};

/// How far ahead of now the scheduler looks for due posts.
const DUE_LOOKAHEAD_HOURS: i64 = 4;
/// Pause after a publish attempt, success or failure.
const POST_PUBLISH_PAUSE: Duration = Duration::from_secs(60);
/// Backoff after an error inside the scheduling loop.
const ERROR_BACKOFF: Duration = Duration::from_secs(300);

/// Gates, sequences, and truncates pending posts for delivery.
///
/// Holds the parsed posting windows for the process lifetime; everything else
/// it needs lives in the store.
pub struct PublishScheduler<S, P> {
    store: Arc<S>,
    publisher: Arc<P>,
    windows: Vec<(NaiveTime, NaiveTime)>,
    character_limit: usize,
    inter_post_delay: Duration,
    poll_interval: Duration,
    metrics: BotMetrics,
}

impl<S: ContentStore, P: Publisher> PublishScheduler<S, P> {
    /// Creates a scheduler from posting configuration.
    ///
    /// # Errors
    ///
    /// An unparseable posting window is a fatal [`ConfigError`].
    pub fn new(
        config: &PostingConfig,
        store: Arc<S>,
        publisher: Arc<P>,
        metrics: BotMetrics,
    ) -> VulncastResult<Self> {
        let windows = config
            .time_windows
            .iter()
            .map(|window| {
                let start = NaiveTime::parse_from_str(&window.start, "%H:%M").map_err(|e| {
                    ConfigError::new(format!("Invalid window start '{}': {}", window.start, e))
                })?;
                let end = NaiveTime::parse_from_str(&window.end, "%H:%M").map_err(|e| {
                    ConfigError::new(format!("Invalid window end '{}': {}", window.end, e))
                })?;
                Ok((start, end))
            })
            .collect::<VulncastResult<Vec<_>>>()?;

        Ok(Self {
            store,
            publisher,
            windows,
            character_limit: config.character_limit,
            inter_post_delay: Duration::from_secs_f64(config.inter_post_delay_secs),
            poll_interval: Duration::from_secs_f64(config.poll_interval_secs),
            metrics,
        })
    }

    /// True iff the UTC time-of-day falls within any configured window,
    /// inclusive at both ends.
    pub fn is_in_window(&self, now: DateTime<Utc>) -> bool {
        let time = now.time();
        self.windows
            .iter()
            .any(|(start, end)| *start <= time && time <= *end)
    }

    /// The next post or thread due within the lookahead horizon.
    ///
    /// When the earliest pending record belongs to a thread, the whole thread
    /// is returned sorted by position, paired with the minimum scheduled time
    /// among its members; otherwise the single earliest record alone.
    pub async fn next_due(
        &self,
        now: DateTime<Utc>,
    ) -> VulncastResult<Option<(Vec<PostRecord>, DateTime<Utc>)>> {
        let horizon = now + ChronoDuration::hours(DUE_LOOKAHEAD_HOURS);
        let mut pending: Vec<PostRecord> = self
            .store
            .posts_in_timeframe(now, horizon)
            .await?
            .into_iter()
            .filter(|post| !post.published && post.scheduled_at.is_some())
            .collect();
        pending.sort_by_key(|post| post.scheduled_at);

        let Some(first) = pending.first().cloned() else {
            return Ok(None);
        };

        if first.is_thread {
            let mut thread: Vec<PostRecord> = pending
                .iter()
                .filter(|post| post.same_thread(&first) && post.thread_position.is_some())
                .cloned()
                .collect();
            thread.sort_by_key(|post| post.thread_position);
            let due = thread.iter().filter_map(|post| post.scheduled_at).min();
            Ok(due.map(|due| (thread, due)))
        } else {
            let due = first.scheduled_at;
            Ok(due.map(|due| (vec![first], due)))
        }
    }

    /// Truncates content to the platform character limit.
    ///
    /// Short content passes through unchanged. Over-long content is cut to
    /// limit minus three characters plus an ellipsis; if that strands an
    /// unbalanced parenthetical, the cut moves to just before the dangling
    /// opening paren instead. Best effort, not a guarantee.
    pub fn truncate(&self, content: &str) -> String {
        let limit = self.character_limit;
        if content.chars().count() <= limit {
            return content.to_string();
        }

        let prefix: String = content.chars().take(limit.saturating_sub(3)).collect();
        let ellipsized = format!("{}...", prefix);
        if balanced(&ellipsized) {
            return ellipsized;
        }

        // Last "(" past the last ")" opens the dangling explanation; cutting
        // there always lands under the limit because the search runs over the
        // already-shortened prefix
        let dangling_open = match (prefix.rfind('('), prefix.rfind(')')) {
            (Some(open), Some(close)) if open > close => Some(open),
            (Some(open), None) => Some(open),
            _ => None,
        };

        match dangling_open {
            Some(open) => prefix[..open].trim_end().to_string(),
            None => ellipsized,
        }
    }

    /// True when the content fits the platform limit.
    pub fn is_within_limit(&self, content: &str) -> bool {
        content.chars().count() <= self.character_limit
    }

    /// Publishes a post sequence as a linear reply chain.
    ///
    /// The first post goes out standalone; each subsequent post replies to
    /// the external identifier of the one before it. The store is updated
    /// after every successful submission, and the configured delay separates
    /// submissions. The first failure abandons the remainder without rolling
    /// back what already went out.
    #[instrument(skip(self, posts))]
    pub async fn publish_thread(&self, posts: &[PostRecord]) -> bool {
        let mut reply_to: Option<String> = None;

        for post in posts {
            let content = self.truncate(&post.content);

            let external_id = match self.publisher.publish(&content, reply_to.as_deref()).await {
                Ok(id) => id,
                Err(e) => {
                    error!(post = post.id, error = %e, "Publish failed, abandoning rest of thread");
                    return false;
                }
            };

            if let Err(e) = self.store.mark_post_published(post.id, &external_id).await {
                error!(post = post.id, error = %e, "Failed to record publish");
                return false;
            }

            debug!(post = post.id, external_id = %external_id, "Published");
            reply_to = Some(external_id);

            // Platform rate-limit compliance
            sleep(self.inter_post_delay).await;
        }

        true
    }

    /// Runs the scheduling loop forever.
    ///
    /// Outside a posting window or with nothing due, polls at the configured
    /// interval. A due time in the future is slept out exactly. Errors inside
    /// an iteration are logged and followed by a longer backoff; no error
    /// terminates the loop.
    pub async fn run(&self) {
        info!("Publish scheduler started");

        loop {
            if let Err(e) = self.run_once().await {
                error!(error = %e, "Scheduler iteration failed");
                sleep(ERROR_BACKOFF).await;
            }
        }
    }

    async fn run_once(&self) -> VulncastResult<()> {
        let now = Utc::now();

        if !self.is_in_window(now) {
            sleep(self.poll_interval).await;
            return Ok(());
        }

        let Some((posts, due)) = self.next_due(now).await? else {
            sleep(self.poll_interval).await;
            return Ok(());
        };

        let now = Utc::now();
        if due > now {
            let wait = (due - now).to_std().unwrap_or_default();
            debug!(wait_secs = wait.as_secs(), "Waiting for scheduled time");
            sleep(wait).await;
        }

        self.metrics.record_publish_execution();
        if self.publish_thread(&posts).await {
            self.metrics.record_publish_success();
        } else {
            self.metrics.record_publish_failure();
            error!("Failed to publish scheduled content");
        }

        sleep(POST_PUBLISH_PAUSE).await;
        Ok(())
    }
}

/// Whether open and close paren counts agree.
fn balanced(content: &str) -> bool {
    let opens = content.chars().filter(|&c| c == '(').count();
    let closes = content.chars().filter(|&c| c == ')').count();
    opens == closes
}
