use std::sync::Arc;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{error, info, instrument, warn};
use vulncast_core::classify;
use vulncast_error::VulncastResult;
use vulncast_interface::{ContentStore, FeedSource};

/// Backoff after a failed collection pass.
const ERROR_BACKOFF: Duration = Duration::from_secs(300);

/// Pulls recent disclosures from the feed, keeps the interesting ones, and
/// stages them in the store for the orchestrator.
pub struct DisclosureCollector<F, S> {
    feed: Arc<F>,
    store: Arc<S>,
}

impl<F: FeedSource, S: ContentStore> DisclosureCollector<F, S> {
    /// Creates a new collector.
    pub fn new(feed: Arc<F>, store: Arc<S>) -> Self {
        Self { feed, store }
    }

    /// Runs one collection pass over the last `window_hours` of the feed.
    ///
    /// Classifier-rejected records are dropped on the floor; accepted records
    /// are stored with their reasons as `interesting_factors`. A record the
    /// store already knows is skipped with a warning, not an error. Returns
    /// the number of newly staged disclosures.
    #[instrument(skip(self))]
    pub async fn collect_recent(&self, window_hours: u32) -> VulncastResult<usize> {
        let records = self.feed.recent_disclosures(window_hours).await?;
        info!(count = records.len(), "Retrieved disclosures from feed");

        let mut staged = 0;
        for mut record in records {
            let verdict = classify(&record);
            if !verdict.interesting {
                continue;
            }
            record.interesting_factors = verdict.reasons;

            let id = record.id.clone();
            match self.store.add_disclosure(record).await {
                Ok(()) => staged += 1,
                Err(e) => warn!(disclosure = %id, error = %e, "Skipping disclosure"),
            }
        }

        info!(staged, "Staged interesting disclosures");
        Ok(staged)
    }

    /// Runs collection forever at the given interval.
    ///
    /// A failed pass is logged and followed by a backoff; the loop never
    /// terminates on its own.
    pub async fn run(&self, window_hours: u32, interval: Duration) {
        info!("Disclosure collector started");

        loop {
            match self.collect_recent(window_hours).await {
                Ok(_) => sleep(interval).await,
                Err(e) => {
                    error!(error = %e, "Collection pass failed");
                    sleep(ERROR_BACKOFF).await;
                }
            }
        }
    }
}
