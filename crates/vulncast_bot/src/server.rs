use crate::config::BotConfig;
use crate::metrics::BotMetrics;
use crate::orchestrator::ContentOrchestrator;
use crate::scheduler::PublishScheduler;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{info, instrument};
use vulncast_error::VulncastResult;
use vulncast_interface::{ContentStore, Generator, Publisher};

/// Composition root: wires the orchestrator and scheduler to their shared
/// store and runs both for the life of the process.
pub struct BotServer<S, G, P> {
    orchestrator: ContentOrchestrator<S, G>,
    scheduler: PublishScheduler<S, P>,
    generation_interval: Duration,
    metrics: BotMetrics,
}

impl<S, G, P> BotServer<S, G, P>
where
    S: ContentStore + 'static,
    G: Generator + 'static,
    P: Publisher + 'static,
{
    /// Creates a new bot server.
    ///
    /// # Errors
    ///
    /// Fails on invalid posting-window configuration.
    pub fn new(
        config: BotConfig,
        store: Arc<S>,
        generator: Arc<G>,
        publisher: Arc<P>,
    ) -> VulncastResult<Self> {
        let metrics = BotMetrics::new();
        let generation_interval = Duration::from_secs(config.content.generation_interval_secs);
        let orchestrator =
            ContentOrchestrator::new(config.content, Arc::clone(&store), generator);
        let scheduler =
            PublishScheduler::new(&config.posting, store, publisher, metrics.clone())?;

        Ok(Self {
            orchestrator,
            scheduler,
            generation_interval,
            metrics,
        })
    }

    /// Handle to the shared metrics collector.
    pub fn metrics(&self) -> BotMetrics {
        self.metrics.clone()
    }

    /// Starts both loops; never returns under normal operation.
    ///
    /// The generation task awaits each pass before sleeping out the interval,
    /// so a pass can never overlap itself. Shutting either loop down is a
    /// process-level concern.
    #[instrument(skip(self))]
    pub async fn start(self) {
        info!("Starting bot server");

        let metrics = self.metrics.clone();
        let interval = self.generation_interval;
        let mut orchestrator = self.orchestrator;

        tokio::spawn(async move {
            loop {
                metrics.record_generation_execution();
                if orchestrator.generate_content().await {
                    metrics.record_generation_success();
                } else {
                    metrics.record_generation_failure();
                }
                sleep(interval).await;
            }
        });

        // The scheduler drives the main loop
        self.scheduler.run().await;
    }
}
