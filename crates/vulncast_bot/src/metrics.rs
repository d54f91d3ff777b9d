//! Metrics collection for bot operations.

use serde::Serialize;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

/// Metrics collector shared by the generation and publishing loops.
#[derive(Debug, Clone, Default)]
pub struct BotMetrics {
    inner: Arc<BotMetricsInner>,
}

#[derive(Debug, Default)]
struct BotMetricsInner {
    generation_executions: AtomicU64,
    generation_failures: AtomicU64,
    generation_last_success: parking_lot::Mutex<Option<Instant>>,

    publish_executions: AtomicU64,
    publish_failures: AtomicU64,
    publish_last_success: parking_lot::Mutex<Option<Instant>>,
}

impl BotMetrics {
    /// Creates a new metrics collector.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a generation pass.
    pub fn record_generation_execution(&self) {
        self.inner
            .generation_executions
            .fetch_add(1, Ordering::Relaxed);
    }

    /// Records a generation pass that committed content.
    pub fn record_generation_success(&self) {
        *self.inner.generation_last_success.lock() = Some(Instant::now());
    }

    /// Records a generation pass that produced nothing.
    pub fn record_generation_failure(&self) {
        self.inner
            .generation_failures
            .fetch_add(1, Ordering::Relaxed);
    }

    /// Records a publish attempt.
    pub fn record_publish_execution(&self) {
        self.inner.publish_executions.fetch_add(1, Ordering::Relaxed);
    }

    /// Records a fully delivered post or thread.
    pub fn record_publish_success(&self) {
        *self.inner.publish_last_success.lock() = Some(Instant::now());
    }

    /// Records a failed or partially delivered publish.
    pub fn record_publish_failure(&self) {
        self.inner.publish_failures.fetch_add(1, Ordering::Relaxed);
    }

    /// Gets generation pass count.
    pub fn generation_executions(&self) -> u64 {
        self.inner.generation_executions.load(Ordering::Relaxed)
    }

    /// Gets generation failure count.
    pub fn generation_failures(&self) -> u64 {
        self.inner.generation_failures.load(Ordering::Relaxed)
    }

    /// Gets time since the last successful generation pass.
    pub fn generation_time_since_success(&self) -> Option<std::time::Duration> {
        self.inner
            .generation_last_success
            .lock()
            .map(|instant| instant.elapsed())
    }

    /// Gets publish attempt count.
    pub fn publish_executions(&self) -> u64 {
        self.inner.publish_executions.load(Ordering::Relaxed)
    }

    /// Gets publish failure count.
    pub fn publish_failures(&self) -> u64 {
        self.inner.publish_failures.load(Ordering::Relaxed)
    }

    /// Gets time since the last fully delivered publish.
    pub fn publish_time_since_success(&self) -> Option<std::time::Duration> {
        self.inner
            .publish_last_success
            .lock()
            .map(|instant| instant.elapsed())
    }

    /// Gets overall success rate (0.0 - 1.0).
    pub fn overall_success_rate(&self) -> f64 {
        let executions = self.generation_executions() + self.publish_executions();
        let failures = self.generation_failures() + self.publish_failures();

        if executions == 0 {
            return 1.0;
        }

        let successes = executions.saturating_sub(failures);
        successes as f64 / executions as f64
    }

    /// Creates a serializable snapshot of current metrics.
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            generation: BotMetricSnapshot {
                executions: self.generation_executions(),
                failures: self.generation_failures(),
                seconds_since_success: self
                    .generation_time_since_success()
                    .map(|d| d.as_secs()),
            },
            publishing: BotMetricSnapshot {
                executions: self.publish_executions(),
                failures: self.publish_failures(),
                seconds_since_success: self.publish_time_since_success().map(|d| d.as_secs()),
            },
            overall_success_rate: self.overall_success_rate(),
        }
    }
}

/// Serializable snapshot of bot metrics.
#[derive(Debug, Clone, Serialize)]
pub struct MetricsSnapshot {
    /// Generation loop metrics
    pub generation: BotMetricSnapshot,
    /// Publishing loop metrics
    pub publishing: BotMetricSnapshot,
    /// Overall success rate across both loops
    pub overall_success_rate: f64,
}

/// Serializable snapshot of one loop's metrics.
#[derive(Debug, Clone, Serialize)]
pub struct BotMetricSnapshot {
    /// Number of executions
    pub executions: u64,
    /// Number of failures
    pub failures: u64,
    /// Seconds since last success
    pub seconds_since_success: Option<u64>,
}
