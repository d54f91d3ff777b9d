//! Decision and orchestration layer for the Vulncast content bot.
//!
//! Two long-running tasks share a store:
//! - **ContentOrchestrator**: drains the disclosure backlog, invokes the
//!   generation contract, and commits validated, metadata-enriched post
//!   records under daily cadence and quota policy
//! - **PublishScheduler**: gates on posting windows, sequences thread posts
//!   by position, truncates to the platform limit, and delivers through the
//!   publishing contract
//!
//! [`BotServer`] spawns both and runs them for the life of the process.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod collector;
mod config;
mod metrics;
mod orchestrator;
mod scheduler;
mod server;
mod store;

pub use collector::DisclosureCollector;
pub use config::{BotConfig, ContentConfig, PostingConfig, WindowConfig};
pub use metrics::{BotMetricSnapshot, BotMetrics, MetricsSnapshot};
pub use orchestrator::ContentOrchestrator;
pub use scheduler::PublishScheduler;
pub use server::BotServer;
pub use store::MemoryStore;
