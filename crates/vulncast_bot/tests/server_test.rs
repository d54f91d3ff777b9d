//! Tests for the bot server composition root.

use async_trait::async_trait;
use chrono::Utc;
use std::sync::Arc;
use std::time::Duration;
use vulncast_bot::{
    BotConfig, BotServer, ContentConfig, MemoryStore, PostingConfig, WindowConfig,
};
use vulncast_core::{DisclosureRecord, PostRecord};
use vulncast_error::VulncastResult;
use vulncast_interface::{ContentStore, GeneratedPost, GeneratedThread, Generator, Publisher};

/// Mock generation service that always validates.
struct MockGenerator;

#[async_trait]
impl Generator for MockGenerator {
    async fn generate_thread(
        &self,
        _disclosure: &DisclosureRecord,
        _history: &[PostRecord],
    ) -> VulncastResult<GeneratedThread> {
        Ok(GeneratedThread {
            valid: true,
            posts: vec!["1/ the bug".to_string()],
        })
    }

    async fn generate_single_post(
        &self,
        _topic: &str,
        _history: &[PostRecord],
    ) -> VulncastResult<GeneratedPost> {
        Ok(GeneratedPost {
            valid: true,
            content: "a post".to_string(),
        })
    }
}

struct MockPublisher;

#[async_trait]
impl Publisher for MockPublisher {
    async fn publish(&self, _content: &str, _reply_to: Option<&str>) -> VulncastResult<String> {
        Ok("ext-1".to_string())
    }
}

fn bot_config() -> BotConfig {
    BotConfig {
        content: ContentConfig {
            max_thread_length: 7,
            max_daily_posts: 10,
            min_hours_between_threads: 4.0,
            backlog_size: 5,
            history_context_size: 100,
            generation_interval_secs: 3600,
            topics: vec!["heap".to_string()],
        },
        posting: PostingConfig {
            // A window the wall clock practically never falls in keeps the
            // publishing side idle for the duration of the test
            time_windows: vec![WindowConfig {
                start: "00:00".to_string(),
                end: "00:00".to_string(),
            }],
            character_limit: 280,
            inter_post_delay_secs: 0.0,
            poll_interval_secs: 300.0,
        },
    }
}

fn interesting_disclosure() -> DisclosureRecord {
    DisclosureRecord {
        id: "CVE-2024-0001".to_string(),
        published_at: Utc::now(),
        description: "Remote code execution via a race condition in the scheduler".to_string(),
        references: vec![],
        technical_writeups: vec![],
        severity: Some(9.8),
        interesting_factors: vec![],
        processed: false,
    }
}

#[tokio::test]
async fn test_invalid_posting_window_fails_construction() {
    let mut config = bot_config();
    config.posting.time_windows = vec![WindowConfig {
        start: "25:99".to_string(),
        end: "16:00".to_string(),
    }];

    let result = BotServer::new(
        config,
        Arc::new(MemoryStore::new()),
        Arc::new(MockGenerator),
        Arc::new(MockPublisher),
    );
    assert!(result.is_err());
}

#[tokio::test]
async fn test_metrics_handle_is_shared() {
    let server = BotServer::new(
        bot_config(),
        Arc::new(MemoryStore::new()),
        Arc::new(MockGenerator),
        Arc::new(MockPublisher),
    )
    .unwrap();

    let metrics = server.metrics();
    metrics.record_publish_execution();
    assert_eq!(server.metrics().publish_executions(), 1);
}

#[tokio::test]
async fn test_start_drives_one_generation_pass() {
    let store = Arc::new(MemoryStore::new());
    store
        .add_disclosure(interesting_disclosure())
        .await
        .unwrap();

    let server = BotServer::new(
        bot_config(),
        Arc::clone(&store),
        Arc::new(MockGenerator),
        Arc::new(MockPublisher),
    )
    .unwrap();
    let metrics = server.metrics();

    // The first pass fires immediately; the hour-long interval keeps a second
    // one from starting before the timeout cuts the server off
    let _ = tokio::time::timeout(Duration::from_millis(100), server.start()).await;

    assert_eq!(metrics.generation_executions(), 1);
    assert_eq!(metrics.generation_failures(), 0);
    assert_eq!(metrics.publish_executions(), 0);
    assert!(!store.recent_posts(10).await.unwrap().is_empty());
}
