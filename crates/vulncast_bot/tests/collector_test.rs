//! Tests for the disclosure collector.

use async_trait::async_trait;
use chrono::Utc;
use std::sync::Arc;
use vulncast_bot::{DisclosureCollector, MemoryStore};
use vulncast_core::DisclosureRecord;
use vulncast_error::VulncastResult;
use vulncast_interface::{ContentStore, FeedSource};

/// Mock feed serving a fixed set of disclosures.
struct MockFeed {
    records: Vec<DisclosureRecord>,
}

#[async_trait]
impl FeedSource for MockFeed {
    async fn recent_disclosures(&self, _window_hours: u32) -> VulncastResult<Vec<DisclosureRecord>> {
        Ok(self.records.clone())
    }

    async fn disclosure_details(&self, id: &str) -> VulncastResult<Option<DisclosureRecord>> {
        Ok(self.records.iter().find(|r| r.id == id).cloned())
    }
}

fn disclosure(id: &str, description: &str, severity: Option<f64>) -> DisclosureRecord {
    DisclosureRecord {
        id: id.to_string(),
        published_at: Utc::now(),
        description: description.to_string(),
        references: vec![],
        technical_writeups: vec![],
        severity,
        interesting_factors: vec![],
        processed: false,
    }
}

#[tokio::test]
async fn test_collect_stages_only_interesting_disclosures() {
    let feed = Arc::new(MockFeed {
        records: vec![
            disclosure(
                "CVE-2024-0001",
                "Wormable remote code execution in the mail daemon",
                Some(9.8),
            ),
            disclosure("CVE-2024-0002", "Minor UI glitch", Some(2.0)),
        ],
    });
    let store = Arc::new(MemoryStore::new());

    let collector = DisclosureCollector::new(feed, Arc::clone(&store));
    let staged = collector.collect_recent(48).await.unwrap();

    assert_eq!(staged, 1);
    let backlog = store.unprocessed_disclosures().await.unwrap();
    assert_eq!(backlog.len(), 1);
    assert_eq!(backlog[0].id, "CVE-2024-0001");
    // Classifier reasons are carried on the stored record
    assert!(
        backlog[0]
            .interesting_factors
            .contains(&"high impact".to_string())
    );
    assert!(
        backlog[0]
            .interesting_factors
            .contains(&"critical severity".to_string())
    );
}

#[tokio::test]
async fn test_collect_tolerates_duplicates() {
    let record = disclosure(
        "CVE-2024-0003",
        "Sandbox escape affecting all versions",
        None,
    );
    let feed = Arc::new(MockFeed {
        records: vec![record.clone()],
    });
    let store = Arc::new(MemoryStore::new());

    let collector = DisclosureCollector::new(feed, Arc::clone(&store));
    assert_eq!(collector.collect_recent(48).await.unwrap(), 1);
    // A second pass over the same feed window stages nothing new but succeeds
    assert_eq!(collector.collect_recent(48).await.unwrap(), 0);
    assert_eq!(store.unprocessed_disclosures().await.unwrap().len(), 1);
}
