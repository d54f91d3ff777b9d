use serde::{Deserialize, Serialize};
use std::path::Path;
use vulncast_error::{ConfigError, VulncastResult};

/// Configuration for the bot server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BotConfig {
    /// Content generation configuration
    pub content: ContentConfig,
    /// Publish scheduling configuration
    pub posting: PostingConfig,
}

impl BotConfig {
    /// Load bot configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// A missing file, unreadable file, or malformed document is a fatal
    /// [`ConfigError`]; there is no runtime recovery from bad configuration.
    pub fn from_file(path: impl AsRef<Path>) -> VulncastResult<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        toml::from_str(&content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)).into())
    }
}

/// Configuration for the content orchestrator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentConfig {
    /// Maximum number of posts in a generated thread
    pub max_thread_length: usize,
    /// Maximum posts committed per UTC day
    pub max_daily_posts: u32,
    /// Minimum gap between threads (hours)
    #[serde(default = "default_min_hours_between_threads")]
    pub min_hours_between_threads: f64,
    /// How many backlog disclosures to try per pass
    #[serde(default = "default_backlog_size")]
    pub backlog_size: usize,
    /// How many recent posts to hand the generator as context
    #[serde(default = "default_history_context_size")]
    pub history_context_size: usize,
    /// Seconds between generation passes
    #[serde(default = "default_generation_interval_secs")]
    pub generation_interval_secs: u64,
    /// Topic pool for single posts
    #[serde(default = "default_topics")]
    pub topics: Vec<String>,
}

/// Configuration for the publish scheduler.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostingConfig {
    /// Daily wall-clock windows (UTC) during which publishing is permitted
    pub time_windows: Vec<WindowConfig>,
    /// Platform character limit per post
    #[serde(default = "default_character_limit")]
    pub character_limit: usize,
    /// Pause between chained posts (seconds)
    #[serde(default = "default_inter_post_delay_secs")]
    pub inter_post_delay_secs: f64,
    /// Sleep between window/backlog polls (seconds)
    #[serde(default = "default_poll_interval_secs")]
    pub poll_interval_secs: f64,
}

/// One posting window, wall-clock "HH:MM" strings in UTC.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WindowConfig {
    /// Window start, inclusive
    pub start: String,
    /// Window end, inclusive
    pub end: String,
}

fn default_min_hours_between_threads() -> f64 {
    4.0
}

fn default_backlog_size() -> usize {
    5
}

fn default_history_context_size() -> usize {
    100
}

fn default_generation_interval_secs() -> u64 {
    3600
}

fn default_character_limit() -> usize {
    280
}

fn default_inter_post_delay_secs() -> f64 {
    1.0
}

fn default_poll_interval_secs() -> f64 {
    300.0
}

fn default_topics() -> Vec<String> {
    [
        "race condition",
        "privilege escalation",
        "memory corruption",
        "sandbox escape",
        "side channel",
        "type confusion",
        "authentication bypass",
        "remote code execution",
        "use after free",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_fill_optional_fields() {
        let config: BotConfig = toml::from_str(
            r#"
            [content]
            max_thread_length = 7
            max_daily_posts = 10

            [posting]
            time_windows = [{ start = "14:00", end = "16:00" }]
            "#,
        )
        .unwrap();

        assert_eq!(config.content.min_hours_between_threads, 4.0);
        assert_eq!(config.content.backlog_size, 5);
        assert_eq!(config.content.history_context_size, 100);
        assert_eq!(config.posting.character_limit, 280);
        assert_eq!(config.posting.inter_post_delay_secs, 1.0);
        assert_eq!(config.posting.poll_interval_secs, 300.0);
        assert!(!config.content.topics.is_empty());
    }

    #[test]
    fn test_missing_required_field_fails() {
        let result: Result<BotConfig, _> = toml::from_str(
            r#"
            [content]
            max_thread_length = 7

            [posting]
            time_windows = []
            "#,
        );
        assert!(result.is_err());
    }
}
