//! Daily posting cadence counters.

use chrono::{DateTime, Utc};

/// Process-local cadence and quota state.
///
/// Tracks how much content has been produced "today" (UTC). Not persisted and
/// not lock-protected: the orchestrator owns exactly one instance and the
/// caller must not run two generation passes concurrently.
///
/// # Examples
///
/// ```
/// use vulncast_core::CadenceState;
/// use chrono::Utc;
///
/// let mut cadence = CadenceState::default();
/// cadence.record_thread(3, Utc::now());
/// assert_eq!(cadence.daily_posts, 3);
/// assert_eq!(cadence.daily_threads, 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CadenceState {
    /// Posts committed today
    pub daily_posts: u32,
    /// Threads committed today
    pub daily_threads: u32,
    /// Batch timestamp of the most recent thread
    pub last_thread_at: Option<DateTime<Utc>>,
}

impl CadenceState {
    /// Zeroes the daily counters when the UTC calendar date has advanced past
    /// the date of the last recorded thread.
    ///
    /// A missing last-thread timestamp counts as an earlier day, so the
    /// counters read zero until the first thread lands.
    pub fn roll_over(&mut self, now: DateTime<Utc>) {
        let advanced = self
            .last_thread_at
            .is_none_or(|last| now.date_naive() > last.date_naive());
        if advanced {
            self.daily_posts = 0;
            self.daily_threads = 0;
        }
    }

    /// Records a committed thread of `len` posts batched at `at`.
    pub fn record_thread(&mut self, len: u32, at: DateTime<Utc>) {
        self.daily_threads += 1;
        self.daily_posts += len;
        self.last_thread_at = Some(at);
    }

    /// Records a committed single post.
    pub fn record_post(&mut self) {
        self.daily_posts += 1;
    }

    /// Hours elapsed since the last thread, or `None` if no thread has been
    /// recorded yet.
    pub fn hours_since_last_thread(&self, now: DateTime<Utc>) -> Option<f64> {
        self.last_thread_at
            .map(|last| (now - last).num_seconds() as f64 / 3600.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_roll_over_resets_on_next_day() {
        let day = Utc.with_ymd_and_hms(2024, 3, 4, 14, 0, 0).unwrap();
        let next_day = Utc.with_ymd_and_hms(2024, 3, 5, 0, 5, 0).unwrap();

        let mut cadence = CadenceState::default();
        cadence.record_thread(3, day);
        cadence.record_post();
        assert_eq!(cadence.daily_posts, 4);

        cadence.roll_over(next_day);
        assert_eq!(cadence.daily_posts, 0);
        assert_eq!(cadence.daily_threads, 0);
        // The last-thread timestamp survives the reset
        assert_eq!(cadence.last_thread_at, Some(day));
    }

    #[test]
    fn test_roll_over_keeps_counters_same_day() {
        let morning = Utc.with_ymd_and_hms(2024, 3, 4, 9, 0, 0).unwrap();
        let evening = Utc.with_ymd_and_hms(2024, 3, 4, 21, 0, 0).unwrap();

        let mut cadence = CadenceState::default();
        cadence.record_thread(2, morning);

        cadence.roll_over(evening);
        assert_eq!(cadence.daily_posts, 2);
        assert_eq!(cadence.daily_threads, 1);
    }

    #[test]
    fn test_roll_over_with_no_thread_yet() {
        let now = Utc.with_ymd_and_hms(2024, 3, 4, 9, 0, 0).unwrap();

        let mut cadence = CadenceState::default();
        cadence.record_post();
        cadence.roll_over(now);
        assert_eq!(cadence.daily_posts, 0);
    }

    #[test]
    fn test_hours_since_last_thread() {
        let thread_at = Utc.with_ymd_and_hms(2024, 3, 4, 9, 0, 0).unwrap();
        let now = Utc.with_ymd_and_hms(2024, 3, 4, 15, 30, 0).unwrap();

        let mut cadence = CadenceState::default();
        assert!(cadence.hours_since_last_thread(now).is_none());

        cadence.record_thread(1, thread_at);
        let hours = cadence.hours_since_last_thread(now).unwrap();
        assert!((hours - 6.5).abs() < 1e-9);
    }
}
