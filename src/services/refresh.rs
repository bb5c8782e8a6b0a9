//! Auto-refresh scheduling
//!
//! Each registered panel gets its own recurring timer. The scheduler owns
//! every timer it creates, so shutdown is a single `clear` instead of
//! orphaned intervals running for the page's lifetime.

use crate::model::domain::Dataset;
use std::time::{Duration, Instant};

/// Refresh interval used when a panel does not configure one
pub const DEFAULT_INTERVAL: Duration = Duration::from_millis(30_000);

#[derive(Debug)]
struct Timer {
    dataset: Dataset,
    interval: Duration,
    next_due: Instant,
}

#[derive(Debug, Default)]
pub struct RefreshScheduler {
    timers: Vec<Timer>,
}

impl RefreshScheduler {
    pub fn new() -> Self {
        Self { timers: Vec::new() }
    }

    /// Register a recurring timer for a panel; `None` uses the default
    /// interval. Multiple registrations run independently.
    pub fn register(&mut self, dataset: Dataset, interval: Option<Duration>) {
        self.register_at(dataset, interval, Instant::now());
    }

    pub fn register_at(&mut self, dataset: Dataset, interval: Option<Duration>, now: Instant) {
        let interval = interval.unwrap_or(DEFAULT_INTERVAL);
        self.timers.push(Timer {
            dataset,
            interval,
            next_due: now + interval,
        });
    }

    /// Collect the panels whose timers have fired and rearm them
    pub fn due(&mut self) -> Vec<Dataset> {
        self.due_at(Instant::now())
    }

    pub fn due_at(&mut self, now: Instant) -> Vec<Dataset> {
        let mut fired = Vec::new();
        for timer in &mut self.timers {
            if now >= timer.next_due {
                fired.push(timer.dataset);
                timer.next_due = now + timer.interval;
            }
        }
        fired
    }

    /// Tear down every timer
    pub fn clear(&mut self) {
        self.timers.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.timers.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fires_after_interval() {
        let mut scheduler = RefreshScheduler::new();
        let start = Instant::now();
        scheduler.register_at(Dataset::Stores, Some(Duration::from_secs(30)), start);

        assert!(scheduler.due_at(start + Duration::from_secs(29)).is_empty());
        assert_eq!(
            scheduler.due_at(start + Duration::from_secs(30)),
            vec![Dataset::Stores]
        );
    }

    #[test]
    fn test_rearms_after_firing() {
        let mut scheduler = RefreshScheduler::new();
        let start = Instant::now();
        scheduler.register_at(Dataset::Orders, Some(Duration::from_secs(10)), start);

        let first = start + Duration::from_secs(10);
        assert_eq!(scheduler.due_at(first).len(), 1);
        assert!(scheduler.due_at(first + Duration::from_secs(9)).is_empty());
        assert_eq!(scheduler.due_at(first + Duration::from_secs(10)).len(), 1);
    }

    #[test]
    fn test_default_interval_is_30s() {
        let mut scheduler = RefreshScheduler::new();
        let start = Instant::now();
        scheduler.register_at(Dataset::Products, None, start);

        assert!(scheduler
            .due_at(start + DEFAULT_INTERVAL - Duration::from_millis(1))
            .is_empty());
        assert_eq!(scheduler.due_at(start + DEFAULT_INTERVAL).len(), 1);
    }

    #[test]
    fn test_multiple_timers_run_independently() {
        let mut scheduler = RefreshScheduler::new();
        let start = Instant::now();
        scheduler.register_at(Dataset::Stores, Some(Duration::from_secs(5)), start);
        scheduler.register_at(Dataset::Orders, Some(Duration::from_secs(8)), start);

        assert_eq!(
            scheduler.due_at(start + Duration::from_secs(5)),
            vec![Dataset::Stores]
        );
        assert_eq!(
            scheduler.due_at(start + Duration::from_secs(8)),
            vec![Dataset::Orders]
        );
    }

    #[test]
    fn test_clear_tears_down_all_timers() {
        let mut scheduler = RefreshScheduler::new();
        scheduler.register(Dataset::Stores, None);
        scheduler.clear();
        assert!(scheduler.is_empty());
    }
}
