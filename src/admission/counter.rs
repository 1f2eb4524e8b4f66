//! Per-client fixed-window counter state.

use std::time::{Duration, Instant};

/// Fixed-window request counter for a single client.
///
/// Holds plain fields rather than atomics: same-key serialization is the
/// registry's responsibility, so a counter is only ever touched under its
/// map entry guard.
#[derive(Debug, Clone)]
pub(crate) struct ClientCounter {
    /// When the current counting window began
    pub window_start: Instant,
    /// Requests observed since `window_start`, at least 1 once created
    pub count: u64,
}

impl ClientCounter {
    /// Create a counter for a first-seen client, recording its first request.
    pub fn start(now: Instant) -> Self {
        Self {
            window_start: now,
            count: 1,
        }
    }

    /// Whether the window had already elapsed at `now`.
    ///
    /// Expiry is strict: a counter exactly at the window boundary is still
    /// active.
    pub fn expired(&self, now: Instant, window: Duration) -> bool {
        now.duration_since(self.window_start) > window
    }

    /// Begin a fresh window at `now`, counting the request that opened it.
    pub fn restart(&mut self, now: Instant) {
        self.window_start = now;
        self.count = 1;
    }

    /// Record one more request in the active window.
    pub fn record(&mut self) {
        self.count += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_start_counts_first_request() {
        let counter = ClientCounter::start(Instant::now());
        assert_eq!(counter.count, 1);
    }

    #[test]
    fn test_expiry_is_strict() {
        let window = Duration::from_secs(60);
        let start = Instant::now();
        let counter = ClientCounter::start(start);

        assert!(!counter.expired(start, window));
        assert!(!counter.expired(start + window, window));
        assert!(counter.expired(start + window + Duration::from_millis(1), window));
    }

    #[test]
    fn test_restart_resets_window_and_count() {
        let start = Instant::now();
        let mut counter = ClientCounter::start(start);
        counter.record();
        counter.record();
        assert_eq!(counter.count, 3);

        let later = start + Duration::from_secs(90);
        counter.restart(later);
        assert_eq!(counter.count, 1);
        assert_eq!(counter.window_start, later);
    }
}
