use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

/// Event meter: counts marks and reports the mean rate since creation.
#[derive(Debug)]
pub struct Meter {
    count: AtomicU64,
    started_at: Instant,
}

impl Meter {
    pub fn new() -> Self {
        Self {
            count: AtomicU64::new(0),
            started_at: Instant::now(),
        }
    }

    /// Record one event.
    pub fn mark(&self) {
        self.mark_n(1);
    }

    pub fn mark_n(&self, n: u64) {
        self.count.fetch_add(n, Ordering::Relaxed);
    }

    pub fn count(&self) -> u64 {
        self.count.load(Ordering::Relaxed)
    }

    /// Events per second since creation (0.0 before any time has elapsed).
    pub fn mean_rate(&self) -> f64 {
        let count = self.count();
        let elapsed = self.started_at.elapsed().as_secs_f64();
        if count == 0 || elapsed <= 0.0 {
            return 0.0;
        }
        count as f64 / elapsed
    }
}

impl Default for Meter {
    fn default() -> Self {
        Self::new()
    }
}
