use std::sync::atomic::{AtomicI64, Ordering};

/// Monotonic-by-convention signed counter.
#[derive(Debug, Default)]
pub struct Counter {
    count: AtomicI64,
}

impl Counter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Increment by 1.
    pub fn inc(&self) {
        self.inc_by(1);
    }

    pub fn inc_by(&self, n: i64) {
        self.count.fetch_add(n, Ordering::Relaxed);
    }

    /// Decrement by 1.
    pub fn dec(&self) {
        self.dec_by(1);
    }

    pub fn dec_by(&self, n: i64) {
        self.count.fetch_sub(n, Ordering::Relaxed);
    }

    pub fn count(&self) -> i64 {
        self.count.load(Ordering::Relaxed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inc_and_dec() {
        let c = Counter::new();
        c.inc();
        c.inc_by(5);
        c.dec();
        assert_eq!(c.count(), 5);
        c.dec_by(7);
        assert_eq!(c.count(), -2);
    }
}
